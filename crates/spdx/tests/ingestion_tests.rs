//! Integration tests for package ingestion
//!
//! - source artifact checksums and working-directory relative paths
//! - concurrent file attachment through a shared package

use std::sync::Arc;
use std::thread;

use sbomkit_core::config::SbomkitConfig;
use sbomkit_spdx::{ErrorKind, File, HashAlgorithm, Package, PackageOptions};

const ARTIFACT: &[u8] = b"release artifact\n";
const ARTIFACT_SHA256: &str = "2459cfc17228ee4883b0a5516980c0c12d2220f4da0e08a608f31bdeae59f92c";
const ARTIFACT_SHA512: &str = "cc40585c5ff3a0aeba2cf744fc788b36167a9d0000e5251f85e85dcfe6c30b0b65e25069d01df78be0849af625e47f89ec8328862e98e02dbf64df65b470aba4";

/// Source file under the working directory gets a relative file name
#[test]
fn test_read_source_file_inside_work_dir() {
    let work_dir = tempfile::tempdir().unwrap();
    let artifact = work_dir.path().join("dist").join("hello.tar.gz");
    std::fs::create_dir_all(artifact.parent().unwrap()).unwrap();
    std::fs::write(&artifact, ARTIFACT).unwrap();

    let mut pkg =
        Package::new("hello").with_options(PackageOptions::new(work_dir.path().to_path_buf()));
    pkg.read_source_file(&artifact).unwrap();

    assert_eq!(pkg.checksum.get("SHA256").unwrap(), ARTIFACT_SHA256);
    assert_eq!(pkg.checksum.get("SHA512").unwrap(), ARTIFACT_SHA512);
    assert_eq!(pkg.checksum.len(), 2);
    assert_eq!(
        pkg.file_name,
        std::path::Path::new("dist").join("hello.tar.gz").display().to_string()
    );
    assert_eq!(pkg.source_file, artifact.display().to_string());

    pkg.id = "Package-hello".to_owned();
    let out = pkg.render().unwrap();
    assert!(out.contains(&format!("PackageChecksum: SHA256: {ARTIFACT_SHA256}\n")));
    assert!(out.contains(&format!("PackageChecksum: SHA512: {ARTIFACT_SHA512}\n")));
    assert!(out.contains("PackageFileName: dist"));
}

/// Source file outside the working directory keeps its full path
#[test]
fn test_read_source_file_outside_work_dir() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("hello.tar.gz");
    std::fs::write(&artifact, ARTIFACT).unwrap();

    let mut pkg = Package::new("hello").with_options(PackageOptions::new("/definitely/elsewhere"));
    pkg.read_source_file(&artifact).unwrap();

    assert_eq!(pkg.file_name, artifact.display().to_string());
    assert_eq!(pkg.source_file, pkg.file_name);
}

/// Options can come straight from the TOML configuration
#[test]
fn test_options_from_config() {
    let config = SbomkitConfig::parse("[spdx]\nwork_dir = \"/build\"\n").unwrap();
    let pkg = Package::new("hello").with_options(PackageOptions::from_core(&config.spdx));
    assert_eq!(pkg.options().relative_path("/build/out/app"), "out/app");
}

/// Missing source artifact is a MissingInput error
#[test]
fn test_read_source_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let mut pkg = Package::new("hello");
    let err = pkg
        .read_source_file(dir.path().join("not-there.tar.gz"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInput);
}

/// Files hashed from disk feed the verification code
#[test]
fn test_files_read_from_disk_render() {
    let dir = tempfile::tempdir().unwrap();
    let pkg = Package::new("hello");
    for name in ["main.c", "util.c"] {
        let path = dir.path().join(name);
        std::fs::write(&path, name.as_bytes()).unwrap();
        let mut file = File::new(name);
        file.read_source_file(&path).unwrap();
        pkg.add_file(file).unwrap();
    }

    let mut pkg = pkg;
    pkg.id = "Package-hello".to_owned();
    pkg.files_analyzed = true;
    let out = pkg.render().unwrap();

    assert_eq!(out.matches("FileChecksum: SHA1: ").count(), 2);
    assert_eq!(pkg.verification_code().len(), 40);
}

/// Many threads attaching files to one package lose no insertions
#[test]
fn test_concurrent_add_file() {
    const THREADS: usize = 8;
    const FILES_PER_THREAD: usize = 50;

    let pkg = Arc::new(Package::new("concurrent"));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let pkg = Arc::clone(&pkg);
            thread::spawn(move || {
                for i in 0..FILES_PER_THREAD {
                    let name = format!("t{t}/f{i}");
                    let sha1 = format!("{:040x}", t * FILES_PER_THREAD + i);
                    pkg.add_file(File::new(name).with_checksum(HashAlgorithm::Sha1, sha1))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut pkg = Arc::try_unwrap(pkg).expect("all threads joined");
    assert_eq!(pkg.file_count(), THREADS * FILES_PER_THREAD);

    pkg.id = "Package-concurrent".to_owned();
    pkg.files_analyzed = true;
    let first = pkg.render().unwrap();

    // 같은 파일 집합을 순차적으로 추가한 패키지와 결과가 같아야 함
    let mut sequential = Package::new("concurrent");
    for t in (0..THREADS).rev() {
        for i in 0..FILES_PER_THREAD {
            let sha1 = format!("{:040x}", t * FILES_PER_THREAD + i);
            sequential
                .add_file(File::new(format!("t{t}/f{i}")).with_checksum(HashAlgorithm::Sha1, sha1))
                .unwrap();
        }
    }
    sequential.id = "Package-concurrent".to_owned();
    sequential.files_analyzed = true;

    assert_eq!(first, sequential.render().unwrap());
}
