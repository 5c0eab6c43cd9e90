//! Integration tests for package rendering
//!
//! Builds package trees through the public API and checks the exact
//! tag-value output, child ordering and error propagation.

use sbomkit_spdx::id;
use sbomkit_spdx::{ErrorKind, File, HashAlgorithm, Package, Party};

const HELLO_MAIN_C_ID: &str = "File-721e00ec4e522cf0757591169a375f96212928c7";

fn sha1_file(name: &str, sha1: &str) -> File {
    File::new(name).with_checksum(HashAlgorithm::Sha1, sha1)
}

fn hello_package() -> Package {
    let mut pkg = Package::new("hello");
    pkg.id = id::package_id("hello").unwrap();
    pkg.files_analyzed = true;
    pkg.add_file(sha1_file("main.c", &"a".repeat(40))).unwrap();
    pkg
}

/// Single package, single file, no license metadata
#[test]
fn test_hello_package_renders_exact_fragment() {
    let mut pkg = hello_package();
    let out = pkg.render().unwrap();

    let expected = format!(
        "##### Package: hello\n\
         \n\
         PackageName: hello\n\
         SPDXID: Package-hello\n\
         PackageDownloadLocation: NONE\n\
         FilesAnalyzed: true\n\
         PackageVerificationCode: a56559418dc7908ce5f0b24b05c78e055cb863dc\n\
         PackageLicenseConcluded: NOASSERTION\n\
         PackageLicenseInfoFromFiles: NONE\n\
         PackageLicenseDeclared: NOASSERTION\n\
         PackageCopyrightText: NOASSERTION\n\
         \n\
         FileName: main.c\n\
         SPDXID: {id}\n\
         FileChecksum: SHA1: {sha}\n\
         LicenseConcluded: NOASSERTION\n\
         LicenseInfoInFile: NOASSERTION\n\
         FileCopyrightText: NOASSERTION\n\
         \n\
         Relationship: Package-hello CONTAINS {id}\n\
         \n",
        id = HELLO_MAIN_C_ID,
        sha = "a".repeat(40),
    );
    assert_eq!(out, expected);
    assert_eq!(
        pkg.verification_code(),
        "a56559418dc7908ce5f0b24b05c78e055cb863dc"
    );
}

/// Populated metadata renders in the fixed field order
#[test]
fn test_full_metadata_stanza() {
    let mut pkg = Package::new("kubectl");
    pkg.id = "Package-kubectl".to_owned();
    pkg.download_location = "https://dl.k8s.io/v1.21.0/kubectl".to_owned();
    pkg.version = "v1.21.0".to_owned();
    pkg.file_name = "bin/kubectl".to_owned();
    pkg.license_concluded = "Apache-2.0".to_owned();
    pkg.license_declared = "Apache-2.0".to_owned();
    pkg.copyright_text = "Copyright The Kubernetes Authors".to_owned();
    pkg.supplier = Party::organization("Kubernetes");
    pkg.checksum.insert("SHA512".to_owned(), "ff".to_owned());
    pkg.checksum.insert("SHA256".to_owned(), "ee".to_owned());

    let out = pkg.render().unwrap();
    assert_eq!(
        out,
        "##### Package: kubectl\n\
         \n\
         PackageName: kubectl\n\
         SPDXID: Package-kubectl\n\
         PackageChecksum: SHA256: ee\n\
         PackageChecksum: SHA512: ff\n\
         PackageDownloadLocation: https://dl.k8s.io/v1.21.0/kubectl\n\
         FilesAnalyzed: false\n\
         PackageLicenseConcluded: Apache-2.0\n\
         PackageFileName: bin/kubectl\n\
         PackageLicenseInfoFromFiles: NONE\n\
         PackageVersion: v1.21.0\n\
         PackageLicenseDeclared: Apache-2.0\n\
         PackageCopyrightText: <text>Copyright The Kubernetes Authors\n\
         </text>\n\
         \n"
    );
}

/// Files, sub-packages and dependencies appear in that order, each sorted by ID
#[test]
fn test_nested_tree_order_and_relationships() {
    let mut root = hello_package();

    let mut libb = Package::new("libb");
    libb.files_analyzed = true;
    libb.add_file(sha1_file("b.c", &"b".repeat(40))).unwrap();
    root.add_package(libb).unwrap();
    root.add_package(Package::new("liba")).unwrap();
    root.add_dependency(Package::new("zlib")).unwrap();
    root.add_dependency(Package::new("openssl")).unwrap();

    let out = root.render().unwrap();
    let contains_main = format!("Relationship: Package-hello CONTAINS {HELLO_MAIN_C_ID}");

    let positions: Vec<usize> = [
        "##### Package: hello",
        contains_main.as_str(),
        "##### Package: liba",
        "Relationship: Package-hello CONTAINS Package-liba",
        "##### Package: libb",
        "Relationship: Package-libb CONTAINS File-",
        "Relationship: Package-hello CONTAINS Package-libb",
        "##### Package: openssl",
        "Relationship: Package-hello DEPENDS_ON Package-openssl",
        "##### Package: zlib",
        "Relationship: Package-hello DEPENDS_ON Package-zlib",
    ]
    .iter()
    .map(|needle| out.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "stanzas out of order:\n{out}");
    assert_eq!(out.matches("Relationship:").count(), 6);
}

/// Identical trees built in different insertion orders render byte-identically
#[test]
fn test_render_is_independent_of_insertion_order() {
    let hashes: Vec<String> = (0..8).map(|i| format!("{i:x}").repeat(40)).collect();

    let forward = Package::new("app");
    for (i, h) in hashes.iter().enumerate() {
        forward.add_file(sha1_file(&format!("src/{i}.rs"), h)).unwrap();
    }
    let backward = Package::new("app");
    for (i, h) in hashes.iter().enumerate().rev() {
        backward.add_file(sha1_file(&format!("src/{i}.rs"), h)).unwrap();
    }

    let mut forward = forward;
    let mut backward = backward;
    for pkg in [&mut forward, &mut backward] {
        pkg.id = "Package-app".to_owned();
        pkg.files_analyzed = true;
    }

    assert_eq!(forward.render().unwrap(), backward.render().unwrap());
    assert_eq!(forward.verification_code(), backward.verification_code());
}

/// License tags from files roll up into the package stanza
#[test]
fn test_license_info_from_files_rollup() {
    let mut pkg = Package::new("mixed");
    pkg.id = "Package-mixed".to_owned();
    pkg.files_analyzed = true;
    pkg.add_file(sha1_file("a", &"1".repeat(40)).with_license_info("MIT"))
        .unwrap();
    pkg.add_file(sha1_file("b", &"2".repeat(40)).with_license_info("NOASSERTION"))
        .unwrap();
    pkg.add_file(sha1_file("c", &"3".repeat(40)).with_license_info("Apache-2.0"))
        .unwrap();

    let out = pkg.render().unwrap();
    let tags: Vec<&str> = out
        .lines()
        .filter_map(|l| l.strip_prefix("PackageLicenseInfoFromFiles: "))
        .collect();
    assert_eq!(tags.len(), 2);
    assert!(tags.contains(&"MIT"));
    assert!(tags.contains(&"Apache-2.0"));
    assert!(!out.contains("PackageLicenseInfoFromFiles: NOASSERTION"));
}

/// A file without its SHA1 aborts the render with the file named in the error
#[test]
fn test_missing_sha1_aborts_render() {
    let mut pkg = Package::new("broken");
    pkg.id = "Package-broken".to_owned();
    pkg.files_analyzed = true;
    pkg.add_file(File::new("no-sha1.bin").with_checksum(HashAlgorithm::Sha256, "c".repeat(64)))
        .unwrap();

    let err = pkg.render().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompleteData);
    assert!(err.to_string().contains("no-sha1.bin"));
}

/// A failing grandchild propagates with every level named
#[test]
fn test_nested_failure_carries_context() {
    let mut leaf = Package::new("leaf");
    leaf.files_analyzed = true;

    let mut middle = Package::new("middle");
    middle.add_package(leaf).unwrap();

    let mut root = Package::new("root");
    root.id = "Package-root".to_owned();
    root.add_dependency(middle).unwrap();

    let err = root.render().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("rendering pkg middle"));
    assert!(msg.contains("rendering pkg leaf"));
    assert_eq!(err.root_cause().kind(), ErrorKind::IncompleteData);
}

/// A sub-package may not reuse an ID already taken by a file
#[test]
fn test_package_id_unique_across_files() {
    let mut root = hello_package();
    let mut file = sha1_file("dup", &"d".repeat(40));
    file.id = "Package-dup".to_owned();
    root.add_file(file).unwrap();

    let err = root.add_package(Package::new("dup")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let out = root.render().unwrap();
    assert_eq!(out.matches("SPDXID: Package-dup\n").count(), 1);
}

/// A root without an ID cannot be the subject of relationship lines
#[test]
fn test_root_without_id_rejects_render() {
    let mut root = Package::new("root");
    root.add_file(sha1_file("main.c", &"a".repeat(40))).unwrap();

    let err = root.render().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInput);
}

/// Converting into the top-level error keeps the failure class
#[test]
fn test_error_converts_to_sbomkit_error() {
    use sbomkit_core::error::{SbomError, SbomkitError};

    let mut root = Package::new("root");
    root.add_package(Package::new("dup")).unwrap();
    let err = root.add_dependency(Package::new("dup")).unwrap_err();

    let top: SbomkitError = err.into();
    assert!(matches!(top, SbomkitError::Sbom(SbomError::Conflict(_))));
}
