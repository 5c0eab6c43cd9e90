//! 패키지 트리
//!
//! [`Package`]는 파일, 하위 패키지, 의존성 패키지를 ID로 묶어 소유하는 집계 루트입니다.
//! 자식은 값으로 소유되므로 트리는 항상 계층 구조이며 역참조가 없습니다.
//!
//! # 동시성
//!
//! - [`Package::add_file`]은 `&self`로 호출되며 파일 맵에 대한 배타 잠금 안에서 동작합니다.
//!   여러 스레드가 `Arc<Package>`를 공유한 채 파일을 추가할 수 있습니다.
//! - 하위 패키지 / 의존성 추가와 렌더링은 `&mut self`를 요구하므로
//!   단일 작성자 규칙이 컴파일 타임에 강제됩니다.
//!
//! # 출력 순서
//!
//! 각 관계(파일, 하위 패키지, 의존성) 안에서 자식은 ID 오름차순으로 렌더링됩니다.

use std::collections::BTreeMap;
use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PackageOptions;
use crate::error::{Namespace, SpdxError};
use crate::file::File;
use crate::hash::{self, HashAlgorithm};
use crate::id;
use crate::render::{self, FieldList, NOASSERTION, NONE, Relationship};
use crate::verification;

/// 공급자 / 원작자 정보
///
/// `person`과 `organization` 중 하나만 채워집니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    /// 개인 이름 (선택적으로 `(<email>)` 포함)
    pub person: String,
    /// 조직 이름 (선택적으로 `(<email>)` 포함)
    pub organization: String,
}

impl Party {
    /// 개인으로 생성합니다.
    pub fn person(name: impl Into<String>) -> Self {
        Self {
            person: name.into(),
            organization: String::new(),
        }
    }

    /// 조직으로 생성합니다.
    pub fn organization(name: impl Into<String>) -> Self {
        Self {
            person: String::new(),
            organization: name.into(),
        }
    }

    /// 둘 다 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.person.is_empty() && self.organization.is_empty()
    }
}

/// 파일과 하위 패키지를 묶는 SPDX 패키지
#[derive(Debug, Default)]
pub struct Package {
    /// 패키지 이름
    pub name: String,
    /// SPDX ID (`Package-<token>`). 비어 있으면 부모에 추가할 때 합성됩니다.
    pub id: String,
    /// 다운로드 위치
    pub download_location: String,
    /// 원본 아티팩트 경로
    pub source_file: String,
    /// 작업 디렉토리 기준 원본 아티팩트 경로
    pub file_name: String,
    /// 패키지 버전
    pub version: String,
    /// 실제 배포 주체
    pub supplier: Party,
    /// 원작자
    pub originator: Party,
    /// 결론 라이선스
    pub license_concluded: String,
    /// 선언 라이선스
    pub license_declared: String,
    /// 라이선스 결론에 대한 부가 설명
    pub license_comments: String,
    /// 저작권 문구
    pub copyright_text: String,
    /// 파일 단위 분석 수행 여부
    pub files_analyzed: bool,
    /// 원본 아티팩트 체크섬 (알고리즘 이름 -> hex)
    pub checksum: BTreeMap<String, String>,

    verification_code: String,
    license_info_from_files: Vec<String>,
    files: Mutex<BTreeMap<String, File>>,
    packages: BTreeMap<String, Package>,
    dependencies: BTreeMap<String, Package>,
    options: PackageOptions,
}

impl Package {
    /// 이름만 가진 빈 패키지를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 옵션을 설정합니다.
    pub fn with_options(mut self, options: PackageOptions) -> Self {
        self.options = options;
        self
    }

    /// 패키지 옵션
    pub fn options(&self) -> &PackageOptions {
        &self.options
    }

    /// 마지막 렌더링에서 계산된 검증 코드
    pub fn verification_code(&self) -> &str {
        &self.verification_code
    }

    /// 마지막 렌더링에서 수집된 파일 라이선스 태그
    pub fn license_info_from_files(&self) -> &[String] {
        &self.license_info_from_files
    }

    /// 패키지 원본 아티팩트를 읽어 체크섬과 경로 필드를 채웁니다.
    ///
    /// SHA256 / SHA512 체크섬을 계산하고, `file_name`은 작업 디렉토리 접두사를 제거한 경로,
    /// `source_file`은 원래 경로로 설정합니다.
    ///
    /// # Errors
    ///
    /// - 경로가 존재하지 않으면 `SpdxError::MissingInput`
    /// - 체크섬 계산 실패 시 문맥이 붙은 `SpdxError::Upstream`
    pub fn read_source_file(&mut self, path: impl AsRef<Path>) -> Result<(), SpdxError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SpdxError::MissingInput(format!(
                "unable to find package source file: {}",
                path.display()
            )));
        }

        let s256 = hash::hash_file(HashAlgorithm::Sha256, path)
            .map_err(|e| e.context("getting source file sha256"))?;
        let s512 = hash::hash_file(HashAlgorithm::Sha512, path)
            .map_err(|e| e.context("getting source file sha512"))?;

        self.checksum = BTreeMap::from([
            (HashAlgorithm::Sha256.name().to_owned(), s256),
            (HashAlgorithm::Sha512.name().to_owned(), s512),
        ]);
        self.source_file = path.display().to_string();
        self.file_name = self.options.relative_path(path);

        debug!(
            package = %self.name,
            source_file = %self.source_file,
            file_name = %self.file_name,
            "package source file read"
        );
        Ok(())
    }

    /// 파일을 추가하고 최종 파일 ID를 반환합니다.
    ///
    /// ID가 없으면 `<패키지 이름>:<파일 이름>`으로 합성합니다.
    /// 같은 ID의 파일이 이미 있으면 덮어씁니다.
    ///
    /// # Errors
    ///
    /// ID 합성에 실패하면 `SpdxError::MissingInput`
    pub fn add_file(&self, mut file: File) -> Result<String, SpdxError> {
        let mut files = self.files.lock();

        if file.id.is_empty() {
            file.id = id::file_id(&self.name, &file.name)?;
        }

        let file_id = file.id.clone();
        if files.insert(file_id.clone(), file).is_some() {
            debug!(package = %self.name, file_id = %file_id, "file replaced");
        }
        Ok(file_id)
    }

    /// 하위 패키지를 추가하고 그 ID를 반환합니다.
    ///
    /// # Errors
    ///
    /// - ID를 합성할 수 없으면 `SpdxError::MissingInput`
    /// - 같은 ID가 파일, 하위 패키지, 의존성 중 하나에 이미 있으면 `SpdxError::Conflict`.
    ///   거부된 패키지는 [`SpdxError::into_rejected`]로 돌려받을 수 있습니다.
    pub fn add_package(&mut self, pkg: Package) -> Result<String, SpdxError> {
        let pkg = self.prepare_child(pkg)?;
        let pkg_id = pkg.id.clone();
        debug!(parent = %self.id, package = %pkg_id, "subpackage added");
        self.packages.insert(pkg_id.clone(), pkg);
        Ok(pkg_id)
    }

    /// 의존성 패키지를 추가하고 그 ID를 반환합니다.
    ///
    /// # Errors
    ///
    /// [`add_package`](Self::add_package)와 같습니다.
    pub fn add_dependency(&mut self, pkg: Package) -> Result<String, SpdxError> {
        let pkg = self.prepare_child(pkg)?;
        let pkg_id = pkg.id.clone();
        debug!(parent = %self.id, dependency = %pkg_id, "dependency added");
        self.dependencies.insert(pkg_id.clone(), pkg);
        Ok(pkg_id)
    }

    /// 자식 패키지 ID를 확정하고 세 관계 전체에서 중복을 검사합니다.
    fn prepare_child(&self, mut pkg: Package) -> Result<Package, SpdxError> {
        if pkg.id.is_empty() {
            pkg.id = id::package_id(&pkg.name)?;
        }

        match self.namespace_of(&pkg.id) {
            Some(namespace) => Err(SpdxError::Conflict {
                id: pkg.id.clone(),
                namespace,
                rejected: Some(Box::new(pkg)),
            }),
            None => Ok(pkg),
        }
    }

    /// ID가 등록된 관계를 찾습니다.
    fn namespace_of(&self, id: &str) -> Option<Namespace> {
        if self.files.lock().contains_key(id) {
            Some(Namespace::File)
        } else if self.packages.contains_key(id) {
            Some(Namespace::Subpackage)
        } else if self.dependencies.contains_key(id) {
            Some(Namespace::Dependency)
        } else {
            None
        }
    }

    /// 직속 파일, 하위 패키지, 의존성 중에 해당 ID가 있는지 확인합니다.
    pub fn contains_id(&self, id: &str) -> bool {
        self.namespace_of(id).is_some()
    }

    /// 포함된 파일의 스냅샷 (ID 순)
    pub fn files(&self) -> Vec<File> {
        self.files.lock().values().cloned().collect()
    }

    /// ID로 파일을 조회합니다.
    pub fn file(&self, file_id: &str) -> Option<File> {
        self.files.lock().get(file_id).cloned()
    }

    /// 포함된 파일 수
    pub fn file_count(&self) -> usize {
        self.files.lock().len()
    }

    /// 하위 패키지 (ID 순)
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// 의존성 패키지 (ID 순)
    pub fn dependencies(&self) -> impl Iterator<Item = &Package> {
        self.dependencies.values()
    }

    /// ID로 하위 패키지를 가변 참조합니다.
    pub fn package_mut(&mut self, pkg_id: &str) -> Option<&mut Package> {
        self.packages.get_mut(pkg_id)
    }

    /// ID로 의존성 패키지를 가변 참조합니다.
    pub fn dependency_mut(&mut self, pkg_id: &str) -> Option<&mut Package> {
        self.dependencies.get_mut(pkg_id)
    }

    fn has_children(&mut self) -> bool {
        !(self.files.get_mut().is_empty()
            && self.packages.is_empty()
            && self.dependencies.is_empty())
    }

    /// 검증 코드와 파일 라이선스 태그를 다시 계산합니다.
    ///
    /// 파일 분석을 하지 않은 패키지는 검증 코드를 비우고 라이선스 태그를 `NONE`으로 둡니다.
    fn update_derived(&mut self) -> Result<(), SpdxError> {
        if !self.files_analyzed {
            self.verification_code.clear();
            self.license_info_from_files = vec![NONE.to_owned()];
            return Ok(());
        }

        let result = verification::compute(self.files.get_mut().values())?;
        self.verification_code = result.code;
        self.license_info_from_files = result.license_info_from_files;
        Ok(())
    }

    /// 패키지 머리 필드 목록을 출력 순서대로 만듭니다.
    ///
    /// 검증 코드와 라이선스 태그는 마지막 렌더링 결과를 사용합니다.
    pub fn fields(&self) -> FieldList {
        let mut list = FieldList::new();
        list.push_opt("PackageName", &self.name);
        list.push_opt("SPDXID", &self.id);
        for (algorithm, value) in &self.checksum {
            if !value.is_empty() {
                list.push("PackageChecksum", format!("{algorithm}: {value}"));
            }
        }
        list.push_or("PackageDownloadLocation", &self.download_location, NONE);
        list.push("FilesAnalyzed", self.files_analyzed.to_string());
        list.push_opt("PackageVerificationCode", &self.verification_code);
        list.push_or("PackageLicenseConcluded", &self.license_concluded, NOASSERTION);
        list.push_opt("PackageFileName", &self.file_name);
        for tag in &self.license_info_from_files {
            list.push("PackageLicenseInfoFromFiles", tag.as_str());
        }
        list.push_opt("PackageVersion", &self.version);
        list.push_or("PackageLicenseDeclared", &self.license_declared, NOASSERTION);
        list.push_text_or("PackageCopyrightText", &self.copyright_text, NOASSERTION);
        list
    }

    /// 패키지와 모든 자손을 tag-value 문서 조각으로 렌더링합니다.
    ///
    /// 전위 깊이 우선 순서로 이 패키지의 스탠자, 파일, 하위 패키지, 의존성을 출력하고
    /// 각 자식 뒤에 관계 행을 붙입니다. 실패 시 부분 결과 없이 에러를 반환합니다.
    ///
    /// # Errors
    ///
    /// - 자식이 있는데 이 패키지의 ID가 비어 있음 (`MissingInput`)
    /// - 검증 코드 계산 실패 (`IncompleteData`)
    /// - 포맷팅 또는 자식 렌더링 실패 (실패한 자식 이름이 문맥으로 붙은 `Upstream`)
    pub fn render(&mut self) -> Result<String, SpdxError> {
        // 관계 행의 주어가 되므로 자식이 있으면 ID가 필요
        if self.id.is_empty() && self.has_children() {
            return Err(SpdxError::MissingInput(format!(
                "package {} has children but no SPDX ID",
                self.name
            )));
        }
        self.update_derived()?;

        let mut out = String::new();
        render::write_header(&mut out, &format!("Package: {}", self.name))?;
        self.fields().write_to(&mut out)?;

        for file in self.files.get_mut().values() {
            let fragment = file
                .render()
                .map_err(|e| e.context(format!("rendering file {}", file.name)))?;
            out.push_str(&fragment);
            render::write_relationship(&mut out, &self.id, Relationship::Contains, &file.id)?;
        }

        for pkg in self.packages.values_mut() {
            let fragment = pkg
                .render()
                .map_err(|e| e.context(format!("rendering pkg {}", pkg.name)))?;
            out.push_str(&fragment);
            render::write_relationship(&mut out, &self.id, Relationship::Contains, &pkg.id)?;
        }

        for pkg in self.dependencies.values_mut() {
            let fragment = pkg
                .render()
                .map_err(|e| e.context(format!("rendering pkg {}", pkg.name)))?;
            out.push_str(&fragment);
            render::write_relationship(&mut out, &self.id, Relationship::DependsOn, &pkg.id)?;
        }

        debug!(
            package = %self.id,
            files = self.files.get_mut().len(),
            packages = self.packages.len(),
            dependencies = self.dependencies.len(),
            "package rendered"
        );
        Ok(out)
    }
}
