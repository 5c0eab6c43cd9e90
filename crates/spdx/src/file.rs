//! 파일 엔티티
//!
//! 패키지에 포함되는 단일 파일과 그 tag-value 조각을 나타냅니다.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SpdxError;
use crate::hash::{self, HashAlgorithm};
use crate::render::{FieldList, NOASSERTION};

/// 패키지에 포함된 파일
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    /// SPDX ID (`File-<sha1>`). 비어 있으면 패키지에 추가할 때 합성됩니다.
    pub id: String,
    /// 파일 이름 (패키지 내 경로)
    pub name: String,
    /// 작업 디렉토리 기준 상대 경로
    pub file_name: String,
    /// 원본 파일 경로
    pub source_file: String,
    /// 결론 라이선스
    pub license_concluded: String,
    /// 파일에서 발견된 라이선스 태그
    pub license_info_in_file: String,
    /// 저작권 문구
    pub copyright_text: String,
    /// 알고리즘 이름 -> hex 다이제스트
    pub checksum: BTreeMap<String, String>,
}

impl File {
    /// 이름만 가진 파일을 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 체크섬을 추가합니다.
    pub fn with_checksum(mut self, algorithm: HashAlgorithm, hex: impl Into<String>) -> Self {
        self.checksum.insert(algorithm.name().to_owned(), hex.into());
        self
    }

    /// 라이선스 태그를 설정합니다.
    pub fn with_license_info(mut self, tag: impl Into<String>) -> Self {
        self.license_info_in_file = tag.into();
        self
    }

    /// 알고리즘에 해당하는 체크섬을 반환합니다.
    pub fn checksum(&self, algorithm: HashAlgorithm) -> Option<&str> {
        self.checksum.get(algorithm.name()).map(String::as_str)
    }

    /// 디스크의 파일을 읽어 SHA1 / SHA256 / SHA512 체크섬과 원본 경로를 채웁니다.
    ///
    /// # Errors
    ///
    /// - 경로가 존재하지 않으면 `SpdxError::MissingInput`
    /// - 읽기 실패 시 문맥이 붙은 `SpdxError::Upstream`
    pub fn read_source_file(&mut self, path: impl AsRef<Path>) -> Result<(), SpdxError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SpdxError::MissingInput(format!(
                "unable to find file source: {}",
                path.display()
            )));
        }

        let mut checksum = BTreeMap::new();
        for algorithm in [
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha512,
        ] {
            let digest = hash::hash_file(algorithm, path)
                .map_err(|e| e.context(format!("getting file {algorithm}")))?;
            checksum.insert(algorithm.name().to_owned(), digest);
        }

        self.checksum = checksum;
        self.source_file = path.display().to_string();
        debug!(path = %self.source_file, "file checksums computed");
        Ok(())
    }

    /// 이 파일의 필드 목록을 출력 순서대로 만듭니다.
    pub fn fields(&self) -> FieldList {
        let mut list = FieldList::new();
        list.push_opt("FileName", &self.name);
        list.push_opt("SPDXID", &self.id);
        for (algorithm, value) in &self.checksum {
            if !value.is_empty() {
                list.push("FileChecksum", format!("{algorithm}: {value}"));
            }
        }
        list.push_or("LicenseConcluded", &self.license_concluded, NOASSERTION);
        list.push_or("LicenseInfoInFile", &self.license_info_in_file, NOASSERTION);
        list.push_text_or("FileCopyrightText", &self.copyright_text, NOASSERTION);
        list
    }

    /// 파일의 tag-value 문서 조각을 렌더링합니다.
    pub fn render(&self) -> Result<String, SpdxError> {
        let mut out = String::new();
        self.fields().write_to(&mut out)?;
        Ok(out)
    }
}
