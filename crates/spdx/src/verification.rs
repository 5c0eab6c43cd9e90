//! 패키지 검증 코드 계산
//!
//! 포함된 모든 파일의 SHA1 값을 사전순으로 정렬해 이어 붙인 뒤 다시 SHA1을 구합니다.
//! 정렬 덕분에 파일이 추가된 순서와 무관하게 같은 코드가 나옵니다.
//!
//! 같은 순회에서 파일별 라이선스 태그를 모아 `PackageLicenseInfoFromFiles` 값을 만듭니다.

use crate::error::SpdxError;
use crate::file::File;
use crate::hash::{self, HashAlgorithm};
use crate::render::{NOASSERTION, NONE};

/// 검증 코드 계산 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// 패키지 검증 코드 (hex)
    pub code: String,
    /// 파일에서 수집한 라이선스 태그 (처음 등장한 순서)
    pub license_info_from_files: Vec<String>,
}

/// 파일 목록으로 검증 코드와 라이선스 태그 목록을 계산합니다.
///
/// # Errors
///
/// - 파일이 하나도 없으면 `SpdxError::IncompleteData`
/// - 체크섬이 없거나 SHA1이 없는 파일이 있으면 `SpdxError::IncompleteData` /
///   `SpdxError::MissingChecksum`
pub fn compute<'a>(files: impl IntoIterator<Item = &'a File>) -> Result<Verification, SpdxError> {
    let mut sha_list: Vec<&str> = Vec::new();
    let mut tags: Vec<&str> = Vec::new();

    for file in files {
        let label = if file.name.is_empty() {
            file.id.as_str()
        } else {
            file.name.as_str()
        };

        if file.checksum.is_empty() {
            return Err(SpdxError::IncompleteData(format!(
                "unable to render package, file {label} has no checksums"
            )));
        }
        let sha1 = file
            .checksum(HashAlgorithm::Sha1)
            .ok_or_else(|| SpdxError::MissingChecksum {
                file: label.to_owned(),
                algorithm: HashAlgorithm::Sha1.name().to_owned(),
            })?;
        sha_list.push(sha1);

        let tag = file.license_info_in_file.as_str();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    if sha_list.is_empty() {
        return Err(SpdxError::IncompleteData(
            "unable to get package verification code, package has no files".to_owned(),
        ));
    }

    sha_list.sort_unstable();
    let code = hash::hash_bytes(HashAlgorithm::Sha1, sha_list.concat().as_bytes());

    // 센티널 태그도 "태그가 있었음"으로 취급하지만 출력에서는 제외
    let license_info_from_files = if tags.is_empty() {
        vec![NONE.to_owned()]
    } else {
        tags.iter()
            .filter(|t| **t != NONE && **t != NOASSERTION)
            .map(|t| (*t).to_owned())
            .collect()
    };

    Ok(Verification {
        code,
        license_info_from_files,
    })
}
