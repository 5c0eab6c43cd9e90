//! 식별자 합성
//!
//! 명시적 ID가 없는 파일과 패키지에 대해 결정론적인 SPDX ID를 만듭니다.
//!
//! - 파일: `File-` + SHA1(`<패키지 이름>:<파일 이름>`)
//! - 패키지: `Package-` + 이름에서 `[A-Za-z0-9.-]` 외 문자를 제거한 값

use crate::error::SpdxError;
use crate::hash::{self, HashAlgorithm};

/// 패키지 ID 접두사
pub const PACKAGE_ID_PREFIX: &str = "Package-";

/// 파일 ID 접두사
pub const FILE_ID_PREFIX: &str = "File-";

/// 소유 패키지 이름과 파일 이름으로 파일 ID를 합성합니다.
///
/// 같은 입력은 항상 같은 ID를 만듭니다.
///
/// # Errors
///
/// 파일 이름 또는 패키지 이름이 비어 있으면 `SpdxError::MissingInput`
pub fn file_id(package_name: &str, file_name: &str) -> Result<String, SpdxError> {
    if file_name.is_empty() {
        return Err(SpdxError::MissingInput(
            "unable to generate file ID, filename not set".to_owned(),
        ));
    }
    if package_name.is_empty() {
        return Err(SpdxError::MissingInput(
            "unable to generate file ID, package name not set".to_owned(),
        ));
    }

    let digest = hash::hash_bytes(
        HashAlgorithm::Sha1,
        format!("{package_name}:{file_name}").as_bytes(),
    );
    Ok(format!("{FILE_ID_PREFIX}{digest}"))
}

/// 패키지 이름으로 패키지 ID를 합성합니다.
///
/// # Errors
///
/// 이름이 비어 있거나 허용 문자를 하나도 포함하지 않으면 `SpdxError::MissingInput`
pub fn package_id(name: &str) -> Result<String, SpdxError> {
    let token: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect();

    if token.is_empty() {
        return Err(SpdxError::MissingInput(
            "package name is needed to add a new package".to_owned(),
        ));
    }

    Ok(format!("{PACKAGE_ID_PREFIX}{token}"))
}
