//! SPDX 엔진 에러 타입
//!
//! [`SpdxError`]는 패키지 트리 조작과 렌더링 중 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<SpdxError> for SbomkitError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 분류 ([`ErrorKind`])
//!
//! - **MissingInput**: `MissingInput`
//! - **Conflict**: `Conflict`
//! - **IncompleteData**: `IncompleteData`, `MissingChecksum`
//! - **UpstreamFailure**: `Io`, `Format`, `Upstream`
//!
//! 모든 에러는 동기적이며 재시도 대상이 아닙니다.

use std::fmt;

use sbomkit_core::error::{SbomError, SbomkitError};

use crate::package::Package;

/// 에러 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 필수 필드 누락
    MissingInput,
    /// 식별자 중복
    Conflict,
    /// 검증 코드 계산에 필요한 데이터 부족
    IncompleteData,
    /// 체크섬 계산, 포맷팅, 하위 노드 렌더링 실패
    UpstreamFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => write!(f, "missing-input"),
            Self::Conflict => write!(f, "conflict"),
            Self::IncompleteData => write!(f, "incomplete-data"),
            Self::UpstreamFailure => write!(f, "upstream-failure"),
        }
    }
}

/// 중복된 ID가 이미 등록된 관계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// 포함된 파일
    File,
    /// 하위 패키지 (`CONTAINS`)
    Subpackage,
    /// 의존성 (`DEPENDS_ON`)
    Dependency,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Subpackage => write!(f, "subpackage"),
            Self::Dependency => write!(f, "dependency"),
        }
    }
}

/// SPDX 엔진 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum SpdxError {
    /// 필수 입력 누락
    #[error("missing input: {0}")]
    MissingInput(String),

    /// 하위 패키지 / 의존성 ID가 트리의 다른 항목과 중복
    #[error("a package named {id} already exists as a {namespace}")]
    Conflict {
        /// 중복된 패키지 ID
        id: String,
        /// 기존 항목이 등록된 관계
        namespace: Namespace,
        /// 추가가 거부된 패키지 (ID가 합성된 상태)
        rejected: Option<Box<Package>>,
    },

    /// 파일 분석 데이터 부족
    #[error("incomplete data: {0}")]
    IncompleteData(String),

    /// 파일에 필요한 체크섬이 없음
    #[error("incomplete data: file {file} has no {algorithm} checksum")]
    MissingChecksum {
        /// 파일 이름 (없으면 ID)
        file: String,
        /// 누락된 알고리즘
        algorithm: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 문서 조각 포맷팅 실패
    #[error("formatting failed: {0}")]
    Format(#[from] fmt::Error),

    /// 하위 작업 실패에 문맥을 덧붙인 에러
    #[error("{context}: {source}")]
    Upstream {
        /// 실패한 노드 / 단계 설명
        context: String,
        /// 원인 에러
        source: Box<SpdxError>,
    },
}

impl SpdxError {
    /// 에러 분류를 반환합니다.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput(_) => ErrorKind::MissingInput,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::IncompleteData(_) | Self::MissingChecksum { .. } => ErrorKind::IncompleteData,
            Self::Io { .. } | Self::Format(_) | Self::Upstream { .. } => {
                ErrorKind::UpstreamFailure
            }
        }
    }

    /// `Upstream` 래핑을 모두 벗긴 최초 원인을 반환합니다.
    pub fn root_cause(&self) -> &SpdxError {
        let mut current = self;
        while let Self::Upstream { source, .. } = current {
            current = source;
        }
        current
    }

    /// `Conflict`로 거부된 패키지를 돌려받습니다.
    ///
    /// 호출자는 이 패키지를 건너뛰거나 ID를 바꿔 다시 추가할 수 있습니다.
    pub fn into_rejected(self) -> Option<Package> {
        match self {
            Self::Conflict { rejected, .. } => rejected.map(|pkg| *pkg),
            _ => None,
        }
    }

    /// 에러에 문맥을 덧붙입니다.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Upstream {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<SpdxError> for SbomkitError {
    fn from(err: SpdxError) -> Self {
        let msg = err.to_string();
        let sbom_err = match err.root_cause().kind() {
            ErrorKind::MissingInput => SbomError::MissingInput(msg),
            ErrorKind::Conflict => SbomError::Conflict(msg),
            ErrorKind::IncompleteData => SbomError::IncompleteData(msg),
            ErrorKind::UpstreamFailure => SbomError::RenderFailed(msg),
        };
        SbomkitError::Sbom(sbom_err)
    }
}
