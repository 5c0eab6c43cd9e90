//! 에러 타입: 도메인별 에러 정의

/// sbomkit 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum SbomkitError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// SBOM 생성 에러
    #[error("sbom error: {0}")]
    Sbom(#[from] SbomError),

    /// 로깅 초기화 에러
    #[error("logging init failed: {0}")]
    Logging(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// SBOM 문서 생성 에러
///
/// 도메인 크레이트의 세부 에러는 이 분류 중 하나로 변환됩니다.
#[derive(Debug, thiserror::Error)]
pub enum SbomError {
    /// 필수 입력 누락 (파일 이름, 패키지 이름, 원본 파일 경로)
    #[error("missing input: {0}")]
    MissingInput(String),

    /// 식별자 중복
    #[error("conflict: {0}")]
    Conflict(String),

    /// 검증 코드 계산에 필요한 데이터 부족
    #[error("incomplete data: {0}")]
    IncompleteData(String),

    /// 체크섬 계산, 포맷팅, 하위 노드 렌더링 실패
    #[error("render failed: {0}")]
    RenderFailed(String),
}
