//! 설정 관리: sbomkit.toml 파싱 및 런타임 설정
//!
//! [`SbomkitConfig`]는 모든 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`SBOMKIT_SPDX_WORK_DIR=/build` 형식)
//! 2. 설정 파일 (`sbomkit.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), sbomkit_core::error::SbomkitError> {
//! use sbomkit_core::config::SbomkitConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = SbomkitConfig::load("sbomkit.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = SbomkitConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, SbomkitError};

/// sbomkit 통합 설정
///
/// `sbomkit.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SbomkitConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// SPDX 패키지 설정
    #[serde(default)]
    pub spdx: SpdxConfig,
}

impl SbomkitConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SbomkitError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        debug!(
            log_level = %config.general.log_level,
            work_dir = %config.spdx.work_dir,
            "configuration loaded"
        );
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SbomkitError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SbomkitError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                SbomkitError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, SbomkitError> {
        toml::from_str(toml_str).map_err(|e| {
            SbomkitError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SBOMKIT_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "SBOMKIT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SBOMKIT_GENERAL_LOG_FORMAT");

        override_string(&mut self.spdx.work_dir, "SBOMKIT_SPDX_WORK_DIR");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), SbomkitError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // 작업 디렉토리는 경로 접두사 제거에만 쓰이지만 ".."는 허용하지 않음
        if Path::new(&self.spdx.work_dir)
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(ConfigError::InvalidValue {
                field: "spdx.work_dir".to_owned(),
                reason: "must not contain path traversal pattern '..'".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// SPDX 패키지 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpdxConfig {
    /// 작업 디렉토리 (패키지 원본 파일의 상대 경로 계산 기준)
    ///
    /// 비어 있으면 경로를 그대로 사용합니다.
    pub work_dir: String,
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}
