#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod logging;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, SbomError, SbomkitError};

// 설정
pub use config::{GeneralConfig, SbomkitConfig, SpdxConfig};

// 로깅
pub use logging::init_tracing;
