//! 패키지 옵션
//!
//! [`PackageOptions`]는 core의 [`SpdxConfig`](sbomkit_core::config::SpdxConfig)에서
//! 파생되며 패키지 원본 파일의 상대 경로를 계산할 작업 디렉토리를 담습니다.
//!
//! ```
//! use sbomkit_spdx::PackageOptions;
//!
//! let options = PackageOptions::new("/build/output");
//! assert_eq!(options.relative_path("/build/output/hello.tar.gz"), "hello.tar.gz");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// 패키지 옵션
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageOptions {
    /// 파일을 읽어 들이는 작업 디렉토리. 비어 있으면 경로를 그대로 사용합니다.
    pub work_dir: PathBuf,
}

impl PackageOptions {
    /// 작업 디렉토리를 지정해 옵션을 생성합니다.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// core 설정에서 옵션을 생성합니다.
    pub fn from_core(core: &sbomkit_core::config::SpdxConfig) -> Self {
        Self::new(&core.work_dir)
    }

    /// 작업 디렉토리 접두사를 제거한 경로를 반환합니다.
    ///
    /// 경로가 작업 디렉토리 아래에 있지 않으면 경고를 남기고 원래 경로를 그대로 반환합니다.
    pub fn relative_path(&self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        if self.work_dir.as_os_str().is_empty() {
            return path.display().to_string();
        }

        match path.strip_prefix(&self.work_dir) {
            Ok(relative) => relative.display().to_string(),
            Err(_) => {
                warn!(
                    path = %path.display(),
                    work_dir = %self.work_dir.display(),
                    "path is outside the working directory, using it unmodified"
                );
                path.display().to_string()
            }
        }
    }
}
