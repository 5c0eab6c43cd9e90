//! 체크섬 계산 -- 파일 / 바이트 다이제스트
//!
//! SPDX tag-value 문서에 쓰이는 세 가지 알고리즘을 지원합니다.
//!
//! | 알고리즘 | 용도 |
//! |----------|------|
//! | SHA1 | 파일 ID 합성, 파일 체크섬, 패키지 검증 코드 |
//! | SHA256 | 패키지 원본 아티팩트 |
//! | SHA512 | 패키지 원본 아티팩트 |
//!
//! 모든 결과는 소문자 hex 문자열입니다.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::SpdxError;

/// 체크섬 알고리즘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashAlgorithm {
    /// SHA-1 (160-bit)
    Sha1,
    /// SHA-256 (256-bit)
    Sha256,
    /// SHA-512 (512-bit)
    Sha512,
}

impl HashAlgorithm {
    /// tag-value 문서에서 쓰는 알고리즘 이름 (`Checksum` 맵의 키)
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 점진적 해시 계산기
pub struct Hasher {
    state: HasherState,
}

enum HasherState {
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
}

impl Hasher {
    /// 지정한 알고리즘으로 새 계산기를 생성합니다.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Sha1 => HasherState::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => HasherState::Sha256(Sha256::new()),
            HashAlgorithm::Sha512 => HasherState::Sha512(Sha512::new()),
        };
        Self { state }
    }

    /// 데이터를 추가합니다.
    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            HasherState::Sha1(h) => h.update(data),
            HasherState::Sha256(h) => h.update(data),
            HasherState::Sha512(h) => h.update(data),
        }
    }

    /// 계산을 마치고 hex 다이제스트를 반환합니다.
    pub fn finalize(self) -> String {
        match self.state {
            HasherState::Sha1(h) => format!("{:x}", h.finalize()),
            HasherState::Sha256(h) => format!("{:x}", h.finalize()),
            HasherState::Sha512(h) => format!("{:x}", h.finalize()),
        }
    }
}

/// 바이트 슬라이스의 다이제스트를 계산합니다.
pub fn hash_bytes(algorithm: HashAlgorithm, data: &[u8]) -> String {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}

/// reader에서 읽은 데이터의 다이제스트를 계산합니다.
pub fn hash_reader<R: Read>(algorithm: HashAlgorithm, reader: &mut R) -> io::Result<String> {
    let mut hasher = Hasher::new(algorithm);
    let mut buffer = [0u8; 8192];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hasher.finalize())
}

/// 파일 내용의 다이제스트를 계산합니다.
///
/// 파일 전체를 메모리에 올리지 않고 스트리밍으로 읽습니다.
pub fn hash_file(algorithm: HashAlgorithm, path: &Path) -> Result<String, SpdxError> {
    let io_err = |source| SpdxError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = fs::File::open(path).map_err(io_err)?;
    hash_reader(algorithm, &mut file).map_err(io_err)
}
