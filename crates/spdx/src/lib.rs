#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`SpdxError`, `ErrorKind`)
//! - [`hash`]: Checksum provider (`HashAlgorithm`, `hash_bytes`, `hash_file`)
//! - [`id`]: Identifier synthesis for files and packages
//! - [`file`]: File entity and its tag-value fragment
//! - [`package`]: Package tree, ingestion and recursive rendering (`Package`, `Party`)
//! - [`verification`]: Package verification code and license tag rollup
//! - [`render`]: Ordered tag-value field formatter
//! - [`config`]: Package options (`PackageOptions`)
//!
//! # Architecture
//!
//! ```text
//! add_file / add_package / add_dependency / read_source_file
//!                         |
//!                      Package (owned tree, BTreeMap children)
//!                         |
//!                      render()
//!                         |
//!        +----------------+-----------------+
//!        |                                  |
//!  verification::compute              FieldList::write_to
//!        |                                  |
//!  VerificationCode +                 "##### Package: ..." stanza
//!  LicenseInfoFromFiles                     |
//!                               files -> sub-packages -> dependencies
//!                               (each followed by a Relationship line)
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod hash;
pub mod id;
pub mod package;
pub mod render;
pub mod verification;

// --- Public API Re-exports ---

// Package tree
pub use package::{Package, Party};

// File
pub use file::File;

// Configuration
pub use config::PackageOptions;

// Error
pub use error::{ErrorKind, Namespace, SpdxError};

// Checksums
pub use hash::HashAlgorithm;

// Rendering
pub use render::{FieldList, NOASSERTION, NONE, Relationship};

// Verification
pub use verification::Verification;
