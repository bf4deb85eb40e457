//! # Cruiser - option normalization for dependency cruising
//!
//! Cruiser takes the loose option bag an argument parser produces and turns
//! it into the validated, consistent options a dependency cruise runs with.
//! It also splits module specifiers found in source files into module name,
//! protocol and media type.
//!
//! ## Modules
//!
//! - [`options`] - Option normalization pipeline and its normalizers
//! - [`specifier`] - Module specifier decomposition
//! - [`ruleset`] - Rule set types and loaders
//! - [`probe`] - File existence checks
//! - [`init`] - Starter rule set creation
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```no_run
//! use cruiser::options::{normalize_options, RawOptions};
//! use cruiser::specifier::decompose;
//!
//! let mut raw = RawOptions::new();
//! raw.insert("validate".into(), true.into());
//! raw.insert("moduleSystems".into(), "cjs,es6".into());
//!
//! let options = normalize_options(&raw).expect("Failed to normalize options");
//! assert!(options.is_validating());
//!
//! let attributes = decompose("node:fs");
//! assert_eq!(attributes.protocol.as_deref(), Some("node:"));
//! ```

pub mod error;
pub mod init;
pub mod options;
pub mod probe;
pub mod ruleset;
pub mod specifier;

pub use error::{Error, Result};
