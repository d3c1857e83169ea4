//! Core utilities for Passgen Android build tooling
//!
//! This crate provides shared functionality used by the release pipeline
//! tools:
//!
//! - **Error handling**: structured errors with codes, context, and
//!   recovery suggestions
//! - **Properties files**: parsing for the `key.properties` secrets file
//! - **Build settings**: TOML-based configuration with stock defaults
//! - **Validation**: field-level checks for settings and credentials
//! - **Process execution**: safe external command invocation
//!
//! # Example
//!
//! ```rust,no_run
//! use passgen_core::config::Config;
//!
//! let config = Config::load(None).expect("settings");
//! let result = config.settings.validate();
//! if !result.is_valid() {
//!     eprintln!("Build settings are invalid!");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod process;
pub mod properties;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{BuildSettings, Config};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::properties::Properties;
    pub use crate::validation::{ValidationResult, Validator};
}
