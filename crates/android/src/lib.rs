//! Android release pipeline tools for Passgen
//!
//! This crate provides the configuration-resolution side of producing a
//! signed Android release:
//! - Signing credential resolution (properties file with environment
//!   fallback)
//! - Release signing checks and credential injection
//! - ABI split planning
//! - Gradle build system integration
//! - Build artifact discovery

#![warn(missing_docs)]

pub mod abi;
pub mod gradle;
pub mod keystore;
pub mod outputs;
pub mod signing;
