//! Build settings loading and schema definitions
//!
//! Declarative configuration for the Android build pipeline, with defaults
//! matching the app's stock Gradle descriptor.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
