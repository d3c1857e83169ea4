//! Gradle build system integration
//!
//! Wrappers for the Gradle wrapper script, with signing credentials
//! injected into release invocations through the environment variables the
//! build descriptor's fallback path reads.

use crate::keystore::SigningCredentials;
use crate::signing::{self, signing_env};
use passgen_core::error::{Error, Result};
use passgen_core::process::{run_command_in_dir_with_env, CommandResult};
use std::path::Path;

/// Build configuration for an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    /// Unsigned, debuggable build
    Debug,
    /// Minified, signed release build
    Release,
}

impl BuildType {
    /// Lowercase name used in artifact file names
    pub fn name(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    /// Gradle task that assembles APKs for this build type
    pub fn assemble_task(&self) -> &'static str {
        match self {
            Self::Debug => "assembleDebug",
            Self::Release => "assembleRelease",
        }
    }

    /// Gradle task that builds an app bundle for this build type
    pub fn bundle_task(&self) -> &'static str {
        match self {
            Self::Debug => "bundleDebug",
            Self::Release => "bundleRelease",
        }
    }
}

impl std::str::FromStr for BuildType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(Error::validation(format!(
                "Unknown build configuration: {}",
                other
            ))
            .with_suggestion("Use 'debug' or 'release'")),
        }
    }
}

fn wrapper_name() -> &'static str {
    if cfg!(windows) { "gradlew.bat" } else { "gradlew" }
}

fn wrapper_invocation() -> &'static str {
    if cfg!(windows) { "gradlew.bat" } else { "./gradlew" }
}

/// Whether the project directory carries a Gradle wrapper
pub fn has_wrapper(project_dir: &Path) -> bool {
    project_dir.join(wrapper_name()).is_file()
}

/// Run a Gradle task
pub fn run_task(project_dir: &Path, task: &str) -> Result<CommandResult> {
    run_task_with_env(project_dir, task, &[])
}

/// Run a Gradle task with extra environment variables
pub fn run_task_with_env(
    project_dir: &Path,
    task: &str,
    env: &[(&str, &str)],
) -> Result<CommandResult> {
    if !has_wrapper(project_dir) {
        return Err(Error::gradle_wrapper_missing(project_dir));
    }

    run_command_in_dir_with_env(wrapper_invocation(), &[task], project_dir, env)
}

/// Build a debug APK
pub fn assemble_debug(project_dir: &Path) -> Result<CommandResult> {
    run_task(project_dir, BuildType::Debug.assemble_task())
}

/// Build signed release APKs
///
/// Refuses to invoke Gradle until the signing check passes, then injects
/// the credentials so the descriptor's environment fallback picks them up.
pub fn assemble_release(
    project_dir: &Path,
    credentials: &SigningCredentials,
) -> Result<CommandResult> {
    signing::ensure_ready(credentials, project_dir)?;

    let env = signing_env(credentials);
    let env_refs: Vec<(&str, &str)> = env.iter().map(|(k, v)| (*k, v.as_str())).collect();
    run_task_with_env(project_dir, BuildType::Release.assemble_task(), &env_refs)
}

/// Build a signed release bundle (AAB)
pub fn bundle_release(
    project_dir: &Path,
    credentials: &SigningCredentials,
) -> Result<CommandResult> {
    signing::ensure_ready(credentials, project_dir)?;

    let env = signing_env(credentials);
    let env_refs: Vec<(&str, &str)> = env.iter().map(|(k, v)| (*k, v.as_str())).collect();
    run_task_with_env(project_dir, BuildType::Release.bundle_task(), &env_refs)
}

/// Clean build artifacts
pub fn clean(project_dir: &Path) -> Result<CommandResult> {
    run_task(project_dir, "clean")
}
