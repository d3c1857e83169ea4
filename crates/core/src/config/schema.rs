//! Build settings schema
//!
//! Declarative settings for the Android release pipeline. Every default
//! matches the values the app's Gradle descriptor ships with, so a missing
//! or empty settings file produces the stock configuration.

use crate::validation::{ValidationResult, Validator};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static VERSION_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+([.+-][0-9A-Za-z.-]+)?$").unwrap());

/// Root build settings schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BuildSettings {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub sdk: SdkConfig,

    #[serde(default)]
    pub build_types: BuildTypes,

    #[serde(default)]
    pub splits: SplitsConfig,
}

impl BuildSettings {
    /// Validate cross-field constraints
    pub fn validate(&self) -> ValidationResult {
        let mut result = Validator::new()
            .required("project.application_id", &self.project.application_id)
            .pattern(
                "project.version_name",
                &self.project.version_name,
                &VERSION_NAME_RE,
                "semantic version (e.g. 1.2.3)",
            )
            .range("sdk.min_sdk", self.sdk.min_sdk, 1, self.sdk.compile_sdk)
            .range(
                "sdk.target_sdk",
                self.sdk.target_sdk,
                self.sdk.min_sdk,
                self.sdk.compile_sdk,
            )
            .validate();

        result.merge(self.build_types.release.validate("build_types.release"));
        result.merge(self.build_types.debug.validate("build_types.debug"));
        result
    }
}

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Application id used for the APK manifest
    #[serde(default = "default_application_id")]
    pub application_id: String,

    /// Source namespace
    #[serde(default = "default_application_id")]
    pub namespace: String,

    /// Monotonic version code
    #[serde(default = "default_version_code")]
    pub version_code: u32,

    /// Human-readable version name
    #[serde(default = "default_version_name")]
    pub version_name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            application_id: default_application_id(),
            namespace: default_application_id(),
            version_code: default_version_code(),
            version_name: default_version_name(),
        }
    }
}

fn default_application_id() -> String {
    "com.example.passgen".to_string()
}

fn default_version_code() -> u32 {
    1
}

fn default_version_name() -> String {
    "1.0.0".to_string()
}

/// SDK and toolchain versions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdkConfig {
    /// SDK used for compilation
    #[serde(default = "default_compile_sdk")]
    pub compile_sdk: u32,

    /// Minimum supported SDK
    #[serde(default = "default_min_sdk")]
    pub min_sdk: u32,

    /// SDK the app targets
    #[serde(default = "default_target_sdk")]
    pub target_sdk: u32,

    /// Pinned NDK version
    #[serde(default = "default_ndk_version")]
    pub ndk_version: String,

    /// Java source/target compatibility
    #[serde(default = "default_java_version")]
    pub java_version: u32,

    /// RenderScript target API
    #[serde(default = "default_renderscript_target_api")]
    pub renderscript_target_api: u32,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            compile_sdk: default_compile_sdk(),
            min_sdk: default_min_sdk(),
            target_sdk: default_target_sdk(),
            ndk_version: default_ndk_version(),
            java_version: default_java_version(),
            renderscript_target_api: default_renderscript_target_api(),
        }
    }
}

fn default_compile_sdk() -> u32 {
    35
}

fn default_min_sdk() -> u32 {
    21
}

fn default_target_sdk() -> u32 {
    35
}

fn default_ndk_version() -> String {
    "27.0.12077973".to_string()
}

fn default_java_version() -> u32 {
    11
}

fn default_renderscript_target_api() -> u32 {
    21
}

/// Per-build-type toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildTypes {
    #[serde(default = "BuildTypeConfig::release_defaults")]
    pub release: BuildTypeConfig,

    #[serde(default = "BuildTypeConfig::debug_defaults")]
    pub debug: BuildTypeConfig,
}

impl Default for BuildTypes {
    fn default() -> Self {
        Self {
            release: BuildTypeConfig::release_defaults(),
            debug: BuildTypeConfig::debug_defaults(),
        }
    }
}

/// Toggles for one build type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildTypeConfig {
    /// Enable code minification (R8)
    #[serde(default)]
    pub minify: bool,

    /// Strip unused resources
    #[serde(default)]
    pub shrink_resources: bool,

    /// ProGuard rule files, in application order
    #[serde(default)]
    pub proguard_files: Vec<String>,

    /// Produce a debuggable artifact
    #[serde(default)]
    pub debuggable: bool,

    /// Enable native (JNI) debugging
    #[serde(default)]
    pub jni_debuggable: bool,

    /// Recompress PNG assets
    #[serde(default = "default_true")]
    pub crunch_pngs: bool,

    /// Native ABIs packaged into this build type
    #[serde(default)]
    pub abi_filters: Vec<String>,
}

impl Default for BuildTypeConfig {
    fn default() -> Self {
        Self::release_defaults()
    }
}

impl BuildTypeConfig {
    /// Stock release configuration
    pub fn release_defaults() -> Self {
        Self {
            minify: true,
            shrink_resources: true,
            proguard_files: vec![
                "proguard-android-optimize.txt".to_string(),
                "proguard-rules.pro".to_string(),
            ],
            debuggable: false,
            jni_debuggable: false,
            crunch_pngs: true,
            abi_filters: vec!["armeabi-v7a".to_string(), "arm64-v8a".to_string()],
        }
    }

    /// Stock debug configuration
    pub fn debug_defaults() -> Self {
        Self {
            minify: false,
            shrink_resources: false,
            proguard_files: Vec::new(),
            debuggable: true,
            jni_debuggable: false,
            crunch_pngs: true,
            abi_filters: vec![
                "armeabi-v7a".to_string(),
                "arm64-v8a".to_string(),
                "x86_64".to_string(),
            ],
        }
    }

    fn validate(&self, prefix: &str) -> ValidationResult {
        let mut validator = Validator::new();

        // Resource shrinking without minification is rejected by AGP.
        if self.shrink_resources && !self.minify {
            validator = validator.custom(&format!("{}.shrink_resources", prefix), || {
                Some("shrink_resources requires minify".to_string())
            });
        }

        for abi in &self.abi_filters {
            validator = validator.one_of(
                &format!("{}.abi_filters", prefix),
                abi,
                &["armeabi-v7a", "arm64-v8a", "x86_64"],
            );
        }

        validator.validate()
    }
}

fn default_true() -> bool {
    true
}

/// ABI split configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitsConfig {
    /// Produce one APK per included ABI
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// ABIs that get a dedicated APK
    #[serde(default = "default_split_include")]
    pub include: Vec<String>,

    /// Additionally produce a universal APK containing every ABI
    #[serde(default = "default_true")]
    pub universal_apk: bool,
}

impl Default for SplitsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include: default_split_include(),
            universal_apk: true,
        }
    }
}

fn default_split_include() -> Vec<String> {
    vec!["armeabi-v7a".to_string(), "arm64-v8a".to_string()]
}
