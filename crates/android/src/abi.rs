//! Target ABIs and APK split planning
//!
//! The release pipeline splits APKs per CPU architecture and optionally
//! produces a universal APK alongside them. This module knows the
//! supported ABIs and computes the artifact list a configuration will
//! produce, before Gradle runs.

use crate::gradle::BuildType;
use passgen_core::config::SplitsConfig;
use passgen_core::error::{Error, Result};
use serde::Serialize;

/// CPU architecture an APK can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Abi {
    /// 32-bit ARM devices
    #[serde(rename = "armeabi-v7a")]
    ArmeabiV7a,
    /// 64-bit ARM devices
    #[serde(rename = "arm64-v8a")]
    Arm64V8a,
    /// 64-bit x86, mainly the emulator
    #[serde(rename = "x86_64")]
    X86_64,
}

impl Abi {
    /// The name Gradle and the NDK use for this ABI
    pub fn gradle_name(&self) -> &'static str {
        match self {
            Self::ArmeabiV7a => "armeabi-v7a",
            Self::Arm64V8a => "arm64-v8a",
            Self::X86_64 => "x86_64",
        }
    }

    /// Parse a Gradle ABI name
    pub fn from_gradle_name(name: &str) -> Option<Self> {
        match name {
            "armeabi-v7a" => Some(Self::ArmeabiV7a),
            "arm64-v8a" => Some(Self::Arm64V8a),
            "x86_64" => Some(Self::X86_64),
            _ => None,
        }
    }

    /// All supported ABIs
    pub fn all() -> [Self; 3] {
        [Self::ArmeabiV7a, Self::Arm64V8a, Self::X86_64]
    }
}

impl std::fmt::Display for Abi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.gradle_name())
    }
}

/// One APK the build is expected to produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedArtifact {
    /// Output file name
    pub file_name: String,
    /// Target ABI; `None` for the universal APK
    pub abi: Option<Abi>,
}

impl PlannedArtifact {
    fn per_abi(abi: Abi, build_type: BuildType) -> Self {
        Self {
            file_name: format!("app-{}-{}.apk", abi.gradle_name(), build_type.name()),
            abi: Some(abi),
        }
    }

    fn universal(build_type: BuildType) -> Self {
        Self {
            file_name: format!("app-{}.apk", build_type.name()),
            abi: None,
        }
    }
}

/// Compute the APK artifacts a split configuration will produce
///
/// Splits disabled yields the single universal APK. Splits enabled yields
/// one APK per included ABI, plus the universal APK when configured.
/// Unknown ABI names and an empty include list are configuration errors.
pub fn split_plan(splits: &SplitsConfig, build_type: BuildType) -> Result<Vec<PlannedArtifact>> {
    if !splits.enabled {
        return Ok(vec![PlannedArtifact::universal(build_type)]);
    }

    if splits.include.is_empty() {
        return Err(Error::config(
            "ABI splits are enabled but the include list is empty",
        )
        .with_suggestion("Add at least one ABI to [splits].include, or disable splits"));
    }

    let mut artifacts = Vec::with_capacity(splits.include.len() + 1);
    for name in &splits.include {
        let abi = Abi::from_gradle_name(name).ok_or_else(|| {
            Error::validation(format!("Unknown ABI in [splits].include: {}", name))
                .with_suggestion("Supported ABIs: armeabi-v7a, arm64-v8a, x86_64")
        })?;
        artifacts.push(PlannedArtifact::per_abi(abi, build_type));
    }

    if splits.universal_apk {
        artifacts.push(PlannedArtifact::universal(build_type));
    }

    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradle_name_round_trip() {
        for abi in Abi::all() {
            assert_eq!(Abi::from_gradle_name(abi.gradle_name()), Some(abi));
        }
        assert_eq!(Abi::from_gradle_name("mips"), None);
    }

    #[test]
    fn test_default_split_plan() {
        let plan = split_plan(&SplitsConfig::default(), BuildType::Release).unwrap();
        let names: Vec<&str> = plan.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "app-armeabi-v7a-release.apk",
                "app-arm64-v8a-release.apk",
                "app-release.apk",
            ]
        );
        assert!(plan.last().unwrap().abi.is_none());
    }

    #[test]
    fn test_splits_disabled_yields_universal_only() {
        let splits = SplitsConfig {
            enabled: false,
            ..SplitsConfig::default()
        };
        let plan = split_plan(&splits, BuildType::Debug).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].file_name, "app-debug.apk");
    }

    #[test]
    fn test_no_universal_apk() {
        let splits = SplitsConfig {
            universal_apk: false,
            ..SplitsConfig::default()
        };
        let plan = split_plan(&splits, BuildType::Release).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|a| a.abi.is_some()));
    }

    #[test]
    fn test_unknown_abi_rejected() {
        let splits = SplitsConfig {
            include: vec!["mips".to_string()],
            ..SplitsConfig::default()
        };
        assert!(split_plan(&splits, BuildType::Release).is_err());
    }

    #[test]
    fn test_empty_include_rejected_when_enabled() {
        let splits = SplitsConfig {
            include: Vec::new(),
            ..SplitsConfig::default()
        };
        assert!(split_plan(&splits, BuildType::Release).is_err());
    }
}
