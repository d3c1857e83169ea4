//! Build artifact discovery
//!
//! Locates the APKs and app bundles a build produced and reports their
//! sizes and SHA-256 checksums for release records.

use passgen_core::error::{Error, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories Gradle and Flutter write artifacts into, project-relative
const OUTPUT_ROOTS: [&str; 4] = [
    "build/app/outputs/flutter-apk",
    "build/app/outputs/bundle",
    "app/build/outputs/apk",
    "app/build/outputs/bundle",
];

/// One discovered build artifact
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    /// File name (e.g. `app-arm64-v8a-release.apk`)
    pub file_name: String,
    /// Full path
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// SHA-256 checksum, lowercase hex
    pub sha256: String,
}

/// Discover APK and AAB artifacts under the known output directories
///
/// Missing output directories are skipped, so an unbuilt project yields an
/// empty list rather than an error. Results are sorted by file name.
pub fn discover(project_dir: &Path) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();

    for root in OUTPUT_ROOTS {
        let dir = project_dir.join(root);
        if !dir.is_dir() {
            continue;
        }

        for entry in WalkDir::new(&dir).follow_links(false) {
            let entry = entry.map_err(|e| {
                Error::io(format!("Failed to scan {}: {}", dir.display(), e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let is_artifact = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("apk" | "aab")
            );
            if !is_artifact {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| {
                Error::io(format!("Failed to stat {}: {}", path.display(), e))
            })?;

            artifacts.push(Artifact {
                file_name: entry.file_name().to_string_lossy().to_string(),
                path: path.to_path_buf(),
                size: metadata.len(),
                sha256: checksum(path)?,
            });
        }
    }

    artifacts.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(artifacts)
}

/// SHA-256 checksum of a file, lowercase hex
pub fn checksum(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path).map_err(|e| {
        Error::io(format!("Failed to open {}: {}", path.display(), e)).with_source(e)
    })?;

    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)
        .map_err(|e| Error::io(format!("Failed to read {}: {}", path.display(), e)))?;

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, content: &[u8]) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_empty_project() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_finds_apks_and_bundles() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(
            &root.join("build/app/outputs/flutter-apk/app-arm64-v8a-release.apk"),
            b"apk-a",
        );
        touch(
            &root.join("build/app/outputs/flutter-apk/app-release.apk"),
            b"apk-b",
        );
        touch(
            &root.join("build/app/outputs/bundle/release/app-release.aab"),
            b"bundle",
        );
        touch(
            &root.join("build/app/outputs/flutter-apk/app.apk.sha1"),
            b"not an artifact",
        );

        let artifacts = discover(root).unwrap();
        let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "app-arm64-v8a-release.apk",
                "app-release.aab",
                "app-release.apk",
            ]
        );
        assert_eq!(artifacts[0].size, 5);
    }

    #[test]
    fn test_checksum_is_stable_hex() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.apk");
        std::fs::write(&path, b"abc").unwrap();

        let sum = checksum(&path).unwrap();
        assert_eq!(
            sum,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_checksum_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(checksum(&dir.path().join("absent.apk")).is_err());
    }
}
