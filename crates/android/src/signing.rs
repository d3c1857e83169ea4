//! Release signing checks and credential injection
//!
//! The resolver never rejects incomplete credentials; this module is the
//! consumer that does. A release build refuses to start until every field
//! is present and the keystore actually exists on disk, so the
//! `upload-keystore.jks` default can never mask a missing keystore.

use crate::keystore::{env_vars, SigningCredentials, DEFAULT_STORE_FILE};
use passgen_core::error::{Error, Result};
use passgen_core::validation::{ValidationResult, Validator};
use std::path::Path;

/// Validate credentials for release signing, collecting every problem
///
/// Used by `signing check` to report all failures at once. Warns (without
/// blocking) when the keystore path is the built-in default, since that
/// usually means `KEYSTORE_PATH` was never set.
pub fn check(credentials: &SigningCredentials, project_root: &Path) -> ValidationResult {
    let mut validator = Validator::new()
        .required("keyAlias", &credentials.key_alias)
        .required("keyPassword", &credentials.key_password)
        .required("storePassword", &credentials.store_password)
        .required("storeFile", &credentials.store_file)
        .warn_if(
            "storeFile",
            credentials.store_file == DEFAULT_STORE_FILE,
            "Using the default keystore path; set KEYSTORE_PATH or storeFile explicitly",
        );

    if !credentials.store_file.is_empty() {
        validator = validator.is_file("storeFile", &credentials.store_path(project_root));
    }

    validator.validate()
}

/// Fail-fast gate before a release build
///
/// Returns the first problem as a coded error with a recovery suggestion.
pub fn ensure_ready(credentials: &SigningCredentials, project_root: &Path) -> Result<()> {
    if credentials.store_password.is_empty() {
        return Err(Error::missing_credential(
            "storePassword",
            env_vars::KEYSTORE_PASSWORD,
        ));
    }
    if credentials.key_password.is_empty() {
        return Err(Error::missing_credential(
            "keyPassword",
            env_vars::KEY_PASSWORD,
        ));
    }
    if credentials.key_alias.is_empty() {
        return Err(Error::missing_credential("keyAlias", env_vars::KEY_ALIAS));
    }
    if credentials.store_file.is_empty() {
        return Err(Error::missing_credential(
            "storeFile",
            env_vars::KEYSTORE_PATH,
        ));
    }

    let store_path = credentials.store_path(project_root);
    if !store_path.is_file() {
        return Err(Error::keystore_not_found(store_path));
    }

    Ok(())
}

/// Environment pairs injected into the Gradle invocation
///
/// The Gradle descriptor falls back to these variables when its
/// `key.properties` is absent, so exporting them makes the resolved
/// credentials authoritative regardless of which machine runs the build.
pub fn signing_env(credentials: &SigningCredentials) -> [(&'static str, String); 4] {
    [
        (
            env_vars::KEYSTORE_PASSWORD,
            credentials.store_password.clone(),
        ),
        (env_vars::KEY_PASSWORD, credentials.key_password.clone()),
        (env_vars::KEY_ALIAS, credentials.key_alias.clone()),
        (env_vars::KEYSTORE_PATH, credentials.store_file.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_credentials(store_file: &str) -> SigningCredentials {
        SigningCredentials {
            key_alias: "release".to_string(),
            key_password: "kp".to_string(),
            store_password: "sp".to_string(),
            store_file: store_file.to_string(),
        }
    }

    #[test]
    fn test_check_reports_every_empty_field() {
        let creds = SigningCredentials {
            key_alias: String::new(),
            key_password: String::new(),
            store_password: String::new(),
            store_file: String::new(),
        };

        let result = check(&creds, Path::new("."));
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 4);
    }

    #[test]
    fn test_check_passes_with_existing_keystore() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("upload.jks"), b"jks").unwrap();

        let creds = complete_credentials("upload.jks");
        let result = check(&creds, dir.path());
        assert!(result.is_valid());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_check_fails_on_missing_keystore() {
        let dir = tempfile::tempdir().unwrap();
        let creds = complete_credentials("absent.jks");

        let result = check(&creds, dir.path());
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "NOT_A_FILE");
    }

    #[test]
    fn test_check_warns_on_default_store_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_STORE_FILE), b"jks").unwrap();

        let creds = complete_credentials(DEFAULT_STORE_FILE);
        let result = check(&creds, dir.path());
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_ensure_ready_names_missing_field() {
        let mut creds = complete_credentials("upload.jks");
        creds.key_password.clear();

        let err = ensure_ready(&creds, Path::new(".")).unwrap_err();
        assert_eq!(err.code, passgen_core::ErrorCode::MissingCredential);
        assert!(err.message.contains("keyPassword"));
    }

    #[test]
    fn test_ensure_ready_fails_fast_on_defaulted_missing_keystore() {
        let dir = tempfile::tempdir().unwrap();
        let creds = complete_credentials(DEFAULT_STORE_FILE);

        let err = ensure_ready(&creds, dir.path()).unwrap_err();
        assert_eq!(err.code, passgen_core::ErrorCode::KeystoreNotFound);
    }

    #[test]
    fn test_ensure_ready_accepts_complete_setup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("upload.jks"), b"jks").unwrap();

        let creds = complete_credentials("upload.jks");
        assert!(ensure_ready(&creds, dir.path()).is_ok());
    }

    #[test]
    fn test_signing_env_pairs() {
        let creds = complete_credentials("upload.jks");
        let env = signing_env(&creds);

        assert!(env.contains(&("KEYSTORE_PASSWORD", "sp".to_string())));
        assert!(env.contains(&("KEY_PASSWORD", "kp".to_string())));
        assert!(env.contains(&("KEY_ALIAS", "release".to_string())));
        assert!(env.contains(&("KEYSTORE_PATH", "upload.jks".to_string())));
    }
}
