//! Signing credential resolution
//!
//! Release builds are signed with credentials that live outside version
//! control. They come from one of two places, in strict precedence order:
//!
//! 1. A `key.properties` file, when it exists. Recognized keys:
//!    `storePassword`, `keyPassword`, `keyAlias`, `storeFile`. A key
//!    missing from the file resolves to the empty string; the environment
//!    is not consulted.
//! 2. Environment variables `KEYSTORE_PASSWORD`, `KEY_PASSWORD`,
//!    `KEY_ALIAS`, `KEYSTORE_PATH`. Unset variables resolve to the empty
//!    string, except the store path which falls back to
//!    `upload-keystore.jks`.
//!
//! Resolution never validates completeness. Empty fields only become
//! errors when the signing step consumes the credentials (see
//! [`crate::signing`]), so debug builds work on machines with no signing
//! setup at all.

use passgen_core::error::Result;
use passgen_core::properties::Properties;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default properties file name, repository-root relative
pub const DEFAULT_PROPERTIES_FILE: &str = "key.properties";

/// Fallback keystore path when neither file nor environment provide one
pub const DEFAULT_STORE_FILE: &str = "upload-keystore.jks";

/// Properties keys recognized by the resolver
pub const RECOGNIZED_KEYS: [&str; 4] = ["storePassword", "keyPassword", "keyAlias", "storeFile"];

/// Environment variables consumed when the properties file is absent
pub mod env_vars {
    /// Keystore password fallback
    pub const KEYSTORE_PASSWORD: &str = "KEYSTORE_PASSWORD";
    /// Key password fallback
    pub const KEY_PASSWORD: &str = "KEY_PASSWORD";
    /// Key alias fallback
    pub const KEY_ALIAS: &str = "KEY_ALIAS";
    /// Keystore path fallback
    pub const KEYSTORE_PATH: &str = "KEYSTORE_PATH";
}

/// Signing credentials for a release build
///
/// Read-only after construction; constructed once per build invocation.
/// Deliberately not `Serialize`: the passwords must never reach a report.
/// Use [`Resolution::to_report`] for displayable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningCredentials {
    /// Alias of the signing key inside the keystore
    pub key_alias: String,
    /// Password for the signing key (secret)
    pub key_password: String,
    /// Password for the keystore itself (secret)
    pub store_password: String,
    /// Keystore path; may be empty when the source provided none
    pub store_file: String,
}

impl SigningCredentials {
    /// Whether every field required for signing is non-empty
    pub fn is_complete(&self) -> bool {
        !self.key_alias.is_empty()
            && !self.key_password.is_empty()
            && !self.store_password.is_empty()
            && !self.store_file.is_empty()
    }

    /// Keystore path resolved against the project root
    pub fn store_path(&self, project_root: &Path) -> PathBuf {
        let path = Path::new(&self.store_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        }
    }
}

/// Where the credentials came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum CredentialSource {
    /// Loaded from a properties file
    PropertiesFile(PathBuf),
    /// Assembled from environment variables
    Environment,
}

/// Outcome of credential resolution
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The resolved credentials
    pub credentials: SigningCredentials,
    /// Which source supplied them
    pub source: CredentialSource,
    /// Properties keys the resolver ignored, sorted (empty for env source)
    pub unrecognized_keys: Vec<String>,
}

/// Secret-free resolution report for display and `--json` output
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub source: CredentialSource,
    pub key_alias: String,
    pub store_file: String,
    pub key_password_set: bool,
    pub store_password_set: bool,
    pub complete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_keys: Vec<String>,
}

impl Resolution {
    /// Build a report that carries no secret material
    pub fn to_report(&self) -> ResolutionReport {
        ResolutionReport {
            source: self.source.clone(),
            key_alias: self.credentials.key_alias.clone(),
            store_file: self.credentials.store_file.clone(),
            key_password_set: !self.credentials.key_password.is_empty(),
            store_password_set: !self.credentials.store_password.is_empty(),
            complete: self.credentials.is_complete(),
            unrecognized_keys: self.unrecognized_keys.clone(),
        }
    }
}

/// Resolve signing credentials from the properties file or the process
/// environment
pub fn resolve(properties_file: &Path) -> Result<Resolution> {
    resolve_with(properties_file, |name| std::env::var(name).ok())
}

/// Resolve with an explicit environment lookup
///
/// The environment is injected rather than read ambiently, so resolution
/// with a fixed environment is reproducible. `resolve` is the thin
/// process-environment wrapper.
pub fn resolve_with<E>(properties_file: &Path, env: E) -> Result<Resolution>
where
    E: Fn(&str) -> Option<String>,
{
    if properties_file.exists() {
        let props = Properties::load(properties_file)?;
        let get = |key: &str| props.get(key).unwrap_or_default().to_string();

        Ok(Resolution {
            credentials: SigningCredentials {
                key_alias: get("keyAlias"),
                key_password: get("keyPassword"),
                store_password: get("storePassword"),
                store_file: get("storeFile"),
            },
            source: CredentialSource::PropertiesFile(properties_file.to_path_buf()),
            unrecognized_keys: props.unrecognized_keys(&RECOGNIZED_KEYS),
        })
    } else {
        let get = |name: &str| env(name).unwrap_or_default();

        Ok(Resolution {
            credentials: SigningCredentials {
                key_alias: get(env_vars::KEY_ALIAS),
                key_password: get(env_vars::KEY_PASSWORD),
                store_password: get(env_vars::KEYSTORE_PASSWORD),
                store_file: env(env_vars::KEYSTORE_PATH)
                    .unwrap_or_else(|| DEFAULT_STORE_FILE.to_string()),
            },
            source: CredentialSource::Environment,
            unrecognized_keys: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn write_properties(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_file_values_resolve() {
        let file = write_properties(
            "storePassword=sp\nkeyPassword=kp\nkeyAlias=release\nstoreFile=keys/upload.jks\n",
        );

        let resolution = resolve_with(file.path(), no_env).unwrap();
        let creds = &resolution.credentials;
        assert_eq!(creds.store_password, "sp");
        assert_eq!(creds.key_password, "kp");
        assert_eq!(creds.key_alias, "release");
        assert_eq!(creds.store_file, "keys/upload.jks");
        assert!(matches!(
            resolution.source,
            CredentialSource::PropertiesFile(_)
        ));
    }

    #[test]
    fn test_file_takes_precedence_over_environment() {
        let file = write_properties("keyAlias=release\n");
        let env = env_of(&[(env_vars::KEY_ALIAS, "other")]);

        let resolution = resolve_with(file.path(), env).unwrap();
        assert_eq!(resolution.credentials.key_alias, "release");
    }

    #[test]
    fn test_existing_file_never_consults_environment() {
        // A key missing from an existing file resolves to empty, not to
        // the environment value.
        let file = write_properties("keyAlias=release\n");
        let env = env_of(&[(env_vars::KEYSTORE_PASSWORD, "from-env")]);

        let resolution = resolve_with(file.path(), env).unwrap();
        assert_eq!(resolution.credentials.store_password, "");
        assert_eq!(resolution.credentials.store_file, "");
    }

    #[test]
    fn test_environment_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("key.properties");
        let env = env_of(&[
            (env_vars::KEYSTORE_PASSWORD, "x"),
            (env_vars::KEY_PASSWORD, "y"),
            (env_vars::KEY_ALIAS, "upload"),
            (env_vars::KEYSTORE_PATH, "/ci/upload.jks"),
        ]);

        let resolution = resolve_with(&absent, env).unwrap();
        let creds = &resolution.credentials;
        assert_eq!(creds.store_password, "x");
        assert_eq!(creds.key_password, "y");
        assert_eq!(creds.key_alias, "upload");
        assert_eq!(creds.store_file, "/ci/upload.jks");
        assert_eq!(resolution.source, CredentialSource::Environment);
    }

    #[test]
    fn test_environment_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("key.properties");

        let resolution = resolve_with(&absent, no_env).unwrap();
        let creds = &resolution.credentials;
        assert_eq!(creds.store_file, DEFAULT_STORE_FILE);
        assert_eq!(creds.key_alias, "");
        assert_eq!(creds.key_password, "");
        assert_eq!(creds.store_password, "");
        assert!(!creds.is_complete());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let file = write_properties("keyAlias=release\nstorePassword=sp\n");

        let first = resolve_with(file.path(), no_env).unwrap();
        let second = resolve_with(file.path(), no_env).unwrap();
        assert_eq!(first.credentials, second.credentials);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_properties("keyAlias=ok\ngarbage line\n");
        assert!(resolve_with(file.path(), no_env).is_err());
    }

    #[test]
    fn test_unrecognized_keys_surfaced() {
        let file = write_properties("keyAlias=release\nkeyPasword=typo\n");

        let resolution = resolve_with(file.path(), no_env).unwrap();
        assert_eq!(resolution.unrecognized_keys, vec!["keyPasword".to_string()]);
    }

    #[test]
    fn test_is_complete() {
        let creds = SigningCredentials {
            key_alias: "release".to_string(),
            key_password: "kp".to_string(),
            store_password: "sp".to_string(),
            store_file: "upload-keystore.jks".to_string(),
        };
        assert!(creds.is_complete());

        let incomplete = SigningCredentials {
            key_password: String::new(),
            ..creds
        };
        assert!(!incomplete.is_complete());
    }

    #[test]
    fn test_store_path_resolution() {
        let creds = SigningCredentials {
            key_alias: String::new(),
            key_password: String::new(),
            store_password: String::new(),
            store_file: "keys/upload.jks".to_string(),
        };
        assert_eq!(
            creds.store_path(Path::new("/project")),
            PathBuf::from("/project/keys/upload.jks")
        );

        let absolute = SigningCredentials {
            store_file: "/ci/upload.jks".to_string(),
            ..creds
        };
        assert_eq!(
            absolute.store_path(Path::new("/project")),
            PathBuf::from("/ci/upload.jks")
        );
    }

    #[test]
    fn test_report_carries_no_secrets() {
        let file = write_properties("storePassword=topsecret\nkeyPassword=alsosecret\n");

        let resolution = resolve_with(file.path(), no_env).unwrap();
        let json = serde_json::to_string(&resolution.to_report()).unwrap();
        assert!(!json.contains("topsecret"));
        assert!(!json.contains("alsosecret"));
        assert!(json.contains("\"store_password_set\":true"));
    }
}
