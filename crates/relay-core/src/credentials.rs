// ============================================================================
// Credentials — OAuth 1.0a consumer + access token pair
// ============================================================================
// Loaded once at start-up from a .env file (process environment as fallback)
// and shared read-only for the rest of the process.
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::types::RelayError;

pub const API_KEY_VAR: &str = "TWITTER_API_KEY";
pub const API_SECRET_KEY_VAR: &str = "TWITTER_API_SECRET_KEY";
pub const ACCESS_TOKEN_VAR: &str = "TWITTER_ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET_VAR: &str = "TWITTER_ACCESS_TOKEN_SECRET";

/// Immutable consumer key/secret and access token/secret
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// Load credentials from a .env style file.
    ///
    /// Keys missing from the file are looked up in the process environment.
    /// A missing file is not an error on its own; a missing or empty
    /// credential is.
    pub fn load(env_file: &Path) -> Result<Self, RelayError> {
        let file_vars = match dotenvy::from_path_iter(env_file) {
            Ok(iter) => {
                let vars = iter
                    .collect::<Result<HashMap<String, String>, _>>()
                    .map_err(|e| {
                        RelayError::Config(format!(
                            "Failed to parse {}: {}",
                            env_file.display(),
                            e
                        ))
                    })?;
                info!("Loaded {} entries from {}", vars.len(), env_file.display());
                vars
            }
            Err(e) if e.not_found() => {
                warn!(
                    "No env file at {}, reading credentials from the environment",
                    env_file.display()
                );
                HashMap::new()
            }
            Err(e) => {
                return Err(RelayError::Config(format!(
                    "Failed to read {}: {}",
                    env_file.display(),
                    e
                )))
            }
        };

        Self::from_lookup(|key| {
            file_vars
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        })
    }

    /// Build credentials from any key lookup, rejecting missing or empty values
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String, RelayError> {
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(RelayError::Config(format!("{} is missing or empty", key))),
            }
        };

        let credentials = Self::new(
            require(API_KEY_VAR)?,
            require(API_SECRET_KEY_VAR)?,
            require(ACCESS_TOKEN_VAR)?,
            require(ACCESS_TOKEN_SECRET_VAR)?,
        );
        credentials.validate()?;
        Ok(credentials)
    }

    /// Fail fast on empty fields; the signer itself accepts them
    pub fn validate(&self) -> Result<(), RelayError> {
        let fields = [
            (API_KEY_VAR, &self.consumer_key),
            (API_SECRET_KEY_VAR, &self.consumer_secret),
            (ACCESS_TOKEN_VAR, &self.access_token),
            (ACCESS_TOKEN_SECRET_VAR, &self.access_token_secret),
        ];

        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(RelayError::Config(format!("{} is missing or empty", name))),
            None => Ok(()),
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn access_token_secret(&self) -> &str {
        &self.access_token_secret
    }
}

// Secrets never reach logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_env_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "relay-core-{}-{}.env",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_load_from_env_file() {
        let path = write_env_file(
            "full",
            "# Twitter developer portal keys\n\
             \n\
             TWITTER_API_KEY=ck\n\
             TWITTER_API_SECRET_KEY=\"cs with spaces\"\n\
             TWITTER_ACCESS_TOKEN=at\n\
             TWITTER_ACCESS_TOKEN_SECRET=ats\n",
        );

        let credentials = Credentials::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(credentials.consumer_key(), "ck");
        assert_eq!(credentials.consumer_secret(), "cs with spaces");
        assert_eq!(credentials.access_token(), "at");
        assert_eq!(credentials.access_token_secret(), "ats");
    }

    #[test]
    fn test_load_rejects_empty_value() {
        let path = write_env_file(
            "empty",
            "TWITTER_API_KEY=ck\n\
             TWITTER_API_SECRET_KEY=cs\n\
             TWITTER_ACCESS_TOKEN=\n\
             TWITTER_ACCESS_TOKEN_SECRET=ats\n",
        );

        let result = Credentials::load(&path);
        std::fs::remove_file(&path).ok();

        match result {
            Err(RelayError::Config(msg)) => assert!(msg.contains(ACCESS_TOKEN_VAR)),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let pairs = [
            (API_KEY_VAR, "ck"),
            (API_SECRET_KEY_VAR, "cs"),
            (ACCESS_TOKEN_VAR, "at"),
        ];

        let err = Credentials::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains(ACCESS_TOKEN_SECRET_VAR));
    }

    #[test]
    fn test_from_lookup_whitespace_only_is_empty() {
        let pairs = [
            (API_KEY_VAR, "   "),
            (API_SECRET_KEY_VAR, "cs"),
            (ACCESS_TOKEN_VAR, "at"),
            (ACCESS_TOKEN_SECRET_VAR, "ats"),
        ];

        let err = Credentials::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    fn test_validate() {
        assert!(Credentials::new("a", "b", "c", "d").validate().is_ok());
        assert!(Credentials::new("a", "", "c", "d").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", Credentials::new("ck", "super-secret", "at", "token-secret"));
        assert!(debug.contains("ck"));
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("token-secret"));
    }
}
