//! API credential handling

use askline_application::CompletionError;

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// A bearer credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where the API key comes from.
///
/// Resolved on every request rather than once at startup, so a key exported
/// after launch is picked up without a restart.
#[derive(Debug, Clone)]
pub struct CredentialSource {
    env_var: String,
    explicit: Option<ApiKey>,
}

impl CredentialSource {
    /// Read the key from the named environment variable
    pub fn from_env(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
            explicit: None,
        }
    }

    /// Use a key from configuration, falling back to the environment
    pub fn with_explicit(mut self, key: Option<String>) -> Self {
        self.explicit = key.filter(|k| !k.trim().is_empty()).map(ApiKey::new);
        self
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Resolve the credential, failing fast if none is set.
    pub fn resolve(&self) -> Result<ApiKey, CompletionError> {
        if let Some(key) = &self.explicit {
            return Ok(key.clone());
        }

        match std::env::var(&self.env_var) {
            Ok(value) if !value.trim().is_empty() => Ok(ApiKey::new(value.trim())),
            Ok(_) => Err(CompletionError::Configuration(format!(
                "{} is set but empty",
                self.env_var
            ))),
            Err(std::env::VarError::NotPresent) => Err(CompletionError::Configuration(format!(
                "no API key found; set {}",
                self.env_var
            ))),
            Err(std::env::VarError::NotUnicode(_)) => Err(CompletionError::Configuration(
                format!("{} is not valid unicode", self.env_var),
            )),
        }
    }
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::from_env(DEFAULT_API_KEY_ENV)
    }
}
