use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::fmt;
use std::str::FromStr;

pub const API_KEY_VAR: &str = "GEMINI_EXCHANGE_API_KEY";
pub const API_SECRET_VAR: &str = "GEMINI_EXCHANGE_API_SECRET";
pub const API_ENVIRONMENT_VAR: &str = "GEMINI_EXCHANGE_API_ENVIRONMENT";
pub const BASE_URL_VAR: &str = "GEMINI_EXCHANGE_BASE_URL";

/// Which Gemini deployment requests are sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    #[default]
    Production,
    Sandbox,
}

impl ApiEnvironment {
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://api.gemini.com",
            Self::Sandbox => "https://api.sandbox.gemini.com",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(ConfigError::InvalidConfiguration(format!(
                "Unknown API environment '{}', expected 'production' or 'sandbox'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub api_key: Secret<String>,
    pub secret_key: Secret<String>,
    pub environment: ApiEnvironment,
    pub base_url: Option<String>,
}

// Credentials never leave the process through serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ExchangeConfig", 4)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("secret_key", "[REDACTED]")?;
        state.serialize_field("environment", &self.environment)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            #[serde(default)]
            api_key: String,
            #[serde(default)]
            secret_key: String,
            #[serde(default)]
            environment: ApiEnvironment,
            base_url: Option<String>,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            secret_key: Secret::new(helper.secret_key),
            environment: helper.environment,
            base_url: helper.base_url,
        })
    }
}

impl ExchangeConfig {
    /// Create a new production configuration with API credentials
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            environment: ApiEnvironment::Production,
            base_url: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// - `GEMINI_EXCHANGE_API_KEY` / `GEMINI_EXCHANGE_API_SECRET` (optional, empty when unset)
    /// - `GEMINI_EXCHANGE_API_ENVIRONMENT` (`production` or `sandbox`, defaults to production)
    /// - `GEMINI_EXCHANGE_BASE_URL` (optional override)
    ///
    /// Missing credentials are tolerated so public endpoints keep working;
    /// signed calls fail later with `CredentialsMissingError`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR).unwrap_or_default();
        let secret_key = env::var(API_SECRET_VAR).unwrap_or_default();

        let environment = match env::var(API_ENVIRONMENT_VAR) {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => ApiEnvironment::default(),
        };

        let base_url = env::var(BASE_URL_VAR).ok().filter(|url| !url.is_empty());

        Ok(Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            environment,
            base_url,
        })
    }

    /// Create configuration from `.env` (if present) and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file() -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // no file, fall back to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env()
    }

    /// Configuration for public market data only
    #[must_use]
    pub fn read_only() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Check if this configuration has credentials for signed operations
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    #[must_use]
    pub const fn environment(mut self, environment: ApiEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Shorthand for switching between sandbox and production
    #[must_use]
    pub const fn sandbox(self, sandbox: bool) -> Self {
        self.environment(if sandbox {
            ApiEnvironment::Sandbox
        } else {
            ApiEnvironment::Production
        })
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Base URL requests are sent to: the override if set, else the environment's host
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.environment.base_url().to_string())
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
