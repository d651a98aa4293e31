use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::gemini::{connector::GeminiConnector, signer::GeminiSigner};
use std::sync::Arc;
use tracing::{info, warn};

/// Builder for Gemini connectors
///
/// Resolves the base URL from the configured environment (or explicit
/// override) and attaches a signer only when both credentials are present.
/// Without credentials the connector still serves public endpoints, and
/// private calls fail with `CredentialsMissingError`.
pub struct GeminiBuilder {
    config: ExchangeConfig,
    rest_timeout: u64,
    user_agent: Option<String>,
}

impl GeminiBuilder {
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            config,
            rest_timeout: 30,
            user_agent: None,
        }
    }

    /// Set REST client timeout in seconds
    pub fn with_rest_timeout(mut self, timeout: u64) -> Self {
        self.rest_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    pub fn build(self) -> Result<GeminiConnector<ReqwestRest>, ExchangeError> {
        let base_url = self.config.resolved_base_url();
        info!(
            environment = %self.config.environment,
            base_url = %base_url,
            "Building Gemini connector"
        );

        let mut rest_config =
            RestClientConfig::new(base_url, "gemini".to_string()).with_timeout(self.rest_timeout);
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let mut rest_builder = RestClientBuilder::new(rest_config);

        if self.config.has_credentials() {
            let signer = GeminiSigner::new(
                self.config.api_key().to_string(),
                self.config.secret_key().to_string(),
            )?;
            rest_builder = rest_builder.with_signer(Arc::new(signer));
        } else {
            warn!("GEMINI_EXCHANGE_API_KEY and GEMINI_EXCHANGE_API_SECRET are not both set; private endpoints are unavailable");
        }

        let rest = rest_builder.build()?;
        Ok(GeminiConnector::new(rest))
    }
}

/// Build a connector from configuration
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<GeminiConnector<ReqwestRest>, ExchangeError> {
    GeminiBuilder::new(config).build()
}

/// Build a connector from the `GEMINI_EXCHANGE_*` environment variables
pub fn build_connector_from_env() -> Result<GeminiConnector<ReqwestRest>, ExchangeError> {
    let config = ExchangeConfig::from_env()?;
    build_connector(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiEnvironment;
    use crate::core::traits::AccountInfo;

    #[test]
    fn test_build_without_credentials() {
        let result = build_connector(ExchangeConfig::read_only());
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_with_credentials_and_sandbox() {
        let config =
            ExchangeConfig::new("test_key".to_string(), "test_secret".to_string()).sandbox(true);
        assert_eq!(config.environment, ApiEnvironment::Sandbox);

        let result = GeminiBuilder::new(config).with_rest_timeout(5).build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_environment_variable_is_config_error() {
        use crate::core::config::API_ENVIRONMENT_VAR;

        std::env::set_var(API_ENVIRONMENT_VAR, "staging");
        let result = build_connector_from_env();
        std::env::remove_var(API_ENVIRONMENT_VAR);

        assert!(matches!(result, Err(ExchangeError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_private_call_without_credentials_fails_before_io() {
        // unroutable base URL: reaching the network would surface as a transport error
        let config = ExchangeConfig::read_only().base_url("http://127.0.0.1:9".to_string());
        let connector = build_connector(config).unwrap();

        let err = connector.get_account_balance().await.unwrap_err();
        assert!(matches!(err, ExchangeError::CredentialsMissingError(_)));
    }
}
