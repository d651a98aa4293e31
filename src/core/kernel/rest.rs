use crate::core::errors::ExchangeError;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::signer::Signer;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// REST client trait for making HTTP requests
///
/// Public endpoints are plain GETs; private endpoints are empty-bodied
/// POSTs whose payload travels in signed headers.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make an unauthenticated GET request with strongly-typed response
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs
    ///
    /// # Returns
    /// The response body deserialized to the specified type
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<T, ExchangeError>;

    /// Make an unauthenticated GET request and return the raw body (file downloads)
    async fn get_bytes(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError>;

    /// Make a signed POST request with strongly-typed response
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path, embedded in the signed payload
    /// * `payload` - Payload fields; `request` and `nonce` are added by the signer
    ///
    /// # Returns
    /// The response body deserialized to the specified type
    async fn post_signed_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &Map<String, Value>,
    ) -> Result<T, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            exchange_name,
            timeout_seconds: 30,
            user_agent: concat!("gemini-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    nonces: Option<Arc<NonceGenerator>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
            nonces: None,
        }
    }

    /// Set the signer for private requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Share a nonce source, e.g. between several clients using the same API key
    pub fn with_nonce_generator(mut self, nonces: Arc<NonceGenerator>) -> Self {
        self.nonces = Some(nonces);
        self
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| ExchangeError::TransportError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
            nonces: self.nonces.unwrap_or_default(),
        })
    }
}

/// Implementation of `RestClient` using reqwest
///
/// Clones share the connection pool, the signer and the nonce source.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    nonces: Arc<NonceGenerator>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    fn public_request(&self, endpoint: &str, query_params: &[(&str, &str)]) -> RequestBuilder {
        let mut request = self
            .client
            .get(self.build_url(endpoint))
            .header(CONTENT_TYPE, "application/json");
        if !query_params.is_empty() {
            request = request.query(query_params);
        }
        request
    }

    /// Send the request and return the body of a 200 response
    #[instrument(skip(self, request), fields(exchange = %self.config.exchange_name))]
    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ExchangeError> {
        let response = request
            .send()
            .await
            .map_err(|e| ExchangeError::TransportError(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            ExchangeError::TransportError(format!("Failed to read response body: {}", e))
        })?;

        trace!(status = %status, "Response body: {}", String::from_utf8_lossy(&body));

        if status != StatusCode::OK {
            return Err(ExchangeError::HttpStatusError {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }

    fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ExchangeError> {
        serde_json::from_slice(body).map_err(|e| {
            ExchangeError::DecodeError(format!("Failed to parse JSON response: {}", e))
        })
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<T, ExchangeError> {
        let body = self
            .execute(self.public_request(endpoint, query_params))
            .await?;
        Self::decode(&body)
    }

    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get_bytes(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        self.execute(self.public_request(endpoint, query_params))
            .await
    }

    #[instrument(skip(self, payload), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn post_signed_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &Map<String, Value>,
    ) -> Result<T, ExchangeError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            ExchangeError::CredentialsMissingError(format!(
                "{} requires an API key and secret",
                endpoint
            ))
        })?;

        let nonce = self.nonces.next_nonce();
        let headers = signer.sign_request(endpoint, payload, nonce)?;
        debug!(nonce, fields = payload.len(), "Signed private request");

        let mut request = self.client.post(self.build_url(endpoint));
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let body = self.execute(request.body(Vec::new())).await?;
        Self::decode(&body)
    }
}
