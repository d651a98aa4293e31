use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignatureResult, Signer};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use serde_json::{Map, Value};
use sha2::Sha384;
use std::collections::HashMap;

type HmacSha384 = Hmac<Sha384>;

pub const API_KEY_HEADER: &str = "X-GEMINI-APIKEY";
pub const PAYLOAD_HEADER: &str = "X-GEMINI-PAYLOAD";
pub const SIGNATURE_HEADER: &str = "X-GEMINI-SIGNATURE";

/// Base64 payload and its hex signature, both sent as headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    pub payload: String,
    pub signature: String,
}

/// Gemini HMAC-SHA384 signer for private endpoints
#[derive(Debug, Clone)]
pub struct GeminiSigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl GeminiSigner {
    /// Fails with `CredentialsMissingError` if either half of the credentials is empty
    pub fn new(api_key: String, secret_key: String) -> Result<Self, ExchangeError> {
        if api_key.is_empty() || secret_key.is_empty() {
            return Err(ExchangeError::CredentialsMissingError(
                "GEMINI_EXCHANGE_API_KEY and GEMINI_EXCHANGE_API_SECRET must both be set"
                    .to_string(),
            ));
        }

        Ok(Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
        })
    }

    /// Build the signed envelope for one request
    ///
    /// `request` and `nonce` are written over any caller-supplied values,
    /// the merged map is serialized to JSON, base64 encoded, and the base64
    /// text (not the JSON) is signed.
    pub fn sign_payload(
        &self,
        endpoint: &str,
        payload: &Map<String, Value>,
        nonce: u64,
    ) -> Result<SignedPayload, ExchangeError> {
        let mut merged = payload.clone();
        merged.insert("request".to_string(), Value::String(endpoint.to_string()));
        merged.insert("nonce".to_string(), Value::String(nonce.to_string()));

        let json = serde_json::to_vec(&merged).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to encode payload: {}", e))
        })?;
        let encoded = general_purpose::STANDARD.encode(json);

        let mut mac = HmacSha384::new_from_slice(self.secret_key.expose_secret().as_bytes())
            .map_err(|e| {
                ExchangeError::CredentialsMissingError(format!("Invalid secret key: {}", e))
            })?;
        mac.update(encoded.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(SignedPayload {
            payload: encoded,
            signature,
        })
    }
}

impl Signer for GeminiSigner {
    fn sign_request(
        &self,
        endpoint: &str,
        payload: &Map<String, Value>,
        nonce: u64,
    ) -> SignatureResult {
        let signed = self.sign_payload(endpoint, payload, nonce)?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/plain".to_string());
        headers.insert("Content-Length".to_string(), "0".to_string());
        headers.insert(
            API_KEY_HEADER.to_string(),
            self.api_key.expose_secret().clone(),
        );
        headers.insert(PAYLOAD_HEADER.to_string(), signed.payload);
        headers.insert(SIGNATURE_HEADER.to_string(), signed.signature);
        headers.insert("Cache-Control".to_string(), "no-cache".to_string());

        Ok(headers)
    }
}
