use crate::core::errors::ExchangeError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Result type for signing operations: headers to attach to the request
pub type SignatureResult = Result<HashMap<String, String>, ExchangeError>;

/// Signer trait for request authentication
///
/// Private calls carry their whole payload in headers, so a signer turns
/// an endpoint path, the caller's payload and a fresh nonce into the full
/// header set for an empty-bodied POST.
pub trait Signer: Send + Sync {
    /// Sign a request and return the headers to send
    ///
    /// # Arguments
    /// * `endpoint` - API endpoint path, also embedded in the signed payload
    /// * `payload` - Caller-supplied payload fields
    /// * `nonce` - Strictly increasing request nonce
    fn sign_request(
        &self,
        endpoint: &str,
        payload: &Map<String, Value>,
        nonce: u64,
    ) -> SignatureResult;
}
