/// Transport kernel shared by every endpoint call
///
/// The kernel knows how to issue requests and decode responses; it holds no
/// endpoint-specific logic.
///
/// ## Transport
/// - `RestClient`: request executor interface (public GET, signed POST)
/// - `ReqwestRest`: reqwest-backed implementation
///
/// ## Authentication
/// - `Signer`: turns endpoint + payload + nonce into request headers
/// - `NonceGenerator`: strictly increasing nonce source shared by clones
///
/// # Example
/// ```rust,no_run
/// use gemini_client::core::kernel::*;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rest_config = RestClientConfig::new(
///     "https://api.gemini.com".to_string(),
///     "gemini".to_string(),
/// );
/// let rest = RestClientBuilder::new(rest_config).build()?;
///
/// let symbols: Vec<String> = rest.get_json("/v1/symbols", &[]).await?;
/// # Ok(())
/// # }
/// ```
pub mod nonce;
pub mod rest;
pub mod signer;

#[cfg(test)]
pub(crate) mod mock;

pub use nonce::NonceGenerator;
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
