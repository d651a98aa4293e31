use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::AccountInfo;
use crate::core::types::Balance;
use crate::exchanges::gemini::rest::GeminiRest;
use async_trait::async_trait;
use tracing::instrument;

/// Gemini account balances
#[derive(Debug)]
pub struct Account<R: RestClient> {
    rest: GeminiRest<R>,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: GeminiRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> Account<R> {
    /// Balance entry for `currency` (exact, case-sensitive match), `None` if the account has none
    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_available_currency_balance(
        &self,
        currency: &str,
    ) -> Result<Option<Balance>, ExchangeError> {
        let balances = self.rest.get_balances().await?;
        Ok(find_balance(balances, currency))
    }
}

pub(crate) fn find_balance(balances: Vec<Balance>, currency: &str) -> Option<Balance> {
    balances
        .into_iter()
        .find(|balance| balance.currency == currency)
}

#[async_trait]
impl<R: RestClient> AccountInfo for Account<R> {
    #[instrument(skip(self), fields(exchange = "gemini"))]
    async fn get_account_balance(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.rest.get_balances().await
    }
}
