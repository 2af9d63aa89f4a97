use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use super::api_client::ApiClient;
use crate::error::{Error, Result};
use crate::models::Account;

#[async_trait]
pub trait AccountService: Send + Sync {
    /// The signed-in account, or `None` when the token is missing or rejected.
    async fn identity(&self) -> Result<Option<Account>>;
}

#[async_trait]
impl AccountService for ApiClient {
    async fn identity(&self) -> Result<Option<Account>> {
        match self.json(self.request(Method::GET, "account"), "account").await {
            Ok(account) => Ok(Some(account)),
            Err(Error::Status { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
