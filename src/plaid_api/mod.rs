use async_trait::async_trait;

use crate::error::{Error, Result};

mod accounts;
mod client;
mod link_account;
mod processor_token;
mod tokens;

pub use accounts::{get_accounts, AccountId, AccountInfo};
pub use client::Plaid;
pub use link_account::{exchange_public_token, link_token_create};
pub use processor_token::processor_token_create;
pub use tokens::{AccessToken, ItemAccess, ItemId, LinkToken, ProcessorToken, PublicToken};

/// The financial data aggregation service.
#[async_trait]
pub trait Aggregator: Send + Sync {
    async fn create_link_token(&self, client_user_id: &str, client_name: &str) -> Result<LinkToken>;

    async fn exchange_public_token(&self, public_token: &PublicToken) -> Result<ItemAccess>;

    /// Accounts of the item, in whatever order the aggregator returns them.
    async fn get_accounts(&self, access_token: &AccessToken) -> Result<Vec<AccountInfo>>;

    async fn create_processor_token(
        &self,
        access_token: &AccessToken,
        account_id: &AccountId,
        processor: &str,
    ) -> Result<ProcessorToken>;
}

#[async_trait]
impl Aggregator for Plaid {
    async fn create_link_token(&self, client_user_id: &str, client_name: &str) -> Result<LinkToken> {
        link_token_create(self, client_user_id, client_name)
            .await
            .map_err(|err| Error::aggregator("create link token", err))
    }

    async fn exchange_public_token(&self, public_token: &PublicToken) -> Result<ItemAccess> {
        exchange_public_token(self, public_token)
            .await
            .map_err(|err| Error::aggregator("exchange public token", err))
    }

    async fn get_accounts(&self, access_token: &AccessToken) -> Result<Vec<AccountInfo>> {
        get_accounts(self, access_token)
            .await
            .map_err(|err| Error::aggregator("get accounts", err))
    }

    async fn create_processor_token(
        &self,
        access_token: &AccessToken,
        account_id: &AccountId,
        processor: &str,
    ) -> Result<ProcessorToken> {
        processor_token_create(self, access_token, account_id, processor)
            .await
            .map_err(|err| Error::aggregator("create processor token", err))
    }
}
