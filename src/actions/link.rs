use anyhow::anyhow;
use serde::Serialize;

use super::Actions;
use crate::db::{NewBankAccount, User};
use crate::error::{Error, Result};
use crate::plaid_api::PublicToken;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ExchangeState {
    Complete,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeStatus {
    pub public_token_exchange: ExchangeState,
}

impl Actions {
    /// Turns the public token of a finished linking flow into a funded, persisted bank account.
    ///
    /// Every step waits for the previous one. Nothing is persisted unless the
    /// payment provider handed out a funding source, so a failure leaves no
    /// bank document behind and the tokens are dropped.
    pub async fn exchange_public_token(
        &self,
        public_token: &PublicToken,
        user: &User,
    ) -> Result<ExchangeStatus> {
        let item = self.aggregator.exchange_public_token(public_token).await?;

        let accounts = self.aggregator.get_accounts(&item.access_token).await?;
        // Only the first account of an item gets linked
        let account = accounts.into_iter().next().ok_or_else(|| {
            Error::aggregator("get accounts", anyhow!("Item {} has no accounts", item.item_id.0))
        })?;

        let processor_token = self
            .aggregator
            .create_processor_token(&item.access_token, &account.account_id, &self.processor)
            .await?;

        let funding_source_url = self
            .onboarding
            .create_funding_source(
                &user.profile.dwolla_customer_id,
                &processor_token,
                &account.name,
            )
            .await?
            .ok_or_else(|| {
                Error::onboarding(
                    "create funding source",
                    anyhow!("Response had no funding source location"),
                )
            })?;

        let shareable_id = self
            .shareable_ids
            .encrypt(&account.account_id.0)
            .map_err(|err| Error::crypto("shareable id", err))?;
        let bank = self
            .store
            .create_bank_account(NewBankAccount {
                user_id: user.id.clone(),
                bank_id: item.item_id,
                account_id: account.account_id,
                access_token: item.access_token,
                funding_source_url,
                shareable_id,
            })
            .await?;
        log::info!("Linked bank account {} for user {}", bank.id, user.id);

        self.invalidator.revalidate_path("/");

        Ok(ExchangeStatus {
            public_token_exchange: ExchangeState::Complete,
        })
    }
}
