use anyhow::anyhow;
use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::plaid_api::ProcessorToken;

mod client;
mod customers;
mod funding_sources;

pub use client::{Dwolla, DwollaError};
pub use customers::{extract_customer_id, PersonalInfo};

/// The payment-transfer provider.
#[async_trait]
pub trait TransferOnboarding: Send + Sync {
    /// Returns the URL of the new customer.
    async fn create_customer(&self, info: &PersonalInfo) -> Result<String>;

    /// Returns the URL of the new funding source, or `None` if the provider didn't hand one out.
    async fn create_funding_source(
        &self,
        customer_id: &str,
        processor_token: &ProcessorToken,
        bank_name: &str,
    ) -> Result<Option<String>>;
}

#[async_trait]
impl TransferOnboarding for Dwolla {
    async fn create_customer(&self, info: &PersonalInfo) -> Result<String> {
        self.create_personal_customer(info)
            .await
            .map_err(|err| Error::onboarding("create customer", err))?
            .ok_or_else(|| {
                Error::onboarding("create customer", anyhow!("Response had no customer location"))
            })
    }

    async fn create_funding_source(
        &self,
        customer_id: &str,
        processor_token: &ProcessorToken,
        bank_name: &str,
    ) -> Result<Option<String>> {
        self.add_funding_source(customer_id, processor_token, bank_name)
            .await
            .map_err(|err| Error::onboarding("create funding source", err))
    }
}
