//! Server actions, the operations the HTTP surface exposes.

use anyhow::Result;
use std::sync::Arc;

use crate::appwrite_api::{Appwrite, IdentityGateway};
use crate::config::Config;
use crate::db::{SecretSealer, ShareableIdCodec, Store};
use crate::dwolla_api::{Dwolla, TransferOnboarding};
use crate::plaid_api::{Aggregator, Plaid};
use crate::revalidate::CacheInvalidator;

mod banks;
mod link;
mod user;

pub use link::{ExchangeState, ExchangeStatus};
pub use user::{SignIn, SignUp, SignedIn};

pub struct Actions {
    identity: Arc<dyn IdentityGateway>,
    aggregator: Arc<dyn Aggregator>,
    onboarding: Arc<dyn TransferOnboarding>,
    invalidator: Arc<dyn CacheInvalidator>,
    store: Store,
    shareable_ids: ShareableIdCodec,
    /// Processor identifier of the payment provider, used for processor tokens.
    processor: String,
}

impl Actions {
    /// Wires the actions to the remote services named in `config`.
    pub fn from_config(config: &Config, invalidator: Arc<dyn CacheInvalidator>) -> Result<Self> {
        let master_key = config.master_key()?;
        let identity: Arc<dyn IdentityGateway> = Arc::new(Appwrite::new(&config.appwrite));
        let store = Store::new(
            Arc::clone(&identity),
            &config.appwrite,
            SecretSealer::new(&master_key)?,
        );
        Ok(Self {
            identity,
            aggregator: Arc::new(Plaid::new(&config.plaid)),
            onboarding: Arc::new(Dwolla::new(&config.dwolla)),
            invalidator,
            store,
            shareable_ids: ShareableIdCodec::new(&master_key)?,
            processor: config.plaid.processor.clone(),
        })
    }

    pub fn new(
        identity: Arc<dyn IdentityGateway>,
        aggregator: Arc<dyn Aggregator>,
        onboarding: Arc<dyn TransferOnboarding>,
        invalidator: Arc<dyn CacheInvalidator>,
        store: Store,
        shareable_ids: ShareableIdCodec,
        processor: String,
    ) -> Self {
        Self {
            identity,
            aggregator,
            onboarding,
            invalidator,
            store,
            shareable_ids,
            processor,
        }
    }
}
