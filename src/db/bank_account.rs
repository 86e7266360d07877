use serde::{Deserialize, Serialize};

use crate::plaid_api::{AccessToken, AccountId, ItemId};

/// A linked bank account. Serializing it yields the client view, secrets are left out.
#[derive(Serialize, Debug, Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[serde(rename = "$id")]
    pub id: String,
    pub user_id: String,
    /// Aggregator item the account belongs to.
    pub bank_id: ItemId,
    pub account_id: AccountId,
    #[serde(skip_serializing)]
    pub access_token: AccessToken,
    #[serde(skip_serializing)]
    pub funding_source_url: String,
    pub shareable_id: String,
}

#[derive(Debug, Clone)]
pub struct NewBankAccount {
    pub user_id: String,
    pub bank_id: ItemId,
    pub account_id: AccountId,
    pub access_token: AccessToken,
    pub funding_source_url: String,
    pub shareable_id: String,
}

/// The bank document as stored, with `access_token` and `funding_source_url` sealed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(super) struct BankDocument {
    pub user_id: String,
    pub bank_id: String,
    pub account_id: String,
    pub access_token: String,
    pub funding_source_url: String,
    pub shareable_id: String,
}
