use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{client::Plaid, AccessToken};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AccountId(pub String);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub account_id: AccountId,
    pub name: String,
    pub official_name: Option<String>,
    pub mask: Option<String>,
    #[serde(rename = "type")]
    pub type_: String,
}

pub async fn get_accounts(client: &Plaid, access_token: &AccessToken) -> Result<Vec<AccountInfo>> {
    log::info!("Requesting accounts...");

    let response = client.client().accounts_get(access_token.get()).await?;
    let result = response
        .accounts
        .into_iter()
        .map(|account| AccountInfo {
            account_id: AccountId(account.account_id),
            name: account.name,
            official_name: account.official_name,
            mask: account.mask,
            type_: account.type_,
        })
        .collect::<Vec<_>>();

    log::info!("Requesting accounts...done ({} accounts)", result.len());
    Ok(result)
}
