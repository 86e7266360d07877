use anyhow::Result;

use super::{client::Plaid, AccessToken, AccountId, ProcessorToken};

pub async fn processor_token_create(
    client: &Plaid,
    access_token: &AccessToken,
    account_id: &AccountId,
    processor: &str,
) -> Result<ProcessorToken> {
    log::info!("Creating {processor} processor token...");
    let response = client
        .client()
        .processor_token_create(access_token.get(), &account_id.0, processor)
        .await?;
    log::info!("Creating {processor} processor token...done");
    Ok(ProcessorToken::new(response.processor_token))
}
