use anyhow::Result;
use plaid::{model::LinkTokenCreateRequestUser, request::LinkTokenCreateRequired};

use super::{client::Plaid, AccessToken, ItemAccess, ItemId, LinkToken, PublicToken};

pub async fn link_token_create(
    client: &Plaid,
    client_user_id: &str,
    client_name: &str,
) -> Result<LinkToken> {
    log::info!("Creating link token...");
    let link = client.link_config();
    let country_codes = link
        .country_codes
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>();
    let products = link.products.iter().map(String::as_str).collect::<Vec<_>>();
    let response = client
        .client()
        .link_token_create(LinkTokenCreateRequired {
            client_name,
            country_codes: &country_codes,
            language: &link.language,
            user: LinkTokenCreateRequestUser {
                client_user_id: client_user_id.to_string(),
                ..Default::default()
            },
        })
        .products(&products)
        .await?;
    log::info!("Creating link token...done");
    Ok(LinkToken(response.link_token))
}

pub async fn exchange_public_token(client: &Plaid, public_token: &PublicToken) -> Result<ItemAccess> {
    log::info!("Exchanging public token...");
    let response = client
        .client()
        .item_public_token_exchange(&public_token.0)
        .await?;
    log::info!("Exchanging public token...done (item {})", response.item_id);
    Ok(ItemAccess {
        access_token: AccessToken::new(response.access_token),
        item_id: ItemId(response.item_id),
    })
}
