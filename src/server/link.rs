use rocket::{http::CookieJar, post, serde::json::Json, State};
use serde::{Deserialize, Serialize};

use super::session::session_from;
use crate::actions::{Actions, ExchangeStatus};
use crate::error::Result;
use crate::plaid_api::{LinkToken, PublicToken};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTokenResponse {
    link_token: LinkToken,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    public_token: PublicToken,
}

#[post("/link/token")]
pub async fn link_token(
    cookies: &CookieJar<'_>,
    actions: &State<Actions>,
) -> Result<Json<LinkTokenResponse>> {
    let user = actions.require_user(session_from(cookies).as_ref()).await?;
    let link_token = actions.create_link_token(&user).await?;
    Ok(Json(LinkTokenResponse { link_token }))
}

#[post("/link/exchange", data = "<request>")]
pub async fn exchange(
    request: Json<ExchangeRequest>,
    cookies: &CookieJar<'_>,
    actions: &State<Actions>,
) -> Result<Json<ExchangeStatus>> {
    let user = actions.require_user(session_from(cookies).as_ref()).await?;
    let status = actions
        .exchange_public_token(&request.public_token, &user)
        .await?;
    Ok(Json(status))
}
