use rocket::{get, http::CookieJar, serde::json::Json, FromForm, State};

use super::session::session_from;
use crate::actions::Actions;
use crate::db::{BankAccount, User};
use crate::error::Result;
use crate::plaid_api::AccountId;

#[derive(FromForm)]
pub struct BankFilter {
    #[field(name = "userId")]
    user_id: String,
}

async fn signed_in_user(cookies: &CookieJar<'_>, actions: &Actions) -> Result<User> {
    actions.require_user(session_from(cookies).as_ref()).await
}

/// Banks of other users look like missing banks.
fn owned_by(user: &User, bank: Option<BankAccount>) -> Option<Json<BankAccount>> {
    bank.filter(|bank| bank.user_id == user.id).map(Json)
}

#[get("/banks?<filter..>")]
pub async fn banks(
    filter: BankFilter,
    cookies: &CookieJar<'_>,
    actions: &State<Actions>,
) -> Result<Option<Json<Vec<BankAccount>>>> {
    let user = signed_in_user(cookies, actions).await?;
    if filter.user_id != user.id {
        return Ok(None);
    }
    let banks = actions.get_banks(&filter.user_id).await?;
    Ok(Some(Json(banks)))
}

#[get("/banks/<document_id>")]
pub async fn bank(
    document_id: &str,
    cookies: &CookieJar<'_>,
    actions: &State<Actions>,
) -> Result<Option<Json<BankAccount>>> {
    let user = signed_in_user(cookies, actions).await?;
    let bank = actions.get_bank(document_id).await?;
    Ok(owned_by(&user, bank))
}

#[get("/banks/by-account/<account_id>")]
pub async fn bank_by_account_id(
    account_id: &str,
    cookies: &CookieJar<'_>,
    actions: &State<Actions>,
) -> Result<Option<Json<BankAccount>>> {
    let user = signed_in_user(cookies, actions).await?;
    let bank = actions
        .get_bank_by_account_id(&AccountId(account_id.to_string()))
        .await?;
    Ok(owned_by(&user, bank))
}

/// Public, holding the shareable id is the capability.
#[get("/banks/shared/<shareable_id>")]
pub async fn bank_by_shareable_id(
    shareable_id: &str,
    actions: &State<Actions>,
) -> Result<Option<Json<BankAccount>>> {
    let bank = actions.get_bank_by_shareable_id(shareable_id).await?;
    Ok(bank.map(Json))
}
