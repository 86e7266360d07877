use rocket::{get, http::CookieJar, http::Status, post, serde::json::Json, State};

use super::session::{remove_session, session_cookie, session_from};
use crate::actions::{Actions, SignIn, SignUp};
use crate::db::User;
use crate::error::{Error, Result};

#[post("/auth/sign-in", data = "<credentials>")]
pub async fn sign_in(
    credentials: Json<SignIn>,
    cookies: &CookieJar<'_>,
    actions: &State<Actions>,
) -> Result<Json<Option<User>>> {
    let signed_in = actions.sign_in(&credentials).await?;
    cookies.add(session_cookie(&signed_in.session));
    Ok(Json(signed_in.user))
}

#[post("/auth/sign-up", data = "<sign_up>")]
pub async fn sign_up(
    sign_up: Json<SignUp>,
    cookies: &CookieJar<'_>,
    actions: &State<Actions>,
) -> Result<Json<Option<User>>> {
    let signed_in = actions.sign_up(&sign_up).await?;
    cookies.add(session_cookie(&signed_in.session));
    Ok(Json(signed_in.user))
}

#[get("/auth/me")]
pub async fn me(cookies: &CookieJar<'_>, actions: &State<Actions>) -> Result<Json<Option<User>>> {
    let session = session_from(cookies);
    let user = actions.get_logged_in_user(session.as_ref()).await?;
    Ok(Json(user))
}

#[post("/auth/logout")]
pub async fn logout(cookies: &CookieJar<'_>, actions: &State<Actions>) -> Result<Status> {
    let session = session_from(cookies).ok_or_else(|| Error::no_session("logout"))?;
    remove_session(cookies);
    actions.logout(&session).await?;
    Ok(Status::NoContent)
}

/// Only the signed-in user's own document is visible, anything else is a 404.
#[get("/users/<user_id>")]
pub async fn user_info(
    user_id: &str,
    cookies: &CookieJar<'_>,
    actions: &State<Actions>,
) -> Result<Option<Json<User>>> {
    let signed_in = actions.require_user(session_from(cookies).as_ref()).await?;
    if signed_in.profile.user_id != user_id {
        return Ok(None);
    }
    let user = actions.get_user_info(user_id).await?;
    Ok(user.map(Json))
}
