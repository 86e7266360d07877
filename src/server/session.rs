use rocket::http::{Cookie, CookieJar, SameSite};

use crate::appwrite_api::SessionSecret;

pub const SESSION_COOKIE: &str = "appwrite-session";

pub fn session_cookie(secret: &SessionSecret) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, secret.get().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build()
}

pub fn session_from(cookies: &CookieJar<'_>) -> Option<SessionSecret> {
    cookies
        .get(SESSION_COOKIE)
        .map(|cookie| SessionSecret::new(cookie.value().to_string()))
}

pub fn remove_session(cookies: &CookieJar<'_>) {
    cookies.remove(Cookie::build(SESSION_COOKIE).path("/"));
}
