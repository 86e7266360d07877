use anyhow::Result;
use rocket::{routes, Build, Config, Rocket};

use crate::actions::Actions;
use crate::config::ServerConfig;

mod auth;
mod banks;
mod error;
mod link;
mod session;

pub use session::{session_cookie, SESSION_COOKIE};

pub fn rocket(config: &ServerConfig, actions: Actions) -> Rocket<Build> {
    rocket::custom(Config {
        log_level: rocket::config::LogLevel::Critical,
        address: config.address,
        port: config.port,
        ..Default::default()
    })
    .manage(actions)
    .mount(
        "/",
        routes![
            auth::sign_in,
            auth::sign_up,
            auth::me,
            auth::logout,
            auth::user_info,
            link::link_token,
            link::exchange,
            banks::banks,
            banks::bank,
            banks::bank_by_account_id,
            banks::bank_by_shareable_id,
        ],
    )
}

/// Runs the server until it is shut down.
pub async fn serve(config: &ServerConfig, actions: Actions) -> Result<()> {
    log::info!("Listening on {}:{}", config.address, config.port);
    rocket(config, actions).launch().await?;
    log::info!("Server shut down");
    Ok(())
}
