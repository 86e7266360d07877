use anyhow::Result;
use std::sync::Arc;

use crate::actions::Actions;
use crate::args::{Args, Command};
use crate::config::Config;
use crate::db::MasterKey;
use crate::revalidate::RevalidationBus;
use crate::server;

pub async fn main(args: Args) -> Result<()> {
    match args.command {
        Command::Serve => main_serve(args).await,
        Command::GenerateKey => {
            println!("{}", MasterKey::generate_base64());
            Ok(())
        }
    }
}

async fn main_serve(args: Args) -> Result<()> {
    let config = Config::load(&args.config).await?;
    let revalidation = Arc::new(RevalidationBus::new());
    let _logger = revalidation.spawn_logger();
    let actions = Actions::from_config(&config, revalidation)?;
    server::serve(&config.server, actions).await
}
