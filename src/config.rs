use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    net::{IpAddr, Ipv4Addr},
    path::Path,
};

use crate::db::MasterKey;

#[derive(Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub appwrite: AppwriteConfig,
    pub plaid: PlaidConfig,
    pub dwolla: DwollaConfig,
    pub secrets: SecretsConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

fn default_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

#[derive(Deserialize, Clone)]
pub struct AppwriteConfig {
    /// e.g. `https://cloud.appwrite.io/v1`
    pub endpoint: String,
    pub project: String,
    /// Server API key.
    pub key: String,
    pub database_id: String,
    pub user_collection_id: String,
    pub bank_collection_id: String,
}

#[derive(Deserialize, Clone)]
pub struct PlaidConfig {
    pub client_id: String,
    pub secret: String,
    pub environment: PlaidEnvironment,
    #[serde(default)]
    pub link: LinkConfig,
    /// Processor the processor tokens are issued for.
    #[serde(default = "default_processor")]
    pub processor: String,
}

fn default_processor() -> String {
    "dwolla".to_string()
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaidEnvironment {
    Sandbox,
    Production,
}

impl PlaidEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.plaid.com",
            Self::Production => "https://production.plaid.com",
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub products: Vec<String>,
    pub country_codes: Vec<String>,
    pub language: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            products: vec!["auth".to_string()],
            country_codes: vec!["US".to_string()],
            language: "en".to_string(),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct DwollaConfig {
    pub environment: DwollaEnvironment,
    pub key: String,
    pub secret: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DwollaEnvironment {
    Sandbox,
    Production,
}

impl DwollaEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://api-sandbox.dwolla.com",
            Self::Production => "https://api.dwolla.com",
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct SecretsConfig {
    /// Base64 encoded 32 byte key. Generate one with `banklink generate-key`.
    pub encryption_key: String,
}

impl Config {
    pub async fn load(path: &Path) -> Result<Config> {
        log::info!("Loading config from {}...", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)?;
        log::info!("Loading config...done");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Config> {
        let config: Config = serde_yaml::from_str(content).context("Invalid config file")?;
        config.master_key()?;
        Ok(config)
    }

    pub fn master_key(&self) -> Result<MasterKey> {
        MasterKey::from_base64(&self.secrets.encryption_key).context("Invalid secrets.encryption_key")
    }
}
