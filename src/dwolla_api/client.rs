use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, LOCATION},
    Response, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::config::DwollaConfig;

const HAL_JSON: &str = "application/vnd.dwolla.v1.hal+json";

#[derive(Debug, Error)]
pub enum DwollaError {
    #[error("Dwolla returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Could not serialize request body")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Response had no {0} link")]
    MissingLink(&'static str),
}

#[derive(Deserialize)]
struct AppToken {
    access_token: String,
}

/// Dwolla REST client authenticating with client credentials.
pub struct Dwolla {
    http: reqwest::Client,
    base_url: String,
    key: String,
    secret: String,
}

impl Dwolla {
    pub fn new(config: &DwollaConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: &DwollaConfig) -> Self {
        Self {
            http,
            base_url: config.environment.base_url().to_string(),
            key: config.key.clone(),
            secret: config.secret.clone(),
        }
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// A fresh application token for one onboarding call.
    async fn app_token(&self) -> Result<String, DwollaError> {
        let response = self
            .http
            .post(self.url("token"))
            .basic_auth(&self.key, Some(&self.secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let token: AppToken = check_status(response).await?.json().await?;
        Ok(token.access_token)
    }

    async fn post(&self, url: &str, body: &impl Serialize) -> Result<Response, DwollaError> {
        let token = self.app_token().await?;
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, HAL_JSON)
            .header(CONTENT_TYPE, HAL_JSON)
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;
        check_status(response).await
    }

    /// POSTs a resource and returns the `Location` of the created resource, if any.
    pub(super) async fn create(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<Option<String>, DwollaError> {
        let response = self.post(url, body).await?;
        Ok(response
            .headers()
            .get(LOCATION)
            .and_then(|location| location.to_str().ok())
            .map(str::to_owned))
    }

    pub(super) async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<T, DwollaError> {
        Ok(self.post(url, body).await?.json().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, DwollaError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await?;
        Err(DwollaError::Api { status, body })
    }
}
