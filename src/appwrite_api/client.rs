use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use crate::config::AppwriteConfig;

use super::SessionSecret;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const SESSION_HEADER: &str = "X-Appwrite-Session";

#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("Appwrite returned {status}: {message}")]
    Api {
        status: StatusCode,
        kind: Option<String>,
        message: String,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl AppwriteError {
    /// The request reached Appwrite and was rejected because of what it asked for,
    /// e.g. wrong credentials or an expired session.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Api { status, .. } => status.is_client_error(),
            Self::Transport(_) => false,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Appwrite REST client. Admin requests authenticate with the API key, session
/// requests act on behalf of the user owning the session secret.
pub struct Appwrite {
    http: reqwest::Client,
    endpoint: String,
    project: String,
    key: String,
    database_id: String,
}

impl Appwrite {
    pub fn new(config: &AppwriteConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: &AppwriteConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project: config.project.clone(),
            key: config.key.clone(),
            database_id: config.database_id.clone(),
        }
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    pub(super) fn collection_url(&self, collection_id: &str) -> String {
        self.url(&format!(
            "/databases/{}/collections/{}/documents",
            self.database_id, collection_id
        ))
    }

    pub(super) fn admin(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(PROJECT_HEADER, &self.project)
            .header(KEY_HEADER, &self.key)
    }

    pub(super) fn session(&self, request: RequestBuilder, session: &SessionSecret) -> RequestBuilder {
        request
            .header(PROJECT_HEADER, &self.project)
            .header(SESSION_HEADER, session.get())
    }

    pub(super) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(super) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AppwriteError> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub(super) async fn send_no_content(&self, request: RequestBuilder) -> Result<(), AppwriteError> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, AppwriteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    let (message, kind) = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error) => (error.message, error.kind),
        Err(_) => (body, None),
    };
    Err(AppwriteError::Api {
        status,
        kind,
        message,
    })
}
