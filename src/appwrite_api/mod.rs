use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

mod account;
mod client;
mod databases;
mod query;

pub use account::{IdentityAccount, Session, SessionSecret};
pub use client::{Appwrite, AppwriteError};
pub use databases::{Document, DocumentList};
pub use query::Query;

/// Sessions, identity accounts and documents of the identity + document service.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    async fn create_session(&self, email: &str, password: &str) -> Result<Session>;

    async fn create_user(&self, email: &str, password: &str, full_name: &str)
        -> Result<IdentityAccount>;

    /// The account owning `session`.
    async fn current_account(&self, session: &SessionSecret) -> Result<IdentityAccount>;

    async fn delete_session(&self, session: &SessionSecret) -> Result<()>;

    async fn create_document(&self, collection_id: &str, fields: Map<String, Value>)
        -> Result<Document>;

    async fn list_documents(&self, collection_id: &str, queries: &[Query]) -> Result<DocumentList>;
}

/// Rejections become [Error::Auth], everything else means the identity service is unavailable.
fn identity_error(operation: &'static str, error: AppwriteError) -> Error {
    if error.is_rejection() {
        Error::auth(operation, error)
    } else {
        Error::persistence(operation, error)
    }
}

#[async_trait]
impl IdentityGateway for Appwrite {
    async fn create_session(&self, email: &str, password: &str) -> Result<Session> {
        self.create_email_password_session(email, password)
            .await
            .map_err(|err| identity_error("create session", err))
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<IdentityAccount> {
        self.create_account(email, password, full_name)
            .await
            .map_err(|err| identity_error("create user", err))
    }

    async fn current_account(&self, session: &SessionSecret) -> Result<IdentityAccount> {
        self.get_account(session)
            .await
            .map_err(|err| identity_error("get current account", err))
    }

    async fn delete_session(&self, session: &SessionSecret) -> Result<()> {
        self.delete_current_session(session)
            .await
            .map_err(|err| identity_error("delete session", err))
    }

    async fn create_document(
        &self,
        collection_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document> {
        self.create_document_in(collection_id, fields)
            .await
            .map_err(|err| Error::persistence("create document", err))
    }

    async fn list_documents(&self, collection_id: &str, queries: &[Query]) -> Result<DocumentList> {
        self.list_documents_in(collection_id, queries)
            .await
            .map_err(|err| Error::persistence("list documents", err))
    }
}
