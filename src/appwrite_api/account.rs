use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::{Debug, Formatter};

use super::{client::AppwriteError, Appwrite};

/// Magic document/user id that makes Appwrite generate a unique id.
pub(super) const UNIQUE_ID: &str = "unique()";

#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
#[serde(transparent)]
pub struct SessionSecret {
    secret: String,
}

impl SessionSecret {
    pub fn new(secret: String) -> SessionSecret {
        SessionSecret { secret }
    }

    pub fn get(&self) -> &str {
        &self.secret
    }
}

impl Debug for SessionSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionSecret(*****)")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Session {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub secret: SessionSecret,
}

/// An account of the identity service, not to be confused with the user document.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct IdentityAccount {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

impl Appwrite {
    pub(super) async fn create_email_password_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AppwriteError> {
        log::info!("Creating session...");
        let request = self
            .admin(self.http().post(self.url("/account/sessions/email")))
            .json(&json!({ "email": email, "password": password }));
        let session = self.send(request).await?;
        log::info!("Creating session...done");
        Ok(session)
    }

    pub(super) async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<IdentityAccount, AppwriteError> {
        log::info!("Creating identity account...");
        let request = self.admin(self.http().post(self.url("/account"))).json(&json!({
            "userId": UNIQUE_ID,
            "email": email,
            "password": password,
            "name": name,
        }));
        let account: IdentityAccount = self.send(request).await?;
        log::info!("Creating identity account...done ({})", account.id);
        Ok(account)
    }

    pub(super) async fn get_account(
        &self,
        session: &SessionSecret,
    ) -> Result<IdentityAccount, AppwriteError> {
        let request = self.session(self.http().get(self.url("/account")), session);
        self.send(request).await
    }

    pub(super) async fn delete_current_session(
        &self,
        session: &SessionSecret,
    ) -> Result<(), AppwriteError> {
        log::info!("Deleting session...");
        let request = self.session(
            self.http().delete(self.url("/account/sessions/current")),
            session,
        );
        self.send_no_content(request).await?;
        log::info!("Deleting session...done");
        Ok(())
    }
}
