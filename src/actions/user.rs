use anyhow::anyhow;
use serde::Deserialize;

use super::Actions;
use crate::appwrite_api::SessionSecret;
use crate::db::{User, UserProfile};
use crate::dwolla_api::{extract_customer_id, PersonalInfo};
use crate::error::{Error, Result};
use crate::plaid_api::LinkToken;

#[derive(Deserialize, Clone)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Clone)]
pub struct SignUp {
    #[serde(flatten)]
    pub info: PersonalInfo,
    pub password: String,
}

/// A fresh session. `user` is `None` if the identity account has no user document.
#[derive(Debug)]
pub struct SignedIn {
    pub session: SessionSecret,
    pub user: Option<User>,
}

impl Actions {
    pub async fn sign_in(&self, credentials: &SignIn) -> Result<SignedIn> {
        let session = self
            .identity
            .create_session(&credentials.email, &credentials.password)
            .await?;
        let user = self.store.get_user_by_external_id(&session.user_id).await?;
        if user.is_none() {
            log::warn!("Identity account {} has no user document", session.user_id);
        }
        Ok(SignedIn {
            session: session.secret,
            user,
        })
    }

    /// Registers the identity account, onboards it with the payment provider
    /// and signs it in. The ssn only goes to the payment provider.
    pub async fn sign_up(&self, sign_up: &SignUp) -> Result<SignedIn> {
        let info = &sign_up.info;
        let full_name = format!("{} {}", info.first_name, info.last_name);
        let account = self
            .identity
            .create_user(&info.email, &sign_up.password, &full_name)
            .await?;

        let orphaned = |err| {
            log::error!("Identity account {} was created without a user document", account.id);
            err
        };

        let customer_url = self.onboarding.create_customer(info).await.map_err(orphaned)?;
        let customer_id = extract_customer_id(&customer_url).ok_or_else(|| {
            Error::onboarding(
                "create customer",
                anyhow!("Customer location {customer_url} has no id"),
            )
        })
        .map_err(orphaned)?;

        let user = self
            .store
            .create_user(&UserProfile {
                user_id: account.id.clone(),
                email: info.email.clone(),
                first_name: info.first_name.clone(),
                last_name: info.last_name.clone(),
                address1: info.address1.clone(),
                city: info.city.clone(),
                state: info.state.clone(),
                postal_code: info.postal_code.clone(),
                date_of_birth: info.date_of_birth,
                dwolla_customer_id: customer_id.to_string(),
                dwolla_customer_url: customer_url.clone(),
            })
            .await
            .map_err(orphaned)?;

        let session = self
            .identity
            .create_session(&info.email, &sign_up.password)
            .await?;
        Ok(SignedIn {
            session: session.secret,
            user: Some(user),
        })
    }

    pub async fn get_logged_in_user(&self, session: Option<&SessionSecret>) -> Result<Option<User>> {
        let Some(session) = session else {
            return Ok(None);
        };
        let account = self.identity.current_account(session).await?;
        self.store.get_user_by_external_id(&account.id).await
    }

    /// The signed-in user, an auth error if there is none.
    pub async fn require_user(&self, session: Option<&SessionSecret>) -> Result<User> {
        self.get_logged_in_user(session)
            .await?
            .ok_or_else(|| Error::no_session("get logged in user"))
    }

    pub async fn logout(&self, session: &SessionSecret) -> Result<()> {
        self.identity.delete_session(session).await
    }

    pub async fn get_user_info(&self, user_id: &str) -> Result<Option<User>> {
        self.store.get_user_by_external_id(user_id).await
    }

    pub async fn create_link_token(&self, user: &User) -> Result<LinkToken> {
        self.aggregator
            .create_link_token(&user.id, &user.full_name())
            .await
    }
}
