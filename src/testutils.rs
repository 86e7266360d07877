//! In-memory stand-ins for the remote services.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::appwrite_api::{
    Document, DocumentList, IdentityAccount, IdentityGateway, Query, Session, SessionSecret,
};
use crate::config::AppwriteConfig;
use crate::db::{MasterKey, UserProfile};
use crate::dwolla_api::{PersonalInfo, TransferOnboarding};
use crate::error::{Error, Result};
use crate::plaid_api::{
    AccessToken, AccountId, AccountInfo, Aggregator, ItemAccess, ItemId, LinkToken,
    ProcessorToken, PublicToken,
};
use crate::revalidate::CacheInvalidator;

pub const USER_COLLECTION: &str = "users";
pub const BANK_COLLECTION: &str = "banks";

pub const INVALID_PUBLIC_TOKEN: &str = "public-sandbox-expired";

pub fn appwrite_config() -> AppwriteConfig {
    AppwriteConfig {
        endpoint: "http://appwrite.invalid/v1".to_string(),
        project: "project".to_string(),
        key: "key".to_string(),
        database_id: "main".to_string(),
        user_collection_id: USER_COLLECTION.to_string(),
        bank_collection_id: BANK_COLLECTION.to_string(),
    }
}

pub fn master_key() -> MasterKey {
    MasterKey::from_base64("AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=").unwrap()
}

pub fn personal_info() -> PersonalInfo {
    PersonalInfo {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        address1: "12 St James's Square".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        postal_code: "10001".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1985, 12, 10).unwrap(),
        ssn: "1234".to_string(),
    }
}

pub fn user_profile(user_id: &str) -> UserProfile {
    let info = personal_info();
    UserProfile {
        user_id: user_id.to_string(),
        email: info.email,
        first_name: info.first_name,
        last_name: info.last_name,
        address1: info.address1,
        city: info.city,
        state: info.state,
        postal_code: info.postal_code,
        date_of_birth: info.date_of_birth,
        dwolla_customer_id: "cust-1".to_string(),
        dwolla_customer_url: "https://api-sandbox.dwolla.com/customers/cust-1".to_string(),
    }
}

pub fn account_info(account_id: &str, name: &str) -> AccountInfo {
    AccountInfo {
        account_id: AccountId(account_id.to_string()),
        name: name.to_string(),
        official_name: None,
        mask: Some("0000".to_string()),
        type_: "depository".to_string(),
    }
}

struct Registration {
    password: String,
    account: IdentityAccount,
}

/// Identity accounts, sessions and document collections.
#[derive(Default)]
pub struct FakeIdentity {
    next_id: AtomicUsize,
    registrations: Mutex<HashMap<String, Registration>>,
    sessions: Mutex<HashMap<String, String>>,
    collections: Mutex<HashMap<String, Vec<Document>>>,
    fail_document_creation: AtomicBool,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    fn new_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    pub fn documents(&self, collection_id: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn update_field(&self, collection_id: &str, document_id: &str, field: &str, value: Value) {
        let mut collections = self.collections.lock().unwrap();
        let document = collections
            .get_mut(collection_id)
            .and_then(|documents| documents.iter_mut().find(|doc| doc.id == document_id))
            .unwrap();
        document.fields.insert(field.to_string(), value);
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn fail_document_creation(&self) {
        self.fail_document_creation.store(true, Ordering::SeqCst);
    }

    /// Registers an identity account and signs it in.
    pub async fn signed_in_account(&self, email: &str) -> (IdentityAccount, SessionSecret) {
        let account = self.create_user(email, "password", "Ada Lovelace").await.unwrap();
        let session = self.create_session(email, "password").await.unwrap();
        (account, session.secret)
    }
}

#[async_trait]
impl IdentityGateway for FakeIdentity {
    async fn create_session(&self, email: &str, password: &str) -> Result<Session> {
        let user_id = match self.registrations.lock().unwrap().get(email) {
            Some(registration) if registration.password == password => {
                registration.account.id.clone()
            }
            _ => return Err(Error::auth("create session", anyhow!("Invalid credentials"))),
        };
        let secret = self.new_id("secret");
        self.sessions
            .lock()
            .unwrap()
            .insert(secret.clone(), user_id.clone());
        Ok(Session {
            user_id,
            secret: SessionSecret::new(secret),
        })
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<IdentityAccount> {
        let mut registrations = self.registrations.lock().unwrap();
        if registrations.contains_key(email) {
            return Err(Error::auth("create user", anyhow!("User already exists")));
        }
        let account = IdentityAccount {
            id: self.new_id("identity"),
            email: email.to_string(),
            name: full_name.to_string(),
        };
        registrations.insert(
            email.to_string(),
            Registration {
                password: password.to_string(),
                account: account.clone(),
            },
        );
        Ok(account)
    }

    async fn current_account(&self, session: &SessionSecret) -> Result<IdentityAccount> {
        let user_id = self
            .sessions
            .lock()
            .unwrap()
            .get(session.get())
            .cloned()
            .ok_or_else(|| Error::auth("get current account", anyhow!("Invalid session")))?;
        let registrations = self.registrations.lock().unwrap();
        let registration = registrations
            .values()
            .find(|registration| registration.account.id == user_id)
            .unwrap();
        Ok(registration.account.clone())
    }

    async fn delete_session(&self, session: &SessionSecret) -> Result<()> {
        match self.sessions.lock().unwrap().remove(session.get()) {
            Some(_) => Ok(()),
            None => Err(Error::auth("delete session", anyhow!("Invalid session"))),
        }
    }

    async fn create_document(
        &self,
        collection_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document> {
        if self.fail_document_creation.load(Ordering::SeqCst) {
            return Err(Error::persistence(
                "create document",
                anyhow!("Document store unavailable"),
            ));
        }
        let document = Document {
            id: self.new_id("doc"),
            fields,
        };
        self.collections
            .lock()
            .unwrap()
            .entry(collection_id.to_string())
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    async fn list_documents(&self, collection_id: &str, queries: &[Query]) -> Result<DocumentList> {
        let documents = self
            .documents(collection_id)
            .into_iter()
            .filter(|document| {
                let id = Value::String(document.id.clone());
                queries.iter().all(|query| {
                    let field = match query.attribute() {
                        "$id" => Some(&id),
                        attribute => document.fields.get(attribute),
                    };
                    query.matches(field)
                })
            })
            .collect::<Vec<_>>();
        Ok(DocumentList {
            total: documents.len() as u64,
            documents,
        })
    }
}

pub struct FakeAggregator {
    pub accounts: Vec<AccountInfo>,
    pub link_token_requests: Mutex<Vec<(String, String)>>,
    pub processor_token_requests: Mutex<Vec<(AccountId, String)>>,
}

impl FakeAggregator {
    pub fn with_accounts(accounts: Vec<AccountInfo>) -> Self {
        Self {
            accounts,
            link_token_requests: Mutex::new(Vec::new()),
            processor_token_requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Aggregator for FakeAggregator {
    async fn create_link_token(&self, client_user_id: &str, client_name: &str) -> Result<LinkToken> {
        self.link_token_requests
            .lock()
            .unwrap()
            .push((client_user_id.to_string(), client_name.to_string()));
        Ok(LinkToken(format!("link-sandbox-{client_user_id}")))
    }

    async fn exchange_public_token(&self, public_token: &PublicToken) -> Result<ItemAccess> {
        if public_token.0 == INVALID_PUBLIC_TOKEN {
            return Err(Error::aggregator(
                "exchange public token",
                anyhow!("INVALID_PUBLIC_TOKEN"),
            ));
        }
        Ok(ItemAccess {
            access_token: AccessToken::new("access-sandbox-1".to_string()),
            item_id: ItemId("item-1".to_string()),
        })
    }

    async fn get_accounts(&self, _access_token: &AccessToken) -> Result<Vec<AccountInfo>> {
        Ok(self.accounts.clone())
    }

    async fn create_processor_token(
        &self,
        _access_token: &AccessToken,
        account_id: &AccountId,
        processor: &str,
    ) -> Result<ProcessorToken> {
        self.processor_token_requests
            .lock()
            .unwrap()
            .push((account_id.clone(), processor.to_string()));
        Ok(ProcessorToken::new(format!(
            "processor-sandbox-{}",
            account_id.0
        )))
    }
}

pub struct FakeOnboarding {
    /// What funding source creation hands back.
    pub funding_source_url: Option<String>,
    /// The location customer creation hands back.
    pub customer_url: String,
    pub fail_customer_creation: bool,
    pub customers: Mutex<Vec<PersonalInfo>>,
    pub funding_source_requests: Mutex<Vec<(String, ProcessorToken, String)>>,
}

impl FakeOnboarding {
    pub fn new() -> Self {
        Self::with_funding_source(Some(
            "https://api-sandbox.dwolla.com/funding-sources/fs-1".to_string(),
        ))
    }

    pub fn with_funding_source(funding_source_url: Option<String>) -> Self {
        Self {
            funding_source_url,
            customer_url: "https://api-sandbox.dwolla.com/customers/cust-1".to_string(),
            fail_customer_creation: false,
            customers: Mutex::new(Vec::new()),
            funding_source_requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TransferOnboarding for FakeOnboarding {
    async fn create_customer(&self, info: &PersonalInfo) -> Result<String> {
        if self.fail_customer_creation {
            return Err(Error::onboarding(
                "create customer",
                anyhow!("ValidationError: Invalid parameter"),
            ));
        }
        self.customers.lock().unwrap().push(info.clone());
        Ok(self.customer_url.clone())
    }

    async fn create_funding_source(
        &self,
        customer_id: &str,
        processor_token: &ProcessorToken,
        bank_name: &str,
    ) -> Result<Option<String>> {
        self.funding_source_requests.lock().unwrap().push((
            customer_id.to_string(),
            processor_token.clone(),
            bank_name.to_string(),
        ));
        Ok(self.funding_source_url.clone())
    }
}

#[derive(Default)]
pub struct FakeInvalidator {
    pub paths: Mutex<Vec<String>>,
}

impl CacheInvalidator for FakeInvalidator {
    fn revalidate_path(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}
