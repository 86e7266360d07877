use anyhow::Context as _;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::{
    bank_account::BankDocument, BankAccount, NewBankAccount, SecretSealer, User, UserProfile,
};
use crate::appwrite_api::{Document, IdentityGateway, Query};
use crate::config::AppwriteConfig;
use crate::error::{Error, Result};
use crate::plaid_api::{AccessToken, AccountId, ItemId};

/// Typed access to the user and bank collections.
pub struct Store {
    gateway: Arc<dyn IdentityGateway>,
    user_collection_id: String,
    bank_collection_id: String,
    sealer: SecretSealer,
}

impl Store {
    pub fn new(gateway: Arc<dyn IdentityGateway>, config: &AppwriteConfig, sealer: SecretSealer) -> Self {
        Self {
            gateway,
            user_collection_id: config.user_collection_id.clone(),
            bank_collection_id: config.bank_collection_id.clone(),
            sealer,
        }
    }

    /// The user document of an identity account.
    pub async fn get_user_by_external_id(&self, user_id: &str) -> Result<Option<User>> {
        let list = self
            .gateway
            .list_documents(&self.user_collection_id, &[Query::equal("userId", user_id)])
            .await?;
        list.documents
            .into_iter()
            .next()
            .map(from_document::<User>)
            .transpose()
    }

    pub async fn create_user(&self, profile: &UserProfile) -> Result<User> {
        let document = self
            .gateway
            .create_document(&self.user_collection_id, to_fields(profile)?)
            .await?;
        from_document(document)
    }

    pub async fn create_bank_account(&self, account: NewBankAccount) -> Result<BankAccount> {
        let sealed = BankDocument {
            user_id: account.user_id,
            bank_id: account.bank_id.0,
            account_id: account.account_id.0,
            access_token: self.seal(account.access_token.get())?,
            funding_source_url: self.seal(&account.funding_source_url)?,
            shareable_id: account.shareable_id,
        };
        let document = self
            .gateway
            .create_document(&self.bank_collection_id, to_fields(&sealed)?)
            .await?;
        self.unseal_bank(document)
    }

    pub async fn list_bank_accounts(&self, user_id: &str) -> Result<Vec<BankAccount>> {
        self.find_banks(Query::equal("userId", user_id))
            .await?
            .into_iter()
            .map(|document| self.unseal_bank(document))
            .collect()
    }

    pub async fn get_bank_account(&self, document_id: &str) -> Result<Option<BankAccount>> {
        self.find_banks(Query::equal("$id", document_id))
            .await?
            .into_iter()
            .next()
            .map(|document| self.unseal_bank(document))
            .transpose()
    }

    /// Only an unambiguous match counts, zero or several matches give `None`.
    pub async fn get_bank_account_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<BankAccount>> {
        let mut documents = self
            .find_banks(Query::equal("accountId", account_id.0.as_str()))
            .await?;
        if documents.len() != 1 {
            return Ok(None);
        }
        documents
            .pop()
            .map(|document| self.unseal_bank(document))
            .transpose()
    }

    async fn find_banks(&self, query: Query) -> Result<Vec<Document>> {
        let list = self
            .gateway
            .list_documents(&self.bank_collection_id, &[query])
            .await?;
        if list.total != list.documents.len() as u64 {
            log::warn!(
                "Document store reported {} banks but returned {}",
                list.total,
                list.documents.len()
            );
        }
        Ok(list.documents)
    }

    fn seal(&self, secret: &str) -> Result<String> {
        self.sealer
            .seal(secret)
            .map_err(|err| Error::persistence("seal secret", err))
    }

    fn unseal_bank(&self, document: Document) -> Result<BankAccount> {
        let id = document.id.clone();
        let sealed: BankDocument = from_document_fields(document)?;
        let access_token = self
            .sealer
            .unseal(&sealed.access_token)
            .map_err(|err| Error::crypto("access token", err))?;
        let funding_source_url = self
            .sealer
            .unseal(&sealed.funding_source_url)
            .map_err(|err| Error::crypto("funding source url", err))?;
        Ok(BankAccount {
            id,
            user_id: sealed.user_id,
            bank_id: ItemId(sealed.bank_id),
            account_id: AccountId(sealed.account_id),
            access_token: AccessToken::new(access_token),
            funding_source_url,
            shareable_id: sealed.shareable_id,
        })
    }
}

fn to_fields(value: &impl Serialize) -> Result<Map<String, Value>> {
    match serde_json::to_value(value).map_err(|err| Error::persistence("encode document", err))? {
        Value::Object(fields) => Ok(fields),
        other => Err(Error::persistence(
            "encode document",
            anyhow::anyhow!("Expected an object but got {other}"),
        )),
    }
}

/// Parses a document including its `$id`.
fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    let mut fields = document.fields;
    fields.insert("$id".to_string(), Value::String(document.id));
    serde_json::from_value(Value::Object(fields))
        .context("Document doesn't have the expected shape")
        .map_err(|err| Error::persistence("decode document", err))
}

fn from_document_fields<T: DeserializeOwned>(document: Document) -> Result<T> {
    serde_json::from_value(Value::Object(document.fields))
        .with_context(|| format!("Document {} doesn't have the expected shape", document.id))
        .map_err(|err| Error::persistence("decode document", err))
}
