use super::Actions;
use crate::db::{BankAccount, NewBankAccount};
use crate::error::{Error, Result};
use crate::plaid_api::AccountId;

impl Actions {
    pub async fn create_bank_account(&self, account: NewBankAccount) -> Result<BankAccount> {
        self.store.create_bank_account(account).await
    }

    pub async fn get_banks(&self, user_id: &str) -> Result<Vec<BankAccount>> {
        self.store.list_bank_accounts(user_id).await
    }

    pub async fn get_bank(&self, document_id: &str) -> Result<Option<BankAccount>> {
        self.store.get_bank_account(document_id).await
    }

    pub async fn get_bank_by_account_id(&self, account_id: &AccountId) -> Result<Option<BankAccount>> {
        self.store.get_bank_account_by_account_id(account_id).await
    }

    /// A shareable id that doesn't decode is an error, not a lookup miss.
    pub async fn get_bank_by_shareable_id(&self, shareable_id: &str) -> Result<Option<BankAccount>> {
        let account_id = self
            .shareable_ids
            .decrypt(shareable_id)
            .map_err(|err| Error::crypto("shareable id", err))?;
        self.get_bank_by_account_id(&AccountId(account_id)).await
    }
}
