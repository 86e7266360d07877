mod bank_account;
mod crypto;
mod store;
mod user;

pub use bank_account::{BankAccount, NewBankAccount};
pub use crypto::{Cipher, MasterKey, SecretSealer, ShareableIdCodec, XChaCha20Poly1305Cipher};
pub use store::Store;
pub use user::{User, UserProfile};
