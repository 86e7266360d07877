pub mod actions;
pub mod appwrite_api;
pub mod args;
pub mod cli;
pub mod config;
pub mod db;
pub mod dwolla_api;
pub mod error;
pub mod plaid_api;
pub mod revalidate;
pub mod server;

#[cfg(test)]
mod testutils;

pub use error::{Error, Result};
