use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted fields of a user document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Id of the identity account this user belongs to.
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub date_of_birth: NaiveDate,
    pub dwolla_customer_id: String,
    pub dwolla_customer_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
    }
}
