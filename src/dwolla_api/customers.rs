use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{client::DwollaError, Dwolla};

/// Personal details needed to onboard a verified personal customer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub date_of_birth: NaiveDate,
    pub ssn: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCustomerRequest<'a> {
    #[serde(flatten)]
    info: &'a PersonalInfo,
    #[serde(rename = "type")]
    type_: &'static str,
}

impl Dwolla {
    pub(super) async fn create_personal_customer(
        &self,
        info: &PersonalInfo,
    ) -> Result<Option<String>, DwollaError> {
        log::info!("Creating payment customer...");
        let location = self
            .create(
                &self.url("customers"),
                &CreateCustomerRequest {
                    info,
                    type_: "personal",
                },
            )
            .await?;
        log::info!("Creating payment customer...done");
        Ok(location)
    }
}

/// Customer URLs look like `https://api.dwolla.com/customers/<id>`.
pub fn extract_customer_id(customer_url: &str) -> Option<&str> {
    let mut segments = customer_url.trim_end_matches('/').rsplit('/');
    let id = segments.next()?;
    (!id.is_empty() && segments.next() == Some("customers")).then_some(id)
}
