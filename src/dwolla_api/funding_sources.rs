use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{client::DwollaError, Dwolla};
use crate::plaid_api::ProcessorToken;

#[derive(Deserialize)]
struct OnDemandAuthorization {
    #[serde(rename = "_links")]
    links: Map<String, Value>,
}

impl OnDemandAuthorization {
    fn href(&self) -> Result<&str, DwollaError> {
        self.links
            .get("self")
            .and_then(|link| link.get("href"))
            .and_then(Value::as_str)
            .ok_or(DwollaError::MissingLink("self"))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFundingSourceRequest<'a> {
    name: &'a str,
    plaid_token: &'a str,
    #[serde(rename = "_links")]
    links: Value,
}

impl<'a> CreateFundingSourceRequest<'a> {
    fn new(
        name: &'a str,
        processor_token: &'a ProcessorToken,
        authorization: &OnDemandAuthorization,
    ) -> Result<Self, DwollaError> {
        Ok(Self {
            name,
            plaid_token: processor_token.get(),
            links: json!({
                "on-demand-authorization": { "href": authorization.href()? }
            }),
        })
    }
}

impl Dwolla {
    /// Authorization for the provider to debit the account on demand; funding sources
    /// created from a processor token reference it.
    async fn create_on_demand_authorization(&self) -> Result<OnDemandAuthorization, DwollaError> {
        self.post_json(&self.url("on-demand-authorizations"), &json!({}))
            .await
    }

    pub(super) async fn add_funding_source(
        &self,
        customer_id: &str,
        processor_token: &ProcessorToken,
        bank_name: &str,
    ) -> Result<Option<String>, DwollaError> {
        log::info!("Adding funding source...");
        let authorization = self.create_on_demand_authorization().await?;
        let request = CreateFundingSourceRequest::new(bank_name, processor_token, &authorization)?;
        let location = self
            .create(
                &self.url(&format!("customers/{customer_id}/funding-sources")),
                &request,
            )
            .await?;
        log::info!("Adding funding source...done");
        Ok(location)
    }
}
