use plaid::{PlaidAuth, PlaidClient};

use crate::config::{LinkConfig, PlaidConfig};

const PLAID_VERSION: &str = "2020-09-14";

pub struct Plaid {
    client: PlaidClient,
    link: LinkConfig,
}

impl Plaid {
    pub fn new(config: &PlaidConfig) -> Plaid {
        let auth = PlaidAuth::ClientId {
            client_id: config.client_id.clone(),
            secret: config.secret.clone(),
            plaid_version: PLAID_VERSION.to_string(),
        };
        let http = httpclient::Client::new().base_url(config.environment.base_url());
        Plaid {
            client: PlaidClient::new_with(http, auth),
            link: config.link.clone(),
        }
    }

    pub(super) fn client(&self) -> &PlaidClient {
        &self.client
    }

    pub(super) fn link_config(&self) -> &LinkConfig {
        &self.link
    }
}
