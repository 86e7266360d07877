use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Short-lived token handed to the browser to open the linking flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkToken(pub String);

/// Short-lived token the browser gets back from a finished linking flow.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct PublicToken(pub String);

impl Debug for PublicToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicToken(*****)")
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct AccessToken {
    access_token: String,
}

impl AccessToken {
    pub fn new(access_token: String) -> AccessToken {
        AccessToken { access_token }
    }

    pub fn get(&self) -> &str {
        &self.access_token
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(*****)")
    }
}

/// Lets the payment processor reference one linked account without the access token.
#[derive(Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct ProcessorToken {
    processor_token: String,
}

impl ProcessorToken {
    pub fn new(processor_token: String) -> ProcessorToken {
        ProcessorToken { processor_token }
    }

    pub fn get(&self) -> &str {
        &self.processor_token
    }
}

impl Debug for ProcessorToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProcessorToken(*****)")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ItemId(pub String);

/// Durable access to an item, as returned by the public token exchange.
#[derive(Debug, Clone)]
pub struct ItemAccess {
    pub access_token: AccessToken,
    pub item_id: ItemId,
}
