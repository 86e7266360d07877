use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// A document filter in Appwrite's JSON query syntax.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Query {
    method: &'static str,
    attribute: String,
    values: Vec<Value>,
}

impl Query {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self {
            method: "equal",
            attribute: attribute.to_string(),
            values: vec![value.into()],
        }
    }

    #[cfg(test)]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Whether a document field satisfies this query.
    #[cfg(test)]
    pub fn matches(&self, field: Option<&Value>) -> bool {
        match self.method {
            "equal" => field.is_some_and(|field| self.values.contains(field)),
            _ => false,
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let serialized = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&serialized)
    }
}
