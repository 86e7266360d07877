use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of a server action. Lookup misses are not errors, they come back as `Ok(None)`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication failed during {operation}")]
    Auth {
        operation: &'static str,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Aggregator call failed during {operation}")]
    Aggregator {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Payment provider onboarding failed during {operation}")]
    Onboarding {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Document store failed during {operation}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Could not decode {what}")]
    Crypto {
        what: &'static str,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub fn auth(operation: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Auth {
            operation,
            source: Some(boxed(source)),
        }
    }

    pub fn no_session(operation: &'static str) -> Self {
        Self::Auth {
            operation,
            source: None,
        }
    }

    pub fn aggregator(operation: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Aggregator {
            operation,
            source: boxed(source),
        }
    }

    pub fn onboarding(operation: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Onboarding {
            operation,
            source: boxed(source),
        }
    }

    pub fn persistence(operation: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Persistence {
            operation,
            source: boxed(source),
        }
    }

    pub fn crypto(what: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Crypto {
            what,
            source: boxed(source),
        }
    }

    /// Stable, machine readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "AuthError",
            Self::Aggregator { .. } => "AggregatorError",
            Self::Onboarding { .. } => "OnboardingError",
            Self::Persistence { .. } => "PersistenceError",
            Self::Crypto { .. } => "CryptoError",
        }
    }
}

fn boxed(source: impl Into<anyhow::Error>) -> BoxError {
    let source: anyhow::Error = source.into();
    source.into()
}
