use rocket::{
    http::Status,
    response::{self, Responder},
    serde::json::Json,
    Request, Response,
};
use serde::Serialize;

use crate::error::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Self::Auth { .. } => Status::Unauthorized,
            Self::Aggregator { .. } | Self::Onboarding { .. } => Status::BadGateway,
            Self::Persistence { .. } => Status::ServiceUnavailable,
            Self::Crypto { .. } => Status::BadRequest,
        }
    }
}

/// `error: cause: cause ...`
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    chain
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        log::error!(
            "{} {} failed with {status}: {}",
            request.method(),
            request.uri(),
            error_chain(&self)
        );
        let body = Json(ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        });
        Response::build_from(body.respond_to(request)?)
            .status(status)
            .ok()
    }
}
