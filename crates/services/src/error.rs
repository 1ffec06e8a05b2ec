//! Shared error types for the services crate.

use thiserror::Error;

use capture::CaptureError;
use telugu_core::model::{ActivityKind, ItemError};

/// Errors emitted by `ContentClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    #[error("topic cannot be empty")]
    EmptyTopic,

    #[error("user name cannot be empty")]
    EmptyUser,

    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("server reported failure status: {0}")]
    Rejected(String),

    #[error("malformed response item: {0}")]
    Item(#[from] ItemError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Errors emitted by activity sessions.
///
/// All of these are recovered at the session boundary: load failures leave
/// the session `Empty`, submission-validation failures leave it `Active`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{activity} request failed: {source}")]
    Request {
        activity: ActivityKind,
        #[source]
        source: ClientError,
    },

    #[error("the server returned no items")]
    EmptyResult,

    #[error("load result is stale and was discarded")]
    StaleResponse,

    #[error("every left item must be paired before scoring")]
    IncompleteSubmission,

    #[error("response does not fit the current item")]
    ResponseMismatch,

    #[error("no active session")]
    NotActive,

    #[error("session is not in review")]
    NotReviewing,

    #[error(transparent)]
    Capture(#[from] CaptureError),
}
