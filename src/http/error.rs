//! Rejection responses.
//!
//! # Responsibilities
//! - Map a rejection reason to status code and JSON body
//! - Keep internal error detail out of responses unless debug mode is
//!   enabled
//!
//! # Design Decisions
//! - Client-facing messages are fixed strings; internal detail only
//!   ever reaches the body through the opt-in `error` field

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::RejectReason;

/// JSON error body: `{"message": ...}` plus optional debug detail.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn status_for(reason: &RejectReason) -> StatusCode {
    match reason {
        RejectReason::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        RejectReason::InvalidToken => StatusCode::FORBIDDEN,
        RejectReason::Validation(_) => StatusCode::BAD_REQUEST,
        RejectReason::Hashing(_) | RejectReason::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the response for a rejected submission.
pub fn reject_response(reason: &RejectReason, debug_errors: bool) -> Response {
    let status = status_for(reason);

    let (message, detail) = if status == StatusCode::INTERNAL_SERVER_ERROR {
        // Internal failures stay generic; detail is opt-in.
        let detail = debug_errors.then(|| reason.to_string());
        ("Internal server error".to_string(), detail)
    } else {
        (reason.to_string(), None)
    };

    (
        status,
        Json(ErrorBody {
            message,
            error: detail,
        }),
    )
        .into_response()
}
