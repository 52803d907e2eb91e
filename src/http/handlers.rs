//! Request handlers.
//!
//! # Responsibilities
//! - `GET /csrf-token`: establish the session cookie, mint a token
//! - `POST /submit`: run the submission pipeline and report the outcome
//! - `GET /health`: liveness probe

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use uuid::Uuid;

use crate::http::error::reject_response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::pipeline::RejectReason;

/// Session cookie carrying the client's opaque session id.
pub const SESSION_COOKIE: &str = "intake_session";

/// Header the client echoes the token back on.
pub const X_CSRF_TOKEN: &str = "x-csrf-token";

#[derive(Serialize)]
pub struct CsrfTokenResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
}

/// Reuse the client's session id, or establish a fresh one.
fn session_from(jar: CookieJar) -> (CookieJar, Uuid) {
    if let Some(session) = jar
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<Uuid>().ok())
    {
        return (jar, session);
    }

    let session = Uuid::new_v4();
    let cookie = Cookie::build((SESSION_COOKIE, session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict);
    (jar.add(cookie), session)
}

/// `GET /csrf-token` — sets/refreshes the session-bound token.
pub async fn csrf_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<CsrfTokenResponse>) {
    let (jar, session) = session_from(jar);
    let token = state.pipeline.tokens().issue(session);

    tracing::debug!(session = %session, "Issued CSRF token");
    metrics::record_token_issued();

    (jar, Json(CsrfTokenResponse { csrf_token: token }))
}

/// `POST /submit` — run one submission through the pipeline.
pub async fn submit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<Uuid>().ok());
    let presented_token = headers.get(X_CSRF_TOKEN).and_then(|v| v.to_str().ok());

    match state
        .pipeline
        .process(session, presented_token, &body, addr.ip())
        .await
    {
        Ok(()) => {
            tracing::info!(origin = %addr.ip(), "Submission accepted");
            metrics::record_submission("accepted");
            (
                StatusCode::OK,
                Json(SubmitResponse {
                    message: "Data saved successfully",
                }),
            )
                .into_response()
        }
        Err(reason) => {
            match &reason {
                RejectReason::Hashing(e) => {
                    tracing::error!(origin = %addr.ip(), error = %e, "Submission failed internally")
                }
                RejectReason::Store(e) => {
                    tracing::error!(origin = %addr.ip(), error = %e, "Submission failed internally")
                }
                RejectReason::RateLimited => {
                    tracing::warn!(origin = %addr.ip(), "Rate limit exceeded");
                    metrics::record_rate_limited();
                }
                other => {
                    tracing::warn!(origin = %addr.ip(), reason = %other, "Submission rejected")
                }
            }
            metrics::record_submission(reason.outcome());
            reject_response(&reason, state.debug_errors)
        }
    }
}

/// `GET /health` — liveness probe.
pub async fn health() -> &'static str {
    "OK"
}
