//! # HTTP API
//!
//! Long-lived service mode. Each request is verified independently against
//! the same immutable `ClaimVerifier`; handlers share nothing mutable
//! except the optional rate limiter.
//!
//! Routes:
//! - `GET /health` - `{"status":"initialized","method":"simple_patterns"}`
//! - `POST /verify` - `{"claim": ..., "evidence": [...]}` to `VerificationResult`

use crate::cli::{StatusReport, VerifyRequest};
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use claimcheck_core::{ClaimVerifier, VerificationResult};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde_json::json;
use std::num::NonZeroU32;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    verifier: Arc<ClaimVerifier>,
    api_key: Option<Arc<str>>,
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl AppState {
    /// Create state with no authentication and no rate limit.
    pub fn new(verifier: ClaimVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
            api_key: None,
            limiter: None,
        }
    }

    /// Require `Authorization: Bearer <key>` on protected routes.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.is_empty()).map(Arc::from);
        self
    }

    /// Limit protected routes to `per_second` requests; 0 disables.
    pub fn with_rate_limit(mut self, per_second: u32) -> Self {
        self.limiter = NonZeroU32::new(per_second)
            .map(|rps| Arc::new(RateLimiter::direct(Quota::per_second(rps))));
        self
    }
}

/// JSON error reply: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/verify", post(verify_claim))
        .route_layer(middleware::from_fn_with_state(state.clone(), guard));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: AppState) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "claimcheck listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("claimcheck stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn health() -> Json<StatusReport> {
    Json(StatusReport::initialized())
}

async fn verify_claim(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerificationResult>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text()))?;

    let result = state.verifier.verify(&request.claim, &request.evidence);
    tracing::debug!(verdict = %result.verdict, "claim verified");
    Ok(Json(result))
}

async fn guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(expected) = &state.api_key {
        let provided = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or_default();

        if !bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            return ApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }
    }

    // Only authenticated requests draw from the shared quota.
    if state.limiter.as_ref().is_some_and(|l| l.check().is_err()) {
        return ApiError::new(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded").into_response();
    }

    next.run(request).await
}
