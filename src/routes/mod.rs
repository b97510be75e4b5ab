//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The payment provider redirects the user's browser here after checkout.
//! Each request renders the return page for the reported status and the
//! deep link that leads back into the native app.

pub mod payment;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the service router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/payment/return", get(payment::payment_return))
        .route("/payment/return/{status}", get(payment::payment_return_status))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
