//! Payment return routes: resolve the redirect target, then render.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ReturnConfig;
use crate::page;
use crate::state::AppState;
use crate::status::PaymentStatus;
use crate::target::{RedirectTarget, TargetError};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ReturnError {
    #[error("missing redirect target")]
    MissingRedirect,
    #[error(transparent)]
    InvalidRedirect(#[from] TargetError),
    #[error("redirect scheme not allowed: {0}")]
    SchemeNotAllowed(String),
}

impl IntoResponse for ReturnError {
    fn into_response(self) -> Response {
        warn!(error = %self, "payment return request rejected");
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ReturnQuery {
    status: Option<String>,
    #[serde(alias = "redirectDetails", alias = "redirect_details")]
    redirect: Option<String>,
}

/// `GET /payment/return?status=..&redirect=..`
///
/// # Errors
///
/// Returns a [`ReturnError`] (400) if the redirect target cannot be resolved.
pub async fn payment_return(
    State(state): State<AppState>,
    Query(params): Query<ReturnQuery>,
) -> Result<Response, ReturnError> {
    let status = params.status.as_deref().map(PaymentStatus::parse).unwrap_or_default();
    render(&state, &status, params.redirect.as_deref())
}

/// `GET /payment/return/{status}?redirect=..` — the path segment wins over any `status` query.
///
/// # Errors
///
/// Returns a [`ReturnError`] (400) if the redirect target cannot be resolved.
pub async fn payment_return_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
    Query(params): Query<ReturnQuery>,
) -> Result<Response, ReturnError> {
    render(&state, &PaymentStatus::parse(&status), params.redirect.as_deref())
}

fn render(state: &AppState, status: &PaymentStatus, redirect: Option<&str>) -> Result<Response, ReturnError> {
    let target = resolve_target(&state.config, redirect)?;
    debug!(status = status.as_str(), scheme = target.scheme().as_deref().unwrap_or("-"), "rendering return page");
    Ok(page::render_return_page(status, &target, &state.config.page))
}

/// Validate the requested target, or fall back to the configured default.
/// A blank `redirect` counts as absent.
pub(crate) fn resolve_target(config: &ReturnConfig, raw: Option<&str>) -> Result<RedirectTarget, ReturnError> {
    let target = match raw.filter(|r| !r.trim().is_empty()) {
        Some(raw) => RedirectTarget::parse(raw)?,
        None => config.default_redirect.clone().ok_or(ReturnError::MissingRedirect)?,
    };

    let scheme = target.scheme().unwrap_or_default();
    if !config.scheme_allowed(&scheme) {
        return Err(ReturnError::SchemeNotAllowed(scheme));
    }
    Ok(target)
}

#[cfg(test)]
#[path = "payment_test.rs"]
mod tests;
