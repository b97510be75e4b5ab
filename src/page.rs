//! Return-page renderer.
//!
//! DESIGN
//! ======
//! `(status, target, options) -> Response`. The document is fully
//! self-contained (inline style and script) and the response carries a
//! fixed header set: HTML content type, no caching anywhere, and no
//! content sniffing. Rendering cannot fail.
//!
//! The page never navigates on load. The only navigation is the
//! synchronous `window.location.href` assignment inside the button's
//! click handler, which keeps the user-gesture context browsers require
//! before they hand a custom scheme to the OS.

use std::fmt::Write as _;

use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::response::{IntoResponse, Response};

use crate::handoff::{DEFAULT_FALLBACK_DELAY_MS, Phase, SILENT_FAILURE_LOG, Signal};
use crate::status::PaymentStatus;
use crate::target::RedirectTarget;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const NO_CACHE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";
pub const NOSNIFF: &str = "nosniff";

// =============================================================================
// OPTIONS
// =============================================================================

/// Renderer switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageOptions {
    /// Show the loading indicator, failure message and "Try Again" button.
    /// When off, a failed handoff is only reported on the browser console.
    pub loading_ui: bool,
    /// Delay before judging the handoff, in milliseconds.
    pub fallback_delay_ms: u64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { loading_ui: true, fallback_delay_ms: DEFAULT_FALLBACK_DELAY_MS }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Render the return page as a complete `200 OK` response.
#[must_use]
pub fn render_return_page(status: &PaymentStatus, target: &RedirectTarget, options: &PageOptions) -> Response {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, HTML_CONTENT_TYPE), (CACHE_CONTROL, NO_CACHE), (X_CONTENT_TYPE_OPTIONS, NOSNIFF)],
        render_html(status, target, options),
    )
        .into_response()
}

/// Render the HTML document only.
#[must_use]
pub fn render_html(status: &PaymentStatus, target: &RedirectTarget, options: &PageOptions) -> String {
    let copy = status.copy();
    let idle_label = Phase::Idle.button_label();
    let script = render_script(target, options);

    let (button, loading) = if options.loading_ui {
        (
            format!(r#"<button onclick="returnToApp()" class="btn" id="return-btn">{idle_label}</button>"#),
            r#"
      <div class="loading" id="loading"></div>"#,
        )
    } else {
        (format!(r#"<button onclick="returnToApp()" class="btn">{idle_label}</button>"#), "")
    };

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Payment Status</title>
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta charset="UTF-8">
    <style>{STYLE}</style>
  </head>
  <body>
    <div class="content">
      <span class="icon">{icon}</span>
      <h1>{heading}</h1>
      <p>{body}</p>

      {button}{loading}
    </div>
    <script>{script}</script>
  </body>
</html>"#,
        icon = copy.icon,
        heading = copy.heading,
        body = copy.body,
    )
}

// =============================================================================
// SCRIPT
// =============================================================================

fn render_script(target: &RedirectTarget, options: &PageOptions) -> String {
    let deep_link = target.script_literal();
    let delay = options.fallback_delay_ms;

    let mut listeners = String::new();
    for signal in Signal::observed(options.loading_ui) {
        let _ = write!(listeners, "\n        {}", signal.listener_js());
    }

    if options.loading_ui {
        let opening = Phase::Navigating.message().unwrap_or_default();
        let failed = Phase::Failed.message().unwrap_or_default();
        let retry_label = Phase::Failed.button_label();
        format!(
            r#"
      function returnToApp() {{
        const deepLink = {deep_link};
        const btn = document.getElementById('return-btn');
        const loading = document.getElementById('loading');

        btn.style.display = 'none';
        loading.innerHTML = '<p>{opening}</p>';
        loading.classList.add('show');

        // Must stay synchronous inside the click handler.
        window.location.href = deepLink;

        let appOpened = false;{listeners}

        setTimeout(function() {{
          if (!appOpened && document.visibilityState === 'visible') {{
            loading.innerHTML = '<p class="failed">{failed}</p>';
            btn.style.display = 'block';
            btn.textContent = '{retry_label}';
          }}
        }}, {delay});
      }}
    "#
        )
    } else {
        format!(
            r#"
      function returnToApp() {{
        const deepLink = {deep_link};

        // Must stay synchronous inside the click handler.
        window.location.href = deepLink;

        let appOpened = false;{listeners}

        setTimeout(function() {{
          if (!appOpened && document.visibilityState === 'visible') {{
            console.log('{SILENT_FAILURE_LOG}');
          }}
        }}, {delay});
      }}
    "#
        )
    }
}

const STYLE: &str = r#"
      body {
          font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
          text-align: center;
          padding: 0;
          margin: 0;
          background-color: #132439;
          color: white;
          display: flex;
          flex-direction: column;
          justify-content: center;
          align-items: center;
          min-height: 100vh;
      }
      .content {
          max-width: 360px;
          margin: 20px;
          background: #1e3a5f;
          padding: 40px 30px;
          border-radius: 24px;
          box-shadow: 0 10px 30px rgba(0,0,0,0.4);
      }
      h1 { margin: 0 0 15px; font-size: 24px; font-weight: 700; color: #fff; }
      p { margin: 0 0 30px; line-height: 1.6; color: #94a3b8; font-size: 16px; }
      .btn {
          display: block;
          width: 100%;
          box-sizing: border-box;
          background-color: #fca311;
          color: #132439;
          padding: 18px;
          border-radius: 16px;
          font-weight: 800;
          font-size: 18px;
          transition: transform 0.1s, opacity 0.2s;
          box-shadow: 0 4px 12px rgba(252, 163, 17, 0.3);
          border: none;
          cursor: pointer;
      }
      .btn:active { transform: scale(0.98); opacity: 0.9; }
      .icon { font-size: 64px; margin-bottom: 24px; display: block; }
      .loading { display: none; margin-top: 20px; color: #94a3b8; font-size: 14px; }
      .loading.show { display: block; }
      .loading .failed { color: #fca311; }
    "#;

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
