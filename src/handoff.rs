//! Browser-to-app handoff: the client-side state machine behind the page.
//!
//! DESIGN
//! ======
//! Whether the native app actually opened is not observable from the page.
//! We infer it from a union of best-effort environmental signals (page
//! hidden, window blurred, page hidden for unload) and, once a fallback
//! delay has elapsed, make a timeout judgment: no signal while the page is
//! still visible means the handoff failed and the retry affordance comes
//! back.
//!
//! Navigation is only ever started from the click handler. Browsers block
//! location changes issued from timers or load handlers for custom
//! schemes, so there is deliberately no automatic redirect anywhere.
//!
//! `Signal` and `Phase` feed the script emitted by `page`. `HandoffModel`
//! is a step-by-step mirror of that script so its behavior can be checked
//! without a browser.

// =============================================================================
// SIGNALS
// =============================================================================

pub const DEFAULT_FALLBACK_DELAY_MS: u64 = 2000;

/// Evidence that the operating system switched away to the native app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// `document` fired `visibilitychange` and is now hidden.
    VisibilityHidden,
    /// `window` lost focus.
    Blur,
    /// `window` fired `pagehide`; in-app browser containers emit this.
    PageHide,
}

impl Signal {
    /// Signals observed by a page; the silent variant never listened for `pagehide`.
    #[must_use]
    pub fn observed(loading_ui: bool) -> &'static [Self] {
        if loading_ui {
            &[Self::VisibilityHidden, Self::Blur, Self::PageHide]
        } else {
            &[Self::VisibilityHidden, Self::Blur]
        }
    }

    /// Listener registration that sets `appOpened` when this signal fires.
    #[must_use]
    pub fn listener_js(self) -> &'static str {
        match self {
            Self::VisibilityHidden => {
                "document.addEventListener('visibilitychange', function() {\n          if (document.hidden) appOpened = true;\n        });"
            }
            Self::Blur => "window.addEventListener('blur', function() {\n          appOpened = true;\n        });",
            Self::PageHide => "window.addEventListener('pagehide', function() {\n          appOpened = true;\n        });",
        }
    }
}

// =============================================================================
// PHASES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Page loaded, waiting for the user.
    Idle,
    /// Deep link assigned; observation window open.
    Navigating,
    /// Window closed with evidence of the app, or with the page no longer visible.
    HandedOff,
    /// Window closed with no evidence while the page was still visible.
    Failed,
}

impl Phase {
    #[must_use]
    pub fn button_visible(self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }

    #[must_use]
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Failed => "Try Again",
            Self::Idle | Self::Navigating | Self::HandedOff => "Return to App",
        }
    }

    /// Text in the loading indicator, if it is shown.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Navigating | Self::HandedOff => Some("Opening app..."),
            Self::Failed => Some("Unable to open app. Please try again or close this page."),
        }
    }

    #[must_use]
    pub fn accepts_click(self) -> bool {
        self.button_visible()
    }
}

/// Console line written by the silent variant when the window closes empty-handed.
pub const SILENT_FAILURE_LOG: &str = "App may not have opened";

// =============================================================================
// REFERENCE MODEL
// =============================================================================

/// Mirror of the emitted script, driven by explicit events and a clock in ms.
///
/// In the silent variant the button never hides and a failed window only
/// counts as a console line, so `phase` goes back to `Idle`.
#[derive(Debug, Clone)]
pub struct HandoffModel {
    target: String,
    loading_ui: bool,
    delay_ms: u64,
    phase: Phase,
    app_opened: bool,
    deadline: Option<u64>,
    navigations: Vec<String>,
    console: Vec<&'static str>,
}

impl HandoffModel {
    #[must_use]
    pub fn new(target: impl Into<String>, loading_ui: bool, delay_ms: u64) -> Self {
        Self {
            target: target.into(),
            loading_ui,
            delay_ms,
            phase: Phase::Idle,
            app_opened: false,
            deadline: None,
            navigations: Vec::new(),
            console: Vec::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn app_opened(&self) -> bool {
        self.app_opened
    }

    /// Every location assignment the page has made, in order.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    #[must_use]
    pub fn console(&self) -> &[&'static str] {
        &self.console
    }

    #[must_use]
    pub fn button_visible(&self) -> bool {
        !self.loading_ui || self.phase.button_visible()
    }

    #[must_use]
    pub fn button_label(&self) -> &'static str {
        self.phase.button_label()
    }

    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        if self.loading_ui { self.phase.message() } else { None }
    }

    /// User activates the button at `now_ms`. Returns whether navigation started.
    pub fn click(&mut self, now_ms: u64) -> bool {
        if self.loading_ui && !self.phase.accepts_click() {
            return false;
        }
        self.phase = Phase::Navigating;
        self.navigations.push(self.target.clone());
        self.app_opened = false;
        self.deadline = Some(now_ms.saturating_add(self.delay_ms));
        true
    }

    /// An environmental signal fires. Only listeners this variant registers count.
    pub fn observe(&mut self, signal: Signal) {
        if self.deadline.is_some() && Signal::observed(self.loading_ui).contains(&signal) {
            self.app_opened = true;
        }
    }

    /// Advance the clock to `now_ms`; `visible` is `document.visibilityState === 'visible'`.
    pub fn advance(&mut self, now_ms: u64, visible: bool) {
        let Some(deadline) = self.deadline else {
            return;
        };
        if now_ms < deadline {
            return;
        }
        self.deadline = None;

        if !self.app_opened && visible {
            if self.loading_ui {
                self.phase = Phase::Failed;
            } else {
                self.console.push(SILENT_FAILURE_LOG);
                self.phase = Phase::Idle;
            }
        } else {
            self.phase = Phase::HandedOff;
        }
    }
}

#[cfg(test)]
#[path = "handoff_test.rs"]
mod tests;
