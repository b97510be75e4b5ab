//! Payment status vocabulary and the copy shown for each outcome.
//!
//! DESIGN
//! ======
//! The provider hands us a free-form status string. Only `success` and
//! `cancelled` are recognized; everything else (including no status at
//! all) is the generic issue arm. Falling through is the normal path, not
//! an error, so parsing is infallible.

use serde::Deserialize;

// =============================================================================
// STATUS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum PaymentStatus {
    Success,
    Cancelled,
    /// Any other value, kept verbatim for logging.
    Issue(String),
}

impl PaymentStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "success" => Self::Success,
            "cancelled" => Self::Cancelled,
            other => Self::Issue(other.to_owned()),
        }
    }

    /// Short label used in log fields.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Cancelled => "cancelled",
            Self::Issue(raw) => raw,
        }
    }

    #[must_use]
    pub fn copy(&self) -> StatusCopy {
        match self {
            Self::Success => StatusCopy {
                icon: "\u{1F389}",
                heading: "Payment Confirmed!",
                body: "Your wallet balance has been updated.",
            },
            Self::Cancelled => StatusCopy {
                icon: "\u{1F6D1}",
                heading: "Payment Cancelled",
                body: SAFE_RETURN_BODY,
            },
            Self::Issue(_) => StatusCopy {
                icon: "\u{26A0}\u{FE0F}",
                heading: "Payment Issue",
                body: SAFE_RETURN_BODY,
            },
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Issue(String::new())
    }
}

// =============================================================================
// COPY
// =============================================================================

const SAFE_RETURN_BODY: &str = "You can return to the app safe and sound.";

/// Icon, heading and body text rendered for a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusCopy {
    pub icon: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
