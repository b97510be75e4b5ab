//! Deep-link redirect target.
//!
//! DESIGN
//! ======
//! The target is opaque to the renderer: it is never validated there, only
//! encoded. `script_literal` produces a double-quoted JavaScript string
//! that cannot close the literal or the surrounding `<script>` element,
//! while leaving ordinary deep links byte-for-byte intact. Validation is
//! offered separately through `parse` for callers that accept targets
//! from the outside world.

use std::fmt;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("redirect target is empty")]
    Empty,
    #[error("redirect target has no valid URI scheme: {0}")]
    MissingScheme(String),
}

// =============================================================================
// REDIRECT TARGET
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    /// Parse and validate a target: non-empty, with an RFC 3986 scheme.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError`] if the value is blank or lacks a scheme.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TargetError::Empty);
        }
        if scheme_of(trimmed).is_none() {
            return Err(TargetError::MissingScheme(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased URI scheme, if the value has one.
    #[must_use]
    pub fn scheme(&self) -> Option<String> {
        scheme_of(&self.0).map(str::to_ascii_lowercase)
    }

    /// Encode as a double-quoted JavaScript string literal for inline script.
    #[must_use]
    pub fn script_literal(&self) -> String {
        let json = serde_json::Value::String(self.0.clone()).to_string();
        let mut out = String::with_capacity(json.len());
        for ch in json.chars() {
            match ch {
                '<' => out.push_str("\\u003c"),
                '>' => out.push_str("\\u003e"),
                '&' => out.push_str("\\u0026"),
                '\u{2028}' => out.push_str("\\u2028"),
                '\u{2029}' => out.push_str("\\u2029"),
                _ => out.push(ch),
            }
        }
        out
    }
}

impl From<String> for RedirectTarget {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for RedirectTarget {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`
fn scheme_of(raw: &str) -> Option<&str> {
    let (scheme, _) = raw.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(scheme)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "target_test.rs"]
mod tests;
