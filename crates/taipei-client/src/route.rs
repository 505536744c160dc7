//! Transport routes a page request can take.
//!
//! The upstream API does not send CORS headers, so browser-hosted callers
//! cannot always reach it directly. [`Route::Relay`] wraps the target URL as
//! a percent-encoded parameter of a forwarding service that returns the
//! upstream body verbatim.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;

use crate::error::AttemptError;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Request the target URL as-is.
    Direct,
    /// Request `{prefix}{encoded target}`.
    Relay { prefix: String },
}

impl Route {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Route::Direct => "direct",
            Route::Relay { .. } => "relay",
        }
    }

    /// Returns the URL this route actually requests for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AttemptError::InvalidRoute`] if the relay prefix combined
    /// with the encoded target is not a valid URL.
    pub fn resolve(&self, target: &Url) -> Result<Url, AttemptError> {
        match self {
            Route::Direct => Ok(target.clone()),
            Route::Relay { prefix } => {
                let raw = format!("{prefix}{}", encode_component(target.as_str()));
                Url::parse(&raw).map_err(|e| AttemptError::InvalidRoute {
                    route: self.label(),
                    reason: format!("'{raw}': {e}"),
                })
            }
        }
    }
}

/// Percent-encodes `value` with `encodeURIComponent` semantics.
#[must_use]
fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}
