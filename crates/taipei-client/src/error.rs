use thiserror::Error;

/// Message surfaced to users once every route has failed. Raw transport
/// details stay in the logs.
pub const UNAVAILABLE_MESSAGE: &str =
    "無法取得台北旅遊網資料。這通常是 API 伺服器繁忙或連線受阻，請稍後再試。";

/// Why a single request over one route failed.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The body was not JSON, or a record did not match [`taipei_core::Attraction`].
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON without a usable `data` array.
    #[error("malformed response from {url}: {reason}")]
    Shape { url: String, reason: String },

    #[error("cannot build {route} URL: {reason}")]
    InvalidRoute { route: &'static str, reason: String },
}

/// One failed attempt, tagged with the route it went over.
#[derive(Debug, Error)]
#[error("{route}: {error}")]
pub struct RouteFailure {
    pub route: &'static str,
    #[source]
    pub error: AttemptError,
}

/// Terminal error returned by [`crate::AttractionClient::fetch_page`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every route failed. Displays [`UNAVAILABLE_MESSAGE`]; the per-route
    /// causes are kept in `attempts`.
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable { attempts: Vec<RouteFailure> },

    /// The request was rejected before any network traffic.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors raised while constructing an [`crate::AttractionClient`].
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_hides_route_details() {
        let err = FetchError::Unavailable {
            attempts: vec![RouteFailure {
                route: "direct",
                error: AttemptError::UnexpectedStatus {
                    status: 503,
                    url: "https://www.travel.taipei/open-api".to_owned(),
                },
            }],
        };
        assert_eq!(err.to_string(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn route_failure_names_route() {
        let failure = RouteFailure {
            route: "relay",
            error: AttemptError::Shape {
                url: "https://corsproxy.io/".to_owned(),
                reason: "missing `data` field".to_owned(),
            },
        };
        assert!(failure.to_string().starts_with("relay: malformed response"));
    }
}
