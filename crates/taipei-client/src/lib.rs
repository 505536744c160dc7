//! Fetch gateway for the Taipei travel open-data attractions endpoint.
//!
//! One [`AttractionClient::fetch_page`] call issues a direct request and, if
//! that fails for any reason, a single request through a CORS relay. The
//! response must carry a `data` array to count as a success.

pub mod client;
pub mod error;
pub mod route;

mod fallback;

pub use client::AttractionClient;
pub use error::{AttemptError, ClientBuildError, FetchError, RouteFailure, UNAVAILABLE_MESSAGE};
pub use route::Route;
