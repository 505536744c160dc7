//! HTTP client for the attractions listing endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use taipei_core::{AppConfig, Attraction, PageResult};

use crate::error::{AttemptError, ClientBuildError, FetchError};
use crate::fallback::first_success;
use crate::route::Route;

/// Client for `GET {base}/{language}/Attractions/All?page={n}`.
///
/// Holds an ordered route list: [`Route::Direct`] first, then the relay
/// when one is configured. Use [`AttractionClient::new`] for production
/// or [`AttractionClient::with_routes`] to point at a mock server in tests.
pub struct AttractionClient {
    client: Client,
    base_url: Url,
    routes: Vec<Route>,
}

impl AttractionClient {
    /// Creates a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientBuildError::InvalidBaseUrl`] if
    /// `api_base_url` is not a usable base URL.
    pub fn new(config: &AppConfig) -> Result<Self, ClientBuildError> {
        let mut routes = vec![Route::Direct];
        if let Some(prefix) = &config.relay_prefix {
            routes.push(Route::Relay {
                prefix: prefix.clone(),
            });
        }
        Self::with_routes(
            &config.api_base_url,
            routes,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit route list.
    ///
    /// # Errors
    ///
    /// Same as [`AttractionClient::new`].
    pub fn with_routes(
        base_url: &str,
        routes: Vec<Route>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| ClientBuildError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientBuildError::InvalidBaseUrl {
                url: trimmed.to_owned(),
                reason: "URL cannot carry path segments".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url,
            routes,
        })
    }

    /// Fetches one page of attractions.
    ///
    /// `language` is trimmed and lower-cased before use. The direct route is
    /// tried first; any failure (network, non-2xx, bad body) falls through to
    /// the relay. A page past the end comes back as `data: []`, not an error.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidRequest`] for a blank language or page 0.
    /// - [`FetchError::Unavailable`] once every route has failed.
    pub async fn fetch_page(&self, language: &str, page: u32) -> Result<PageResult, FetchError> {
        let language = normalize_language(language);
        if language.is_empty() {
            return Err(FetchError::InvalidRequest(
                "language tag must not be blank".to_owned(),
            ));
        }
        if page == 0 {
            return Err(FetchError::InvalidRequest(
                "page numbers start at 1".to_owned(),
            ));
        }

        let target = self.page_url(&language, page);
        tracing::debug!(url = %target, page, "fetching attraction page");

        let result = first_success(&self.routes, |route| {
            let target = target.clone();
            async move { self.attempt(&route, &target).await }
        })
        .await;

        match result {
            Ok(page_result) => {
                tracing::debug!(
                    page,
                    records = page_result.data.len(),
                    total = page_result.total,
                    "attraction page fetched"
                );
                Ok(page_result)
            }
            Err(attempts) => {
                tracing::error!(
                    url = %target,
                    attempts = attempts.len(),
                    last_error = %attempts.last().map(ToString::to_string).unwrap_or_default(),
                    "all routes failed"
                );
                Err(FetchError::Unavailable { attempts })
            }
        }
    }

    /// Builds `{base}/{language}/Attractions/All?page={page}`.
    fn page_url(&self, language: &str, page: u32) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected at construction.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(language)
                .push("Attractions")
                .push("All");
        }
        url.query_pairs_mut()
            .append_pair("page", &page.to_string());
        url
    }

    async fn attempt(&self, route: &Route, target: &Url) -> Result<PageResult, AttemptError> {
        let url = route.resolve(target)?;
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        parse_page(&body, url.as_str())
    }
}

fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}

/// Parses a response body, requiring a top-level `data` array.
///
/// Records that cannot be read are logged and left out of the page rather
/// than failing it.
fn parse_page(body: &str, url: &str) -> Result<PageResult, AttemptError> {
    let mut value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AttemptError::Deserialize {
            context: url.to_owned(),
            source: e,
        })?;

    let records = match value.get_mut("data") {
        Some(serde_json::Value::Array(records)) => std::mem::take(records),
        Some(_) => {
            return Err(AttemptError::Shape {
                url: url.to_owned(),
                reason: "`data` is not an array".to_owned(),
            })
        }
        None => {
            return Err(AttemptError::Shape {
                url: url.to_owned(),
                reason: "missing `data` field".to_owned(),
            })
        }
    };

    let mut page: PageResult =
        serde_json::from_value(value).map_err(|e| AttemptError::Deserialize {
            context: format!("attraction page from {url}"),
            source: e,
        })?;

    page.data = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match Attraction::from_value(record) {
            Ok(attraction) => Some(attraction),
            Err(reason) => {
                tracing::warn!(url, index, %reason, "skipping unreadable attraction record");
                None
            }
        })
        .collect();
    Ok(page)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
