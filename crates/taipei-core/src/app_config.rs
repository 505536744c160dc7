#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Upstream open-data endpoint, without a trailing slash.
    pub api_base_url: String,
    /// Prefix the percent-encoded target URL is appended to when the direct
    /// request fails. `None` disables the relay route.
    pub relay_prefix: Option<String>,
    pub language: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
