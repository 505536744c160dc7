use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "https://www.travel.taipei/open-api");
    assert_eq!(cfg.relay_prefix.as_deref(), Some("https://corsproxy.io/?"));
    assert_eq!(cfg.language, "zh-tw");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn base_url_trailing_slash_is_stripped() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_API_BASE_URL", "http://localhost:8080/open-api/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:8080/open-api");
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_API_BASE_URL", "www.travel.taipei/open-api");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAIPEI_API_BASE_URL"),
        "expected InvalidEnvVar(TAIPEI_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn base_url_with_malformed_host_is_rejected() {
    for raw in ["http://exa mple.com/open-api", "https://", "http://:8080/open-api"] {
        let mut map = HashMap::new();
        map.insert("TAIPEI_API_BASE_URL", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAIPEI_API_BASE_URL"),
            "expected InvalidEnvVar(TAIPEI_API_BASE_URL) for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn base_url_with_other_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_API_BASE_URL", "ftp://www.travel.taipei/open-api");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn base_url_with_port_is_accepted() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_API_BASE_URL", "http://127.0.0.1:9000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:9000");
}

#[test]
fn empty_relay_prefix_disables_relay() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_RELAY_PREFIX", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.relay_prefix.is_none());
}

#[test]
fn language_is_normalized() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_LANGUAGE", "  EN ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.language, "en");
}

#[test]
fn blank_language_is_rejected() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_LANGUAGE", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAIPEI_LANGUAGE"),
        "expected InvalidEnvVar(TAIPEI_LANGUAGE), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAIPEI_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TAIPEI_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("TAIPEI_REQUEST_TIMEOUT_SECS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}
