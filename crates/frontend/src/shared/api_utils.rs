//! Backend location and credentials, read from the browser.
//!
//! The base URL can be overridden per browser by storing it under
//! `localStorage["erp_api_base"]`; otherwise the API is expected on port 8000
//! of the host that served the app.

use web_sys::{window, Storage};

const API_BASE_KEY: &str = "erp_api_base";
const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const DEFAULT_PORT: u16 = 8000;

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

fn stored(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()?
        .filter(|v| !v.trim().is_empty())
}

/// Base URL for API requests, without trailing slash.
///
/// Returns an empty string outside a browser.
pub fn api_base() -> String {
    if let Some(base) = stored(API_BASE_KEY) {
        return base.trim().trim_end_matches('/').to_string();
    }
    let Some(window) = window() else {
        return String::new();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    default_base(&protocol, &hostname)
}

fn default_base(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, DEFAULT_PORT)
}

/// Full URL for an API path such as `/documentos`.
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Bearer token stored by the login page, if any.
pub fn access_token() -> Option<String> {
    stored(ACCESS_TOKEN_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_uses_port_8000() {
        assert_eq!(default_base("https:", "erp.local"), "https://erp.local:8000");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h:8000", "/documentos"), "http://h:8000/documentos");
        assert_eq!(join_url("http://h:8000", "compras/"), "http://h:8000/compras/");
    }
}
