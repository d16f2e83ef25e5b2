//! API utilities for talking to the document API
//!
//! The SPA is served by the same host as the document API, so requests go to
//! the window origin unless `localStorage["api_base"]` points elsewhere
//! (useful when running the frontend from a dev server).

const API_BASE_KEY: &str = "api_base";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn storage_get(key: &str) -> Option<String> {
    local_storage()
        .and_then(|s| s.get_item(key).ok().flatten())
        .filter(|v| !v.trim().is_empty())
}

pub fn storage_set(key: &str, value: Option<&str>) {
    if let Some(storage) = local_storage() {
        let _ = match value {
            Some(v) => storage.set_item(key, v),
            None => storage.remove_item(key),
        };
    }
}

/// Base URL for API requests, without a trailing slash
///
/// # Returns
/// - the `api_base` override from local storage if set
/// - otherwise the window origin, e.g. "https://erp.example.com"
/// - empty string if window is not available (relative URLs)
pub fn api_base() -> String {
    if let Some(base) = storage_get(API_BASE_KEY) {
        return base.trim_end_matches('/').to_string();
    }
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Build a full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
