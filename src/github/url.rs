//! API URL -> browser URL rewriting
//!
//! Plain string substitution, no API calls:
//! - `api.github.com/repos` -> `github.com`
//! - `/pulls/` -> `/pull/`
//! - `/releases/` -> `/releases/tag/`
//! - check runs / check suites -> the repository's Actions tab

use super::types::Subject;
use crate::config::FALLBACK_NOTIFICATIONS_URL;

/// Resolve the link a notification should open in the browser
pub fn resolve_html_url(subject: &Subject) -> String {
    match subject.url.as_deref() {
        Some(api_url) if !api_url.is_empty() => rewrite_api_url(api_url),
        _ => FALLBACK_NOTIFICATIONS_URL.to_string(),
    }
}

fn rewrite_api_url(api_url: &str) -> String {
    let url = api_url
        .replace("api.github.com/repos", "github.com")
        .replace("/pulls/", "/pull/")
        .replace("/releases/", "/releases/tag/");

    if url.contains("check-runs") || url.contains("check-suites") {
        let repo_root = url.split("/check-").next().unwrap_or(&url);
        return format!("{}/actions", repo_root);
    }

    url
}
