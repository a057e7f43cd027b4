use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use urlencoding::encode;

pub const USER_AGENT: &str = "Bug-Bounty-Crawler/1.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared client for extraction and probing. Certificate verification is
/// off on purpose: self-signed and staging targets are in scope.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .danger_accept_invalid_certs(true)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
}

/// Looks for traces of a payload that was reflected in a defused form.
/// Diagnostic only; a hit never counts as a finding.
pub fn sanitization_hint(payload: &str, body: &str) -> Option<&'static str> {
    let encoded = encode(payload).into_owned();
    if body.contains(&encoded) {
        return Some("URL encoded payload");
    }

    let escaped_markers = [
        ("&lt;script&gt;", "HTML escaped script tag"),
        ("&lt;", "HTML escaped '<'"),
        ("&gt;", "HTML escaped '>'"),
        ("&#x27;", "HTML escaped quote"),
    ];
    for (marker, description) in escaped_markers {
        if body.contains(marker) {
            return Some(description);
        }
    }

    if let Ok(re) = Regex::new(r"(?i)(htmlspecialchars|htmlentities|encodeURIComponent|escape)\(") {
        if re.is_match(body) {
            return Some("server-side escaping function");
        }
    }

    None
}
