//! Shared User-Agent string for manifest and file transfer requests.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://pyweek.org/";

/// Default User-Agent for all requests (identifies the tool and its version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("pyweek-cli/{version} (+{PROJECT_UA_URL})")
}
