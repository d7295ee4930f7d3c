// Shared reqwest client construction

use std::time::Duration;

const USER_AGENT: &str = concat!("PreviewRS/", env!("CARGO_PKG_VERSION"));

/// Client for catalog and artwork requests: whole-request timeout
pub fn client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Client for preview downloads: only the connect phase is bounded, the body
/// is read progressively and guarded by the stall detector in the player
pub fn streaming_client(connect_timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(connect_timeout)
        .build()
}
