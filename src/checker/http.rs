// src/checker/http.rs
// =============================================================================
// This module checks if remote URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes exactly one HTTP HEAD request per link (no body download, no retry)
// - Applies the caller's timeout to each request individually
// - Turns every transport failure (timeout, DNS, TLS, refused connection,
//   malformed URL) into a ProbeOutcome::Failed value instead of an error
//
// Status rules:
// - Any response at all: status = response code, ok = code < 400
//   (so 3xx responses are alive, 4xx/5xx are dead)
// - Redirects are followed for up to MAX_REDIRECTS hops. Past the limit, or
//   when a URL repeats, the last 3xx response is the answer
// - No response: status = 0, ok = false, error = what went wrong
//
// Rust concepts:
// - Enums with data: ProbeOutcome carries either a StatusCode or a message
// - async/await: each probe waits on network I/O without blocking a thread
// =============================================================================

use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::error::Error as StdError;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::link::{LinkRecord, ValidationResult};

/// Sent as the User-Agent on every probe.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const MAX_REDIRECTS: usize = 5;

/// What a single probe produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered; any status code, including 4xx/5xx
    Responded(StatusCode),
    /// No usable response; human-readable reason
    Failed(String),
}

impl ProbeOutcome {
    pub fn into_result(self, link: LinkRecord) -> ValidationResult {
        match self {
            ProbeOutcome::Responded(code) => ValidationResult {
                link,
                status: code.as_u16(),
                ok: code.as_u16() < 400,
                error: None,
            },
            ProbeOutcome::Failed(message) => ValidationResult {
                link,
                status: 0,
                ok: false,
                error: Some(message),
            },
        }
    }
}

/// Issues the HEAD probes for remote links.
///
/// Holds one reqwest Client so connections are pooled across probes.
#[derive(Debug, Clone)]
pub struct RemoteValidator {
    client: Client,
}

impl RemoteValidator {
    pub fn new() -> reqwest::Result<Self> {
        let client = Self::client_builder().build()?;
        Ok(Self { client })
    }

    /// Ignores HTTP_PROXY and friends so tests reach the local test server.
    #[cfg(test)]
    pub fn without_proxy() -> Self {
        let client = Self::client_builder().no_proxy().build().unwrap();
        Self { client }
    }

    // No client-wide timeout: each probe passes its own
    fn client_builder() -> ClientBuilder {
        Client::builder().user_agent(USER_AGENT).redirect(redirect_policy())
    }

    /// Checks one remote link. Never fails; transport errors become a
    /// `status: 0` result.
    pub async fn validate(&self, link: LinkRecord, timeout: Duration) -> ValidationResult {
        let outcome = self.probe(&link.target, timeout).await;
        debug!(url = %link.target, ?outcome, "probed remote link");
        outcome.into_result(link)
    }

    // Sends the HEAD request and categorizes what came back
    pub async fn probe(&self, target: &str, timeout: Duration) -> ProbeOutcome {
        let url = match Url::parse(target) {
            Ok(url) => url,
            Err(e) => return ProbeOutcome::Failed(format!("invalid URL: {}", e)),
        };

        // mailto: targets classify as remote but there is nothing to request
        if !matches!(url.scheme(), "http" | "https") {
            return ProbeOutcome::Failed(format!("unsupported URL scheme '{}'", url.scheme()));
        }

        match self.client.head(url).timeout(timeout).send().await {
            Ok(response) => ProbeOutcome::Responded(response.status()),
            Err(e) => ProbeOutcome::Failed(categorize_error(&e, timeout)),
        }
    }
}

// Follows redirects, but stops (instead of erroring) on a loop or a long chain
//
// attempt.stop() hands the 3xx response back to the caller as-is
fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        let seen = attempt.previous();
        if seen.len() >= MAX_REDIRECTS || seen.contains(attempt.url()) {
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

// Categorizes reqwest errors into a short message
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure or refused connection
// - SSL certificate issues
fn categorize_error(error: &reqwest::Error, timeout: Duration) -> String {
    if error.is_timeout() {
        format!("request timed out after {:?}", timeout)
    } else if error.is_connect() {
        format!("connection failed: {}", error_chain(error))
    } else {
        error_chain(error)
    }
}

// Joins an error and all of its sources: "outer: middle: root cause"
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is a 3xx "ok"?
//    - The client follows up to MAX_REDIRECTS hops itself. If it stops on a
//      3xx (no Location header, a loop, too many hops) the server still
//      answered, and any code below 400 counts as alive
//
// 2. Who shares the RemoteValidator?
//    - The engine borrows one validator for the whole run; every probe in
//      buffer_unordered() calls validate(&self, ..) on it. reqwest::Client
//      is reference counted internally, so cloning it is also cheap
// -----------------------------------------------------------------------------
