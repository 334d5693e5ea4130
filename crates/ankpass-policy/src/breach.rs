//! Breached password lookup via the Have I Been Pwned range API.
//!
//! Uses the k-anonymity scheme: only the first 5 hex characters of the
//! SHA-1 hash of the candidate password leave the process. The service
//! returns every known suffix in that range and the match is made locally,
//! so neither the plaintext nor the full hash is ever transmitted.

use sha1::{Digest, Sha1};
use std::time::Duration;
use thiserror::Error;

/// Production range API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.pwnedpasswords.com";

/// Length of the hash prefix sent to the range API.
const PREFIX_LEN: usize = 5;

/// Error talking to the breach lookup service.
///
/// Never surfaced as a policy violation: the caller logs it and proceeds as
/// though the password were not found (availability over strict screening).
#[derive(Debug, Error)]
pub enum BreachServiceError {
    #[error("breach lookup request failed")]
    Request(#[from] reqwest::Error),
}

/// Client for the breached-password corpus.
///
/// Constructed once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct BreachClient {
    http: reqwest::Client,
    base_url: String,
}

impl BreachClient {
    /// Create a client against the given range API endpoint, usually
    /// [`DEFAULT_BASE_URL`].
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, BreachServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .user_agent(concat!("ankpass/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// Check whether `password` appears in the known-breached corpus.
    pub async fn is_breached(&self, password: &str) -> Result<bool, BreachServiceError> {
        let digest = hex::encode(Sha1::digest(password.as_bytes())).to_uppercase();
        let (prefix, suffix) = digest.split_at(PREFIX_LEN);

        let url = format!("{}/range/{prefix}", self.base_url);
        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(range_contains(&body, suffix))
    }
}

/// Match a hash suffix against a range API response body.
///
/// Each line is `<35-hex-char suffix>:<occurrence count>`.
fn range_contains(body: &str, suffix: &str) -> bool {
    body.lines().any(|line| {
        line.split_once(':')
            .is_some_and(|(candidate, _count)| candidate.eq_ignore_ascii_case(suffix))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_prefix_split() {
        // "password" SHA-1 = 5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8
        let digest = hex::encode(Sha1::digest(b"password")).to_uppercase();
        assert_eq!(digest, "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8");
        let (prefix, suffix) = digest.split_at(PREFIX_LEN);
        assert_eq!(prefix, "5BAA6");
        assert_eq!(suffix, "1E4C9B93F3F0682250B6CF8331B7EE68FD8");
    }

    #[test]
    fn test_range_contains_matches_suffix() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:1\n\
                    1E4C9B93F3F0682250B6CF8331B7EE68FD8:9545824\n\
                    011053FD0102E94D6AE2F8B83D76FAF94F6:1";
        assert!(range_contains(body, "1E4C9B93F3F0682250B6CF8331B7EE68FD8"));
        assert!(!range_contains(body, "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"));
    }

    #[test]
    fn test_range_contains_is_case_insensitive() {
        let body = "1e4c9b93f3f0682250b6cf8331b7ee68fd8:12";
        assert!(range_contains(body, "1E4C9B93F3F0682250B6CF8331B7EE68FD8"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BreachClient::with_base_url("http://localhost:9999/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error_not_a_match() {
        let client = BreachClient::with_base_url("http://127.0.0.1:9").unwrap();
        assert!(client.is_breached("anything").await.is_err());
    }
}
