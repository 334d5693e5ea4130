//! Directory client configuration.

use crate::error::{DirectoryError, DirectoryResult};

/// Default LDAPS port.
const DEFAULT_PORT: u16 = 636;

/// Default container for user entries.
const DEFAULT_PEOPLE_BASE_DN: &str = "ou=People,dc=ank,dc=chnet";

/// Default dial timeout in seconds.
const DEFAULT_CONN_TIMEOUT_SECS: u64 = 10;

/// Configuration for the directory password change client.
///
/// The CA root is loaded once at startup and pinned for the lifetime of the
/// process; it is never re-read per request.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Directory server hostname. Also the name the server certificate is
    /// verified against.
    pub host: String,

    /// LDAPS port.
    pub port: u16,

    /// Base DN the `uid=<username>` RDN is appended to.
    pub people_base_dn: String,

    /// PEM-encoded organizational CA root the server certificate must
    /// chain to. Built-in system roots are not consulted.
    pub ca_certificate_pem: Vec<u8>,

    /// Dial timeout in seconds.
    pub conn_timeout_secs: u64,
}

impl DirectoryConfig {
    /// Create a config with default port, base DN and timeout.
    pub fn new(host: impl Into<String>, ca_certificate_pem: Vec<u8>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            people_base_dn: DEFAULT_PEOPLE_BASE_DN.to_string(),
            ca_certificate_pem,
            conn_timeout_secs: DEFAULT_CONN_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_people_base_dn(mut self, base_dn: impl Into<String>) -> Self {
        self.people_base_dn = base_dn.into();
        self
    }

    /// The LDAPS URL this client dials.
    #[must_use]
    pub fn url(&self) -> String {
        format!("ldaps://{}:{}", self.host, self.port)
    }

    /// Validate required fields before a client is constructed.
    pub fn validate(&self) -> DirectoryResult<()> {
        if self.host.is_empty() {
            return Err(DirectoryError::invalid_configuration("host is required"));
        }
        if self.people_base_dn.is_empty() {
            return Err(DirectoryError::invalid_configuration(
                "people_base_dn is required",
            ));
        }
        if self.ca_certificate_pem.is_empty() {
            return Err(DirectoryError::invalid_configuration(
                "ca_certificate_pem is required",
            ));
        }
        Ok(())
    }
}
