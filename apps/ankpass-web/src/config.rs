//! Application configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present and valid or startup is
//! aborted with a clear error message.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Runtime configuration for the password change service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub listen_addr: SocketAddr,

    /// Directory server hostname (also the TLS server name).
    pub ldap_host: String,

    /// Directory server LDAPS port.
    pub ldap_port: u16,

    /// Path to the PEM file holding the pinned organizational CA root.
    pub ldap_ca_file: PathBuf,

    /// Base DN user RDNs are appended to.
    pub people_base_dn: String,

    /// Base URL of the breached-password range API.
    pub hibp_base_url: String,

    /// Log filter directive.
    pub rust_log: String,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = optional("ANKPASS_LISTEN_ADDR", "0.0.0.0:8080");
        let listen_addr = listen_addr
            .parse()
            .map_err(|e| ConfigError::Invalid {
                key: "ANKPASS_LISTEN_ADDR",
                message: format!("not a socket address: {e}"),
            })?;

        let ldap_port = optional("ANKPASS_LDAP_PORT", "636");
        let ldap_port = ldap_port.parse().map_err(|e| ConfigError::Invalid {
            key: "ANKPASS_LDAP_PORT",
            message: format!("not a port number: {e}"),
        })?;

        Ok(Self {
            listen_addr,
            ldap_host: optional("ANKPASS_LDAP_HOST", "ank.chnet"),
            ldap_port,
            ldap_ca_file: required("ANKPASS_LDAP_CA_FILE")?.into(),
            people_base_dn: optional("ANKPASS_PEOPLE_BASE_DN", "ou=People,dc=ank,dc=chnet"),
            hibp_base_url: optional(
                "ANKPASS_HIBP_BASE_URL",
                ankpass_policy::breach::DEFAULT_BASE_URL,
            ),
            rust_log: optional("RUST_LOG", "info"),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn optional(key: &'static str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment-variable access is process-global, so the from_env tests
    // run under one lock.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn clear_env() {
        for key in [
            "ANKPASS_LISTEN_ADDR",
            "ANKPASS_LDAP_HOST",
            "ANKPASS_LDAP_PORT",
            "ANKPASS_LDAP_CA_FILE",
            "ANKPASS_PEOPLE_BASE_DN",
            "ANKPASS_HIBP_BASE_URL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_missing_ca_file_is_fatal() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ANKPASS_LDAP_CA_FILE")));
    }

    #[test]
    fn test_defaults_applied() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("ANKPASS_LDAP_CA_FILE", "/etc/ankpass/ca.pem");
        let config = Config::from_env().unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.ldap_host, "ank.chnet");
        assert_eq!(config.ldap_port, 636);
        assert_eq!(config.people_base_dn, "ou=People,dc=ank,dc=chnet");
        env::remove_var("ANKPASS_LDAP_CA_FILE");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("ANKPASS_LDAP_CA_FILE", "/etc/ankpass/ca.pem");
        env::set_var("ANKPASS_LDAP_PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "ANKPASS_LDAP_PORT",
                ..
            }
        ));
        clear_env();
    }
}
