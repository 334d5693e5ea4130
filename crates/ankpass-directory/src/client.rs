//! The directory password change client.

use async_trait::async_trait;
use ldap3::exop::PasswordModify;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings};
use native_tls::{Certificate, TlsConnector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::DirectoryConfig;
use crate::dn::DirectoryIdentity;
use crate::error::{DirectoryError, DirectoryResult};

/// The one directory operation this service performs.
///
/// The orchestration layer depends on this trait rather than the concrete
/// client so tests can substitute a fake directory.
#[async_trait]
pub trait PasswordModifier: Send + Sync {
    /// Bind as `username` with `current_password` and change the password
    /// to `new_password`.
    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> DirectoryResult<()>;
}

/// LDAP client for the self password change transaction.
///
/// The TLS connector is built once from the pinned CA root and reused for
/// every dial; connections themselves are strictly per-request.
pub struct DirectoryClient {
    config: DirectoryConfig,
    tls: TlsConnector,
}

impl DirectoryClient {
    /// Build a client, pinning the organizational CA root from the config.
    ///
    /// Built-in system roots are disabled: only a server certificate
    /// chaining to the supplied root is accepted.
    pub fn new(config: DirectoryConfig) -> DirectoryResult<Self> {
        config.validate()?;

        let root = Certificate::from_pem(&config.ca_certificate_pem).map_err(|e| {
            DirectoryError::invalid_configuration_with_source("CA root is not valid PEM", e)
        })?;

        let tls = TlsConnector::builder()
            .disable_built_in_roots(true)
            .add_root_certificate(root)
            .build()
            .map_err(|e| {
                DirectoryError::invalid_configuration_with_source(
                    "failed to build pinned TLS connector",
                    e,
                )
            })?;

        Ok(Self { config, tls })
    }

    async fn dial(&self) -> DirectoryResult<Ldap> {
        let url = self.config.url();
        debug!(url = %url, "dialing directory server");

        let settings = LdapConnSettings::new()
            .set_conn_timeout(Duration::from_secs(self.config.conn_timeout_secs))
            .set_connector(self.tls.clone());

        let (conn, ldap) = LdapConnAsync::with_settings(settings, &url)
            .await
            .map_err(|e| {
                DirectoryError::dial_with_source(format!("could not connect to {url}"), e)
            })?;

        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "directory connection driver error");
            }
        });

        Ok(ldap)
    }

    async fn bind_and_modify(
        &self,
        ldap: &mut Ldap,
        identity: &DirectoryIdentity,
        current_password: &str,
        new_password: &str,
    ) -> DirectoryResult<()> {
        ldap.simple_bind(identity.as_str(), current_password)
            .await
            .and_then(ldap3::LdapResult::success)
            .map_err(|e| {
                DirectoryError::bind_with_source(format!("bind rejected for {identity}"), e)
            })?;

        debug!(identity = %identity, "bind succeeded, issuing password modify");

        let exop = PasswordModify {
            user_id: Some(identity.as_str()),
            old_pass: Some(current_password),
            new_pass: Some(new_password),
        };

        ldap.extended(exop)
            .await
            .and_then(ldap3::result::ExopResult::success)
            .map_err(|e| {
                DirectoryError::modify_with_source(
                    format!("password modify rejected for {identity}"),
                    e,
                )
            })?;

        Ok(())
    }
}

#[async_trait]
impl PasswordModifier for DirectoryClient {
    /// One connection per call: dialed, bound, used for a single RFC 3062
    /// password-modify, and unbound before returning, whatever the outcome.
    #[instrument(skip_all, fields(username = %username))]
    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> DirectoryResult<()> {
        let identity = DirectoryIdentity::for_user(username, &self.config.people_base_dn);

        let mut ldap = self.dial().await?;
        let result = self
            .bind_and_modify(&mut ldap, &identity, current_password, new_password)
            .await;

        if let Err(e) = ldap.unbind().await {
            debug!(error = %e, "unbind after password change failed");
        }

        if result.is_ok() {
            info!(identity = %identity, "directory password changed");
        }
        result
    }
}
