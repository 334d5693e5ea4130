//! Directory-side half of the self-service password change.
//!
//! Implements exactly one transaction: connect to the directory over TLS
//! (server identity checked against an organizational CA root pinned at
//! startup), bind as the requesting user, and issue the RFC 3062
//! password-modify extended operation. One connection per request, closed
//! on every exit path; no pooling, no retries.

pub mod client;
pub mod config;
pub mod dn;
pub mod error;

pub use client::{DirectoryClient, PasswordModifier};
pub use config::DirectoryConfig;
pub use dn::DirectoryIdentity;
pub use error::{DirectoryError, DirectoryResult};
