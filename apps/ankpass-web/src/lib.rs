//! Library surface of the password change service, so integration tests
//! can build the real router against a fake directory backend.

pub mod config;
pub mod logging;
pub mod presenter;
pub mod routes;
pub mod service;
pub mod state;
