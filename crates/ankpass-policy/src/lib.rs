//! Password policy evaluation for the self-service password change flow.
//!
//! A change request passes through an ordered sequence of checks: field
//! format, new-password length, confirmation match, strength estimation,
//! and finally a k-anonymity lookup against the Have I Been Pwned corpus.
//! The result is a deterministic list of field-level violations; an empty
//! list means the policy is satisfied and the directory operation may
//! proceed.

pub mod breach;
pub mod request;
pub mod rules;
pub mod strength;

pub use breach::{BreachClient, BreachServiceError};
pub use request::PasswordChangeRequest;
pub use rules::{Field, PolicyValidator, Reason, ValidationOutcome, Violation};
