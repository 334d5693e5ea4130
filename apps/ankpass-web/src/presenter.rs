//! Mapping of internal outcomes to user-facing strings.
//!
//! Validation violations map to per-field messages in their original order.
//! Every directory failure maps to the one generic message below, which is
//! distinct from all validation strings: diagnosable as "not a policy
//! failure" internally, equally uninformative to an attacker.

use ankpass_policy::{Field, Reason, ValidationOutcome, Violation};

/// The single string shown for any dial, bind or modify failure.
pub const DIRECTORY_FAILURE_MESSAGE: &str =
    "Password could not be modified, is the current password correct?";

/// Render a validation outcome as an ordered list of user-facing strings.
#[must_use]
pub fn present(outcome: &ValidationOutcome) -> Vec<String> {
    outcome
        .iter()
        .map(|v| violation_message(v).to_string())
        .collect()
}

/// The user-facing string for one violation.
#[must_use]
pub fn violation_message(violation: &Violation) -> &'static str {
    match (violation.field, violation.reason) {
        (Field::Username, _) => "Username is invalid",
        (Field::CurrentPassword, _) => "Current password is invalid",
        (Field::NewPassword, Reason::Required) => "New password is required",
        (Field::NewPassword, Reason::Length) => "New password must be at least 8 characters",
        (Field::NewPassword, Reason::Pwned) => {
            "New password is compromised according to 'Have I Been Pwned'"
        }
        (Field::NewPassword, _) => "New password is too weak",
        (Field::NewPasswordConfirm, _) => "New passwords do not match",
    }
}
