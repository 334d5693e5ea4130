//! Ordered policy rules over a password change request.
//!
//! Rules are evaluated as a fixed, statically ordered sequence of checks
//! over the plain request value; every applicable violation is collected
//! rather than short-circuiting, with one exception: a password that fails
//! the strength estimate is rejected before the breach lookup so no network
//! call is spent on a dictionary-weak password.
//!
//! The violation order is load-bearing for presentation and is always:
//! username, current password, new password (required, length, weak,
//! pwned), confirmation.

use crate::breach::BreachClient;
use crate::request::PasswordChangeRequest;
use crate::strength;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Minimum length for a new password.
pub const MIN_NEW_PASSWORD_LENGTH: usize = 8;

/// Accepted username shape: a letter followed by letters, digits, hyphens
/// or underscores. This is the sole injection defense for the directory
/// protocol; a username is never used to build a DN before matching it.
static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-zA-Z][a-zA-Z0-9_-]+$").expect("USERNAME_PATTERN is a valid regex")
});

/// The request field a violation is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    CurrentPassword,
    NewPassword,
    NewPasswordConfirm,
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The field is empty.
    Required,
    /// The value does not match the accepted shape.
    Format,
    /// The new password is shorter than [`MIN_NEW_PASSWORD_LENGTH`].
    Length,
    /// The confirmation does not equal the new password.
    Mismatch,
    /// The strength estimate came in below the minimum score.
    Weak,
    /// The password appears in the known-breached corpus.
    Pwned,
}

/// A single field-level policy violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub reason: Reason,
}

/// Ordered sequence of violations; empty means the policy is satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    violations: Vec<Violation>,
}

impl ValidationOutcome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: Field, reason: Reason) {
        self.violations.push(Violation { field, reason });
    }

    /// True when no rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Whether a violation for the given field and reason was recorded.
    #[must_use]
    pub fn contains(&self, field: Field, reason: Reason) -> bool {
        self.violations.contains(&Violation { field, reason })
    }
}

impl<'a> IntoIterator for &'a ValidationOutcome {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Applies the password policy to incoming change requests.
///
/// Holds the process-wide breach lookup client; constructed once at startup
/// and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct PolicyValidator {
    breach: BreachClient,
}

impl PolicyValidator {
    #[must_use]
    pub fn new(breach: BreachClient) -> Self {
        Self { breach }
    }

    /// Evaluate the full rule sequence against `request`.
    ///
    /// A failed breach lookup is logged and treated as "not found": the
    /// screening service being down must not block password changes.
    pub async fn validate(&self, request: &PasswordChangeRequest) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        check_username(request, &mut outcome);
        check_current_password(request, &mut outcome);

        if request.new_password.is_empty() {
            outcome.push(Field::NewPassword, Reason::Required);
        } else {
            check_new_password_length(request, &mut outcome);

            let weak_tokens = [request.username.as_str(), request.current_password.as_str()];
            if !strength::is_acceptable(&request.new_password, &weak_tokens) {
                outcome.push(Field::NewPassword, Reason::Weak);
            } else {
                match self.breach.is_breached(&request.new_password).await {
                    Ok(true) => outcome.push(Field::NewPassword, Reason::Pwned),
                    Ok(false) => {}
                    Err(error) => {
                        warn!(error = %error, "breach lookup unavailable, failing open");
                    }
                }
            }
        }

        check_confirmation(request, &mut outcome);

        outcome
    }

    /// Evaluate only the username and current-password rules.
    ///
    /// Used for credentials-only submissions, where the new-password rules
    /// are not applicable.
    #[must_use]
    pub fn validate_credentials_only(&self, request: &PasswordChangeRequest) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();
        check_username(request, &mut outcome);
        check_current_password(request, &mut outcome);
        outcome
    }
}

fn check_username(request: &PasswordChangeRequest, outcome: &mut ValidationOutcome) {
    if request.username.is_empty() {
        outcome.push(Field::Username, Reason::Required);
    } else if !USERNAME_PATTERN.is_match(&request.username) {
        outcome.push(Field::Username, Reason::Format);
    }
}

fn check_current_password(request: &PasswordChangeRequest, outcome: &mut ValidationOutcome) {
    // No format constraint: the directory bind validates it for real.
    if request.current_password.is_empty() {
        outcome.push(Field::CurrentPassword, Reason::Required);
    }
}

fn check_new_password_length(request: &PasswordChangeRequest, outcome: &mut ValidationOutcome) {
    if request.new_password.chars().count() < MIN_NEW_PASSWORD_LENGTH {
        outcome.push(Field::NewPassword, Reason::Length);
    }
}

fn check_confirmation(request: &PasswordChangeRequest, outcome: &mut ValidationOutcome) {
    if request.new_password_confirm != request.new_password {
        outcome.push(Field::NewPasswordConfirm, Reason::Mismatch);
    }
}
