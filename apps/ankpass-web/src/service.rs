//! Orchestration of a password change request.
//!
//! Sequences the policy validator and the directory client: validation
//! failures stop the request before any directory cost is paid, and
//! directory failures are recovered here into a single opaque outcome with
//! the specific cause retained only in the logs.

use ankpass_directory::PasswordModifier;
use ankpass_policy::{PasswordChangeRequest, PolicyValidator, ValidationOutcome};
use std::sync::Arc;
use tracing::{info, warn};

/// Terminal state of one request.
///
/// A request moves `Validating -> {Rejected, Submitting}`, and a submitted
/// one `-> {Succeeded, Failed}`. The directory failure cause is logged and
/// deliberately absent from `Failed`, so nothing downstream can leak it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Policy violations; the directory was never contacted.
    Rejected(ValidationOutcome),
    /// Bind and modify both succeeded.
    Succeeded,
    /// The directory transaction failed at some stage.
    Failed,
}

/// Sequences the validator and the directory client for one request.
#[derive(Clone)]
pub struct ChangeService {
    validator: Arc<PolicyValidator>,
    directory: Arc<dyn PasswordModifier>,
}

impl ChangeService {
    pub fn new(validator: Arc<PolicyValidator>, directory: Arc<dyn PasswordModifier>) -> Self {
        Self {
            validator,
            directory,
        }
    }

    /// Run one password change submission to a terminal outcome.
    ///
    /// Credentials-only submissions (both new-password fields empty) skip
    /// the new-password rules entirely and still proceed to the directory
    /// call, carrying an empty new password. A secondary legacy caller
    /// relies on this to verify current credentials.
    pub async fn submit(&self, request: &PasswordChangeRequest) -> ChangeOutcome {
        let outcome = if request.is_credentials_only() {
            self.validator.validate_credentials_only(request)
        } else {
            self.validator.validate(request).await
        };

        if !outcome.is_empty() {
            return ChangeOutcome::Rejected(outcome);
        }

        match self
            .directory
            .change_password(
                &request.username,
                &request.current_password,
                &request.new_password,
            )
            .await
        {
            Ok(()) => {
                info!(username = %request.username, "password modify success");
                ChangeOutcome::Succeeded
            }
            Err(error) => {
                // Full cause stays here; the caller only learns "failed".
                warn!(
                    username = %request.username,
                    failure = error.kind(),
                    error = ?error,
                    "password modify failure"
                );
                ChangeOutcome::Failed
            }
        }
    }
}
