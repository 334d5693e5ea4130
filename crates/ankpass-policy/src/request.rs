//! The raw password change request as submitted by the user.

/// A single password change submission.
///
/// Ephemeral: created per request, owned by the handling context, and
/// discarded once the response is produced. Field values are the raw form
/// input; nothing here has been validated yet.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordChangeRequest {
    /// The account name the change is requested for.
    pub username: String,

    /// The user's current password, verified by the directory bind.
    pub current_password: String,

    /// The requested new password.
    pub new_password: String,

    /// Confirmation copy of the new password.
    pub new_password_confirm: String,
}

impl PasswordChangeRequest {
    /// Whether this is a credentials-only submission: username and current
    /// password populated, both new-password fields empty.
    ///
    /// A secondary caller uses this shape to verify current credentials
    /// without setting a new password; the new-password policy rules do not
    /// apply to it.
    #[must_use]
    pub fn is_credentials_only(&self) -> bool {
        self.new_password.is_empty() && self.new_password_confirm.is_empty()
    }
}

impl std::fmt::Debug for PasswordChangeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChangeRequest")
            .field("username", &self.username)
            .field("current_password", &"***REDACTED***")
            .field("new_password", &"***REDACTED***")
            .field("new_password_confirm", &"***REDACTED***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_only_shape() {
        let request = PasswordChangeRequest {
            username: "alice".to_string(),
            current_password: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(request.is_credentials_only());

        let full = PasswordChangeRequest {
            new_password: "new-password".to_string(),
            new_password_confirm: "new-password".to_string(),
            ..request
        };
        assert!(!full.is_credentials_only());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let request = PasswordChangeRequest {
            username: "alice".to_string(),
            current_password: "hunter2".to_string(),
            new_password: "s3cret-value".to_string(),
            new_password_confirm: "s3cret-value".to_string(),
        };
        let rendered = format!("{request:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret-value"));
    }
}
