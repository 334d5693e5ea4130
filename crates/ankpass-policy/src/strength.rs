//! Password strength estimation.
//!
//! Wraps zxcvbn's pattern/dictionary/entropy estimator. Context the user
//! already knows (their username, their current password) is passed in as
//! additional weak tokens so a new password derived from either scores low.

use zxcvbn::{zxcvbn, Score};

/// Minimum acceptable strength score on zxcvbn's 0-4 scale.
pub const MIN_SCORE: Score = Score::Three;

/// Estimate the strength of `password`, penalizing against `weak_tokens`.
#[must_use]
pub fn estimate(password: &str, weak_tokens: &[&str]) -> Score {
    zxcvbn(password, weak_tokens).score()
}

/// Whether `password` meets the minimum strength requirement.
#[must_use]
pub fn is_acceptable(password: &str, weak_tokens: &[&str]) -> bool {
    estimate(password, weak_tokens) >= MIN_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_password_scores_low() {
        assert!(estimate("password1", &[]) < MIN_SCORE);
        assert!(estimate("12345678", &[]) < MIN_SCORE);
        assert!(estimate("qwertyuiop", &[]) < MIN_SCORE);
    }

    #[test]
    fn test_passphrase_scores_high() {
        assert!(is_acceptable("correct horse battery staple", &[]));
    }

    #[test]
    fn test_weak_tokens_penalize_score() {
        let password = "grolsch-brouwerij";
        let unpenalized = estimate(password, &[]);
        let penalized = estimate(password, &[password]);
        assert!(penalized <= unpenalized);
        assert!(penalized < MIN_SCORE);
    }

    #[test]
    fn test_empty_password_scores_zero() {
        assert_eq!(estimate("", &[]), Score::Zero);
    }
}
