//! Distinguished name construction.
//!
//! A [`DirectoryIdentity`] is only ever built from a username that already
//! matched the policy's format pattern; the RFC 4514 escaping applied here
//! is defense in depth on top of that, so a special character can never
//! survive into the protocol message even if the upstream check changes.

use std::fmt;

/// The DN of the directory entry a password change applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryIdentity {
    dn: String,
}

impl DirectoryIdentity {
    /// Build `uid=<escaped-username>,<people_base_dn>`.
    #[must_use]
    pub fn for_user(username: &str, people_base_dn: &str) -> Self {
        Self {
            dn: format!("uid={},{}", escape_dn_value(username), people_base_dn),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.dn
    }
}

impl fmt::Display for DirectoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dn)
    }
}

/// Escape an attribute value for use in a DN per RFC 4514.
///
/// `, + " \ < > ; =` and NUL are always escaped; a space is escaped at the
/// start or end of the value and `#` at the start.
#[must_use]
pub fn escape_dn_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() * 2);
    let last = value.chars().count().saturating_sub(1);

    for (i, ch) in value.chars().enumerate() {
        match ch {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '\0' => escaped.push_str("\\00"),
            ' ' if i == 0 || i == last => escaped.push_str("\\20"),
            '#' if i == 0 => escaped.push_str("\\23"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE_BASE: &str = "ou=People,dc=ank,dc=chnet";

    #[test]
    fn test_plain_username_dn() {
        let identity = DirectoryIdentity::for_user("alice", PEOPLE_BASE);
        assert_eq!(identity.as_str(), "uid=alice,ou=People,dc=ank,dc=chnet");
    }

    #[test]
    fn test_special_characters_are_escaped() {
        // A comma in the value must not split the RDN.
        let identity = DirectoryIdentity::for_user("a,ou=evil", PEOPLE_BASE);
        assert_eq!(
            identity.as_str(),
            "uid=a\\,ou\\=evil,ou=People,dc=ank,dc=chnet"
        );
    }

    #[test]
    fn test_escape_always_escaped_set() {
        assert_eq!(escape_dn_value(r#"a,b+c"d\e<f>g;h=i"#), r#"a\,b\+c\"d\\e\<f\>g\;h\=i"#);
    }

    #[test]
    fn test_escape_positional_rules() {
        assert_eq!(escape_dn_value(" padded "), "\\20padded\\20");
        assert_eq!(escape_dn_value("in side"), "in side");
        assert_eq!(escape_dn_value("#lead"), "\\23lead");
        assert_eq!(escape_dn_value("tail#"), "tail#");
    }

    #[test]
    fn test_escape_nul_and_empty() {
        assert_eq!(escape_dn_value("a\0b"), "a\\00b");
        assert_eq!(escape_dn_value(""), "");
    }

    #[test]
    fn test_escape_multibyte_is_untouched() {
        assert_eq!(escape_dn_value("göteborg"), "göteborg");
    }
}
