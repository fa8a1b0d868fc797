use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used for log redaction.
///
/// Every pattern is a vetted literal; each construction site carries its own
/// allow so `unwrap_used` stays denied elsewhere.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Email addresses (usernames are free-form and may be emails)
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Postgres constraint detail: `Key (username)=(alice) already exists.`
    pub fn key_detail() -> &'static Regex {
        static KEY_DETAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\(([A-Za-z0-9_, ]+)\)=\([^)]*\)").unwrap()
        });
        &KEY_DETAIL_REGEX
    }

    /// Hex or base64-like runs of 16+ characters
    pub fn opaque_token() -> &'static Regex {
        static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}").unwrap()
        });
        &TOKEN_REGEX
    }
}

/// Masks values that may identify a participant.
///
/// Order matters: constraint details first (they may contain emails),
/// then emails, then opaque tokens.
pub fn redact(input: &str) -> String {
    let keys = PiiRegexRegistry::key_detail().replace_all(input, "($1)=([REDACTED])");

    let emails = PiiRegexRegistry::email().replace_all(&keys, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            _ => full.to_string(),
        }
    });

    PiiRegexRegistry::opaque_token()
        .replace_all(&emails, "[REDACTED_TOKEN]")
        .to_string()
}

/// Shortened form of a username for log fields.
pub fn mask_username(username: &str) -> String {
    match username.chars().next() {
        Some(first) => format!("{first}***"),
        None => String::new(),
    }
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
