use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

// Vetted literals; a failure here is a programming error caught by the tests.
#[allow(clippy::unwrap_used)]
static URL_CREDENTIALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"://([^:/@\s]+):([^@\s]+)@").unwrap());

#[allow(clippy::unwrap_used)]
static JWT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

#[allow(clippy::unwrap_used)]
static OPAQUE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9+/]{24,}={0,2}").unwrap());

/// Mask secrets that database drivers and auth failures like to echo back:
/// passwords embedded in connection URLs, JWTs and long opaque tokens.
///
/// UUIDs survive untouched, so game ids stay readable in logs.
pub fn redact(input: &str) -> String {
    let without_passwords = URL_CREDENTIALS.replace_all(input, "://$1:***@");
    let without_jwts = JWT.replace_all(&without_passwords, "[REDACTED_JWT]");
    OPAQUE_TOKEN
        .replace_all(&without_jwts, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Formats its contents through [`redact`].
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
