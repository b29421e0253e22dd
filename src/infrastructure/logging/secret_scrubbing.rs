use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static USERINFO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<prefix>://[^:/@\s]+):[^@\s]+@").expect("userinfo pattern is valid")
});
static PASSWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)["']?password["']?\s*[:=]\s*["']?[^"'\s,;}&]+["']?"#)
        .expect("password pattern is valid")
});
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?P<key>["']?(?:api_key|apikey|token|secret)["']?\s*[:=])\s*["']?[a-zA-Z0-9\-_\.]{8,}["']?"#)
        .expect("token pattern is valid")
});

/// Removes credentials from strings before they reach the logs
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub const fn new() -> Self {
        Self
    }

    /// Scrub connection strings and key/value secrets from a message
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = USERINFO_PATTERN.replace_all(message, "$prefix:[REDACTED]@");
        let scrubbed = PASSWORD_PATTERN.replace_all(&scrubbed, "password=[REDACTED]");
        TOKEN_PATTERN
            .replace_all(&scrubbed, "$key[REDACTED]")
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
