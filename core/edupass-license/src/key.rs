//! License key shape checks and display masking.
//!
//! Keys issued by the operator look like `EDU-XXXXXX`. The shape check is a
//! cheap pre-filter that saves a remote fetch for obvious garbage; it never
//! grants access on its own. Login and passive recall apply the same shape,
//! so any key that can log in can also be recalled.

use serde::{Deserialize, Serialize};

/// Prefix of operator-issued keys.
pub const DEFAULT_KEY_PREFIX: &str = "EDU-";

/// Shortest key length accepted by the shape check.
pub const DEFAULT_MIN_KEY_LEN: usize = 10;

/// Expected shape of a license key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyShape {
    /// Required prefix. Empty disables the prefix check.
    pub prefix: String,
    /// Minimum length in characters.
    pub min_len: usize,
}

impl Default for KeyShape {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_KEY_PREFIX.to_string(),
            min_len: DEFAULT_MIN_KEY_LEN,
        }
    }
}

impl KeyShape {
    /// Returns true if `key` is worth a remote lookup.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        !key.is_empty() && key.chars().count() >= self.min_len && key.starts_with(&self.prefix)
    }
}

/// Renders a key with its middle hidden, for display and logs.
#[must_use]
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let n = chars.len();
    if n == 0 {
        return String::new();
    }
    if n <= 8 {
        let head: String = chars[..n / 2].iter().collect();
        return format!("{head}****");
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[n - 2..].iter().collect();
    format!("{head}****{tail}")
}
