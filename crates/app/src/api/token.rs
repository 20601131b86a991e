//! API bearer token.

use std::fmt;

use zeroize::Zeroize;

/// Bearer token attached to API requests.
///
/// The value is redacted from debug output and wiped from memory on drop.
#[derive(Clone)]
pub struct ApiToken {
    value: String,
}

impl ApiToken {
    /// Wrap a raw token, returning `None` when it is blank.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let mut value = value.into();

        if value.trim().is_empty() {
            value.zeroize();
            return None;
        }

        Some(Self { value })
    }

    /// Raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(**redacted**)")
    }
}

impl Drop for ApiToken {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}
