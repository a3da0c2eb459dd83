//! Session credential value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque bearer credential issued by the backend on login or registration.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    /// Creates a token, rejecting empty or whitespace-only values.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self { value })
    }

    /// Creates token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.value.len() <= 10 {
            return "*".repeat(self.value.len());
        }

        let visible_prefix: String = self.value.chars().take(4).collect();
        let visible_suffix: String = self
            .value
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}
