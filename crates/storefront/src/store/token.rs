//! Monotonic request tokens.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one network request issued by a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw token value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out strictly increasing tokens. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct TokenSource {
    next: Arc<AtomicU64>,
}

impl TokenSource {
    /// Create a source starting at token 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next token.
    #[must_use]
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let source = TokenSource::new();
        let a = source.issue();
        let b = source.issue();
        assert!(b > a);
        assert_eq!(a.get(), 1);
    }

    #[test]
    fn test_clones_share_counter() {
        let source = TokenSource::new();
        let clone = source.clone();
        let a = source.issue();
        let b = clone.issue();
        assert_ne!(a, b);
    }
}
