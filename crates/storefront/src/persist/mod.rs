//! Persistence of whitelisted slices across restarts.
//!
//! All persisted slices live in one versioned JSON blob stored under
//! `persist:<namespace>`:
//!
//! ```json
//! { "version": 1, "products": { ... }, "cart": { ... }, "theme": { ... } }
//! ```
//!
//! Only slices on the whitelist are written. Search is never persisted.
//! A blob with another version, or one that does not parse, is discarded
//! and the app starts fresh.

mod file;
mod memory;

use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::slices::cart::CartState;
use crate::slices::products::ProductsState;
use crate::slices::theme::ThemeState;

/// Layout version of the persisted blob.
pub const PERSIST_VERSION: u32 = 1;

const DEFAULT_NAMESPACE: &str = "root";

/// Errors from a storage adapter.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A slice that can be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SliceName {
    Products,
    Cart,
    Theme,
}

impl SliceName {
    pub const ALL: [Self; 3] = [Self::Products, Self::Cart, Self::Theme];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Theme => "theme",
        }
    }
}

impl fmt::Display for SliceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SliceName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "products" => Ok(Self::Products),
            "cart" => Ok(Self::Cart),
            "theme" => Ok(Self::Theme),
            "search" => Err("search results are never persisted".to_string()),
            other => Err(format!("unknown slice '{other}'")),
        }
    }
}

/// Where persisted state goes and which slices it includes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistConfig {
    pub namespace: String,
    pub whitelist: BTreeSet<SliceName>,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            whitelist: SliceName::ALL.into_iter().collect(),
        }
    }
}

impl PersistConfig {
    /// Storage key of the blob.
    #[must_use]
    pub fn key(&self) -> String {
        format!("persist:{}", self.namespace)
    }

    #[must_use]
    pub fn includes(&self, slice: SliceName) -> bool {
        self.whitelist.contains(&slice)
    }
}

/// The persisted blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<ProductsState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<CartState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeState>,
}

#[derive(Deserialize)]
struct BlobHeader {
    version: u32,
}

impl PersistedState {
    /// Snapshot the whitelisted slices.
    #[must_use]
    pub fn capture(
        config: &PersistConfig,
        products: &ProductsState,
        cart: &CartState,
        theme: &ThemeState,
    ) -> Self {
        Self {
            version: PERSIST_VERSION,
            products: config
                .includes(SliceName::Products)
                .then(|| products.clone()),
            cart: config.includes(SliceName::Cart).then(|| cart.clone()),
            theme: config.includes(SliceName::Theme).then_some(*theme),
        }
    }

    /// Serialize to the stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns `PersistError::Serialize` if serialization fails.
    pub fn encode(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored blob. Unreadable or foreign-version blobs yield `None`.
    #[must_use]
    pub fn decode(blob: &str) -> Option<Self> {
        let header: BlobHeader = match serde_json::from_str(blob) {
            Ok(header) => header,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted state");
                return None;
            }
        };
        if header.version != PERSIST_VERSION {
            warn!(
                found = header.version,
                expected = PERSIST_VERSION,
                "Discarding persisted state from another version"
            );
            return None;
        }
        serde_json::from_str(blob)
            .map_err(|e| warn!(error = %e, "Discarding unreadable persisted state"))
            .ok()
    }

    /// Drop slices that have left the whitelist since the blob was written.
    #[must_use]
    pub fn restricted(mut self, config: &PersistConfig) -> Self {
        if !config.includes(SliceName::Products) {
            self.products = None;
        }
        if !config.includes(SliceName::Cart) {
            self.cart = None;
        }
        if !config.includes(SliceName::Theme) {
            self.theme = None;
        }
        self
    }
}

/// Key-value storage for persisted blobs.
pub trait PersistAdapter: Send + Sync {
    /// Read the blob stored under `key`, if any.
    fn load(&self, key: &str) -> impl Future<Output = Result<Option<String>, PersistError>> + Send;

    /// Store `blob` under `key`, replacing what was there.
    fn save(&self, key: &str, blob: &str) -> impl Future<Output = Result<(), PersistError>> + Send;

    /// Forget `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), PersistError>> + Send;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::ThemeMode;

    use super::*;

    fn products() -> ProductsState {
        ProductsState {
            products: crate::testing::catalog(3),
            loading: true,
            error: Some("boom".to_string()),
            ..ProductsState::with_limit(2)
        }
    }

    #[test]
    fn test_slice_name_parsing() {
        assert_eq!("Cart".parse::<SliceName>(), Ok(SliceName::Cart));
        assert!("search".parse::<SliceName>().unwrap_err().contains("search"));
        assert!("wishlist".parse::<SliceName>().is_err());
    }

    #[test]
    fn test_default_key() {
        assert_eq!(PersistConfig::default().key(), "persist:root");
    }

    #[test]
    fn test_capture_respects_whitelist() {
        let config = PersistConfig {
            whitelist: [SliceName::Cart].into_iter().collect(),
            ..PersistConfig::default()
        };
        let blob = PersistedState::capture(
            &config,
            &products(),
            &CartState::default(),
            &ThemeState::default(),
        );
        assert!(blob.products.is_none());
        assert!(blob.cart.is_some());
        assert!(blob.theme.is_none());

        let json = blob.encode().unwrap();
        assert_eq!(json, r#"{"version":1,"cart":{"cart":null}}"#);
    }

    #[test]
    fn test_transient_fields_are_not_written() {
        let blob = PersistedState::capture(
            &PersistConfig::default(),
            &products(),
            &CartState::default(),
            &ThemeState {
                mode: ThemeMode::Dark,
            },
        );
        let decoded = PersistedState::decode(&blob.encode().unwrap()).unwrap();
        let restored = decoded.products.unwrap();
        assert_eq!(restored.products.len(), 3);
        assert!(!restored.loading);
        assert_eq!(restored.error, None);
        assert_eq!(decoded.theme.map(|t| t.mode), Some(ThemeMode::Dark));
    }

    #[test]
    fn test_decode_discards_other_versions() {
        assert!(PersistedState::decode(r#"{"version":2,"theme":{"mode":"dark"}}"#).is_none());
        assert!(PersistedState::decode(r#"{"version":1,"theme":{"mode":"dark"}}"#).is_some());
    }

    #[test]
    fn test_decode_discards_garbage() {
        assert!(PersistedState::decode("not json").is_none());
        assert!(PersistedState::decode(r#"{"version":1,"theme":{"mode":"sepia"}}"#).is_none());
    }

    #[test]
    fn test_restricted_drops_removed_slices() {
        let blob = PersistedState::decode(r#"{"version":1,"cart":{"cart":null},"theme":{"mode":"dark"}}"#)
            .unwrap()
            .restricted(&PersistConfig {
                whitelist: [SliceName::Theme].into_iter().collect(),
                ..PersistConfig::default()
            });
        assert!(blob.cart.is_none());
        assert!(blob.theme.is_some());
    }
}
