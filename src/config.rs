//! Options for opening the backing store.

use std::collections::BTreeMap;

/// Configuration for [`HypergraphStore::open_with_config`](crate::store::HypergraphStore::open_with_config).
///
/// # Default Configuration
///
/// ```rust
/// use hypergraphdb::StoreConfig;
/// let config = StoreConfig::default();
/// assert!(config.create_if_missing);
/// assert!(config.pragma_settings.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Create the backing file when it does not exist.
    ///
    /// **Default:** `true`
    ///
    /// When `false`, opening a missing file fails with a connection error
    /// instead of silently starting from an empty database.
    pub create_if_missing: bool,

    /// SQLite PRAGMA settings applied right after the connection opens.
    ///
    /// **Default:** empty
    ///
    /// ```rust
    /// use hypergraphdb::StoreConfig;
    ///
    /// let mut cfg = StoreConfig::default();
    /// cfg.pragma_settings.insert("journal_mode".to_string(), "WAL".to_string());
    /// cfg.pragma_settings.insert("synchronous".to_string(), "FULL".to_string());
    /// ```
    pub pragma_settings: BTreeMap<String, String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            pragma_settings: BTreeMap::new(),
        }
    }
}

impl StoreConfig {
    pub fn with_pragma(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pragma_settings.insert(key.into(), value.into());
        self
    }

    pub fn existing_only(mut self) -> Self {
        self.create_if_missing = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_default() {
        let cfg = StoreConfig::default();
        assert!(cfg.create_if_missing);
        assert!(cfg.pragma_settings.is_empty());
    }

    #[test]
    fn test_store_config_builders() {
        let cfg = StoreConfig::default()
            .with_pragma("journal_mode", "WAL")
            .existing_only();
        assert!(!cfg.create_if_missing);
        assert_eq!(
            cfg.pragma_settings.get("journal_mode").map(String::as_str),
            Some("WAL")
        );
    }
}
