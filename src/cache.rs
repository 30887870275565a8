//! Canonicalizing cache of immutable values.
//!
//! A [`CanonicalCache`] maps raw constructor input to the single live value
//! built from it. Entries are held weakly: once the last external `Arc` is
//! dropped the value is freed, and the next request for the same input builds
//! a new one. Dead entries are swept periodically and by [`CanonicalCache::purge`].
//!
//! Deduplication is a memory optimization only. Values are immutable and equal
//! by payload, so correctness never depends on a hit; a disabled cache simply
//! constructs every time.
//!
//! # Concurrency
//!
//! Lookups take a shared lock; construction runs without any lock held. Two
//! threads missing on the same input may both construct. The first one to
//! store its value wins and the other construction is discarded, so at most
//! one instance is retained per input.
//!
//! ```rust
//! use checked_values::cache::CanonicalCache;
//! use std::sync::Arc;
//!
//! let cache: CanonicalCache<String, String> = CanonicalCache::new();
//! let a = cache.get_or_create("abc", |raw| Ok::<_, ()>(raw.to_uppercase())).unwrap();
//! let b = cache.get_or_create("abc", |_| Err(())).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

use crate::config::CacheConfig;
use crate::error::{ConfigError, ConfigResult};
use log::{debug, trace};
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, Weak};

static GLOBAL_CONFIG: OnceLock<CacheConfig> = OnceLock::new();

/// Install the configuration used by every value-type cache.
///
/// Fails once any value-type cache has been created or a configuration was
/// already installed.
pub fn configure(config: CacheConfig) -> ConfigResult<()> {
    GLOBAL_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// The process-wide cache configuration (defaults unless installed).
pub fn global_config() -> &'static CacheConfig {
    GLOBAL_CONFIG.get_or_init(CacheConfig::default)
}

/// Weakly-held map from raw input to canonical instance.
pub struct CanonicalCache<K, V> {
    entries: RwLock<HashMap<K, Weak<V>>>,
    config: CacheConfig,
    inserts: AtomicUsize,
}

impl<K, V> CanonicalCache<K, V>
where
    K: Eq + Hash,
{
    /// Create an enabled cache with default settings.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
            inserts: AtomicUsize::new(0),
        }
    }

    /// Create a cache that never stores anything.
    pub fn disabled() -> Self {
        Self::with_config(CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the live instance for `key`, if one exists.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.read().get(key).and_then(Weak::upgrade)
    }

    /// Return the canonical instance for `key`, constructing it on a miss.
    ///
    /// A hit performs no validation and no construction. On a miss `create`
    /// runs outside the lock and its error is returned unchanged.
    pub fn get_or_create<Q, F, E>(&self, key: &Q, create: F) -> Result<Arc<V>, E>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce(&Q) -> Result<V, E>,
    {
        if !self.config.enabled {
            return create(key).map(Arc::new);
        }

        if let Some(existing) = self.get(key) {
            trace!("canonical cache hit for {}", std::any::type_name::<V>());
            return Ok(existing);
        }
        trace!("canonical cache miss for {}", std::any::type_name::<V>());

        let created = Arc::new(create(key)?);

        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(key).and_then(Weak::upgrade) {
            // Another thread stored an instance while we were constructing
            return Ok(existing);
        }
        entries.insert(key.to_owned(), Arc::downgrade(&created));

        let inserts = self.inserts.fetch_add(1, Ordering::Relaxed) + 1;
        if self.config.sweep_interval > 0 && inserts % self.config.sweep_interval == 0 {
            let removed = sweep(&mut entries);
            debug!(
                "swept {} dead entries from {} cache",
                removed,
                std::any::type_name::<V>()
            );
        }

        Ok(created)
    }

    /// Drop entries whose value is no longer referenced. Returns the count removed.
    pub fn purge(&self) -> usize {
        sweep(&mut self.entries.write())
    }

    /// Remove every entry. Values still referenced elsewhere stay alive.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of stored entries, including dead ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries whose value is still alive.
    pub fn live_len(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

impl<K, V> Default for CanonicalCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

fn sweep<K, V>(entries: &mut HashMap<K, Weak<V>>) -> usize {
    let before = entries.len();
    entries.retain(|_, weak| weak.strong_count() > 0);
    before - entries.len()
}
