//! Cache configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_ENTRY_LIMIT: usize = 64;
const DEFAULT_TTL_MS: u64 = 30_000;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Tuning knobs for the query cache and controller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum cached list pages before LRU eviction.
    pub entry_limit: usize,
    /// Freshness window for Ready entries. `0` disables time-based expiry;
    /// entries then stay fresh until explicitly invalidated.
    pub ttl_ms: u64,
    /// Quiet period coalescing keyword changes into one fetch.
    pub debounce_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entry_limit: DEFAULT_ENTRY_LIMIT,
            ttl_ms: DEFAULT_TTL_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            entry_limit: settings.entry_limit,
            ttl_ms: settings.ttl_ms,
            debounce_ms: settings.debounce_ms,
        }
    }
}

impl CacheConfig {
    /// Entry limit as NonZeroUsize, clamping to 1 if zero.
    pub fn entry_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.entry_limit).unwrap_or(NonZeroUsize::MIN)
    }

    /// Freshness window, or `None` when time-based expiry is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_ms > 0).then(|| Duration::from_millis(self.ttl_ms))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
