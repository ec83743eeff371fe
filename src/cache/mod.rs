//! Per-question response cache.
//!
//! Generated text (explanation, solution, hints, dry run, mistakes analysis)
//! is cached per question in a shared [`KeyValueStore`], under keys
//! prefixed with [`CACHE_PREFIX`]. An entry expires as a whole 24 hours
//! after its most recent write and is evicted lazily on the next read.
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

mod clock;
mod entry;
mod response;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use response::{CacheStats, ResponseCache, CACHE_PREFIX, CACHE_TTL};
