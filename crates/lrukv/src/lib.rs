//! # lrukv
//!
//! Fixed-capacity key/value cache with least-recently-used eviction, safe to
//! share between threads.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1) lookup)
//! - **LRU List**: Doubly-linked list threaded through a slot arena (O(1)
//!   move-to-front and eviction)
//! - **Guard**: One `parking_lot` mutex around both, held for each call
//!
//! ## Semantics
//! - Capacity 0 means unbounded
//! - `add` returns `false` for an existing key but still stores the new value
//!   and promotes it
//! - Misses are `None`, never errors
//!
//! ```
//! use lrukv::Cache;
//!
//! let cache = Cache::new(2);
//! assert!(cache.add("k2", "V2"));
//! assert!(cache.add("k4", "V4"));
//! assert!(cache.add("k3", "V3")); // evicts k2
//! assert_eq!(cache.get("k2"), None);
//! assert_eq!(cache.get("k4").as_deref(), Some("V4"));
//! ```

#![warn(missing_docs)]

mod cache;
mod lru;

pub use cache::{Cache, LruCache};
pub use lru::{Iter, LruList, Put};
