//! # lrumemo
//!
//! Fixed-capacity memoization cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **RecencyList**: arena-backed doubly-linked list with head/tail sentinels (O(1) unlink/append)
//! - **HashMap**: AHash map from key to list handle (O(1) lookup)
//! - **BoundedCache**: runs the producer on a miss, promotes on a hit, evicts the LRU entry when full
//!
//! ## Example
//! ```
//! use std::convert::Infallible;
//! use lrumemo::BoundedCache;
//!
//! let mut squares = BoundedCache::new(2, |x: &u64| Ok::<_, Infallible>(x * x)).unwrap();
//!
//! assert_eq!(squares.get(3), Ok(&9));
//! assert_eq!(squares.get(3), Ok(&9)); // hit, producer not called again
//! assert_eq!(squares.stats().misses(), 1);
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod key;
mod recency;
mod stats;

pub use cache::BoundedCache;
pub use error::{Error, Result};
pub use key::CallKey;
pub use recency::{EntryId, Iter, RecencyList};
pub use stats::CacheStats;
