//! In-memory cache for county records
//!
//! This module provides the key normalizer and an expiring cache store. Keys
//! are normalized county names; entries are considered absent once they are
//! 24 hours old and are purged lazily on lookup or by an explicit sweep.

mod clock;
mod normalize;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use normalize::normalize;
pub use store::{CacheStats, CountyCache, EXPIRY_WINDOW_HOURS};
