//! Time helpers.
//!
//! The domain never reads the clock on its own; callers pass `now` in so
//! tests can drive virtual time.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// UTC timestamp used for the motion idle timer.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Whether at least `window` has passed between `since` and `now`.
///
/// A `now` earlier than `since` (clock stepped backwards) counts as no time
/// having passed.
#[must_use]
pub fn has_elapsed(since: Timestamp, now: Timestamp, window: Duration) -> bool {
    now.signed_duration_since(since)
        .to_std()
        .is_ok_and(|elapsed| elapsed >= window)
}
