//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for schedule due times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
