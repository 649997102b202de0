//! Domain primitives.

use serde::{Deserialize, Serialize};

/// Time in milliseconds since Unix epoch.
///
/// Order `created_at` timestamps and stats range bounds use this type so
/// interval comparisons stay integer-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeMs(pub i64);

impl TimeMs {
    pub fn new(ms: i64) -> Self {
        TimeMs(ms)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        TimeMs(chrono::Utc::now().timestamp_millis())
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}
