//! Point-in-time values for time predicates.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A point in time, as whole seconds since the Unix epoch.
///
/// The domain is unsigned: instants before the epoch cannot be represented
/// and are clamped to zero when converting from [`SystemTime`].
///
/// ```
/// use qaul_query::Timestamp;
///
/// assert!(Timestamp::from_secs(100) < Timestamp::from_secs(150));
/// assert_eq!(Timestamp::from(42u64).as_secs(), 42);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Creates a timestamp from seconds since the Unix epoch.
    pub fn from_secs(secs: u64) -> Self {
        Timestamp(secs)
    }

    /// Returns the timestamp as seconds since the Unix epoch.
    pub fn as_secs(self) -> u64 {
        self.0
    }
}

impl From<u64> for Timestamp {
    fn from(secs: u64) -> Self {
        Timestamp(secs)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        let secs = time
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Timestamp(secs)
    }
}

impl From<Timestamp> for SystemTime {
    fn from(ts: Timestamp) -> Self {
        UNIX_EPOCH + Duration::from_secs(ts.0)
    }
}
