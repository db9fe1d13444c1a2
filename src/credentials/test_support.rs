//! Deterministic clock for tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// A clock frozen at a fixed instant.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use mockable::Clock;
/// use prbot::credentials::test_support::FixedClock;
///
/// let instant = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().expect("valid instant");
/// assert_eq!(FixedClock::new(instant).utc(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
