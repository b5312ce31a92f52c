//! Source of "now", injected so reports are deterministic in tests.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

pub trait Clock {
    fn now(&self, tz: Tz) -> DateTime<Tz>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self, tz: Tz) -> DateTime<Tz> {
        Utc::now().with_timezone(&tz)
    }
}

/// Always returns the same instant (converted to the requested zone).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self, tz: Tz) -> DateTime<Tz> {
        self.now.with_timezone(&tz)
    }
}
