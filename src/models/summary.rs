use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Hours worked by one person, always recomputed from raw events.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HoursSummary {
    pub person: String,
    pub today: f64,
    pub week: f64,
    /// Start of a session that is still open. Shown to the user, not counted.
    pub open_since: Option<DateTime<FixedOffset>>,
}
