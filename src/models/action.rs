use serde::{Deserialize, Serialize};

/// The two things a person can do at the time clock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Action {
    ClockIn,
    ClockOut,
}

impl Action {
    /// Human label, also the value stored in the flat-file log.
    pub fn label(&self) -> &'static str {
        match self {
            Action::ClockIn => "Clock In",
            Action::ClockOut => "Clock Out",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Action::ClockIn => "in",
            Action::ClockOut => "out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(Action::ClockIn),
            "out" => Some(Action::ClockOut),
            _ => None,
        }
    }

    /// Lenient parser for user input and flat-file rows:
    /// `in`, `out`, `Clock In`, `clock_out`, `clock-in`, `clockin`...
    pub fn parse(s: &str) -> Option<Self> {
        let norm: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();

        match norm.as_str() {
            "in" | "clockin" => Some(Action::ClockIn),
            "out" | "clockout" => Some(Action::ClockOut),
            _ => None,
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, Action::ClockIn)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
