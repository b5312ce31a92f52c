/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Clock In → green, Clock Out → red.
pub fn colorize_action(value: &str, is_in: bool) -> String {
    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

/// Zero hours are greyed out.
pub fn colorize_hours(value: &str, hours: f64) -> String {
    if hours == 0.0 {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{CYAN}{value}{RESET}")
    }
}

/// Open session marker.
pub fn colorize_open(value: &str) -> String {
    format!("{YELLOW}{value}{RESET}")
}
