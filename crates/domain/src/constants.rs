//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Default GitHub organization queried for agenda issues.
pub const DEFAULT_GITHUB_ORG: &str = "nodejs";

/// Default host prefix used in generated meeting titles.
pub const DEFAULT_MEETING_HOST: &str = "Node.js";

/// Length of the meeting search window, in days.
pub const MEETING_WINDOW_DAYS: i64 = 7;

/// Width the timezone label column is padded to in the conversion table.
pub const TIMEZONE_LABEL_WIDTH: usize = 13;

/// Placeholder rendered into the issue body when no agenda item exists.
pub const EMPTY_AGENDA_PLACEHOLDER: &str = "*No agenda items found.*";

/// Timezones rendered into the per-meeting conversion table, in display
/// order. Labels are what community members expect to read, not canonical
/// IANA names.
pub const RELEVANT_TIMEZONES: [(&str, &str); 12] = [
    ("US / Pacific", "America/Los_Angeles"),
    ("US / Mountain", "America/Denver"),
    ("US / Central", "America/Chicago"),
    ("US / Eastern", "America/New_York"),
    ("EU / Western", "Europe/London"),
    ("EU / Central", "Europe/Amsterdam"),
    ("EU / Eastern", "Europe/Helsinki"),
    ("Moscow", "Europe/Moscow"),
    ("Chennai", "Asia/Kolkata"),
    ("Hangzhou", "Asia/Shanghai"),
    ("Tokyo", "Asia/Tokyo"),
    ("Sydney", "Australia/Sydney"),
];

// Default HackMD permissions for generated documents
pub const NOTES_READ_PERMISSION: &str = "guest";
pub const NOTES_WRITE_PERMISSION: &str = "signed_in";
pub const NOTES_COMMENT_PERMISSION: &str = "signed_in_users";
