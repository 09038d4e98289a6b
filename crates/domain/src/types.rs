//! Common data types used throughout the application

use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::utils::rrule::RecurrenceRule;

/// A calendar entry as parsed from a shared feed.
///
/// `start` is the wall-clock time at `DTSTART` in the event's originating
/// timezone (`tzid`); a `tzid` of `None` means the feed gave the time in
/// UTC (or floating, which is treated as UTC).
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub tzid: Option<String>,
    pub recurrence: Option<RecurrenceRule>,
}

impl CalendarEvent {
    /// Text searched for the calendar filter token. The summary takes
    /// precedence; the description is consulted only when the summary is
    /// absent or empty.
    pub fn filter_text(&self) -> Option<&str> {
        match self.summary.as_deref() {
            Some(s) if !s.is_empty() => Some(s),
            _ => self.description.as_deref(),
        }
    }
}

/// The single next occurrence chosen from the calendar feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMeetingDate(pub DateTime<Utc>);

/// An open issue as returned by the issue tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub number: u64,
    pub title: String,
    pub url: String,
    /// Set when the tracker marks this item as a pull request. Pull
    /// requests are never agenda items.
    pub pull_request: bool,
}

/// A search hit when probing for an already-published meeting issue.
#[derive(Debug, Clone)]
pub struct IssueHit {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub url: String,
}

/// Agenda items for one repository, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaEntry {
    pub repository: String,
    pub issues: Vec<IssueRef>,
}

/// Handle to an artifact created or updated on an external system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHandle {
    pub id: String,
    pub url: String,
}

/// A notes document already present on the notes host.
#[derive(Debug, Clone)]
pub struct NoteSummary {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Permissions applied to generated notes documents.
#[derive(Debug, Clone)]
pub struct NotePermissions {
    pub read: String,
    pub write: String,
    pub comment: String,
}

impl Default for NotePermissions {
    fn default() -> Self {
        Self {
            read: crate::constants::NOTES_READ_PERMISSION.to_string(),
            write: crate::constants::NOTES_WRITE_PERMISSION.to_string(),
            comment: crate::constants::NOTES_COMMENT_PERMISSION.to_string(),
        }
    }
}

/// Static descriptor for one recurring meeting series.
///
/// Loaded once per run from the group's property files and immutable for
/// the run's duration.
#[derive(Debug, Clone)]
pub struct MeetingGroupConfig {
    pub group_id: String,
    pub display_name: String,
    /// Host prefix for generated titles. `None` falls back to the default
    /// host; an explicit empty string is honored as-is.
    pub host_name: Option<String>,
    /// Substring used to select matching events in the shared feed.
    pub calendar_filter: String,
    /// Feed URL to query.
    pub calendar_source: String,
    pub code_host_org: String,
    pub code_host_repo: String,
    pub agenda_label: String,
    pub issue_label: Option<String>,
    pub invited_list: String,
    pub observer_list: String,
    pub joining_instructions: Option<String>,
    /// Target team workspace on the notes host.
    pub notes_team_context: Option<String>,
}

/// Application configuration resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: String,
    pub hackmd_token: String,
    pub hackmd_team: Option<String>,
    pub templates_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
}

/// Per-run flags from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Describe external writes instead of performing them.
    pub dry_run: bool,
    /// Skip existing-artifact lookups and always create fresh artifacts.
    pub force: bool,
}
