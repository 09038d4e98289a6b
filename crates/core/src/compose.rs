//! Artifact composition: meeting titles, timezone tables, external
//! conversion links, and the issue/notes bodies.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use quorum_domain::constants::{
    DEFAULT_MEETING_HOST, EMPTY_AGENDA_PLACEHOLDER, RELEVANT_TIMEZONES, TIMEZONE_LABEL_WIDTH,
};
use quorum_domain::{MeetingGroupConfig, ResolvedMeetingDate};

use crate::template::substitute;

/// Human-readable time format shared by the UTC line and the timezone
/// conversion table, e.g. `Wed, Jan 15, 2025, 10:30 AM`.
const HUMAN_TIME_FORMAT: &str = "%a, %b %d, %Y, %I:%M %p";

/// Generate the meeting title: `"{host} {groupName} Meeting {YYYY-MM-DD}"`.
///
/// The host falls back to the default only when unset; an explicit empty
/// override is honored as-is and yields an empty segment.
pub fn generate_meeting_title(config: &MeetingGroupConfig, date: ResolvedMeetingDate) -> String {
    let host = config.host_name.as_deref().unwrap_or(DEFAULT_MEETING_HOST);
    format!("{host} {name} Meeting {date}", name = config.display_name, date = date.0.format("%Y-%m-%d"))
}

/// Compose the issue body from its template.
pub fn compose_issue(
    template: &str,
    config: &MeetingGroupConfig,
    date: ResolvedMeetingDate,
    agenda_markdown: &str,
    notes_url: &str,
) -> String {
    let mut vars = HashMap::new();
    vars.insert("UTC_TIME".to_string(), format_utc_time(date.0));
    vars.insert("TIMEZONE_TABLE".to_string(), timezone_table(date.0));
    vars.insert(
        "TIME_AND_DATE_LINK".to_string(),
        time_and_date_link(date.0, &config.display_name),
    );
    vars.insert("WOLFRAM_LINK".to_string(), wolfram_link(date.0));
    vars.insert("AGENDA_LABEL".to_string(), config.agenda_label.clone());
    vars.insert("GITHUB_ORG".to_string(), config.code_host_org.clone());
    vars.insert("AGENDA_CONTENT".to_string(), agenda_or_placeholder(agenda_markdown));
    vars.insert("INVITED".to_string(), config.invited_list.clone());
    vars.insert(
        "JOINING_INSTRUCTIONS".to_string(),
        config.joining_instructions.clone().unwrap_or_default(),
    );
    vars.insert("MINUTES_DOC".to_string(), notes_url.to_string());
    vars.insert("OBSERVERS".to_string(), config.observer_list.clone());

    substitute(template, &vars)
}

/// Compose the notes body from its template. The issue back-reference is
/// available only in the second composition pass, once the issue exists;
/// before that the placeholder is elided.
pub fn compose_notes(
    template: &str,
    config: &MeetingGroupConfig,
    title: &str,
    agenda_markdown: &str,
    notes_url: &str,
    issue_url: Option<&str>,
) -> String {
    let mut vars = HashMap::new();
    vars.insert("TITLE".to_string(), title.to_string());
    vars.insert("AGENDA_CONTENT".to_string(), agenda_or_placeholder(agenda_markdown));
    vars.insert("INVITED".to_string(), config.invited_list.clone());
    vars.insert("OBSERVERS".to_string(), config.observer_list.clone());
    vars.insert("MINUTES_DOC".to_string(), notes_url.to_string());
    if let Some(url) = issue_url {
        vars.insert("GITHUB_ISSUE".to_string(), url.to_string());
    }

    substitute(template, &vars)
}

fn agenda_or_placeholder(agenda_markdown: &str) -> String {
    if agenda_markdown.trim().is_empty() {
        EMPTY_AGENDA_PLACEHOLDER.to_string()
    } else {
        agenda_markdown.to_string()
    }
}

/// The meeting instant in UTC, human-readable.
fn format_utc_time(date: DateTime<Utc>) -> String {
    format!("{} UTC", date.format(HUMAN_TIME_FORMAT))
}

/// The per-timezone conversion table: one fixed row per relevant zone,
/// label padded so the pipes line up.
fn timezone_table(date: DateTime<Utc>) -> String {
    RELEVANT_TIMEZONES
        .iter()
        .filter_map(|(label, tz_name)| {
            let tz = tz_name.parse::<Tz>().ok()?;
            let local = date.with_timezone(&tz);
            Some(format!(
                "{label:<width$} | {time}",
                width = TIMEZONE_LABEL_WIDTH,
                time = local.format(HUMAN_TIME_FORMAT),
            ))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// World-clock link keyed by the compact ISO 8601 datetime.
fn time_and_date_link(date: DateTime<Utc>, group_name: &str) -> String {
    let utc_short = date.format("%Y-%m-%d");
    let iso_compact = date.format("%Y%m%dT%H%M%S");
    format!(
        "https://www.timeanddate.com/worldclock/fixedtime.html?msg=Node.js+Foundation+{group}+Meeting+{utc_short}&iso={iso_compact}",
        group = urlencoding::encode(group_name),
    )
}

/// Computational-knowledge link keyed by the UTC time and date.
fn wolfram_link(date: DateTime<Utc>) -> String {
    let utc_time = date.format("%I:%M %p").to_string();
    let utc_date = date.format("%b %-d, %Y").to_string();
    format!(
        "https://www.wolframalpha.com/input/?i={time}+UTC%2C+{date}+in+local+time",
        time = urlencoding::encode(&utc_time),
        date = urlencoding::encode(&utc_date),
    )
}
