//! iCalendar (RFC 5545) text parsing, restricted to the properties the
//! meeting resolver consumes: `UID`, `SUMMARY`, `DESCRIPTION`, `DTSTART`
//! and `RRULE` within `VEVENT` components.
//!
//! The parser is tolerant by construction. Feeds published by calendar
//! services routinely carry properties and components this tool has no
//! use for; anything unrecognized is skipped, and a malformed event is
//! dropped rather than failing the whole feed.

use chrono::{NaiveDate, NaiveDateTime};
use quorum_domain::{CalendarEvent, RecurrenceRule};
use tracing::warn;

/// Parse every `VEVENT` in an iCalendar document.
pub fn parse_calendar(text: &str) -> Vec<CalendarEvent> {
    let lines = unfold_lines(text);
    let mut events = Vec::new();
    let mut current: Option<EventBuilder> = None;

    for line in lines {
        if line == "BEGIN:VEVENT" {
            current = Some(EventBuilder::default());
            continue;
        }
        if line == "END:VEVENT" {
            if let Some(builder) = current.take() {
                events.push(builder.build());
            }
            continue;
        }
        let Some(builder) = current.as_mut() else {
            continue;
        };
        let Some((name, params, value)) = split_content_line(&line) else {
            continue;
        };

        match name.as_str() {
            "UID" => builder.uid = Some(value.to_string()),
            "SUMMARY" => builder.summary = Some(unescape_text(value)),
            "DESCRIPTION" => builder.description = Some(unescape_text(value)),
            "DTSTART" => {
                let (start, tzid) = parse_dtstart(&params, value);
                builder.start = start;
                builder.tzid = tzid;
            }
            "RRULE" => match RecurrenceRule::parse(value) {
                Ok(rule) => builder.recurrence = Some(rule),
                Err(err) => {
                    warn!(rrule = value, error = %err, "dropping unparseable recurrence rule");
                }
            },
            _ => {}
        }
    }

    events
}

#[derive(Default)]
struct EventBuilder {
    uid: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    start: Option<NaiveDateTime>,
    tzid: Option<String>,
    recurrence: Option<RecurrenceRule>,
}

impl EventBuilder {
    fn build(self) -> CalendarEvent {
        CalendarEvent {
            uid: self.uid,
            summary: self.summary,
            description: self.description,
            start: self.start,
            tzid: self.tzid,
            recurrence: self.recurrence,
        }
    }
}

/// Undo RFC 5545 line folding: a line starting with a space or tab
/// continues the previous line.
fn unfold_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for raw in text.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(continuation) = raw.strip_prefix(' ').or_else(|| raw.strip_prefix('\t')) {
            if let Some(last) = lines.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        lines.push(raw.to_string());
    }

    lines
}

/// Split `NAME;PARAM=X;PARAM=Y:value` into its three parts.
fn split_content_line(line: &str) -> Option<(String, Vec<(String, String)>, &str)> {
    let (head, value) = line.split_once(':')?;
    let mut parts = head.split(';');
    let name = parts.next()?.trim().to_ascii_uppercase();

    let params = parts
        .filter_map(|part| {
            let (key, val) = part.split_once('=')?;
            Some((key.trim().to_ascii_uppercase(), val.trim().to_string()))
        })
        .collect();

    Some((name, params, value))
}

/// Decode the three DTSTART shapes: UTC (`...Z` suffix), local wall
/// clock with an optional `TZID` parameter, and all-day dates.
fn parse_dtstart(
    params: &[(String, String)],
    value: &str,
) -> (Option<NaiveDateTime>, Option<String>) {
    let tzid = params
        .iter()
        .find(|(key, _)| key == "TZID")
        .map(|(_, val)| val.clone());

    if let Some(utc_value) = value.strip_suffix('Z') {
        let start = NaiveDateTime::parse_from_str(utc_value, "%Y%m%dT%H%M%S").ok();
        // An explicit Z overrides any TZID parameter.
        return (start, None);
    }

    if let Ok(start) = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S") {
        return (Some(start), tzid);
    }

    // All-day form, midnight in the event's zone.
    let start = NaiveDate::parse_from_str(value, "%Y%m%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0));
    if start.is_none() {
        warn!(dtstart = value, "unparseable DTSTART value");
    }
    (start, tzid)
}

/// Undo RFC 5545 text escaping (`\n`, `\,`, `\;`, `\\`).
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(escaped) => out.push(escaped),
            None => out.push('\\'),
        }
    }

    out
}
