//! Recurrence resolution: pick the next qualifying meeting occurrence.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use quorum_domain::constants::MEETING_WINDOW_DAYS;
use quorum_domain::{CalendarEvent, ResolvedMeetingDate};
use tracing::{debug, warn};

/// The half-open `[start, end)` search window for meeting occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MeetingWindow {
    /// The canonical window: 00:00:00 UTC of the current day through
    /// seven days later. This is the single place the windowing policy
    /// lives; an alternate fixed-anchor-day policy would slot in here.
    pub fn starting_today(now: DateTime<Utc>) -> Self {
        let start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map_or(now, |midnight| DateTime::from_naive_utc_and_offset(midnight, Utc));
        Self { start, end: start + Duration::days(MEETING_WINDOW_DAYS) }
    }
}

/// Determine the single next occurrence among `events` whose searchable
/// text contains `filter`.
///
/// Events without a recurrence rule are never candidates. Events are
/// considered in input order and the first one producing an occurrence
/// inside the window wins. `None` means no qualifying meeting this
/// cycle, which is an expected outcome for biweekly or irregular
/// schedules, not an error.
pub fn resolve_meeting_date(
    events: &[CalendarEvent],
    filter: &str,
    window: &MeetingWindow,
) -> Option<ResolvedMeetingDate> {
    for event in events {
        let matches = event.filter_text().is_some_and(|text| text.contains(filter));
        if !matches {
            continue;
        }
        let (Some(rule), Some(start)) = (&event.recurrence, event.start) else {
            continue;
        };

        let tz = resolve_timezone(event);
        let occurrences = rule.occurrences_between(start, tz, window.start, window.end);
        if let Some(first) = occurrences.first() {
            debug!(
                uid = event.uid.as_deref().unwrap_or("<none>"),
                occurrence = %first,
                "resolved next meeting occurrence"
            );
            return Some(ResolvedMeetingDate(*first));
        }
    }

    None
}

/// The event's originating timezone; unparseable or missing zone
/// identifiers fall back to UTC.
fn resolve_timezone(event: &CalendarEvent) -> Tz {
    match event.tzid.as_deref() {
        None => Tz::UTC,
        Some(tzid) => tzid.parse::<Tz>().unwrap_or_else(|_| {
            warn!(tzid, "unknown timezone identifier in calendar event, assuming UTC");
            Tz::UTC
        }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use quorum_domain::RecurrenceRule;

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("valid test instant")
    }

    fn weekly_event(summary: &str, byday: &str, start: (i32, u32, u32, u32)) -> CalendarEvent {
        CalendarEvent {
            uid: None,
            summary: Some(summary.to_string()),
            description: None,
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2)
                .and_then(|d| d.and_hms_opt(start.3, 0, 0)),
            tzid: None,
            recurrence: Some(
                RecurrenceRule::parse(&format!("FREQ=WEEKLY;BYDAY={byday}")).expect("rule"),
            ),
        }
    }

    fn window() -> MeetingWindow {
        // 2025-01-13 (Monday) through 2025-01-20.
        MeetingWindow { start: utc(2025, 1, 13, 0), end: utc(2025, 1, 20, 0) }
    }

    #[test]
    fn window_is_anchored_to_utc_midnight_today() {
        let now = utc(2025, 1, 15, 10) + Duration::minutes(42);
        let w = MeetingWindow::starting_today(now);
        assert_eq!(w.start, utc(2025, 1, 15, 0));
        assert_eq!(w.end, utc(2025, 1, 22, 0));
    }

    #[test]
    fn earliest_occurrence_of_first_matching_event_wins() {
        let events = vec![
            weekly_event("CPC Meeting", "TH", (2025, 1, 2, 15)),
            weekly_event("TSC Meeting", "WE", (2025, 1, 1, 14)),
            weekly_event("TSC Meeting (mirror)", "MO", (2025, 1, 6, 9)),
        ];
        let resolved = resolve_meeting_date(&events, "TSC", &window());
        // The Wednesday series is the first TSC match in input order, even
        // though the mirror's Monday occurrence is chronologically earlier.
        assert_eq!(resolved, Some(ResolvedMeetingDate(utc(2025, 1, 15, 14))));
    }

    #[test]
    fn non_matching_events_are_never_selected() {
        let events = vec![weekly_event("Build WG", "WE", (2025, 1, 1, 14))];
        assert_eq!(resolve_meeting_date(&events, "TSC", &window()), None);
    }

    #[test]
    fn filter_matches_description_when_summary_empty() {
        let mut event = weekly_event("", "WE", (2025, 1, 1, 14));
        event.description = Some("Weekly TSC call".to_string());
        let resolved = resolve_meeting_date(&[event], "TSC", &window());
        assert_eq!(resolved, Some(ResolvedMeetingDate(utc(2025, 1, 15, 14))));
    }

    #[test]
    fn events_without_recurrence_are_excluded() {
        let mut event = weekly_event("TSC Meeting", "WE", (2025, 1, 15, 14));
        event.recurrence = None;
        assert_eq!(resolve_meeting_date(&[event], "TSC", &window()), None);
    }

    #[test]
    fn empty_result_is_none_not_error() {
        // Biweekly series on its off week.
        let mut event = weekly_event("TSC Meeting", "WE", (2025, 1, 8, 14));
        event.recurrence =
            Some(RecurrenceRule::parse("FREQ=WEEKLY;INTERVAL=2;BYDAY=WE").expect("rule"));
        assert_eq!(resolve_meeting_date(&[event], "TSC", &window()), None);
    }

    #[test]
    fn unknown_timezone_falls_back_to_utc() {
        let mut event = weekly_event("TSC Meeting", "WE", (2025, 1, 1, 14));
        event.tzid = Some("Not/AZone".to_string());
        let resolved = resolve_meeting_date(&[event], "TSC", &window());
        assert_eq!(resolved, Some(ResolvedMeetingDate(utc(2025, 1, 15, 14))));
    }
}
