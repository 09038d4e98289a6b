//! Recurrence rule parsing and bounded expansion.
//!
//! Parses the RFC 5545 `RRULE` subset that community governance calendars
//! actually use (`FREQ=DAILY|WEEKLY|MONTHLY`, `INTERVAL`, `BYDAY` for
//! weekly rules, `UNTIL`, `COUNT`) and expands occurrences into an
//! arbitrary UTC window, honoring the event's originating timezone.
//!
//! Unknown rule parts are ignored; an unsupported `FREQ` is a parse
//! error so the caller can decide whether to drop the event.

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
    Weekday,
};
use chrono_tz::Tz;

use crate::errors::{QuorumError, Result};

/// Iteration guard for rules whose `DTSTART` lies far in the past.
/// Day-by-day scanning stops once the window end is passed, so this cap
/// only bounds pathological feeds (a ~50 year-old start date).
const MAX_SCAN_DAYS: u64 = 366 * 50;

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub freq: Frequency,
    /// Every `interval` days/weeks/months. Always >= 1.
    pub interval: u32,
    /// Weekdays for weekly rules; empty means the `DTSTART` weekday.
    pub by_day: Vec<Weekday>,
    /// Inclusive end of the recurrence, in UTC.
    pub until: Option<DateTime<Utc>>,
    /// Total number of occurrences, counted from `DTSTART`.
    pub count: Option<u32>,
}

impl RecurrenceRule {
    /// Parse an `RRULE` property value such as
    /// `FREQ=WEEKLY;INTERVAL=2;BYDAY=WE`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut freq = None;
        let mut interval = 1u32;
        let mut by_day = Vec::new();
        let mut until = None;
        let mut count = None;

        for part in text.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let Some((key, value)) = part.split_once('=') else {
                return Err(QuorumError::InvalidInput(format!(
                    "malformed recurrence rule part: {part}"
                )));
            };

            match key.to_ascii_uppercase().as_str() {
                "FREQ" => {
                    freq = Some(match value.to_ascii_uppercase().as_str() {
                        "DAILY" => Frequency::Daily,
                        "WEEKLY" => Frequency::Weekly,
                        "MONTHLY" => Frequency::Monthly,
                        other => {
                            return Err(QuorumError::InvalidInput(format!(
                                "unsupported recurrence frequency: {other}"
                            )))
                        }
                    });
                }
                "INTERVAL" => {
                    interval = value.parse::<u32>().map_err(|_| {
                        QuorumError::InvalidInput(format!("invalid INTERVAL: {value}"))
                    })?;
                    if interval == 0 {
                        return Err(QuorumError::InvalidInput("INTERVAL must be >= 1".into()));
                    }
                }
                "BYDAY" => {
                    for token in value.split(',') {
                        by_day.push(parse_weekday(token)?);
                    }
                }
                "UNTIL" => until = Some(parse_until(value)?),
                "COUNT" => {
                    count = Some(value.parse::<u32>().map_err(|_| {
                        QuorumError::InvalidInput(format!("invalid COUNT: {value}"))
                    })?);
                }
                // BYMONTH, WKST, and friends are not needed for the feeds
                // this tool consumes.
                _ => {}
            }
        }

        let freq = freq.ok_or_else(|| {
            QuorumError::InvalidInput(format!("recurrence rule is missing FREQ: {text}"))
        })?;

        Ok(Self { freq, interval, by_day, until, count })
    }

    /// Expand occurrences into `[window_start, window_end)`, ascending.
    ///
    /// `dtstart` is the wall-clock start in `tz`; each candidate is mapped
    /// to UTC through `tz` before window comparison. Wall-clock times that
    /// fall in a DST gap are skipped; ambiguous times resolve to the
    /// earlier instant.
    pub fn occurrences_between(
        &self,
        dtstart: NaiveDateTime,
        tz: Tz,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>> {
        let mut occurrences = Vec::new();
        let start_date = dtstart.date();
        let time_of_day = dtstart.time();
        let mut produced = 0u32;

        for offset in 0..MAX_SCAN_DAYS {
            let Some(date) = start_date.checked_add_days(Days::new(offset)) else {
                break;
            };
            if !self.date_matches(start_date, date) {
                continue;
            }

            produced += 1;
            if let Some(count) = self.count {
                if produced > count {
                    break;
                }
            }

            let Some(utc) = resolve_local(tz, date.and_time(time_of_day)) else {
                continue;
            };
            if let Some(until) = self.until {
                if utc > until {
                    break;
                }
            }
            if utc >= window_end {
                break;
            }
            if utc >= window_start {
                occurrences.push(utc);
            }
        }

        occurrences
    }

    /// Whether `date` is on this rule's cadence relative to `start_date`.
    fn date_matches(&self, start_date: NaiveDate, date: NaiveDate) -> bool {
        let days_since = (date - start_date).num_days();
        debug_assert!(days_since >= 0);

        match self.freq {
            Frequency::Daily => days_since % i64::from(self.interval) == 0,
            Frequency::Weekly => {
                if self.by_day.is_empty() {
                    return days_since % (7 * i64::from(self.interval)) == 0;
                }
                let weeks_since = (week_start(date) - week_start(start_date)).num_days() / 7;
                weeks_since % i64::from(self.interval) == 0
                    && self.by_day.contains(&date.weekday())
            }
            Frequency::Monthly => {
                if date.day() != start_date.day() {
                    return false;
                }
                let months_since = i64::from(date.year() - start_date.year()) * 12
                    + i64::from(date.month()) - i64::from(start_date.month());
                months_since % i64::from(self.interval) == 0
            }
        }
    }
}

/// Monday-anchored start of the week containing `date` (RFC 5545 default
/// `WKST=MO`).
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Some(earlier.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Parse a BYDAY token, tolerating ordinal prefixes (`2MO`, `-1FR`).
fn parse_weekday(token: &str) -> Result<Weekday> {
    let code: String =
        token.trim().chars().filter(|c| c.is_ascii_alphabetic()).collect::<String>();
    match code.to_ascii_uppercase().as_str() {
        "MO" => Ok(Weekday::Mon),
        "TU" => Ok(Weekday::Tue),
        "WE" => Ok(Weekday::Wed),
        "TH" => Ok(Weekday::Thu),
        "FR" => Ok(Weekday::Fri),
        "SA" => Ok(Weekday::Sat),
        "SU" => Ok(Weekday::Sun),
        _ => Err(QuorumError::InvalidInput(format!("invalid BYDAY token: {token}"))),
    }
}

/// Parse an UNTIL value: `YYYYMMDDTHHMMSSZ`, `YYYYMMDDTHHMMSS` (treated
/// as UTC) or a bare date, which extends through the end of that day.
fn parse_until(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value.trim_end_matches('Z'), "%Y%m%dT%H%M%S") {
        return Ok(Utc.from_utc_datetime(&dt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y%m%d") {
        let end_of_day = date.and_hms_opt(23, 59, 59).unwrap_or_else(|| date.into());
        return Ok(Utc.from_utc_datetime(&end_of_day));
    }
    Err(QuorumError::InvalidInput(format!("invalid UNTIL value: {value}")))
}
