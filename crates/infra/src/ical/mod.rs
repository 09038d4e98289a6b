//! iCalendar feed source: HTTP fetch plus text-format parsing.

pub mod feed;
pub mod parser;

pub use feed::IcalFeedSource;
pub use parser::parse_calendar;
