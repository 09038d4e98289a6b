//! Pure domain utilities

pub mod rrule;
