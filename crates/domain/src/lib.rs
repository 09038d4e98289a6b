//! # Quorum Domain
//!
//! Business domain types and models for Quorum.
//!
//! This crate contains:
//! - Domain data types (CalendarEvent, MeetingGroupConfig, AgendaEntry, ...)
//! - Domain error types and Result definitions
//! - Domain constants (default org/host, timezone table, window length)
//! - Pure parsing utilities (recurrence rules)
//!
//! ## Architecture
//! - No dependencies on other Quorum crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
// Re-export recurrence rule utilities
pub use utils::rrule::{Frequency, RecurrenceRule};
