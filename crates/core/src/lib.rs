//! # Quorum Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The meeting-resolution and artifact-generation pipeline
//! - Port/adapter interfaces (traits) for the external collaborators
//! - Template substitution and property parsing
//!
//! ## Architecture Principles
//! - Only depends on `quorum-domain`
//! - No HTTP, filesystem, or process code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod agenda;
pub mod compose;
pub mod group;
pub mod pipeline;
pub mod ports;
pub mod recurrence;
pub mod template;

// Re-export specific items to avoid ambiguity
pub use agenda::{collect_agenda, render_agenda_markdown};
pub use compose::{compose_issue, compose_notes, generate_meeting_title};
pub use group::load_group_config;
pub use pipeline::{MeetingPipeline, RunOutcome};
pub use ports::{CalendarSource, IssueTracker, NotesHost, TemplateStore};
pub use recurrence::{resolve_meeting_date, MeetingWindow};
pub use template::{parse_properties, substitute};
