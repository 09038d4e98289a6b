//! Port interfaces for the external collaborators.
//!
//! The pipeline is polymorphic over these capabilities so the concrete
//! calendar source and notes host can be swapped at startup without
//! touching the pipeline logic.

use async_trait::async_trait;
use quorum_domain::{
    ArtifactHandle, CalendarEvent, IssueHit, IssueRef, NotePermissions, NoteSummary, Result,
};

/// Read access to a shared calendar feed.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Fetch all events from the feed identified by `source`.
    ///
    /// Windowing is applied by the resolver, not the source; a feed
    /// cannot be filtered server-side.
    async fn list_events(&self, source: &str) -> Result<Vec<CalendarEvent>>;
}

/// Issue tracker operations used for agenda collection and issue
/// publication.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Enumerate the names of all public repositories under `org`.
    async fn list_public_repos(&self, org: &str) -> Result<Vec<String>>;

    /// Open issues carrying `label` in one repository, upstream order.
    async fn list_open_issues(&self, owner: &str, repo: &str, label: &str)
        -> Result<Vec<IssueRef>>;

    /// Search issues with a tracker-native query string.
    async fn search_issues(&self, query: &str) -> Result<Vec<IssueHit>>;

    /// Create an issue and return its handle.
    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<ArtifactHandle>;

    /// Replace an existing issue's body.
    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<ArtifactHandle>;
}

/// Collaborative notes host operations.
#[async_trait]
pub trait NotesHost: Send + Sync {
    /// Create a document and return its handle.
    async fn create_note(
        &self,
        title: &str,
        content: &str,
        permissions: &NotePermissions,
    ) -> Result<ArtifactHandle>;

    /// Fetch a document's current content.
    async fn get_note(&self, id: &str) -> Result<String>;

    /// Replace a document's content.
    async fn update_note(&self, id: &str, content: &str) -> Result<()>;

    /// Enumerate documents visible to the configured credential.
    async fn list_notes(&self) -> Result<Vec<NoteSummary>>;
}

/// Read-only named-file access for templates and per-group property
/// files.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Read a named template; missing files are a configuration error.
    async fn read(&self, name: &str) -> Result<String>;

    /// Read a named template, returning `None` when it does not exist.
    async fn read_optional(&self, name: &str) -> Result<Option<String>>;
}
