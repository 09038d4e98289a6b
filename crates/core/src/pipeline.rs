//! Reconciliation driver: one run takes a group from "meeting upcoming"
//! to "issue and notes document published and cross-linked".
//!
//! The driver converges external state rather than blindly creating it.
//! Re-running after a partial failure, or on a schedule, repairs or
//! refreshes the artifacts without duplicating them; a run whose inputs
//! have not changed performs no external writes at all.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use quorum_domain::{
    ArtifactHandle, MeetingGroupConfig, NotePermissions, Result, RunOptions,
};
use tracing::{debug, info};

use crate::agenda::{collect_agenda, render_agenda_markdown};
use crate::compose::{compose_issue, compose_notes, generate_meeting_title};
use crate::ports::{CalendarSource, IssueTracker, NotesHost, TemplateStore};
use crate::recurrence::{resolve_meeting_date, MeetingWindow};

/// Issue body template, shared by every group.
const ISSUE_TEMPLATE_NAME: &str = "meeting_issue.md";

/// What a pipeline run did. `NoMeetingThisCycle` is an expected outcome
/// for biweekly and irregular schedules, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No qualifying occurrence fell inside the search window.
    NoMeetingThisCycle,
    /// Artifacts exist and are current; both bodies are included so a
    /// caller may mirror them to local files.
    Completed {
        title: String,
        issue: ArtifactHandle,
        notes: ArtifactHandle,
        issue_body: String,
        notes_body: String,
    },
    /// Composed bodies only; no external writes were performed.
    DryRun { title: String, issue_body: String, notes_body: String },
}

/// The end-to-end meeting artifact pipeline, polymorphic over its
/// external collaborators.
pub struct MeetingPipeline {
    calendar: Arc<dyn CalendarSource>,
    tracker: Arc<dyn IssueTracker>,
    notes: Arc<dyn NotesHost>,
    templates: Arc<dyn TemplateStore>,
}

impl MeetingPipeline {
    pub fn new(
        calendar: Arc<dyn CalendarSource>,
        tracker: Arc<dyn IssueTracker>,
        notes: Arc<dyn NotesHost>,
        templates: Arc<dyn TemplateStore>,
    ) -> Self {
        Self { calendar, tracker, notes, templates }
    }

    /// Run the pipeline once for `config` at instant `now`.
    pub async fn run(
        &self,
        config: &MeetingGroupConfig,
        options: RunOptions,
        now: DateTime<Utc>,
    ) -> Result<RunOutcome> {
        let window = MeetingWindow::starting_today(now);
        let events = self.calendar.list_events(&config.calendar_source).await?;
        debug!(events = events.len(), filter = %config.calendar_filter, "calendar feed loaded");

        let Some(date) = resolve_meeting_date(&events, &config.calendar_filter, &window) else {
            info!(group = %config.group_id, "no qualifying meeting occurrence this cycle");
            return Ok(RunOutcome::NoMeetingThisCycle);
        };

        let title = generate_meeting_title(config, date);
        info!(%title, occurrence = %date.0, "resolved next meeting");

        let entries =
            collect_agenda(self.tracker.as_ref(), &config.code_host_org, &config.agenda_label)
                .await?;
        let agenda = render_agenda_markdown(&config.code_host_org, &entries);

        let issue_template = self.templates.read(ISSUE_TEMPLATE_NAME).await?;
        let notes_template =
            self.templates.read(&format!("minutes_base_{}", config.group_id)).await?;

        if options.dry_run {
            let issue_body = compose_issue(&issue_template, config, date, &agenda, "");
            let notes_body = compose_notes(&notes_template, config, &title, &agenda, "", None);
            info!("dry run, no external writes performed");
            return Ok(RunOutcome::DryRun { title, issue_body, notes_body });
        }

        // The notes document comes first so the issue body can link to it.
        let note =
            self.find_or_create_note(config, &title, &notes_template, &agenda, options).await?;

        let issue_body = compose_issue(&issue_template, config, date, &agenda, &note.url);
        let issue = self.reconcile_issue(config, &title, &issue_body, options).await?;

        // Second notes pass now that the issue back-reference is known.
        let notes_body =
            compose_notes(&notes_template, config, &title, &agenda, &note.url, Some(&issue.url));
        if self.notes.get_note(&note.id).await? == notes_body {
            debug!(note = %note.url, "notes document already current");
        } else {
            self.notes.update_note(&note.id, &notes_body).await?;
            info!(note = %note.url, "notes document updated");
        }

        Ok(RunOutcome::Completed { title, issue, notes: note, issue_body, notes_body })
    }

    /// Reuse a same-titled notes document when one exists, otherwise
    /// create one seeded without the issue back-reference. `--force`
    /// always creates.
    async fn find_or_create_note(
        &self,
        config: &MeetingGroupConfig,
        title: &str,
        template: &str,
        agenda: &str,
        options: RunOptions,
    ) -> Result<ArtifactHandle> {
        if !options.force {
            let existing =
                self.notes.list_notes().await?.into_iter().find(|note| note.title == title);
            if let Some(note) = existing {
                info!(url = %note.url, "reusing existing notes document");
                return Ok(ArtifactHandle { id: note.id, url: note.url });
            }
        }

        let seed = compose_notes(template, config, title, agenda, "", None);
        let handle =
            self.notes.create_note(title, &seed, &NotePermissions::default()).await?;
        info!(url = %handle.url, "notes document created");
        Ok(handle)
    }

    /// Converge the tracker issue: create it when absent, rewrite its
    /// body when stale, touch nothing when already current. `--force`
    /// always creates.
    async fn reconcile_issue(
        &self,
        config: &MeetingGroupConfig,
        title: &str,
        body: &str,
        options: RunOptions,
    ) -> Result<ArtifactHandle> {
        let owner = &config.code_host_org;
        let repo = &config.code_host_repo;

        if !options.force {
            // Closed issues are out of scope: a meeting whose issue was
            // closed gets a fresh one rather than a reopened body edit.
            let query = format!("\"{title}\" repo:{owner}/{repo} in:title is:issue is:open");
            let hits = self.tracker.search_issues(&query).await?;
            if let Some(hit) = hits.into_iter().find(|hit| hit.title == title) {
                if hit.body.as_deref() == Some(body) {
                    debug!(number = hit.number, "meeting issue already current");
                    return Ok(ArtifactHandle { id: hit.number.to_string(), url: hit.url });
                }
                info!(number = hit.number, "updating existing meeting issue");
                return self.tracker.update_issue(owner, repo, hit.number, body).await;
            }
        }

        let labels: Vec<String> = config.issue_label.iter().cloned().collect();
        let handle = self.tracker.create_issue(owner, repo, title, body, &labels).await?;
        info!(url = %handle.url, "meeting issue created");
        Ok(handle)
    }
}
