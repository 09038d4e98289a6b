//! Agenda aggregation: labeled issues across an organization, grouped by
//! repository.

use futures::future::try_join_all;
use quorum_domain::{AgendaEntry, Result};
use tracing::debug;

use crate::ports::IssueTracker;

/// Collect open agenda issues carrying `label` across all public
/// repositories under `org`.
///
/// Per-repository queries are issued concurrently (there is no ordering
/// dependency between repositories) and joined back in enumeration
/// order, so the resulting grouping is deterministic for a fixed
/// upstream repository order. Repositories with no matching issue are
/// omitted; pull requests are never agenda items.
pub async fn collect_agenda(
    tracker: &dyn IssueTracker,
    org: &str,
    label: &str,
) -> Result<Vec<AgendaEntry>> {
    let repos = tracker.list_public_repos(org).await?;
    debug!(org, label, repos = repos.len(), "collecting agenda issues");

    let queries = repos.iter().map(|repo| tracker.list_open_issues(org, repo, label));
    let results = try_join_all(queries).await?;

    let entries: Vec<AgendaEntry> = repos
        .into_iter()
        .zip(results)
        .filter_map(|(repository, issues)| {
            let issues: Vec<_> =
                issues.into_iter().filter(|issue| !issue.pull_request).collect();
            if issues.is_empty() {
                None
            } else {
                Some(AgendaEntry { repository, issues })
            }
        })
        .collect();

    debug!(entries = entries.len(), "agenda collection complete");
    Ok(entries)
}

/// Render an agenda as markdown: a `### org/repo` heading per entry and
/// one bullet per issue. An empty agenda renders as an empty string.
pub fn render_agenda_markdown(org: &str, entries: &[AgendaEntry]) -> String {
    let mut out = String::new();

    for entry in entries {
        out.push_str(&format!("### {org}/{repo}\n\n", repo = entry.repository));
        for issue in &entry.issues {
            out.push_str(&format!(
                "* {title} [#{number}]({url})\n",
                title = escape_brackets(&issue.title),
                number = issue.number,
                url = issue.url,
            ));
        }
        out.push('\n');
    }

    out.trim().to_string()
}

/// Escape `[` and `]` so issue titles cannot corrupt the markdown link
/// syntax around them.
fn escape_brackets(title: &str) -> String {
    title.replace('[', "\\[").replace(']', "\\]")
}
