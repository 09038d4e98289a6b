//! Config resolver: builds the per-group meeting descriptor from the
//! template store's property files.
//!
//! A group is described by `meeting_base_{group}` (a `KEY="value"`
//! property block) plus the free-text `invited_{group}` and
//! `observers_{group}` blocks, which are inserted into artifacts
//! verbatim.

use quorum_domain::constants::DEFAULT_GITHUB_ORG;
use quorum_domain::{MeetingGroupConfig, QuorumError, Result};

use crate::ports::TemplateStore;
use crate::template::parse_properties;

/// Load and resolve the configuration for one meeting group.
pub async fn load_group_config(
    store: &dyn TemplateStore,
    group_id: &str,
) -> Result<MeetingGroupConfig> {
    let base_name = format!("meeting_base_{group_id}");
    let base = store.read(&base_name).await?;
    let mut properties = parse_properties(&base);

    let mut required = |key: &str| {
        properties.remove(key).ok_or_else(|| {
            QuorumError::Config(format!("{base_name} is missing required property {key}"))
        })
    };

    let calendar_filter = required("CALENDAR_FILTER")?;
    let calendar_source = required("ICAL_URL")?;
    let code_host_repo = required("REPO")?;

    let display_name =
        properties.remove("GROUP_NAME").unwrap_or_else(|| group_id.to_string());
    let host_name = properties.remove("HOST");
    let code_host_org =
        properties.remove("USER").unwrap_or_else(|| DEFAULT_GITHUB_ORG.to_string());
    let agenda_label =
        properties.remove("AGENDA_TAG").unwrap_or_else(|| format!("{group_id}-agenda"));
    let issue_label = properties.remove("ISSUE_LABEL");
    let joining_instructions = properties.remove("JOINING_INSTRUCTIONS");
    let notes_team_context = properties.remove("HACKMD_TEAM");

    let invited_list =
        store.read_optional(&format!("invited_{group_id}")).await?.unwrap_or_default();
    let observer_list =
        store.read_optional(&format!("observers_{group_id}")).await?.unwrap_or_default();

    Ok(MeetingGroupConfig {
        group_id: group_id.to_string(),
        display_name,
        host_name,
        calendar_filter,
        calendar_source,
        code_host_org,
        code_host_repo,
        agenda_label,
        issue_label,
        invited_list,
        observer_list,
        joining_instructions,
        notes_team_context,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;

    struct MapStore(HashMap<String, String>);

    impl MapStore {
        fn new(files: &[(&str, &str)]) -> Self {
            Self(files.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
        }
    }

    #[async_trait]
    impl TemplateStore for MapStore {
        async fn read(&self, name: &str) -> Result<String> {
            self.0
                .get(name)
                .cloned()
                .ok_or_else(|| QuorumError::Config(format!("template not found: {name}")))
        }

        async fn read_optional(&self, name: &str) -> Result<Option<String>> {
            Ok(self.0.get(name).cloned())
        }
    }

    const BASE: &str = concat!(
        "GROUP_NAME=\"TSC\"\n",
        "CALENDAR_FILTER=\"TSC Meeting\"\n",
        "ICAL_URL=\"https://example.org/feed.ics\"\n",
        "USER=\"nodejs\"\n",
        "REPO=\"TSC\"\n",
        "ISSUE_LABEL=\"meeting\"\n",
    );

    #[tokio::test]
    async fn loads_full_group_config() {
        let store = MapStore::new(&[
            ("meeting_base_tsc", BASE),
            ("invited_tsc", "@nodejs/tsc"),
            ("observers_tsc", "@nodejs/observers"),
        ]);

        let config = load_group_config(&store, "tsc").await.expect("config");
        assert_eq!(config.display_name, "TSC");
        assert_eq!(config.calendar_filter, "TSC Meeting");
        assert_eq!(config.code_host_org, "nodejs");
        assert_eq!(config.code_host_repo, "TSC");
        assert_eq!(config.issue_label.as_deref(), Some("meeting"));
        assert_eq!(config.invited_list, "@nodejs/tsc");
        assert_eq!(config.observer_list, "@nodejs/observers");
        assert!(config.host_name.is_none());
    }

    #[tokio::test]
    async fn agenda_label_defaults_to_group_suffix() {
        let store = MapStore::new(&[("meeting_base_tsc", BASE)]);
        let config = load_group_config(&store, "tsc").await.expect("config");
        assert_eq!(config.agenda_label, "tsc-agenda");
    }

    #[tokio::test]
    async fn explicit_agenda_tag_wins() {
        let base = format!("{BASE}AGENDA_TAG=\"tsc-discuss\"\n");
        let store = MapStore::new(&[("meeting_base_tsc", base.as_str())]);
        let config = load_group_config(&store, "tsc").await.expect("config");
        assert_eq!(config.agenda_label, "tsc-discuss");
    }

    #[tokio::test]
    async fn missing_required_property_is_config_error() {
        let store = MapStore::new(&[("meeting_base_tsc", "GROUP_NAME=\"TSC\"\n")]);
        let err = load_group_config(&store, "tsc").await.expect_err("should fail");
        assert!(matches!(err, QuorumError::Config(_)));
    }

    #[tokio::test]
    async fn missing_free_text_blocks_default_to_empty() {
        let store = MapStore::new(&[("meeting_base_tsc", BASE)]);
        let config = load_group_config(&store, "tsc").await.expect("config");
        assert_eq!(config.invited_list, "");
        assert_eq!(config.observer_list, "");
    }
}
