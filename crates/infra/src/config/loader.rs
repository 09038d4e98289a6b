//! Configuration loader
//!
//! Loads application configuration from environment variables.
//!
//! ## Environment Variables
//! - `GITHUB_TOKEN`: GitHub API token (required)
//! - `HACKMD_API_TOKEN`: HackMD API token (required)
//! - `HACKMD_TEAM`: default HackMD team workspace (optional)
//! - `MEETINGS_CONFIG_DIR`: template directory (default `./templates`)
//! - `MEETINGS_OUTPUT_DIR`: local mirror directory for composed
//!   artifacts (optional; no mirror when unset)

use std::path::PathBuf;

use quorum_domain::{AppConfig, QuorumError, Result};

const DEFAULT_TEMPLATES_DIR: &str = "./templates";

/// Load application configuration from environment variables.
///
/// # Errors
/// Returns `QuorumError::Config` if a required variable is missing.
pub fn load_from_env() -> Result<AppConfig> {
    let github_token = env_var("GITHUB_TOKEN")?;
    let hackmd_token = env_var("HACKMD_API_TOKEN")?;
    let hackmd_team = optional_env("HACKMD_TEAM");
    let templates_dir = optional_env("MEETINGS_CONFIG_DIR")
        .map_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR), PathBuf::from);
    let output_dir = optional_env("MEETINGS_OUTPUT_DIR").map(PathBuf::from);

    Ok(AppConfig { github_token, hackmd_token, hackmd_team, templates_dir, output_dir })
}

/// Get required environment variable.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        QuorumError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Get optional environment variable; empty values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    // Environment mutation is process-global; serialize these tests.
    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn loads_full_config_from_env() {
        let _guard = env_lock().lock().expect("env mutex poisoned");

        std::env::set_var("GITHUB_TOKEN", "gh-token");
        std::env::set_var("HACKMD_API_TOKEN", "md-token");
        std::env::set_var("HACKMD_TEAM", "nodejs");
        std::env::set_var("MEETINGS_CONFIG_DIR", "/etc/meetings");
        std::env::remove_var("MEETINGS_OUTPUT_DIR");

        let config = load_from_env().expect("config");
        assert_eq!(config.github_token, "gh-token");
        assert_eq!(config.hackmd_token, "md-token");
        assert_eq!(config.hackmd_team.as_deref(), Some("nodejs"));
        assert_eq!(config.templates_dir, PathBuf::from("/etc/meetings"));
        assert!(config.output_dir.is_none());

        std::env::remove_var("GITHUB_TOKEN");
        std::env::remove_var("HACKMD_API_TOKEN");
        std::env::remove_var("HACKMD_TEAM");
        std::env::remove_var("MEETINGS_CONFIG_DIR");
    }

    #[test]
    fn templates_dir_defaults_when_unset() {
        let _guard = env_lock().lock().expect("env mutex poisoned");

        std::env::set_var("GITHUB_TOKEN", "gh-token");
        std::env::set_var("HACKMD_API_TOKEN", "md-token");
        std::env::remove_var("HACKMD_TEAM");
        std::env::remove_var("MEETINGS_CONFIG_DIR");
        std::env::remove_var("MEETINGS_OUTPUT_DIR");

        let config = load_from_env().expect("config");
        assert_eq!(config.templates_dir, PathBuf::from("./templates"));
        assert!(config.hackmd_team.is_none());

        std::env::remove_var("GITHUB_TOKEN");
        std::env::remove_var("HACKMD_API_TOKEN");
    }

    #[test]
    fn missing_token_is_config_error() {
        let _guard = env_lock().lock().expect("env mutex poisoned");

        std::env::remove_var("GITHUB_TOKEN");
        std::env::remove_var("HACKMD_API_TOKEN");

        let err = load_from_env().expect_err("should fail");
        assert!(matches!(err, QuorumError::Config(_)));
    }
}
