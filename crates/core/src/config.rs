use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub directory: DirectoryConfig,
    pub scope: ScopeConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `CRONMON_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("CRONMON_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            directory: DirectoryConfig::from_env_profiled(p),
            scope: ScopeConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  directory:   path={}", self.directory.path.display());
        tracing::info!(
            "  scope:       organization={}, caller={}",
            self.scope.organization.as_deref().unwrap_or("(none)"),
            self.scope.caller.as_deref().unwrap_or("(none)")
        );
    }
}

// ── Project directory ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// YAML file listing projects and caller grants.
    pub path: PathBuf,
}

impl DirectoryConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            path: PathBuf::from(profiled_env_or(p, "DIRECTORY_PATH", "data/projects.yaml")),
        }
    }
}

// ── Validation scope ──────────────────────────────────────────

/// Default organization and caller used when a request does not name them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    pub organization: Option<String>,
    pub caller: Option<String>,
}

impl ScopeConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            organization: profiled_env_opt(p, "ORGANIZATION"),
            caller: profiled_env_opt(p, "CALLER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiled_key_wins_over_plain_key() {
        env::set_var("CRONMON_TEST_KEY", "plain");
        env::set_var("STAGING_CRONMON_TEST_KEY", "staged");

        assert_eq!(profiled_env_opt("STAGING", "CRONMON_TEST_KEY").as_deref(), Some("staged"));
        assert_eq!(profiled_env_opt("", "CRONMON_TEST_KEY").as_deref(), Some("plain"));
        assert_eq!(profiled_env_opt("PROD", "CRONMON_TEST_KEY").as_deref(), Some("plain"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        env::set_var("CRONMON_TEST_EMPTY", "");
        assert_eq!(profiled_env_opt("", "CRONMON_TEST_EMPTY"), None);
        assert_eq!(profiled_env_or("", "CRONMON_TEST_EMPTY", "fallback"), "fallback");
    }

    #[test]
    fn profile_label_defaults() {
        let config = Config::for_profile("");
        assert_eq!(config.profile_label(), "default");

        let config = Config::for_profile("prod");
        assert_eq!(config.profile_label(), "PROD");
    }
}
