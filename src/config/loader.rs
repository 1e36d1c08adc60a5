//! Tool settings loading
//!
//! Precedence: CLI flags > `OPENCLAW_*` environment variables > defaults.

use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::path::{Path, PathBuf};

use super::Settings;

pub const ENV_PREFIX: &str = "OPENCLAW_";
const STATE_DIR_NAME: &str = ".openclaw";
const ENV_KEYS: &[&str] = &["state_dir", "default_model", "default_provider"];

pub fn load_settings() -> Result<Settings> {
    settings_figment().extract().context("Invalid OPENCLAW_* environment settings")
}

fn settings_figment() -> Figment {
    Figment::from(Serialized::defaults(Settings::default()))
        .merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS))
}

impl Settings {
    /// Directory holding `openclaw.json` and `auth-profiles.json`.
    pub fn resolve_state_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.state_dir {
            return Ok(dir.clone());
        }
        let home = home_dir().context(
            "Cannot locate the OpenClaw directory: neither USERPROFILE nor HOME is set \
             (use --state-dir or OPENCLAW_STATE_DIR)",
        )?;
        Ok(home.join(STATE_DIR_NAME))
    }
}

fn home_dir() -> Option<PathBuf> {
    ["USERPROFILE", "HOME"]
        .into_iter()
        .filter_map(std::env::var_os)
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_MODEL_ID, DEFAULT_PROVIDER};
    use figment::Jail;

    #[test]
    fn test_defaults_without_environment() {
        Jail::expect_with(|_jail| {
            let settings: Settings = settings_figment().extract()?;
            assert_eq!(settings.default_model, DEFAULT_MODEL_ID);
            assert_eq!(settings.default_provider, DEFAULT_PROVIDER);
            assert!(settings.state_dir.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("OPENCLAW_STATE_DIR", "/srv/openclaw");
            jail.set_env("OPENCLAW_DEFAULT_MODEL", "openai/gpt-4o-mini");
            jail.set_env("OPENCLAW_DEFAULT_PROVIDER", "openai");

            let settings: Settings = settings_figment().extract()?;
            assert_eq!(settings.state_dir, Some(PathBuf::from("/srv/openclaw")));
            assert_eq!(settings.default_model, "openai/gpt-4o-mini");
            assert_eq!(settings.default_provider, "openai");
            Ok(())
        });
    }

    #[test]
    fn test_unrelated_openclaw_variables_are_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("OPENCLAW_GATEWAY_TOKEN", "secret");
            let settings: Settings = settings_figment().extract()?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn test_cli_override_wins_over_settings() {
        let settings =
            Settings { state_dir: Some(PathBuf::from("/from/env")), ..Settings::default() };

        let dir = settings.resolve_state_dir(Some(Path::new("/from/cli"))).expect("dir");
        assert_eq!(dir, PathBuf::from("/from/cli"));

        let dir = settings.resolve_state_dir(None).expect("dir");
        assert_eq!(dir, PathBuf::from("/from/env"));
    }
}
