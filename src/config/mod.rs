//! Tool settings
//!
//! Where the OpenClaw documents live and which fallbacks apply to empty
//! answers. Loaded from the environment and overridden by CLI flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{RequestDefaults, DEFAULT_MODEL_ID, DEFAULT_PROVIDER};

pub mod loader;

pub use loader::load_settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overrides `~/.openclaw`.
    pub state_dir: Option<PathBuf>,
    pub default_model: String,
    pub default_provider: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_dir: None,
            default_model: DEFAULT_MODEL_ID.to_string(),
            default_provider: DEFAULT_PROVIDER.to_string(),
        }
    }
}

impl Settings {
    pub fn request_defaults(&self, detect_provider: bool) -> RequestDefaults {
        RequestDefaults {
            model_id: self.default_model.clone(),
            provider: self.default_provider.clone(),
            detect_provider,
        }
    }
}
