//! openclaw-agent: register agents with an OpenClaw installation
//!
//! Collects an agent name, model id, provider and optional API key, then
//! merges them into `openclaw.json` and `auth-profiles.json`, keeping a
//! `.bak` copy of each file it overwrites.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod merge;
pub mod provider;
pub mod store;
pub mod utils;

pub use domain::{AgentRequest, Answers, RequestDefaults};
pub use error::AgentConfigError;
pub use merge::{merge, MergeOutcome};
pub use store::ConfigPaths;
