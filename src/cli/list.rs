//! List command implementation

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::load_settings;
use crate::domain::DEFAULTS_AGENT;
use crate::store::{load_app_config, load_auth_profiles, ConfigPaths};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Directory holding openclaw.json and auth-profiles.json [default: ~/.openclaw]
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AgentSummary {
    name: String,
    model: Option<String>,
    profiles: Vec<ProfileStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProfileStatus {
    name: String,
    has_credential: bool,
    is_last_good: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let settings = load_settings()?;
    let state_dir = settings.resolve_state_dir(args.state_dir.as_deref())?;
    let paths = ConfigPaths::in_dir(&state_dir);

    let app_config = load_app_config(&paths.app_config)?;
    let auth_profiles = load_auth_profiles(&paths.auth_profiles)?;

    println!("Config: {}", paths.app_config.display());
    if let Some(model) = primary_model(app_config.pointer("/agents/defaults")) {
        println!("Default model: {model}");
    }

    let agents = summarize_agents(&app_config, &auth_profiles);
    if agents.is_empty() {
        println!("No agents configured.");
        return Ok(());
    }

    println!("Agents:");
    for agent in &agents {
        println!("  {} -> {}", agent.name, agent.model.as_deref().unwrap_or("(no model)"));
        for profile in &agent.profiles {
            let status = if profile.has_credential { "key stored" } else { "no key stored" };
            let default = if profile.is_last_good { ", provider default" } else { "" };
            println!("    auth: {} ({status}{default})", profile.name);
        }
    }

    Ok(())
}

fn summarize_agents(app_config: &Value, auth_profiles: &Value) -> Vec<AgentSummary> {
    let Some(agents) = app_config.get("agents").and_then(Value::as_object) else {
        return Vec::new();
    };
    let references = app_config.pointer("/auth/profiles").and_then(Value::as_object);

    agents
        .iter()
        .filter(|(name, _)| name.as_str() != DEFAULTS_AGENT)
        .map(|(name, entry)| {
            let profiles = references
                .into_iter()
                .flat_map(|refs| refs.iter())
                .filter_map(|(profile, reference)| {
                    let (_, agent) = profile.split_once(':')?;
                    (agent == name.as_str())
                        .then(|| profile_status(profile, reference, auth_profiles))
                })
                .collect();
            AgentSummary { name: name.clone(), model: primary_model(Some(entry)), profiles }
        })
        .collect()
}

fn profile_status(profile: &str, reference: &Value, auth_profiles: &Value) -> ProfileStatus {
    let stored = auth_profiles.get("profiles").and_then(|profiles| profiles.get(profile));
    let has_credential = stored.is_some_and(|record| {
        ["key", "apiKey"]
            .iter()
            .any(|field| record.get(field).and_then(Value::as_str).is_some_and(|s| !s.is_empty()))
    });

    let provider = reference
        .get("provider")
        .and_then(Value::as_str)
        .or_else(|| profile.split_once(':').map(|(provider, _)| provider));
    let is_last_good = provider
        .and_then(|provider| auth_profiles.get("lastGood")?.get(provider))
        .and_then(Value::as_str)
        == Some(profile);

    ProfileStatus { name: profile.to_string(), has_credential, is_last_good }
}

fn primary_model(agent: Option<&Value>) -> Option<String> {
    agent?.pointer("/model/primary").and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summaries_link_agents_to_their_profiles() {
        let app = json!({
            "agents": {
                "defaults": { "model": { "primary": "google/gemini-2.0-flash" }, "models": {} },
                "reviewer": { "model": { "primary": "google/gemini-pro" } },
                "coder": { "model": { "primary": "openai/gpt-4o" } }
            },
            "auth": {
                "profiles": {
                    "google:reviewer": { "provider": "google", "mode": "api_key" },
                    "openai:coder": { "provider": "openai", "mode": "api_key" }
                }
            }
        });
        let auth = json!({
            "version": 1,
            "profiles": {
                "google:reviewer": {
                    "type": "api_key", "provider": "google", "key": "k", "apiKey": "k"
                }
            },
            "lastGood": { "google": "google:reviewer" }
        });

        let summaries = summarize_agents(&app, &auth);

        assert_eq!(
            summaries,
            vec![
                AgentSummary {
                    name: "reviewer".to_string(),
                    model: Some("google/gemini-pro".to_string()),
                    profiles: vec![ProfileStatus {
                        name: "google:reviewer".to_string(),
                        has_credential: true,
                        is_last_good: true,
                    }],
                },
                AgentSummary {
                    name: "coder".to_string(),
                    model: Some("openai/gpt-4o".to_string()),
                    profiles: vec![ProfileStatus {
                        name: "openai:coder".to_string(),
                        has_credential: false,
                        is_last_good: false,
                    }],
                },
            ]
        );
    }

    #[test]
    fn test_missing_agents_yields_empty_summary() {
        assert!(summarize_agents(&json!({}), &json!({})).is_empty());
    }
}
