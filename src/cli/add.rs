//! Add command implementation

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use super::prompt::{collect_answers, open_prompter, PresetAnswers};
use crate::config::load_settings;
use crate::domain::AgentRequest;
use crate::merge::merge;
use crate::store::{
    load_app_config, load_auth_profiles, save_documents, to_pretty_json, ConfigPaths,
};

const SECRET_FIELDS: &[&str] = &["key", "apiKey"];
const REDACTED: &str = "********";

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Directory holding openclaw.json and auth-profiles.json [default: ~/.openclaw]
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Agent name (skips the prompt)
    #[arg(short, long, value_name = "NAME")]
    pub agent: Option<String>,

    /// Model id, e.g. google/gemini-pro (skips the prompt)
    #[arg(short, long, value_name = "MODEL_ID")]
    pub model: Option<String>,

    /// Provider name, e.g. google (skips the prompt)
    #[arg(short, long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// API key to store for the provider (skips both key prompts)
    #[arg(long, value_name = "KEY", conflicts_with = "no_api_key")]
    pub api_key: Option<String>,

    /// Do not store an API key (skips both key prompts)
    #[arg(long)]
    pub no_api_key: bool,

    /// Infer the provider from the model id when none is given
    #[arg(long)]
    pub detect_provider: bool,

    /// Print the merged documents instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl AddArgs {
    fn preset(&self) -> PresetAnswers {
        PresetAnswers {
            agent_name: self.agent.clone(),
            model_id: self.model.clone(),
            provider: self.provider.clone(),
            api_key: self.api_key.clone(),
            skip_api_key: self.no_api_key,
        }
    }
}

pub fn run(args: AddArgs) -> Result<()> {
    println!("=== OpenClaw Agent Configuration Tool ===");

    let settings = load_settings()?;
    let state_dir = settings.resolve_state_dir(args.state_dir.as_deref())?;
    let paths = ConfigPaths::in_dir(&state_dir);
    tracing::debug!(dir = %state_dir.display(), "using OpenClaw state directory");

    let mut app_config = load_app_config(&paths.app_config)?;
    let mut auth_profiles = load_auth_profiles(&paths.auth_profiles)?;

    let defaults = settings.request_defaults(args.detect_provider);
    let answers = {
        let mut prompter = open_prompter();
        collect_answers(prompter.as_mut(), &args.preset(), &defaults)?
    };
    let request = AgentRequest::from_answers(&answers, &defaults)?;
    if request.targets_defaults_entry() {
        tracing::warn!("agent name matches the shared defaults entry");
        println!("[!] Agent `defaults` replaces the shared agents.defaults entry");
    }

    let outcome = merge(&mut app_config, &mut auth_profiles, &request)?;
    if outcome.profile_written {
        println!("\n[+] Updated auth profile: {}", outcome.profile_name);
    }
    if outcome.is_dangling_reference(&auth_profiles) {
        tracing::warn!(profile = %outcome.profile_name, "auth reference has no stored credential");
        println!(
            "[!] No API key stored for {}; openclaw.json references it anyway",
            outcome.profile_name
        );
    }
    println!("[+] Updated agent config: {} -> {}", request.agent_name, request.model_id);

    if args.dry_run {
        println!("\n--- {} (dry run) ---", paths.app_config.display());
        println!("{}", to_pretty_json(&app_config)?);
        println!("\n--- {} (dry run) ---", paths.auth_profiles.display());
        println!("{}", to_pretty_json(&redact_secrets(&auth_profiles))?);
        return Ok(());
    }

    // Write failures are reported but do not change the exit status.
    match save_documents(&paths, &app_config, &auth_profiles) {
        Ok(report) => {
            println!("\nSuccess! Configuration updated.");
            if !report.backups.is_empty() {
                println!("Backups created at *.bak");
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "saving configuration failed");
            eprintln!("Error writing files: {err}");
        }
    }

    Ok(())
}

fn redact_secrets(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = if SECRET_FIELDS.contains(&k.as_str()) && v.is_string() {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_secrets(v)
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_secrets).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::redact_secrets;
    use serde_json::json;

    #[test]
    fn test_redact_secrets_masks_keys_only() {
        let auth = json!({
            "version": 1,
            "profiles": {
                "google:reviewer": {
                    "type": "api_key",
                    "provider": "google",
                    "key": "abc123",
                    "apiKey": "abc123"
                }
            },
            "lastGood": { "google": "google:reviewer" }
        });

        let redacted = redact_secrets(&auth);
        assert_eq!(redacted["profiles"]["google:reviewer"]["key"], json!("********"));
        assert_eq!(redacted["profiles"]["google:reviewer"]["apiKey"], json!("********"));
        assert_eq!(redacted["profiles"]["google:reviewer"]["provider"], json!("google"));
        assert_eq!(redacted["lastGood"], auth["lastGood"]);
    }
}
