//! Config merging
//!
//! Folds one [`AgentRequest`] into the application config (`openclaw.json`)
//! and the credential store (`auth-profiles.json`). Both documents are kept
//! as untyped JSON so fields this tool does not know about survive a rewrite.

use serde_json::{json, Map, Value};

use crate::domain::{AgentRequest, DEFAULTS_AGENT};
use crate::error::{AgentConfigError, Result};

/// What a merge changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub profile_name: String,
    /// A credential record was written to the auth profiles document.
    pub profile_written: bool,
    /// `lastGood` for the provider now points at this profile.
    pub last_good_set: bool,
    /// The model id was newly added to `agents.defaults.models`.
    pub model_registered: bool,
}

impl MergeOutcome {
    /// The app config references a profile that holds no credential.
    pub fn is_dangling_reference(&self, auth_profiles: &Value) -> bool {
        auth_profiles
            .get("profiles")
            .and_then(|profiles| profiles.get(&self.profile_name))
            .is_none()
    }
}

/// Skeleton used when `auth-profiles.json` does not exist yet.
pub fn default_auth_profiles() -> Value {
    json!({ "version": 1, "profiles": {}, "lastGood": {} })
}

/// Apply `request` to both documents in place.
///
/// Nothing is mutated when an error is returned.
pub fn merge(
    app_config: &mut Value,
    auth_profiles: &mut Value,
    request: &AgentRequest,
) -> Result<MergeOutcome> {
    check_preconditions(app_config, auth_profiles)?;

    let profile_name = request.profile_name();
    let provider = request.provider.as_str();

    let mut profile_written = false;
    let mut last_good_set = false;
    if let Some(api_key) = request.api_key.as_deref().filter(|key| !key.is_empty()) {
        let auth_root = as_object_mut(auth_profiles, "auth-profiles")?;

        ensure_object(auth_root, "profiles", "profiles")?.insert(
            profile_name.clone(),
            json!({
                "type": "api_key",
                "provider": provider,
                "key": api_key,
                "apiKey": api_key,
            }),
        );
        profile_written = true;

        let last_good = ensure_object(auth_root, "lastGood", "lastGood")?;
        if !last_good.get(provider).is_some_and(is_truthy) {
            last_good.insert(provider.to_string(), Value::String(profile_name.clone()));
            last_good_set = true;
        }
        tracing::debug!(profile = %profile_name, last_good_set, "stored api key profile");
    }

    let app_root = as_object_mut(app_config, "openclaw")?;

    let agents = ensure_object(app_root, "agents", "agents")?;
    agents.insert(request.agent_name.clone(), json!({ "model": { "primary": request.model_id } }));

    let defaults = agents
        .get_mut(DEFAULTS_AGENT)
        .and_then(Value::as_object_mut)
        .ok_or(AgentConfigError::MissingDefaultsEntry)?;
    let models = ensure_object(defaults, "models", "agents.defaults.models")?;
    let model_registered = if models.contains_key(&request.model_id) {
        false
    } else {
        models.insert(request.model_id.clone(), Value::Object(Map::new()));
        true
    };

    let auth = ensure_object(app_root, "auth", "auth")?;
    ensure_object(auth, "profiles", "auth.profiles")?
        .insert(profile_name.clone(), json!({ "provider": provider, "mode": "api_key" }));

    tracing::debug!(
        agent = %request.agent_name,
        model = %request.model_id,
        model_registered,
        "merged agent into application config"
    );

    Ok(MergeOutcome { profile_name, profile_written, last_good_set, model_registered })
}

/// Reject every shape the merge would fail on part-way through.
fn check_preconditions(app_config: &Value, auth_profiles: &Value) -> Result<()> {
    let app_root = app_config.as_object().ok_or_else(|| malformed("openclaw"))?;

    let agents = match app_root.get("agents") {
        None | Some(Value::Null) => return Err(AgentConfigError::MissingDefaultsEntry),
        Some(Value::Object(agents)) => agents,
        Some(_) => return Err(malformed("agents")),
    };
    let defaults = match agents.get(DEFAULTS_AGENT) {
        Some(Value::Object(defaults)) => defaults,
        _ => return Err(AgentConfigError::MissingDefaultsEntry),
    };
    check_container(defaults, "models", "agents.defaults.models")?;

    if let Some(auth) = app_root.get("auth").filter(|v| !v.is_null()) {
        let auth = auth.as_object().ok_or_else(|| malformed("auth"))?;
        check_container(auth, "profiles", "auth.profiles")?;
    }

    let auth_root = auth_profiles.as_object().ok_or_else(|| malformed("auth-profiles"))?;
    check_container(auth_root, "profiles", "profiles")?;
    check_container(auth_root, "lastGood", "lastGood")?;
    Ok(())
}

fn check_container(parent: &Map<String, Value>, key: &str, field: &str) -> Result<()> {
    match parent.get(key) {
        None | Some(Value::Null) | Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(malformed(field)),
    }
}

fn as_object_mut<'a>(value: &'a mut Value, field: &str) -> Result<&'a mut Map<String, Value>> {
    value.as_object_mut().ok_or_else(|| malformed(field))
}

/// Return `parent[key]` as an object, creating it when absent or null.
fn ensure_object<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
    field: &str,
) -> Result<&'a mut Map<String, Value>> {
    let slot = parent.entry(key.to_string()).or_insert(Value::Null);
    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut().ok_or_else(|| malformed(field))
}

fn malformed(field: &str) -> AgentConfigError {
    AgentConfigError::MalformedDocument { field: field.to_string() }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
