//! Loading and saving the OpenClaw JSON documents.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AgentConfigError, Result};
use crate::merge::default_auth_profiles;
use crate::utils::encoding::decode_text;

pub const APP_CONFIG_FILE: &str = "openclaw.json";
pub const AUTH_PROFILES_FILE: &str = "auth-profiles.json";
const BACKUP_SUFFIX: &str = ".bak";

/// Locations of the two documents this tool edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub app_config: PathBuf,
    pub auth_profiles: PathBuf,
}

impl ConfigPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self { app_config: dir.join(APP_CONFIG_FILE), auth_profiles: dir.join(AUTH_PROFILES_FILE) }
    }
}

/// Files touched by [`save_documents`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub backups: Vec<PathBuf>,
    pub written: Vec<PathBuf>,
}

/// Load `openclaw.json`, which must already exist.
pub fn load_app_config(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(AgentConfigError::MissingFile { path: path.to_path_buf() });
    }
    read_document(path)
}

/// Load `auth-profiles.json`, or synthesize an empty store when it is absent.
pub fn load_auth_profiles(path: &Path) -> Result<Value> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "auth profiles file missing, starting empty");
        return Ok(default_auth_profiles());
    }
    read_document(path)
}

fn read_document(path: &Path) -> Result<Value> {
    let bytes = fs::read(path).map_err(|source| read_error(path, source))?;
    let text = decode_text(&bytes).map_err(|source| read_error(path, source))?;
    let value = serde_json::from_str(&text)
        .map_err(|source| AgentConfigError::Parse { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded document");
    Ok(value)
}

fn read_error(path: &Path, source: io::Error) -> AgentConfigError {
    AgentConfigError::Read { path: path.to_path_buf(), source }
}

/// Pretty-print with two-space indentation, preserving key order.
pub fn to_pretty_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `<path>.bak`, next to the original.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Back up both documents, then overwrite them.
///
/// Backups are taken before anything is written. A file that did not exist
/// yet gets no backup. A failure part-way leaves earlier writes in place.
pub fn save_documents(
    paths: &ConfigPaths,
    app_config: &Value,
    auth_profiles: &Value,
) -> Result<SaveReport> {
    let app_json = to_pretty_json(app_config)?;
    let auth_json = to_pretty_json(auth_profiles)?;

    let mut report = SaveReport::default();
    for path in [&paths.app_config, &paths.auth_profiles] {
        if let Some(backup) = backup_file(path)? {
            report.backups.push(backup);
        }
    }

    for (path, contents) in [(&paths.app_config, app_json), (&paths.auth_profiles, auth_json)] {
        fs::write(path, contents)
            .map_err(|source| AgentConfigError::Write { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "wrote document");
        report.written.push(path.clone());
    }

    Ok(report)
}

fn backup_file(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let backup = backup_path(path);
    fs::copy(path, &backup)
        .map_err(|source| AgentConfigError::Write { path: backup.clone(), source })?;
    tracing::debug!(from = %path.display(), to = %backup.display(), "created backup");
    Ok(Some(backup))
}
