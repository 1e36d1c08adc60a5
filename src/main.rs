//! openclaw-agent: add agents, models and API keys to an OpenClaw setup.

use anyhow::Result;

fn main() -> Result<()> {
    openclaw_agent::cli::run()
}
