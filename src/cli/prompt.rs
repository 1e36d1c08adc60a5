//! Interactive prompts for the `add` command.

use anyhow::Result;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::domain::{Answers, RequestDefaults};
use crate::error::AgentConfigError;

/// Source of operator answers. Implementations release their channel on drop.
pub trait Prompter {
    fn text(&mut self, prompt: &str) -> Result<String>;
    fn secret(&mut self, prompt: &str) -> Result<String>;
}

/// Rich prompts on an attended terminal.
pub struct TerminalPrompter {
    term: Term,
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self { term: Term::stderr(), theme: ColorfulTheme::default() }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(answer)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        let answer = Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact_on(&self.term)?;
        Ok(answer)
    }
}

impl Drop for TerminalPrompter {
    fn drop(&mut self) {
        let _ = self.term.show_cursor();
        tracing::debug!("terminal prompt closed");
    }
}

/// One answer per input line, for piped or redirected stdin.
///
/// End of input reads as an empty answer.
pub struct LinePrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn text(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)
    }
}

impl<R: BufRead, W: Write> Drop for LinePrompter<R, W> {
    fn drop(&mut self) {
        let _ = writeln!(self.output);
        let _ = self.output.flush();
        tracing::debug!("line prompt closed");
    }
}

/// Pick the terminal prompter when a human is attached, line mode otherwise.
pub fn open_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        Box::new(TerminalPrompter::new())
    } else {
        tracing::debug!("stdin is not a terminal, reading answers line by line");
        Box::new(LinePrompter::new(io::stdin().lock(), io::stdout()))
    }
}

/// Answers supplied on the command line; those questions are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetAnswers {
    pub agent_name: Option<String>,
    pub model_id: Option<String>,
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub skip_api_key: bool,
}

/// Ask the remaining questions in order: agent, model, provider, key yes/no, key.
///
/// Stops right after the first question when no agent name is given.
pub fn collect_answers(
    prompter: &mut dyn Prompter,
    preset: &PresetAnswers,
    defaults: &RequestDefaults,
) -> Result<Answers> {
    let agent_name = match &preset.agent_name {
        Some(name) => name.clone(),
        None => prompter.text("Enter new Agent Name (e.g., reviewer, coder)")?,
    };
    if agent_name.trim().is_empty() {
        return Err(AgentConfigError::MissingRequiredInput("agent name").into());
    }

    let model_id = match &preset.model_id {
        Some(model) => model.clone(),
        None => prompter.text(&format!(
            "Enter Model ID for '{}' (default: {})",
            agent_name.trim(),
            defaults.model_id
        ))?,
    };

    let provider = match &preset.provider {
        Some(provider) => provider.clone(),
        None if defaults.detect_provider => {
            prompter.text("Enter Provider Name (default: detected from model)")?
        }
        None => prompter.text(&format!("Enter Provider Name (default: {})", defaults.provider))?,
    };

    let (wants_api_key, api_key) = if let Some(key) = &preset.api_key {
        ("y".to_string(), Some(key.clone()))
    } else if preset.skip_api_key {
        ("n".to_string(), None)
    } else {
        let wants =
            prompter.text("Do you want to add/update the API key for this provider? (y/n)")?;
        let key = if wants.trim().eq_ignore_ascii_case("y") {
            let shown = if provider.trim().is_empty() { "the provider" } else { provider.trim() };
            Some(prompter.secret(&format!("Enter API Key for '{shown}'"))?)
        } else {
            None
        };
        (wants, key)
    };

    Ok(Answers { agent_name, model_id, provider, wants_api_key, api_key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn line_prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_full_interactive_sequence() {
        let mut prompter = line_prompter("reviewer\n\n\ny\nabc123\n");
        let answers =
            collect_answers(&mut prompter, &PresetAnswers::default(), &RequestDefaults::default())
                .expect("answers");

        assert_eq!(
            answers,
            Answers {
                agent_name: "reviewer".to_string(),
                model_id: String::new(),
                provider: String::new(),
                wants_api_key: "y".to_string(),
                api_key: Some("abc123".to_string()),
            }
        );
    }

    #[test]
    fn test_declining_key_skips_key_prompt() {
        let mut prompter = line_prompter("coder\nopenai/gpt-4o\nopenai\nn\nunused\n");
        let answers =
            collect_answers(&mut prompter, &PresetAnswers::default(), &RequestDefaults::default())
                .expect("answers");

        assert_eq!(answers.wants_api_key, "n");
        assert_eq!(answers.api_key, None);
        let prompts = String::from_utf8(prompter.output.clone()).expect("utf8");
        assert!(!prompts.contains("Enter API Key"));
    }

    #[test]
    fn test_empty_agent_name_stops_after_first_question() {
        let mut prompter = line_prompter("\nshould-not-be-read\n");
        let err =
            collect_answers(&mut prompter, &PresetAnswers::default(), &RequestDefaults::default())
                .expect_err("missing agent");

        assert!(err.to_string().contains("agent name required"));
        let prompts = String::from_utf8(prompter.output.clone()).expect("utf8");
        assert!(!prompts.contains("Model ID"));
    }

    #[test]
    fn test_presets_skip_their_questions() {
        let mut prompter = line_prompter("");
        let preset = PresetAnswers {
            agent_name: Some("ops".to_string()),
            model_id: Some("groq/llama-3.1-8b-instant".to_string()),
            provider: Some("groq".to_string()),
            api_key: Some("gsk-test".to_string()),
            skip_api_key: false,
        };

        let answers = collect_answers(&mut prompter, &preset, &RequestDefaults::default())
            .expect("answers");
        assert_eq!(answers.wants_api_key, "y");
        assert_eq!(answers.api_key.as_deref(), Some("gsk-test"));
        assert!(prompter.output.is_empty(), "no question was asked");
    }

    #[test]
    fn test_crlf_line_endings_are_trimmed() {
        let mut prompter = line_prompter("reviewer\r\n");
        assert_eq!(prompter.text("Agent").expect("answer"), "reviewer");
    }

    #[test]
    fn test_end_of_input_reads_as_empty() {
        let mut prompter = line_prompter("");
        assert_eq!(prompter.text("Agent").expect("answer"), "");
    }
}
