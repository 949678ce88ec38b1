use std::io::{self, BufRead, IsTerminal};

use console::Term;
use dialoguer::{Input, Password};
use updater_core::Prompter;

/// How credential prompts reach the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptMode {
    /// stdin is a terminal; render dialoguer prompts on this output.
    Terminal(PromptStream),
    /// stdin is a terminal but neither output is, so a masked prompt cannot be shown.
    NoDisplay,
    /// stdin is piped; read one line per prompt.
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptStream {
    Stderr,
    Stdout,
}

fn prompt_mode(stdin_tty: bool, stderr_tty: bool, stdout_tty: bool) -> PromptMode {
    match (stdin_tty, stderr_tty, stdout_tty) {
        (false, _, _) => PromptMode::Lines,
        (true, true, _) => PromptMode::Terminal(PromptStream::Stderr),
        (true, false, true) => PromptMode::Terminal(PromptStream::Stdout),
        (true, false, false) => PromptMode::NoDisplay,
    }
}

/// Credential prompts backed by `dialoguer`.
///
/// Without a terminal on stdin the answer is read as one line from stdin
/// instead, and end of input counts as no answer. Typed input on a terminal
/// always goes through dialoguer, so secrets are never echoed.
pub struct TerminalPrompter {
    mode: PromptMode,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            mode: prompt_mode(
                io::stdin().is_terminal(),
                Term::stderr().is_term(),
                Term::stdout().is_term(),
            ),
        }
    }

    fn term(&self) -> io::Result<Option<Term>> {
        match self.mode {
            PromptMode::Lines => Ok(None),
            PromptMode::Terminal(PromptStream::Stderr) => Ok(Some(Term::stderr())),
            PromptMode::Terminal(PromptStream::Stdout) => Ok(Some(Term::stdout())),
            PromptMode::NoDisplay => Err(io::Error::other(
                "no terminal available to display the prompt; set the variable in the environment",
            )),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn prompt_visible(&self, prompt: &str) -> io::Result<Option<String>> {
        let Some(term) = self.term()? else {
            return read_stdin_line();
        };
        let theme = crate::theme::updater_theme();
        Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&term)
            .map(Some)
            .map_err(|e: dialoguer::Error| io::Error::other(e.to_string()))
    }

    fn prompt_secret(&self, prompt: &str) -> io::Result<Option<String>> {
        let Some(term) = self.term()? else {
            return read_stdin_line();
        };
        let theme = crate::theme::updater_theme();
        Password::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact_on(&term)
            .map(Some)
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

fn read_stdin_line() -> io::Result<Option<String>> {
    read_line(&mut io::stdin().lock())
}

fn read_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Some(trimmed.to_string()))
}
