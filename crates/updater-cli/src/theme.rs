use console::{Style, style};
use dialoguer::theme::Theme;
use std::fmt;

/// Custom theme for updater credential prompts.
///
/// Visual rules:
/// - No prompt prefix (no `?` or other leading character)
/// - Colon suffix: `Prompt: `
/// - After input: `✔ Prompt: value`, secrets shown as `[hidden]`
pub struct UpdaterTheme;

/// Returns the updater CLI theme.
pub fn updater_theme() -> UpdaterTheme {
    UpdaterTheme
}

impl Theme for UpdaterTheme {
    /// `Prompt: `, bold text with no prefix. Credential prompts never carry a default.
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{}: ", Style::new().for_stderr().bold().apply_to(prompt))
    }

    /// `✔ Prompt: value`
    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            style("\u{2714}").for_stderr().green().bold(),
            Style::new().for_stderr().bold().apply_to(prompt),
            Style::new().for_stderr().cyan().apply_to(sel)
        )
    }

    /// `✔ Prompt: [hidden]`
    fn format_password_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
    ) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            style("\u{2714}").for_stderr().green().bold(),
            Style::new().for_stderr().bold().apply_to(prompt),
            Style::new().for_stderr().dim().apply_to("[hidden]")
        )
    }
}
