use std::fmt;
use std::io;

use updater_config::CredentialsConfig;

use crate::UpdaterError;

pub const USER_PROMPT: &str = "Please enter the username";
pub const PASSWORD_PROMPT: &str = "Please enter the password";

/// Where a credential field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    Prompt,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => f.write_str("environment"),
            Self::Prompt => f.write_str("prompt"),
        }
    }
}

/// Identifier/secret pair for one run. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub identifier: String,
    pub secret: String,
    pub identifier_source: CredentialSource,
    pub secret_source: CredentialSource,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("identifier_source", &self.identifier_source)
            .field("secret_source", &self.secret_source)
            .finish()
    }
}

/// Interactive input used when a credential is missing from the environment.
///
/// `Ok(None)` means no answer could be read (EOF, no terminal).
pub trait Prompter {
    fn prompt_visible(&self, prompt: &str) -> io::Result<Option<String>>;
    fn prompt_secret(&self, prompt: &str) -> io::Result<Option<String>>;
}

/// Resolves the identifier and secret, environment first, prompt second.
pub struct CredentialResolver<'a> {
    user_env: &'a str,
    password_env: &'a str,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(config: &'a CredentialsConfig) -> Self {
        Self {
            user_env: &config.user_env,
            password_env: &config.password_env,
        }
    }

    /// An unanswered or empty prompt yields an empty string rather than an error.
    pub fn resolve(
        &self,
        env: impl Fn(&str) -> Option<String>,
        prompter: &dyn Prompter,
    ) -> Result<Credential, UpdaterError> {
        let (identifier, identifier_source) = match env(self.user_env) {
            Some(value) => (value, CredentialSource::Environment),
            None => (
                prompter
                    .prompt_visible(USER_PROMPT)
                    .map_err(|e| prompt_error(USER_PROMPT, e))?
                    .unwrap_or_default(),
                CredentialSource::Prompt,
            ),
        };

        let (secret, secret_source) = match env(self.password_env) {
            Some(value) => (value, CredentialSource::Environment),
            None => (
                prompter
                    .prompt_secret(PASSWORD_PROMPT)
                    .map_err(|e| prompt_error(PASSWORD_PROMPT, e))?
                    .unwrap_or_default(),
                CredentialSource::Prompt,
            ),
        };

        Ok(Credential {
            identifier,
            secret,
            identifier_source,
            secret_source,
        })
    }
}

/// Read a variable from the process environment. Non-UTF-8 values count as unset.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn prompt_error(prompt: &str, err: io::Error) -> UpdaterError {
    UpdaterError::Credential(format!("{prompt}: {err}"))
}
