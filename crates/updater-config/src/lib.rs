use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "updater.toml";

pub const DEFAULT_USER_ENV: &str = "MY_APP_USER";
pub const DEFAULT_PASSWORD_ENV: &str = "MY_APP_PASSWORD";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse updater.toml: {0}")]
    Parse(String),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Full `updater.toml` configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Draw live spinners when stderr is a terminal. `false` forces silent steps.
    #[serde(default = "default_progress")]
    pub progress: bool,

    /// Color of the spinner glyph.
    #[serde(default)]
    pub color: IndicatorColor,

    /// Environment variables consulted before prompting.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Simulated duration of each pipeline step.
    #[serde(default)]
    pub delays: Delays,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            progress: default_progress(),
            color: IndicatorColor::default(),
            credentials: CredentialsConfig::default(),
            delays: Delays::default(),
        }
    }
}

fn default_progress() -> bool {
    true
}

/// Cosmetic color of a spinner's animated marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorColor {
    #[default]
    Yellow,
    Cyan,
    Green,
    Magenta,
}

/// `[credentials]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    #[serde(default = "default_user_env")]
    pub user_env: String,
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            user_env: default_user_env(),
            password_env: default_password_env(),
        }
    }
}

fn default_user_env() -> String {
    DEFAULT_USER_ENV.to_string()
}

fn default_password_env() -> String {
    DEFAULT_PASSWORD_ENV.to_string()
}

/// `[delays]` section, in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Delays {
    pub read_input: u64,
    pub connect: u64,
    pub transfer: u64,
    pub write_output: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            read_input: 1000,
            connect: 1500,
            transfer: 5000,
            write_output: 3200,
        }
    }
}

impl Delays {
    pub fn read_input(&self) -> Duration {
        Duration::from_millis(self.read_input)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect)
    }

    pub fn transfer(&self) -> Duration {
        Duration::from_millis(self.transfer)
    }

    pub fn write_output(&self) -> Duration {
        Duration::from_millis(self.write_output)
    }
}

/// Parse and validate configuration text.
pub fn parse(content: &str) -> Result<UpdaterConfig, ConfigError> {
    let config: UpdaterConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Load an explicit configuration file. A missing file is an error.
pub fn load(path: &Path) -> Result<UpdaterConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// Load `updater.toml` from the given directory.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_optional(dir: &Path) -> Result<Option<UpdaterConfig>, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(None);
    }
    load(&path).map(Some)
}

fn validate(config: &UpdaterConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("user_env", &config.credentials.user_env),
        ("password_env", &config.credentials.password_env),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "credentials.{name} must name an environment variable"
            )));
        }
        if value.contains('=') || value.contains('\0') {
            return Err(ConfigError::Validation(format!(
                "credentials.{name} '{value}' is not a valid environment variable name"
            )));
        }
    }

    let delays = &config.delays;
    for (name, ms) in [
        ("read_input", delays.read_input),
        ("connect", delays.connect),
        ("transfer", delays.transfer),
        ("write_output", delays.write_output),
    ] {
        if ms == 0 {
            return Err(ConfigError::Validation(format!(
                "delays.{name} must be greater than zero"
            )));
        }
    }

    Ok(())
}
