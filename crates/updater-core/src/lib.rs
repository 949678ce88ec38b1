pub mod credentials;
pub mod pipeline;
pub mod progress;
pub mod runner;

#[cfg(test)]
mod test_support;

pub use credentials::{Credential, CredentialResolver, CredentialSource, Prompter};
pub use pipeline::{Pipeline, Step};
pub use progress::{Indicator, IndicatorColor, ProgressReporter, SilentProgress};
pub use runner::TaskRunner;

#[derive(Debug, thiserror::Error)]
pub enum UpdaterError {
    #[error(transparent)]
    Config(#[from] updater_config::ConfigError),
    #[error("could not read credentials: {0}")]
    Credential(String),
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
    #[error("step '{label}' failed: {message}")]
    Step { label: String, message: String },
}
