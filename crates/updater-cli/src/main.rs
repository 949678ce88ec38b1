mod interactive;
mod progress;
mod style;
mod theme;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use updater_config::UpdaterConfig;
use updater_core::credentials::{self, CredentialResolver};
use updater_core::{Pipeline, TaskRunner, UpdaterError};

use crate::interactive::TerminalPrompter;
use crate::progress::IndicatifReporter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("UPDATER_GIT_HASH"),
    " ",
    env!("UPDATER_BUILD_DATE"),
    ")"
);

/// Read an input file, sync it through the external system, and write the result.
#[derive(Parser)]
#[command(name = "updater", version = VERSION, disable_version_flag = true)]
struct Cli {
    /// Input file
    #[arg(short, long)]
    input: Option<String>,

    /// Output file
    #[arg(short, long)]
    output: Option<String>,

    /// Show the version number
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: (),

    /// Settings file (defaults to ./updater.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Never draw spinners
    #[arg(long)]
    no_progress: bool,

    /// Print diagnostics to stderr
    #[arg(long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (Some(input), Some(output)) = (
        required(cli.input.as_deref()),
        required(cli.output.as_deref()),
    ) else {
        eprintln!(
            "{} You must specify both an input and output file",
            style::error_prefix()
        );
        eprintln!();
        let _ = Cli::command().write_help(&mut io::stderr());
        return ExitCode::from(1);
    };

    match run(&cli, input, output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style::error_prefix());
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: &Cli, input: &str, output: &str) -> Result<(), UpdaterError> {
    let cwd = std::env::current_dir()?;
    load_dotenv(&cwd, cli.verbose);

    let config = load_config(cli.config.as_deref(), &cwd, cli.verbose)?;

    let credential = CredentialResolver::new(&config.credentials)
        .resolve(credentials::process_env, &TerminalPrompter::new())?;
    if cli.verbose {
        verbose(&format!(
            "[credentials] user from {}, password from {}",
            credential.identifier_source, credential.secret_source
        ));
    }

    let pipeline = Pipeline::updater(input, output, &credential, &config.delays);

    let reporter = if cli.no_progress || !config.progress {
        IndicatifReporter::disabled()
    } else {
        IndicatifReporter::new(config.color)
    };
    if cli.verbose {
        verbose(&format!(
            "[pipeline] {} steps, {:.1}s simulated, spinners {}",
            pipeline.steps().len(),
            pipeline.total_delay().as_secs_f64(),
            if reporter.is_live() { "on" } else { "off" }
        ));
    }

    let mut runner = TaskRunner::new(&reporter, io::stdout());
    pipeline.run(&mut runner).await?;

    finish(&mut runner.into_inner())?;
    Ok(())
}

/// An empty path counts as missing.
fn required(arg: Option<&str>) -> Option<&str> {
    arg.filter(|s| !s.is_empty())
}

fn finish(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Done!")?;
    out.flush()
}

fn load_config(
    explicit: Option<&Path>,
    cwd: &Path,
    verbose_enabled: bool,
) -> Result<UpdaterConfig, UpdaterError> {
    let config = match explicit {
        Some(path) => {
            let config = updater_config::load(path)?;
            if verbose_enabled {
                verbose(&format!("[config] {}", path.display()));
            }
            config
        }
        None => match updater_config::load_optional(cwd)? {
            Some(config) => {
                if verbose_enabled {
                    verbose(&format!(
                        "[config] {}",
                        cwd.join(updater_config::CONFIG_FILENAME).display()
                    ));
                }
                config
            }
            None => {
                if verbose_enabled {
                    verbose("[config] defaults");
                }
                UpdaterConfig::default()
            }
        },
    };
    Ok(config)
}

/// Load `.env` from the working directory. Variables already set win.
fn load_dotenv(cwd: &Path, verbose_enabled: bool) {
    let path = cwd.join(".env");
    if !path.exists() {
        return;
    }
    match dotenvy::from_path(&path) {
        Ok(()) => {
            if verbose_enabled {
                verbose(&format!("[env] loaded {}", path.display()));
            }
        }
        Err(e) => eprintln!(
            "{} could not load {}: {e}",
            style::warning_prefix(),
            path.display()
        ),
    }
}

fn verbose(line: &str) {
    eprintln!("{}", style::dim(line));
}

fn exit_code(err: &UpdaterError) -> u8 {
    match err {
        UpdaterError::Config(_) => 2,
        UpdaterError::Credential(_) => 3,
        UpdaterError::Io(_) | UpdaterError::Step { .. } => 1,
    }
}
