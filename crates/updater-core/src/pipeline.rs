use std::future::Future;
use std::io::Write;
use std::time::Duration;

use updater_config::Delays;

use crate::UpdaterError;
use crate::credentials::Credential;
use crate::runner::TaskRunner;

/// One pipeline entry: what the user sees, and how long the stand-in work takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub delay: Duration,
}

impl Step {
    pub fn new(label: impl Into<String>, delay: Duration) -> Self {
        Self {
            label: label.into(),
            delay,
        }
    }
}

/// Ordered list of steps, executed strictly one after another.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The fixed update sequence: read input, connect, transfer, write output.
    pub fn updater(input: &str, output: &str, credential: &Credential, delays: &Delays) -> Self {
        Self::new(vec![
            Step::new(format!("Reading input file [{input}]"), delays.read_input()),
            Step::new(
                format!("Connecting with user [{}]", credential.identifier),
                delays.connect(),
            ),
            Step::new("Reading data from external system", delays.transfer()),
            Step::new(format!("Writing output file [{output}]"), delays.write_output()),
        ])
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Total simulated time across all steps.
    pub fn total_delay(&self) -> Duration {
        self.steps.iter().map(|s| s.delay).sum()
    }

    /// Run every step as a timed delay.
    pub async fn run<W: Write>(&self, runner: &mut TaskRunner<'_, W>) -> Result<(), UpdaterError> {
        self.run_with(runner, |step| simulate(step.delay)).await
    }

    /// Run every step with caller-supplied work, halting at the first failure.
    pub async fn run_with<W, F, Fut>(
        &self,
        runner: &mut TaskRunner<'_, W>,
        mut work: F,
    ) -> Result<(), UpdaterError>
    where
        W: Write,
        F: FnMut(&Step) -> Fut,
        Fut: Future<Output = Result<(), UpdaterError>>,
    {
        for step in &self.steps {
            runner.run(&step.label, work(step)).await?;
        }
        Ok(())
    }
}

/// Stand-in for real I/O: wait for `delay`.
pub async fn simulate(delay: Duration) -> Result<(), UpdaterError> {
    tokio::time::sleep(delay).await;
    Ok(())
}
