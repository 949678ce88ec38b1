use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use tokio::time::Instant;

use crate::progress::{IndicatorGuard, ProgressReporter};

/// Runs units of work one at a time behind a progress indicator and reports
/// how long each took.
pub struct TaskRunner<'a, W> {
    reporter: &'a dyn ProgressReporter,
    out: W,
}

impl<'a, W: Write> TaskRunner<'a, W> {
    pub fn new(reporter: &'a dyn ProgressReporter, out: W) -> Self {
        Self { reporter, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Await `work` while an indicator labelled `label` spins.
    ///
    /// The indicator is stopped before anything else happens, whether `work`
    /// succeeds, fails, panics, or is dropped unfinished. On success a
    /// completion line (see [`completion_line`]) is written to the output;
    /// on failure the error is returned untouched and nothing is written.
    pub async fn run<F, T, E>(&mut self, label: &str, work: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<io::Error>,
    {
        let start = Instant::now();
        let result = {
            let _indicator = IndicatorGuard::start(self.reporter.indicator(label));
            work.await
        };
        let elapsed = start.elapsed();

        let value = result?;
        writeln!(self.out, "{}", completion_line(label, elapsed))?;
        self.out.flush()?;
        Ok(value)
    }
}

/// `<label>  (<seconds>.<tenths>s).`
pub fn completion_line(label: &str, elapsed: Duration) -> String {
    format!("{label}  ({}s).", format_elapsed(elapsed))
}

/// Format a duration as seconds with one decimal, rounding half away from zero.
pub fn format_elapsed(elapsed: Duration) -> String {
    let tenths = (elapsed.as_micros() + 50_000) / 100_000;
    format!("{}.{}", tenths / 10, tenths % 10)
}
