pub use updater_config::IndicatorColor;

/// A live busy-indicator bound to an output stream.
///
/// `start` begins redrawing on a separate scheduling context so the caller is
/// never blocked; `stop` halts it and leaves the line clean. Both are no-ops
/// when already in the requested state.
pub trait Indicator: Send {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Trait for reporting progress of long-running operations.
///
/// Core defines this trait; CLI implements it with `indicatif`.
/// Tests use `SilentProgress` (no-op).
pub trait ProgressReporter: Send + Sync {
    /// Build a stopped indicator showing `message`.
    fn indicator(&self, message: &str) -> Box<dyn Indicator>;
}

/// No-op progress reporter for tests and non-interactive use.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn indicator(&self, _message: &str) -> Box<dyn Indicator> {
        Box::new(SilentIndicator::default())
    }
}

/// Indicator that tracks its state but draws nothing.
///
/// Used wherever the output stream cannot host a live spinner (piped output, CI).
#[derive(Debug, Default)]
pub struct SilentIndicator {
    running: bool,
}

impl Indicator for SilentIndicator {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Keeps an indicator running for the lifetime of the guard.
///
/// Dropping the guard stops the indicator, so every exit path out of the
/// guarded scope (early return, `?`, panic unwinding, a dropped future)
/// leaves the terminal clean.
pub struct IndicatorGuard {
    indicator: Box<dyn Indicator>,
}

impl IndicatorGuard {
    pub fn start(mut indicator: Box<dyn Indicator>) -> Self {
        indicator.start();
        Self { indicator }
    }

    pub fn is_running(&self) -> bool {
        self.indicator.is_running()
    }
}

impl Drop for IndicatorGuard {
    fn drop(&mut self) {
        self.indicator.stop();
    }
}
