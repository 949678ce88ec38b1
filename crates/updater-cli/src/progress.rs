use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use updater_core::progress::{Indicator, IndicatorColor, ProgressReporter, SilentIndicator};

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Progress reporter that uses `indicatif` spinners on stderr.
///
/// Falls back to silent indicators when stderr is not a terminal.
pub struct IndicatifReporter {
    color: IndicatorColor,
    live: bool,
}

impl IndicatifReporter {
    pub fn new(color: IndicatorColor) -> Self {
        Self {
            color,
            live: Term::stderr().is_term(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            color: IndicatorColor::default(),
            live: false,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }
}

impl ProgressReporter for IndicatifReporter {
    fn indicator(&self, message: &str) -> Box<dyn Indicator> {
        if !self.live {
            return Box::new(SilentIndicator::default());
        }
        Box::new(SpinnerIndicator {
            message: message.to_string(),
            color: self.color,
            pb: None,
        })
    }
}

/// A spinner whose redraw loop is indicatif's steady-tick thread.
struct SpinnerIndicator {
    message: String,
    color: IndicatorColor,
    pb: Option<ProgressBar>,
}

impl Indicator for SpinnerIndicator {
    fn start(&mut self) {
        if self.pb.is_some() {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style(self.color));
        pb.set_message(self.message.clone());
        pb.enable_steady_tick(TICK_INTERVAL);
        self.pb = Some(pb);
    }

    fn stop(&mut self) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
    }

    fn is_running(&self) -> bool {
        self.pb.is_some()
    }
}

fn spinner_style(color: IndicatorColor) -> ProgressStyle {
    ProgressStyle::with_template(&format!("{{spinner:.{}}} {{msg}}", color_name(color)))
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

fn color_name(color: IndicatorColor) -> &'static str {
    match color {
        IndicatorColor::Yellow => "yellow",
        IndicatorColor::Cyan => "cyan",
        IndicatorColor::Green => "green",
        IndicatorColor::Magenta => "magenta",
    }
}
