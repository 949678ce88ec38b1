use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::progress::{Indicator, ProgressReporter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start(String),
    Stop(String),
}

/// Reporter that records every indicator transition and counts live indicators.
#[derive(Clone, Default)]
pub struct RecordingProgress {
    events: Arc<Mutex<Vec<Event>>>,
    running: Arc<AtomicUsize>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn running(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }
}

impl ProgressReporter for RecordingProgress {
    fn indicator(&self, message: &str) -> Box<dyn Indicator> {
        Box::new(RecordingIndicator {
            message: message.to_string(),
            running: false,
            shared: self.clone(),
        })
    }
}

struct RecordingIndicator {
    message: String,
    running: bool,
    shared: RecordingProgress,
}

impl Indicator for RecordingIndicator {
    fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.shared.running.fetch_add(1, Ordering::SeqCst);
        self.shared
            .events
            .lock()
            .unwrap()
            .push(Event::Start(self.message.clone()));
    }

    fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.shared.running.fetch_sub(1, Ordering::SeqCst);
        self.shared
            .events
            .lock()
            .unwrap()
            .push(Event::Stop(self.message.clone()));
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
