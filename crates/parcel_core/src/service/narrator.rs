//! Human-facing narration sinks for service operations.
//!
//! Narration is user output, separate from diagnostic logging.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Receives one human-readable line per call.
pub trait Narrator {
    fn narrate(&self, line: &str);
}

impl<N: Narrator + ?Sized> Narrator for &N {
    fn narrate(&self, line: &str) {
        (**self).narrate(line);
    }
}

/// Writes narration lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNarrator;

impl Narrator for StdoutNarrator {
    fn narrate(&self, line: &str) {
        println!("{line}");
    }
}

/// Keeps narration lines in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingNarrator {
    lines: Mutex<Vec<String>>,
}

impl RecordingNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every line recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    /// Drains recorded lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.guard())
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Narrator for RecordingNarrator {
    fn narrate(&self, line: &str) {
        self.guard().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{Narrator, RecordingNarrator};

    #[test]
    fn recording_narrator_keeps_order_and_drains() {
        let narrator = RecordingNarrator::new();
        let by_ref = &narrator;
        by_ref.narrate("first");
        narrator.narrate("second");

        assert_eq!(narrator.lines(), vec!["first", "second"]);
        assert_eq!(narrator.take().len(), 2);
        assert!(narrator.lines().is_empty());
    }
}
