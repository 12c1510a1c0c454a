//! Counts expected vs settled asset loads so the frame loop knows when to start.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub expected: u32,
    pub completed: u32,
    pub failed: u32,
}

impl LoadProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce `n` more loads.
    pub fn expect(&mut self, n: u32) {
        self.expected += n;
    }

    pub fn complete(&mut self) {
        self.completed += 1;
    }

    pub fn fail(&mut self) {
        self.failed += 1;
    }

    /// Loads that finished either way.
    pub fn settled(&self) -> u32 {
        self.completed + self.failed
    }

    pub fn is_done(&self) -> bool {
        self.settled() >= self.expected
    }

    /// Progress in `[0, 1]`; 1 when nothing is expected.
    pub fn fraction(&self) -> f32 {
        if self.expected == 0 {
            1.0
        } else {
            (self.settled() as f32 / self.expected as f32).min(1.0)
        }
    }
}
