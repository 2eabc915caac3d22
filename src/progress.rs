// src/progress.rs
use log::info;

/// Lightweight progress reporting used by long-running collection.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of restaurants.
    fn begin(&mut self, _total: usize) {}

    /// Restaurant scraped and stored.
    fn item_done(&mut self, _name: &str) {}

    /// Restaurant had no menu data.
    fn item_skipped(&mut self, _name: &str) {}

    /// Restaurant had a menu but storing it failed.
    fn item_failed(&mut self, _name: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Logs a progress line every `every` restaurants.
pub struct LogProgress {
    every: usize,
    total: usize,
    checked: usize,
    processed: usize,
    skipped: usize,
    failed: usize,
}

impl LogProgress {
    pub fn new(every: usize) -> Self {
        Self { every: every.max(1), total: 0, checked: 0, processed: 0, skipped: 0, failed: 0 }
    }

    fn tick(&mut self) {
        self.checked += 1;
        if self.checked % self.every == 0 {
            info!("{}", self.line());
        }
    }

    pub fn line(&self) -> String {
        let pct = if self.total == 0 { 0.0 } else { self.checked as f64 * 100.0 / self.total as f64 };
        format!(
            "Progress: {}/{} restaurants checked ({:.1}%) | {} processed | {} skipped",
            self.checked, self.total, pct, self.processed, self.skipped
        )
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        info!("Processing {total} restaurants...");
    }
    fn item_done(&mut self, name: &str) {
        self.processed += 1;
        info!("✓ Successfully processed {name} with menu data");
        self.tick();
    }
    fn item_skipped(&mut self, name: &str) {
        self.skipped += 1;
        info!("✗ Skipped {name} - no menu data available");
        self.tick();
    }
    fn item_failed(&mut self, name: &str) {
        self.failed += 1;
        info!("✗ Could not store {name}");
        self.tick();
    }
    fn finish(&mut self) {
        if self.failed > 0 {
            info!("{} ({} failed to store)", self.line(), self.failed);
        }
    }
}
