// src/progress.rs
/// Lightweight progress reporting for a run (payload fetches, captured files).
/// The CLI implements this to surface status on stderr.
pub trait Progress {
    /// Called at the start with the total number of items, if known.
    fn begin(&mut self, _total: Option<usize>) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One payload was walked. `new_matches` counts keys not seen before.
    fn item_done(&mut self, _origin: &str, _new_matches: usize) {}

    /// One payload could not be used.
    fn item_failed(&mut self, _origin: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
