use core::fmt::Debug;

/// Sink for progress updates emitted while entities are fetched.
pub trait Progress: Debug + Send + Sync {
    /// Set the label describing the current phase (e.g. "Analyzing").
    fn set_phase(&self, phase: &str);

    /// Report `position` of `len` units done, with a short status message.
    fn set_determinate(&self, len: u64, position: u64, message: &str);

    /// The operation is over; clear any visible indicator.
    fn done(&self);
}

/// A progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_phase(&self, _phase: &str) {}

    fn set_determinate(&self, _len: u64, _position: u64, _message: &str) {}

    fn done(&self) {}
}
