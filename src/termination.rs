use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation token for the long-running algorithms. The flag
/// is monotone: once signalled it never clears, so a plain atomic load at
/// each elimination step and each search iteration is sufficient — a missed
/// check delays termination but never corrupts a result.
///
/// Cloning shares the flag, so one handle can cancel work running on other
/// threads.
#[derive(Clone, Debug, Default)]
pub struct TerminationFlag {
    flag: Arc<AtomicBool>,
}

impl TerminationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_signalled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
