use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out run-scoped case numbers, starting at 0.
///
/// Each number names one case's working directories and archives, so a number
/// is never handed out twice by the same sequence.
#[derive(Debug, Default)]
pub struct CaseSequence {
    next: AtomicU64,
}

impl CaseSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_number(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
