//! Coarse "scrape in progress" flag for external pollers

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cloneable handle; all clones observe the same flag
#[derive(Debug, Clone, Default)]
pub struct ScrapeStatus {
    active: Arc<AtomicUsize>,
}

impl ScrapeStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_progress(&self) -> bool {
        self.active.load(Ordering::Acquire) > 0
    }

    /// Raise the flag until the returned guard drops
    pub fn begin(&self) -> InProgressGuard {
        self.active.fetch_add(1, Ordering::AcqRel);
        InProgressGuard {
            active: Arc::clone(&self.active),
        }
    }
}

/// Lowers the in-progress flag on drop, including on early return
#[must_use = "the flag is cleared as soon as the guard is dropped"]
pub struct InProgressGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for InProgressGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}
