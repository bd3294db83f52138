//! Post-transition callbacks.

use crate::wish::domain::Wish;
use tracing::info;

/// Side effect run after a wish has been durably marked completed.
///
/// The hook runs once per successful completion, after the write, and cannot
/// undo it.
pub trait CompletionHook: Send + Sync {
    /// Called with the wish as persisted by the completing write.
    fn on_completed(&self, wish: &Wish);
}

/// Hook that records completions in the log and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCompletionHook;

impl CompletionHook for LoggingCompletionHook {
    fn on_completed(&self, wish: &Wish) {
        info!(
            wish_id = %wish.id(),
            creator = %wish.creator(),
            helper = ?wish.helper(),
            "wish completed"
        );
    }
}
