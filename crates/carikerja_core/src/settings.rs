use std::time::Duration;

/// Minimum time the job list keeps showing its loading state once a fetch
/// completes.
pub const DEFAULT_MIN_LOADING_WINDOW: Duration = Duration::from_millis(400);
/// How long the transition flag stays raised after a filter change.
pub const DEFAULT_TRANSITION_WINDOW: Duration = Duration::from_millis(200);

/// Timing knobs of the synchronizer. A zero window releases immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    pub min_loading_window: Duration,
    pub transition_window: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            min_loading_window: DEFAULT_MIN_LOADING_WINDOW,
            transition_window: DEFAULT_TRANSITION_WINDOW,
        }
    }
}

impl SyncSettings {
    /// Settings with both windows disabled.
    pub fn immediate() -> Self {
        Self {
            min_loading_window: Duration::ZERO,
            transition_window: Duration::ZERO,
        }
    }
}
