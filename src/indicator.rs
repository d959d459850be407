use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Host-side "activity indicator visible" signal.
///
/// Called while the tracker holds its lane, so implementations must be quick
/// and must not call back into the tracker.
pub trait IndicatorSink: Send + Sync {
    fn set_visible(&self, visible: bool);
}

impl<F> IndicatorSink for F
where
    F: Fn(bool) + Send + Sync,
{
    fn set_visible(&self, visible: bool) {
        self(visible)
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct NoopIndicator;

impl IndicatorSink for NoopIndicator {
    fn set_visible(&self, _visible: bool) {}
}

/// Logs each time the visibility flips.
#[derive(Debug, Default)]
pub struct LogIndicator {
    visible: AtomicBool,
}

impl IndicatorSink for LogIndicator {
    fn set_visible(&self, visible: bool) {
        if self.visible.swap(visible, Ordering::Relaxed) != visible {
            if visible {
                tracing::info!("activity indicator shown");
            } else {
                tracing::info!("activity indicator hidden");
            }
        }
    }
}

/// Keeps the flag in shared memory so it can be polled from outside the tracker.
#[derive(Debug, Default, Clone)]
pub struct SharedIndicator {
    visible: Arc<AtomicBool>,
}

impl SharedIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl IndicatorSink for SharedIndicator {
    fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }
}
