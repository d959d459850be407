use crate::activity_tracker::ActivityTracker;

/// Holds one activity open on a tracker. Dropping it calls `end()` once.
#[must_use = "the activity ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ActivityGuard {
    tracker: ActivityTracker,
}

impl ActivityGuard {
    pub(crate) fn new(tracker: ActivityTracker) -> Self {
        tracker.start();
        Self { tracker }
    }
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.tracker.end();
    }
}
