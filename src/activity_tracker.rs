use std::sync::Arc;

use parking_lot::Mutex;

use crate::events::{ChangeEvent, Subscribers, SubscriptionId, ACTIVE_COUNT_CHANGED};
use crate::guard::ActivityGuard;
use crate::indicator::IndicatorSink;
use crate::types::ChangeReceiver;

#[derive(Default)]
struct State {
    count: u64,
    seq: u64,
    unbalanced_ends: u64,
    subscribers: Subscribers,
}

struct Inner {
    state: Mutex<State>,
    sink: Box<dyn IndicatorSink>,
}

/// Counts outstanding activities and keeps the host indicator in step with the count.
///
/// Cloning gives another handle to the same counter. Every mutation runs under
/// one lock: the new count, the sink update and the change event are committed
/// together, so a caller polling right after a mutation returns never sees the
/// sink disagree with `count() > 0`.
#[derive(Clone)]
pub struct ActivityTracker {
    inner: Arc<Inner>,
}

impl ActivityTracker {
    pub fn new(sink: impl IndicatorSink + 'static) -> Self {
        sink.set_visible(false);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                sink: Box::new(sink),
            }),
        }
    }

    pub fn start(&self) {
        let mut state = self.inner.state.lock();
        state.count += 1;
        self.commit(&mut state);
    }

    /// Unbalanced calls are tolerated: the count stays at 0 and the call still
    /// produces one change event.
    pub fn end(&self) {
        let mut state = self.inner.state.lock();
        match state.count.checked_sub(1) {
            Some(count) => state.count = count,
            None => {
                state.unbalanced_ends += 1;
                tracing::debug!(
                    unbalanced_ends = state.unbalanced_ends,
                    "end() without matching start(), clamping count at 0"
                );
            }
        }
        self.commit(&mut state);
    }

    /// Resets the count to 0. Always emits, even if the count already was 0.
    pub fn end_all(&self) {
        let mut state = self.inner.state.lock();
        state.count = 0;
        self.commit(&mut state);
    }

    pub fn count(&self) -> u64 {
        self.inner.state.lock().count
    }

    pub fn is_visible(&self) -> bool {
        self.count() > 0
    }

    /// Number of `end()` calls that found the count already at 0.
    pub fn unbalanced_ends(&self) -> u64 {
        self.inner.state.lock().unbalanced_ends
    }

    pub fn subscribe(&self) -> (SubscriptionId, ChangeReceiver) {
        self.inner.state.lock().subscribers.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.state.lock().subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().subscribers.len()
    }

    /// Starts an activity that ends when the returned guard is dropped.
    pub fn guard(&self) -> ActivityGuard {
        ActivityGuard::new(self.clone())
    }

    /// Resolves once the count is 0.
    pub async fn idle(&self) {
        let (id, rx) = {
            let mut state = self.inner.state.lock();
            if state.count == 0 {
                return;
            }
            state.subscribers.subscribe()
        };
        while let Ok(event) = rx.recv().await {
            if event.count == 0 {
                break;
            }
        }
        self.unsubscribe(id);
    }

    fn commit(&self, state: &mut State) {
        self.inner.sink.set_visible(state.count > 0);
        state.seq += 1;
        let event = ChangeEvent {
            seq: state.seq,
            count: state.count,
        };
        tracing::trace!(target: ACTIVE_COUNT_CHANGED, seq = event.seq, count = event.count, "count changed");
        state.subscribers.emit(event);
    }
}

impl std::fmt::Debug for ActivityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ActivityTracker")
            .field("count", &state.count)
            .field("seq", &state.seq)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}
