use crate::types::{ChangeReceiver, ChangeSender};

/// Notification name for active count changes.
pub const ACTIVE_COUNT_CHANGED: &str = "ActiveCountChanged";

/// Emitted after every mutation of the tracker, carrying the committed count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// 1-based index of the mutation that produced this event.
    pub seq: u64,
    pub count: u64,
}

impl ChangeEvent {
    pub fn visible(&self) -> bool {
        self.count > 0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Subscriber list. Not synchronized on its own, the tracker keeps it under its lane.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    senders: Vec<(SubscriptionId, ChangeSender)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self) -> (SubscriptionId, ChangeReceiver) {
        let (tx, rx) = async_channel::unbounded();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.senders.push((id, tx));
        (id, rx)
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(sid, _)| *sid != id);
        self.senders.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }

    /// Delivers `event` to every subscriber, dropping the ones whose receiver is gone.
    pub(crate) fn emit(&mut self, event: ChangeEvent) {
        self.senders.retain(|(id, tx)| match tx.try_send(event) {
            Ok(()) => true,
            Err(_) => {
                tracing::trace!(target: ACTIVE_COUNT_CHANGED, ?id, "pruning closed subscriber");
                false
            }
        });
    }
}
