use activity_indicator::{ActivityTracker, ChangeEvent, SharedIndicator};

fn tracker() -> (ActivityTracker, SharedIndicator) {
    let sink = SharedIndicator::new();
    (ActivityTracker::new(sink.clone()), sink)
}

fn drain(rx: &activity_indicator::types::ChangeReceiver) -> Vec<u64> {
    std::iter::from_fn(|| rx.try_recv().ok()).map(|e| e.count).collect()
}

#[test]
fn start_start_end_leaves_one() {
    let (tracker, sink) = tracker();
    tracker.start();
    tracker.start();
    tracker.end();
    assert_eq!(tracker.count(), 1);
    assert!(sink.is_visible());
    assert!(tracker.is_visible());
}

#[test]
fn start_end_all_end_leaves_zero() {
    let (tracker, sink) = tracker();
    tracker.start();
    tracker.end_all();
    tracker.end();
    assert_eq!(tracker.count(), 0);
    assert!(!sink.is_visible());
}

#[test]
fn start_then_end_restores_prior_count() {
    let (tracker, _) = tracker();
    for prior in 0..4 {
        assert_eq!(tracker.count(), prior);
        tracker.start();
        tracker.end();
        assert_eq!(tracker.count(), prior);
        tracker.start();
    }
}

#[test]
fn end_at_zero_stays_zero_and_emits_once() {
    let (tracker, sink) = tracker();
    let (_, rx) = tracker.subscribe();
    tracker.end();
    assert_eq!(tracker.count(), 0);
    assert!(!sink.is_visible());
    assert_eq!(rx.try_recv().unwrap(), ChangeEvent { seq: 1, count: 0 });
    assert!(rx.try_recv().is_err());
    assert_eq!(tracker.unbalanced_ends(), 1);
}

#[test]
fn end_all_resets_from_any_value() {
    let (tracker, sink) = tracker();
    tracker.end_all();
    assert_eq!(tracker.count(), 0);

    for _ in 0..5 {
        tracker.start();
    }
    tracker.end_all();
    assert_eq!(tracker.count(), 0);
    assert!(!sink.is_visible());

    tracker.start();
    tracker.start();
    tracker.end();
    tracker.end_all();
    assert_eq!(tracker.count(), 0);
}

#[test]
fn end_all_at_zero_still_emits() {
    let (tracker, _) = tracker();
    let (_, rx) = tracker.subscribe();
    tracker.end_all();
    tracker.end_all();
    assert_eq!(drain(&rx), vec![0, 0]);
}

#[test]
fn signal_matches_count_after_every_mutation() {
    let (tracker, sink) = tracker();
    let ops = [0, 0, 1, 2, 1, 1, 1, 0, 2, 0, 1];
    for op in ops {
        match op {
            0 => tracker.start(),
            1 => tracker.end(),
            _ => tracker.end_all(),
        }
        assert_eq!(sink.is_visible(), tracker.count() > 0);
    }
}

#[test]
fn events_follow_program_order() {
    let (tracker, _) = tracker();
    let (_, rx) = tracker.subscribe();
    let mut expected = Vec::new();

    tracker.start();
    expected.push(tracker.count());
    tracker.start();
    expected.push(tracker.count());
    tracker.end();
    expected.push(tracker.count());
    tracker.end();
    expected.push(tracker.count());
    tracker.end();
    expected.push(tracker.count());
    tracker.start();
    expected.push(tracker.count());
    tracker.end_all();
    expected.push(tracker.count());

    assert_eq!(expected, vec![1, 2, 1, 0, 0, 1, 0]);
    let events: Vec<ChangeEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert_eq!(events.iter().map(|e| e.count).collect::<Vec<_>>(), expected);
    assert!(events.iter().enumerate().all(|(i, e)| e.seq == i as u64 + 1));
}

#[test]
fn unsubscribe_stops_delivery() {
    let (tracker, _) = tracker();
    let (id, rx) = tracker.subscribe();
    let (_, other) = tracker.subscribe();
    assert_eq!(tracker.subscriber_count(), 2);

    tracker.start();
    assert!(tracker.unsubscribe(id));
    tracker.end();

    assert_eq!(drain(&rx), vec![1]);
    assert_eq!(drain(&other), vec![1, 0]);
    assert_eq!(tracker.subscriber_count(), 1);
}

#[test]
fn dropped_subscriber_is_pruned() {
    let (tracker, _) = tracker();
    let (_, rx) = tracker.subscribe();
    drop(rx);
    tracker.start();
    assert_eq!(tracker.subscriber_count(), 0);
}

#[test]
fn guard_ends_on_drop() {
    let (tracker, sink) = tracker();
    {
        let _outer = tracker.guard();
        let inner = tracker.guard();
        assert_eq!(tracker.count(), 2);
        drop(inner);
        assert_eq!(tracker.count(), 1);
        assert!(sink.is_visible());
    }
    assert_eq!(tracker.count(), 0);
    assert!(!sink.is_visible());
    assert_eq!(tracker.unbalanced_ends(), 0);
}

#[test]
fn clones_share_state() {
    let (tracker, _) = tracker();
    let other = tracker.clone();
    other.start();
    assert_eq!(tracker.count(), 1);
    tracker.end();
    assert_eq!(other.count(), 0);
}

#[test]
fn closure_sink_sees_every_mutation() {
    let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
    let log = seen.clone();
    let tracker = ActivityTracker::new(move |visible: bool| log.lock().push(visible));

    tracker.start();
    tracker.start();
    tracker.end();
    tracker.end();
    tracker.end();

    // the first entry comes from construction
    assert_eq!(*seen.lock(), vec![false, true, true, true, false, false]);
}
