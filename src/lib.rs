//! Reference counter driving a host "network activity" indicator.
//!
//! The indicator is visible while at least one activity is open. Every
//! mutation pushes the visibility to an [`IndicatorSink`] and broadcasts a
//! [`ChangeEvent`] to subscribers.

pub mod activity_tracker;
pub mod events;
pub mod guard;
pub mod indicator;
pub mod settings;
pub mod types;

pub use activity_tracker::ActivityTracker;
pub use events::{ChangeEvent, SubscriptionId, ACTIVE_COUNT_CHANGED};
pub use guard::ActivityGuard;
pub use indicator::{IndicatorSink, LogIndicator, NoopIndicator, SharedIndicator};
