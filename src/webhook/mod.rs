//! Slice lifecycle notifications delivered to external webhooks.

pub mod dispatcher;
pub mod events;
pub mod notifier;

pub use dispatcher::{DeliveryOutcome, WebhookDispatcher};
pub use events::{SliceEvent, WebhookPayload};
pub use notifier::{SliceEventPublisher, WebhookNotifier};
