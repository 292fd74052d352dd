use super::dispatcher::WebhookDispatcher;
use super::events::SliceEvent;
use crate::constants::WEBHOOK_QUEUE_CAPACITY;
use crate::log_webhook_warn;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};
use tokio::task::JoinHandle;

/// Receives slice events from the service layer.
///
/// Publishing never blocks and never fails the caller.
pub trait SliceEventPublisher: Send + Sync {
    fn publish(&self, event: SliceEvent);
}

/// Channel-backed publisher feeding a [`WebhookDispatcher`] task.
///
/// The queue is bounded; when it is full new events are dropped with a
/// warning.
#[derive(Clone)]
pub struct WebhookNotifier {
    sender: Sender<SliceEvent>,
}

impl WebhookNotifier {
    /// Start the dispatcher on the current runtime.
    ///
    /// The task ends once every clone of the notifier has been dropped and
    /// the queue is drained.
    pub fn spawn(dispatcher: WebhookDispatcher) -> (Self, JoinHandle<()>) {
        let (notifier, receiver) = Self::channel(WEBHOOK_QUEUE_CAPACITY);
        let handle = tokio::spawn(dispatcher.run(receiver));
        (notifier, handle)
    }

    /// A notifier and the receiving end of its queue
    pub fn channel(capacity: usize) -> (Self, Receiver<SliceEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl SliceEventPublisher for WebhookNotifier {
    fn publish(&self, event: SliceEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => log_webhook_warn!(
                "Dropped {} for slice '{}': webhook queue is full",
                dropped.name(),
                dropped.slice_type()
            ),
            Err(TrySendError::Closed(dropped)) => log_webhook_warn!(
                "Dropped {} for slice '{}': dispatcher stopped",
                dropped.name(),
                dropped.slice_type()
            ),
        }
    }
}
