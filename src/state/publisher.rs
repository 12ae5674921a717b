use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

const DEFAULT_CAPACITY: usize = 64;

/// Holds the latest value and fans every assignment out to subscribers.
///
/// `set` never deduplicates: assigning a value equal to the current one
/// still notifies. Dropping the last handle closes every subscription.
#[derive(Clone)]
pub struct StatePublisher<T: Clone + Send + 'static> {
    inner: Arc<PublisherInner<T>>,
}

struct PublisherInner<T> {
    name: &'static str,
    current: Mutex<Option<T>>,
    sender: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> StatePublisher<T> {
    pub fn new(name: &'static str) -> Self {
        Self::with_capacity(name, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(PublisherInner {
                name,
                current: Mutex::new(None),
                sender,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Replace the current value and notify subscribers.
    pub fn set(&self, value: T) {
        // Hold the slot while sending so subscribers observe values in
        // the same order as `current()` does.
        let mut current = self.inner.current.lock();
        *current = Some(value.clone());
        let receivers = self.inner.sender.send(value).unwrap_or(0);
        tracing::trace!(stream = self.inner.name, receivers, "State published");
    }

    /// Latest assigned value, if any.
    pub fn current(&self) -> Option<T> {
        self.inner.current.lock().clone()
    }

    /// Subscribe to values assigned from now on.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            name: self.inner.name,
            receiver: Some(self.inner.sender.subscribe()),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }
}

/// Receiving end of a [`StatePublisher`].
pub struct Subscription<T: Clone> {
    name: &'static str,
    receiver: Option<broadcast::Receiver<T>>,
}

impl<T: Clone + Send + 'static> Subscription<T> {
    /// Next published value, or `None` once cancelled or the publisher is gone.
    ///
    /// A subscriber that falls behind by more than the channel capacity
    /// skips the oldest values.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            let receiver = self.receiver.as_mut()?;
            match receiver.recv().await {
                Ok(value) => return Some(value),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(stream = self.name, skipped, "Subscriber lagged, values dropped");
                }
                Err(RecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Stop receiving. Subsequent `next` calls return `None`.
    pub fn cancel(&mut self) {
        self.receiver = None;
    }

    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }
}
