//! Event bus implementation for publishing and subscribing to scrape events

use tokio::sync::broadcast;

use super::errors::EventBusError;
use super::metrics::EventBusMetrics;
use super::types::ScrapeEvent;

/// Default number of buffered events per subscriber
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Event bus for publishing and subscribing to scrape events
///
/// Backed by a tokio `broadcast` channel: slow receivers lag and drop the
/// oldest events, publishers never block.
#[derive(Debug)]
pub struct ScrapeEventBus {
    sender: broadcast::Sender<ScrapeEvent>,
    metrics: EventBusMetrics,
}

impl ScrapeEventBus {
    /// Create a new event bus with the specified capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of events that can be buffered
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            metrics: EventBusMetrics::new(),
        }
    }

    /// Get current metrics
    #[must_use]
    pub fn metrics(&self) -> &EventBusMetrics {
        &self.metrics
    }

    /// Publish an event to all subscribers
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of active subscribers that received the event
    /// * `Err(EventBusError::NoSubscribers)` - Nobody is listening
    pub async fn publish(&self, event: ScrapeEvent) -> Result<usize, EventBusError> {
        match self.sender.send(event) {
            Ok(subscriber_count) => {
                self.metrics.increment_published();
                self.metrics.update_subscriber_count(subscriber_count);
                Ok(subscriber_count)
            }
            Err(_) => {
                self.metrics.increment_dropped();
                log::debug!("Published event but no active subscribers");
                Err(EventBusError::NoSubscribers)
            }
        }
    }

    /// Subscribe to all future events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ScrapeEvent> {
        self.sender.subscribe()
    }

    /// Number of active receivers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn has_subscribers(&self) -> bool {
        self.subscriber_count() > 0
    }

    /// Receive the next event, mapping channel errors onto `EventBusError`
    pub async fn recv(
        receiver: &mut broadcast::Receiver<ScrapeEvent>,
    ) -> Result<ScrapeEvent, EventBusError> {
        receiver.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Lagged(missed) => EventBusError::ReceiverLagged(missed),
            broadcast::error::RecvError::Closed => EventBusError::Shutdown,
        })
    }
}

impl Default for ScrapeEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
