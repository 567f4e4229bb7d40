use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::FunnelEvent;

/// In-process event bus backed by `tokio::broadcast`. Single-node; lossy
/// for slow subscribers, which is fine for live admin views.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<FunnelEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event to all current subscribers. Returns the number
    /// of receivers, or an error when nobody is listening.
    pub fn publish(
        &self,
        event: FunnelEvent,
    ) -> Result<usize, broadcast::error::SendError<FunnelEvent>> {
        self.sender.send(event)
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<FunnelEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(FunnelEvent::ContentSaved {
            section: "hero".into(),
            timestamp: Utc::now(),
        })
        .unwrap();

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, FunnelEvent::ContentSaved { section, .. } if section == "hero"));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(FunnelEvent::VisitorRecorded {
            id: "a1".into(),
            page: "/".into(),
            timestamp: Utc::now(),
        })
        .unwrap();

        assert!(matches!(
            rx1.recv().await.unwrap(),
            FunnelEvent::VisitorRecorded { .. }
        ));
        assert!(matches!(
            rx2.recv().await.unwrap(),
            FunnelEvent::VisitorRecorded { .. }
        ));
    }
}
