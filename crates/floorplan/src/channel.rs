//! Topology channel - the boundary between editing sessions and the rest of
//! the shopfloor
//!
//! Inbound snapshots arrive as `LayoutChanged`, saved layouts leave as
//! `LayoutSaved`. The transport behind the channel is somebody else's
//! concern; this is only the in-process fan-out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use ts_rs::TS;
use uuid::Uuid;

use crate::topology::Topology;

/// Messages carried on the topology channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TopologyMessage {
    /// A new topology snapshot from the shopfloor
    #[serde(rename_all = "camelCase")]
    LayoutChanged {
        topology: Topology,
        timestamp: DateTime<Utc>,
    },

    /// A session saved its edited layout
    #[serde(rename_all = "camelCase")]
    LayoutSaved {
        session_id: Uuid,
        topology: Topology,
        timestamp: DateTime<Utc>,
    },
}

impl TopologyMessage {
    pub fn layout_changed(topology: Topology) -> Self {
        Self::LayoutChanged {
            topology,
            timestamp: Utc::now(),
        }
    }

    pub fn layout_saved(session_id: Uuid, topology: Topology) -> Self {
        Self::LayoutSaved {
            session_id,
            topology,
            timestamp: Utc::now(),
        }
    }
}

/// Broadcasts topology messages to every subscriber
#[derive(Debug, Clone)]
pub struct TopologyChannel {
    sender: broadcast::Sender<TopologyMessage>,
}

impl TopologyChannel {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a message to all subscribers
    pub fn publish(&self, message: TopologyMessage) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(message);
    }

    /// Publish a fresh shopfloor snapshot
    pub fn layout_changed(&self, topology: Topology) {
        self.publish(TopologyMessage::layout_changed(topology));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TopologyMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TopologyChannel {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Intersection, Module, ModuleType};

    fn topology() -> Topology {
        let mut topology = Topology::new();
        topology.intersections.push(Intersection::new("1"));
        topology.modules.push(Module::new("M", ModuleType::Mill));
        topology
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let channel = TopologyChannel::new(4);
        channel.layout_changed(topology());
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribers_receive_messages_in_order() {
        let channel = TopologyChannel::new(4);
        let mut rx = channel.subscribe();
        let session_id = Uuid::new_v4();

        channel.layout_changed(topology());
        channel.publish(TopologyMessage::layout_saved(session_id, Topology::new()));

        assert!(matches!(rx.try_recv(), Ok(TopologyMessage::LayoutChanged { .. })));
        match rx.try_recv() {
            Ok(TopologyMessage::LayoutSaved { session_id: id, topology, .. }) => {
                assert_eq!(id, session_id);
                assert!(topology.is_empty());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_message_wire_format() {
        let message = TopologyMessage::layout_saved(Uuid::nil(), topology());
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["type"], "layoutSaved");
        assert_eq!(value["sessionId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["topology"]["intersections"][0]["id"], "1");
        assert!(value["timestamp"].is_string());

        let back: TopologyMessage = serde_json::from_value(value).unwrap();
        assert_eq!(back, message);
    }
}
