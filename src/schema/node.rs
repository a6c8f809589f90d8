use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::{field_value, ConversationRecord, EntryRecord, LinkRecord};

/// Newtype wrapper for dialogue node IDs. Unique only within a conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub i64);

/// Newtype wrapper for conversation IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed edge to a node, possibly in another conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub target: NodeId,
    pub target_conversation: ConversationId,
    /// Structural edge that continues without presenting a choice.
    pub connector: bool,
}

impl Link {
    pub fn new(target: NodeId, target_conversation: ConversationId) -> Self {
        Self {
            target,
            target_conversation,
            connector: false,
        }
    }

    pub fn connector(target: NodeId, target_conversation: ConversationId) -> Self {
        Self {
            target,
            target_conversation,
            connector: true,
        }
    }

    /// Returns true if this link leaves the given conversation.
    pub fn leaves(&self, conversation: ConversationId) -> bool {
        self.target_conversation != conversation
    }
}

impl From<&LinkRecord> for Link {
    fn from(record: &LinkRecord) -> Self {
        Self {
            target: NodeId(record.destination_dialogue_id),
            target_conversation: ConversationId(record.destination_conversation_id),
            connector: record.is_connector,
        }
    }
}

/// A single dialogue unit: a spoken line, a choice, or a structural marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    /// Actor ID as written in the export, resolved through an `ActorRoster`.
    pub actor: String,
    pub dialogue_text: String,
    pub menu_text: String,
    pub stage_direction: String,
    pub condition: String,
    pub script: String,
    pub links: Vec<Link>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

impl From<&EntryRecord> for Node {
    fn from(record: &EntryRecord) -> Self {
        Self {
            id: NodeId(record.id),
            title: field_value(&record.fields, "Title").to_string(),
            actor: field_value(&record.fields, "Actor").to_string(),
            dialogue_text: field_value(&record.fields, "Dialogue Text").to_string(),
            menu_text: field_value(&record.fields, "Menu Text").to_string(),
            stage_direction: field_value(&record.fields, "Description").to_string(),
            condition: record.conditions_string.clone(),
            script: record.user_script.clone(),
            links: record.outgoing_links.iter().map(Link::from).collect(),
        }
    }
}

/// One independent dialogue graph with its own node ID namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    pub description: String,
    /// Nodes in authoring order.
    pub nodes: Vec<Node>,
}

impl Conversation {
    pub fn new(id: ConversationId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            nodes: Vec::new(),
        }
    }

    /// The first node, in authoring order, whose title equals `marker`.
    pub fn entry_node(&self, marker: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.title == marker)
    }
}

impl From<&ConversationRecord> for Conversation {
    fn from(record: &ConversationRecord) -> Self {
        Self {
            id: ConversationId(record.id),
            title: field_value(&record.fields, "Title").to_string(),
            description: field_value(&record.fields, "Description").to_string(),
            nodes: record.dialogue_entries.iter().map(Node::from).collect(),
        }
    }
}
