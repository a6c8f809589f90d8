/// Indexed view over one conversation's nodes.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::schema::node::{Conversation, ConversationId, Link, Node, NodeId};

/// A conversation's nodes indexed by ID, with outgoing adjacency and
/// incoming-edge counts. Built once, read by classification and traversal.
#[derive(Debug)]
pub struct DialogueGraph<'a> {
    pub conversation: ConversationId,
    nodes: FxHashMap<NodeId, &'a Node>,
    adjacency: FxHashMap<NodeId, &'a [Link]>,
    incoming: FxHashMap<NodeId, usize>,
}

impl<'a> DialogueGraph<'a> {
    /// Index a conversation. Links to absent nodes are kept unresolved.
    ///
    /// Incoming counts only consider links that stay inside the
    /// conversation, and count each source node once.
    pub fn build(conversation: &'a Conversation) -> DialogueGraph<'a> {
        let mut nodes = FxHashMap::default();
        let mut adjacency = FxHashMap::default();
        for node in &conversation.nodes {
            nodes.insert(node.id, node);
            adjacency.insert(node.id, node.links.as_slice());
        }

        let mut edges: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();
        for (source, links) in &adjacency {
            for link in links.iter() {
                if !link.leaves(conversation.id) {
                    edges.insert((*source, link.target));
                }
            }
        }
        let mut incoming = FxHashMap::default();
        for (_, target) in edges {
            *incoming.entry(target).or_insert(0) += 1;
        }

        DialogueGraph {
            conversation: conversation.id,
            nodes,
            adjacency,
            incoming,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&'a Node> {
        self.nodes.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Outgoing links in authoring order. Empty for unknown IDs.
    pub fn links(&self, id: NodeId) -> &'a [Link] {
        self.adjacency.get(&id).copied().unwrap_or(&[])
    }

    pub fn incoming_count(&self, id: NodeId) -> usize {
        self.incoming.get(&id).copied().unwrap_or(0)
    }

    pub fn outgoing_count(&self, id: NodeId) -> usize {
        self.links(id).len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.values().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
