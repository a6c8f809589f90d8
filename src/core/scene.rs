/// Scene boundary classification.

use rustc_hash::FxHashSet;

use crate::core::graph::DialogueGraph;
use crate::schema::node::{Node, NodeId};

/// Marks nodes where a reader would expect a new scene to begin.
///
/// A node is a boundary when paths converge on it, when it branches,
/// when it is conditional, or when its stage direction mentions one of
/// the configured keywords (cuts, background changes, music cues).
#[derive(Debug, Clone, Default)]
pub struct SceneBreakClassifier {
    keywords: Vec<String>,
}

impl SceneBreakClassifier {
    pub fn new<I>(keywords: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|kw| -> String { kw.into() })
                .filter(|kw| !kw.is_empty())
                .collect(),
        }
    }

    pub fn is_boundary(&self, graph: &DialogueGraph<'_>, node: &Node) -> bool {
        graph.incoming_count(node.id) > 1
            || graph.outgoing_count(node.id) > 1
            || !node.condition.is_empty()
            || self.mentions_keyword(&node.stage_direction)
    }

    fn mentions_keyword(&self, text: &str) -> bool {
        self.keywords.iter().any(|kw| text.contains(kw.as_str()))
    }

    pub fn classify(&self, graph: &DialogueGraph<'_>) -> FxHashSet<NodeId> {
        graph
            .nodes()
            .filter(|node| self.is_boundary(graph, node))
            .map(|node| node.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::node::{Conversation, ConversationId, Link};

    const CONV: ConversationId = ConversationId(1);

    fn node(id: i64, targets: &[i64]) -> Node {
        let mut node = Node::new(NodeId(id));
        node.links = targets.iter().map(|t| Link::new(NodeId(*t), CONV)).collect();
        node
    }

    fn ids(set: &FxHashSet<NodeId>) -> Vec<i64> {
        let mut ids: Vec<i64> = set.iter().map(|id| id.0).collect();
        ids.sort();
        ids
    }

    #[test]
    fn linear_chain_has_no_boundaries() {
        let mut conv = Conversation::new(CONV, "Linear");
        conv.nodes = vec![node(0, &[1]), node(1, &[2]), node(2, &[])];
        let graph = DialogueGraph::build(&conv);
        let breaks = SceneBreakClassifier::new(["BGM"]).classify(&graph);
        assert!(breaks.is_empty());
    }

    #[test]
    fn structural_boundaries() {
        let mut conv = Conversation::new(CONV, "Diamond");
        conv.nodes = vec![node(0, &[1, 2]), node(1, &[3]), node(2, &[3]), node(3, &[])];
        let graph = DialogueGraph::build(&conv);
        let breaks = SceneBreakClassifier::default().classify(&graph);
        assert_eq!(ids(&breaks), vec![0, 3]);
    }

    #[test]
    fn conditions_and_keywords() {
        let mut conv = Conversation::new(CONV, "Content");
        let mut cond = node(1, &[2]);
        cond.condition = "Variable[\"late\"] == true".to_string();
        let mut cut = node(2, &[3]);
        cut.stage_direction = "CG镜头：大厅全景".to_string();
        let mut plain = node(3, &[]);
        plain.stage_direction = "He shrugs".to_string();
        conv.nodes = vec![node(0, &[1]), cond, cut, plain];
        let graph = DialogueGraph::build(&conv);

        let breaks = SceneBreakClassifier::new(["CG镜头", "BGM"]).classify(&graph);
        assert_eq!(ids(&breaks), vec![1, 2]);

        let breaks = SceneBreakClassifier::new(["shrug"]).classify(&graph);
        assert_eq!(ids(&breaks), vec![1, 3]);
    }

    #[test]
    fn empty_keyword_matches_nothing() {
        let mut conv = Conversation::new(CONV, "Empty");
        let mut a = node(0, &[]);
        a.stage_direction = "anything".to_string();
        conv.nodes = vec![a];
        let graph = DialogueGraph::build(&conv);
        assert!(SceneBreakClassifier::new([""]).classify(&graph).is_empty());
    }

    #[test]
    fn classification_is_idempotent() {
        let mut conv = Conversation::new(CONV, "Loop");
        conv.nodes = vec![node(0, &[1]), node(1, &[2, 0]), node(2, &[1])];
        let graph = DialogueGraph::build(&conv);
        let classifier = SceneBreakClassifier::new(["BGM"]);
        let first = classifier.classify(&graph);
        let second = classifier.classify(&graph);
        assert_eq!(first, second);
        assert_eq!(ids(&first), vec![1]);
    }
}
