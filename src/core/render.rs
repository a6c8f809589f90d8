/// Breadth-first traversal of a dialogue graph into scene sections.
///
/// Walks from the entry node, rendering each reachable node once. Nodes in
/// the boundary set close the scene accumulated so far; branch points and
/// jumps to other conversations become inline annotations.

use log::{debug, trace, warn};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::fmt;

use crate::core::graph::DialogueGraph;
use crate::core::scene::SceneBreakClassifier;
use crate::core::style::{clip, truncate_label, ScriptStyle};
use crate::schema::actor::ActorRoster;
use crate::schema::node::{Conversation, ConversationId, Link, Node, NodeId};

const INDENT: &str = "    ";
const RULE_WIDTH: usize = 80;
const BRANCH_RULE_WIDTH: usize = 30;
const SCENE_RULE: &str = "----------------------------------------";

/// A numbered run of rendered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSection {
    pub number: usize,
    pub label: String,
    pub heading: String,
    pub lines: Vec<String>,
}

/// The rendered form of one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationScript {
    /// 1-based position of the conversation in its database.
    pub index: usize,
    pub conversation: ConversationId,
    pub header: Vec<String>,
    /// Set when the conversation has no entry node; `sections` is then empty.
    pub warning: Option<String>,
    pub sections: Vec<SceneSection>,
    /// Nodes whose content was rendered, in traversal order.
    pub visit_order: Vec<NodeId>,
}

impl ConversationScript {
    pub fn lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.header.iter().map(String::as_str).collect();
        if let Some(ref warning) = self.warning {
            lines.push(warning);
        }
        for section in &self.sections {
            lines.push("");
            lines.push(&section.heading);
            lines.push(SCENE_RULE);
            lines.extend(section.lines.iter().map(String::as_str));
        }
        lines
    }
}

impl fmt::Display for ConversationScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Mutable traversal state for one conversation.
struct SceneState {
    visited: FxHashSet<NodeId>,
    queue: VecDeque<(NodeId, Option<NodeId>)>,
    buffer: Vec<String>,
    label: String,
    counter: usize,
    sections: Vec<SceneSection>,
    visit_order: Vec<NodeId>,
}

impl SceneState {
    fn new(entry: NodeId, opening: &str) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((entry, None));
        Self {
            visited: FxHashSet::default(),
            queue,
            buffer: Vec::new(),
            label: opening.to_string(),
            counter: 1,
            sections: Vec::new(),
            visit_order: Vec::new(),
        }
    }

    /// Close the current scene under its label and start numbering the next.
    fn flush(&mut self, index: usize, style: &ScriptStyle) {
        let heading = format!(
            "## {} {}.{}: {}",
            style.labels.scene, index, self.counter, self.label
        );
        debug!("closing {} with {} lines", heading, self.buffer.len());
        self.sections.push(SceneSection {
            number: self.counter,
            label: self.label.clone(),
            heading,
            lines: std::mem::take(&mut self.buffer),
        });
        self.counter += 1;
    }
}

/// Renders one conversation given its graph and precomputed boundaries.
pub struct ConversationRenderer<'a> {
    graph: &'a DialogueGraph<'a>,
    boundaries: &'a FxHashSet<NodeId>,
    roster: &'a ActorRoster,
    style: &'a ScriptStyle,
    index: usize,
}

impl<'a> ConversationRenderer<'a> {
    pub fn new(
        graph: &'a DialogueGraph<'a>,
        boundaries: &'a FxHashSet<NodeId>,
        roster: &'a ActorRoster,
        style: &'a ScriptStyle,
        index: usize,
    ) -> Self {
        Self {
            graph,
            boundaries,
            roster,
            style,
            index,
        }
    }

    /// Walk the graph from `entry` and return the scenes in order, along
    /// with the nodes rendered into them.
    pub fn render(&self, entry: NodeId) -> (Vec<SceneSection>, Vec<NodeId>) {
        let mut state = SceneState::new(entry, &self.style.labels.opening);

        while let Some((id, parent)) = state.queue.pop_front() {
            if !state.visited.insert(id) {
                continue;
            }
            let node = match self.graph.node(id) {
                Some(node) => node,
                None => {
                    debug!(
                        "conversation {}: dropping dangling node {} (from {:?})",
                        self.graph.conversation, id, parent
                    );
                    continue;
                }
            };
            trace!("visiting node {} (from {:?})", id, parent);

            if self.boundaries.contains(&id) && !state.buffer.is_empty() {
                state.flush(self.index, self.style);
                state.label = if node.stage_direction.is_empty() {
                    self.style.labels.continuation.clone()
                } else {
                    truncate_label(&node.stage_direction, self.style.scene_label_width)
                };
            }

            state.visit_order.push(id);
            self.render_node(node, &mut state.buffer);
            self.follow_links(node, &mut state);
        }

        if !state.buffer.is_empty() {
            state.flush(self.index, self.style);
        }
        (state.sections, state.visit_order)
    }

    fn render_node(&self, node: &Node, out: &mut Vec<String>) {
        let markers = &self.style.markers;
        if !node.stage_direction.is_empty() {
            out.push(format!("{}{} {}", INDENT, markers.stage_direction, node.stage_direction));
        }
        if !node.condition.is_empty() {
            out.push(format!("{}{} {}", INDENT, markers.condition, node.condition));
        }
        if !node.script.is_empty() {
            out.push(format!("{}{} {}", INDENT, markers.script, node.script));
        }

        if !node.dialogue_text.is_empty() {
            let name = self.roster.name_of(&node.actor);
            let kind = self.style.actors.classify(&name);
            out.push(format!(
                "{}{} [{}] {}",
                INDENT,
                markers.for_actor(kind),
                name,
                node.dialogue_text
            ));
        } else if !node.menu_text.is_empty() {
            out.push(format!("{}{} {}", INDENT, markers.choice, node.menu_text));
        }
    }

    fn follow_links(&self, node: &Node, state: &mut SceneState) {
        let links = self.graph.links(node.id);
        match links {
            [] => {}
            [link] => {
                if link.connector || link.leaves(self.graph.conversation) {
                    state.buffer.push(format!(
                        "{}→ [{} {}]",
                        INDENT, self.style.labels.jump_to_chapter, link.target_conversation
                    ));
                } else {
                    state.queue.push_back((link.target, Some(node.id)));
                }
            }
            _ => {
                let labels = &self.style.labels;
                state.buffer.push(String::new());
                state.buffer.push(format!(
                    "{}╔══ {} (ID={}) ══╗",
                    INDENT, labels.branch_point, node.id
                ));
                for (i, link) in links.iter().enumerate() {
                    state.buffer.push(format!(
                        "{}║ → {} {}: {}",
                        INDENT,
                        labels.branch,
                        i + 1,
                        self.branch_label(link)
                    ));
                    if !link.leaves(self.graph.conversation) {
                        state.queue.push_back((link.target, Some(node.id)));
                    }
                }
                state
                    .buffer
                    .push(format!("{}╚{}╝", INDENT, "═".repeat(BRANCH_RULE_WIDTH)));
                state.buffer.push(String::new());
            }
        }
    }

    /// Label for one alternative of a branch block: the target's choice
    /// text, else its condition, else its stage direction, else its ID.
    fn branch_label(&self, link: &Link) -> String {
        if link.leaves(self.graph.conversation) {
            return format!(
                "{} (Conv {})",
                self.style.labels.jump_to_other_chapter, link.target_conversation
            );
        }
        let fallback = format!("(ID={})", link.target);
        let label = self
            .graph
            .node(link.target)
            .and_then(|target| {
                [&target.menu_text, &target.condition, &target.stage_direction]
                    .into_iter()
                    .find(|text| !text.is_empty())
            })
            .map(String::as_str)
            .unwrap_or(&fallback);
        clip(label, self.style.branch_label_width).to_string()
    }
}

/// Render a conversation: header, then its scenes, or a warning when the
/// conversation has no entry node.
pub fn render_conversation(
    conversation: &Conversation,
    index: usize,
    roster: &ActorRoster,
    style: &ScriptStyle,
) -> ConversationScript {
    let mut header = vec![
        String::new(),
        "=".repeat(RULE_WIDTH),
        format!("# {} {}: {}", style.labels.chapter, index, conversation.title),
        "=".repeat(RULE_WIDTH),
    ];
    if !conversation.description.is_empty() {
        header.push(format!(
            "{}{}",
            style.labels.chapter_description, conversation.description
        ));
    }
    header.push(String::new());

    let mut script = ConversationScript {
        index,
        conversation: conversation.id,
        header,
        warning: None,
        sections: Vec::new(),
        visit_order: Vec::new(),
    };

    let entry = match conversation.entry_node(&style.entry_title) {
        Some(entry) => entry.id,
        None => {
            warn!(
                "conversation {} ({}) has no {} node",
                conversation.id, conversation.title, style.entry_title
            );
            script.warning = Some(format!("  [{}]", style.missing_entry_warning()));
            return script;
        }
    };

    let graph = DialogueGraph::build(conversation);
    let boundaries = SceneBreakClassifier::new(style.scene_keywords.iter().cloned()).classify(&graph);
    let renderer = ConversationRenderer::new(&graph, &boundaries, roster, style, index);
    let (sections, visit_order) = renderer.render(entry);
    script.sections = sections;
    script.visit_order = visit_order;
    script
}
