//! Dialogue Script: turns branching dialogue graphs into readable scripts.
//!
//! Each conversation of an exported dialogue database is indexed as a graph,
//! split into scenes by a structural and keyword heuristic, and walked
//! breadth-first from its entry node so every reachable line is rendered
//! exactly once, with branch points and cross-conversation jumps annotated.

pub mod core;
pub mod schema;

pub use crate::core::document::ScriptDocument;
pub use crate::core::render::{render_conversation, ConversationScript, SceneSection};
pub use crate::core::style::{ScriptStyle, StyleError};
pub use crate::schema::record::{DialogueDatabase, LoadError};
