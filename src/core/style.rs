/// Script style: every configurable label, marker and heuristic input.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::actor::{ActorClassifier, ActorKind};

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Line prefixes for node content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub stage_direction: String,
    pub condition: String,
    pub script: String,
    pub system: String,
    pub player: String,
    pub npc: String,
    pub choice: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            stage_direction: "[Stage]".to_string(),
            condition: "[Condition]".to_string(),
            script: "[Script]".to_string(),
            system: "◆".to_string(),
            player: "★".to_string(),
            npc: "●".to_string(),
            choice: "→ [Choice]".to_string(),
        }
    }
}

impl Markers {
    pub fn for_actor(&self, kind: ActorKind) -> &str {
        match kind {
            ActorKind::System => &self.system,
            ActorKind::Player => &self.player,
            ActorKind::Npc => &self.npc,
        }
    }
}

/// Words used in headings and annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub chapter: String,
    pub chapter_description: String,
    pub scene: String,
    /// Label of the first scene of every conversation.
    pub opening: String,
    /// Label of a scene whose first node has no stage direction.
    pub continuation: String,
    pub branch_point: String,
    pub branch: String,
    pub jump_to_chapter: String,
    pub jump_to_other_chapter: String,
    /// Warning shown for a conversation without an entry node.
    pub missing_entry: String,
    pub system_kind: String,
    pub player_kind: String,
    pub npc_kind: String,
    pub overview: String,
    pub actors: String,
    pub main_npcs: String,
    pub variables: String,
    pub variable_note: String,
    pub chapter_overview: String,
    pub dialogue_nodes: String,
    pub legend: String,
    pub detailed_script: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            chapter: "Chapter".to_string(),
            chapter_description: "[Chapter description]".to_string(),
            scene: "Scene".to_string(),
            opening: "Opening".to_string(),
            continuation: "Continued".to_string(),
            branch_point: "Branch point".to_string(),
            branch: "Branch".to_string(),
            jump_to_chapter: "Jump to chapter".to_string(),
            jump_to_other_chapter: "jump to another chapter".to_string(),
            missing_entry: "Warning: no {marker} node found".to_string(),
            system_kind: "system/effect".to_string(),
            player_kind: "player".to_string(),
            npc_kind: "NPC".to_string(),
            overview: "Script overview".to_string(),
            actors: "Actors".to_string(),
            main_npcs: "Main NPCs".to_string(),
            variables: "Variables".to_string(),
            variable_note: "Note".to_string(),
            chapter_overview: "Chapter overview".to_string(),
            dialogue_nodes: "dialogue nodes".to_string(),
            legend: "Legend".to_string(),
            detailed_script: "DETAILED SCRIPT".to_string(),
        }
    }
}

impl Labels {
    pub fn for_actor(&self, kind: ActorKind) -> &str {
        match kind {
            ActorKind::System => &self.system_kind,
            ActorKind::Player => &self.player_kind,
            ActorKind::Npc => &self.npc_kind,
        }
    }
}

/// A short character blurb printed in the document header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcIntro {
    pub name: String,
    pub intro: String,
}

/// Full rendering configuration, loadable from RON.
///
/// Every field has a default, so a style file only needs to name what it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStyle {
    /// Title of the node every conversation starts from.
    pub entry_title: String,
    /// Stage-direction substrings that open a new scene.
    pub scene_keywords: Vec<String>,
    pub actors: ActorClassifier,
    /// Characters kept from a stage direction when used as a scene label.
    pub scene_label_width: usize,
    /// Characters kept from a branch label.
    pub branch_label_width: usize,
    pub document_title: String,
    pub markers: Markers,
    pub labels: Labels,
    pub npc_intros: Vec<NpcIntro>,
}

impl Default for ScriptStyle {
    fn default() -> Self {
        Self {
            entry_title: "START".to_string(),
            scene_keywords: ["CG shot", "Background", "Chapter", "BGM"]
                .iter()
                .map(|kw| kw.to_string())
                .collect(),
            actors: ActorClassifier::default(),
            scene_label_width: 30,
            branch_label_width: 50,
            document_title: "DIALOGUE SCRIPT".to_string(),
            markers: Markers::default(),
            labels: Labels::default(),
            npc_intros: Vec::new(),
        }
    }
}

impl ScriptStyle {
    /// Load a style from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ScriptStyle, StyleError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a style from a RON string.
    pub fn parse_ron(input: &str) -> Result<ScriptStyle, StyleError> {
        Ok(ron::from_str(input)?)
    }

    pub fn missing_entry_warning(&self) -> String {
        self.labels.missing_entry.replace("{marker}", &self.entry_title)
    }
}

/// Keep the first `width` characters of `text`, appending `...` when cut.
pub fn truncate_label(text: &str, width: usize) -> String {
    match text.char_indices().nth(width) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Keep the first `width` characters of `text`, without an ellipsis.
pub fn clip(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_label("short", 30), "short");
        assert_eq!(truncate_label("abcdef", 3), "abc...");
        assert_eq!(truncate_label("abc", 3), "abc");
        assert_eq!(truncate_label("地狱转运公司大楼", 4), "地狱转运...");
    }

    #[test]
    fn clip_has_no_ellipsis() {
        assert_eq!(clip("abcdef", 3), "abc");
        assert_eq!(clip("ab", 3), "ab");
        assert_eq!(clip("选项一二三", 2), "选项");
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let style = ScriptStyle::parse_ron(
            r#"(
                entry_title: "BEGIN",
                scene_keywords: ["CG镜头", "BGM"],
                labels: (opening: "开场"),
            )"#,
        )
        .unwrap();
        assert_eq!(style.entry_title, "BEGIN");
        assert_eq!(style.scene_keywords, vec!["CG镜头", "BGM"]);
        assert_eq!(style.labels.opening, "开场");
        assert_eq!(style.labels.continuation, "Continued");
        assert_eq!(style.scene_label_width, 30);
        assert_eq!(style.markers, Markers::default());
    }

    #[test]
    fn actor_sets_from_ron() {
        let style = ScriptStyle::parse_ron(
            r#"(actors: (system: ["旁白"], player: ["Barks"]))"#,
        )
        .unwrap();
        assert_eq!(style.actors.classify("旁白"), ActorKind::System);
        assert_eq!(style.actors.classify("Barks"), ActorKind::Player);
        assert_eq!(style.actors.classify("Narrator"), ActorKind::Npc);
    }

    #[test]
    fn partial_actor_sets_keep_other_defaults() {
        let style = ScriptStyle::parse_ron(r#"(actors: (system: ["旁白"]))"#).unwrap();
        assert_eq!(style.actors.classify("旁白"), ActorKind::System);
        assert_eq!(style.actors.classify("Player"), ActorKind::Player);
        assert_eq!(style.actors.player, ActorClassifier::default().player);
    }

    #[test]
    fn invalid_ron_is_an_error() {
        assert!(matches!(
            ScriptStyle::parse_ron("(entry_title: )"),
            Err(StyleError::Ron(_))
        ));
    }

    #[test]
    fn missing_entry_warning_names_marker() {
        let style = ScriptStyle::default();
        assert_eq!(style.missing_entry_warning(), "Warning: no START node found");
    }
}
