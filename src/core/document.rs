/// The full script document: front matter followed by every conversation.

use rayon::prelude::*;

use crate::core::render::{render_conversation, ConversationScript};
use crate::core::style::ScriptStyle;
use crate::schema::actor::ActorRoster;
use crate::schema::node::Conversation;
use crate::schema::record::{field_value, DialogueDatabase};

const BANNER_WIDTH: usize = 78;

/// Renders a whole database with one style.
pub struct ScriptDocument<'a> {
    database: &'a DialogueDatabase,
    style: &'a ScriptStyle,
    roster: ActorRoster,
}

impl<'a> ScriptDocument<'a> {
    pub fn new(database: &'a DialogueDatabase, style: &'a ScriptStyle) -> Self {
        Self {
            database,
            style,
            roster: ActorRoster::from_records(&database.actors),
        }
    }

    pub fn roster(&self) -> &ActorRoster {
        &self.roster
    }

    /// Render every conversation. Conversations are independent, so they are
    /// rendered in parallel; the result keeps database order with indices
    /// starting at 1.
    pub fn conversations(&self) -> Vec<ConversationScript> {
        self.database
            .conversations
            .par_iter()
            .enumerate()
            .map(|(i, record)| {
                let conversation = Conversation::from(record);
                render_conversation(&conversation, i + 1, &self.roster, self.style)
            })
            .collect()
    }

    /// Render one conversation by its 1-based index.
    pub fn conversation(&self, index: usize) -> Option<ConversationScript> {
        let record = self.database.conversations.get(index.checked_sub(1)?)?;
        let conversation = Conversation::from(record);
        Some(render_conversation(&conversation, index, &self.roster, self.style))
    }

    pub fn render(&self) -> String {
        let mut out = Vec::new();
        out.extend(banner(&[String::new(), self.style.document_title.clone(), String::new()]));
        out.push(String::new());
        self.front_matter(&mut out);
        out.push(String::new());
        out.extend(banner(&[self.style.labels.detailed_script.clone()]));
        for script in self.conversations() {
            out.push(script.to_string());
        }
        out.join("\n")
    }

    fn front_matter(&self, out: &mut Vec<String>) {
        let labels = &self.style.labels;

        out.push(format!("# {}", labels.overview));
        out.push("=".repeat(80));
        out.push(String::new());

        heading(out, &format!("## {}", labels.actors), 40);
        for (id, name) in self.roster.iter() {
            let kind = self.style.actors.classify(name);
            out.push(format!("  • [{}] {} ({})", id, name, labels.for_actor(kind)));
        }
        out.push(String::new());

        heading(out, &format!("### {}", labels.main_npcs), 30);
        for npc in &self.style.npc_intros {
            if self.roster.contains_name(&npc.name) {
                out.push(format!("  {} {}: {}", self.style.markers.npc, npc.name, npc.intro));
            }
        }
        out.push(String::new());

        heading(out, &format!("## {}", labels.variables), 40);
        for var in self.database.variables() {
            out.push(format!("  • {} = {}", var.name, var.initial_value));
            if !var.description.is_empty() {
                out.push(format!("    {}: {}", labels.variable_note, var.description));
            }
        }
        out.push(String::new());

        heading(out, &format!("## {}", labels.chapter_overview), 40);
        for (i, record) in self.database.conversations.iter().enumerate() {
            out.push(format!(
                "  {}. {} ({} {})",
                i + 1,
                field_value(&record.fields, "Title"),
                record.dialogue_entries.len(),
                labels.dialogue_nodes
            ));
            let description = field_value(&record.fields, "Description");
            if !description.is_empty() {
                out.push(format!("     └─ {}", description));
            }
        }
        out.push(String::new());

        heading(out, &format!("## {}", labels.legend), 40);
        out.extend(self.legend());
        out.push(String::new());
    }

    fn legend(&self) -> Vec<String> {
        let m = &self.style.markers;
        let l = &self.style.labels;
        vec![
            format!("  {} staging notes: shots, sound, animation", m.stage_direction),
            format!("  {} required for this line to play", m.condition),
            format!("  {} runs when this line plays", m.script),
            format!("  {} [{}] narration, cutscenes, captions", m.system, l.system_kind),
            format!("  {} [{}] lines of the player character", m.player, l.player_kind),
            format!("  {} [{}] lines of other characters", m.npc, l.npc_kind),
            format!("  {} player choice", m.choice),
            format!("  ╔══ {} ══╗ marks a dialogue branch", l.branch_point),
        ]
    }
}

fn heading(out: &mut Vec<String>, title: &str, rule: usize) {
    out.push(title.to_string());
    out.push("-".repeat(rule));
}

/// A double-ruled box with each line centered.
fn banner(lines: &[String]) -> Vec<String> {
    let mut out = vec![format!("╔{}╗", "═".repeat(BANNER_WIDTH))];
    for line in lines {
        let len = line.chars().count().min(BANNER_WIDTH);
        let left = (BANNER_WIDTH - len) / 2;
        let right = BANNER_WIDTH - len - left;
        out.push(format!("║{}{}{}║", " ".repeat(left), line, " ".repeat(right)));
    }
    out.push(format!("╚{}╝", "═".repeat(BANNER_WIDTH)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::NpcIntro;

    const DB: &str = r#"{
        "actors": [
            {"id": 1, "fields": [{"title": "Name", "value": "Player"}]},
            {"id": 2, "fields": [{"title": "Name", "value": "Henet"}]}
        ],
        "variables": [
            {"fields": [
                {"title": "Name", "value": "satisfaction"},
                {"title": "Initial Value", "value": "0"},
                {"title": "Description", "value": "Customer mood"}
            ]}
        ],
        "conversations": [
            {"id": 1, "fields": [{"title": "Title", "value": "Prologue"}, {"title": "Description", "value": "Wake up"}],
             "dialogueEntries": [
                {"id": 0, "fields": [{"title": "Title", "value": "START"}],
                 "outgoingLinks": [{"destinationDialogueID": 1, "destinationConversationID": 1}]},
                {"id": 1, "fields": [{"title": "Actor", "value": "2"}, {"title": "Dialogue Text", "value": "Sign here."}]}
             ]},
            {"id": 2, "fields": [{"title": "Title", "value": "Orphan"}],
             "dialogueEntries": [{"id": 0, "fields": []}]}
        ]
    }"#;

    fn database() -> DialogueDatabase {
        DialogueDatabase::parse_json(DB).unwrap()
    }

    #[test]
    fn conversations_keep_database_order() {
        let db = database();
        let style = ScriptStyle::default();
        let doc = ScriptDocument::new(&db, &style);
        let scripts = doc.conversations();
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[0].index, 1);
        assert_eq!(scripts[1].index, 2);
        assert!(scripts[0].warning.is_none());
        assert!(scripts[1].warning.is_some());
        assert!(scripts[1].sections.is_empty());
    }

    #[test]
    fn single_conversation_by_index() {
        let db = database();
        let style = ScriptStyle::default();
        let doc = ScriptDocument::new(&db, &style);
        assert_eq!(doc.conversation(2).map(|s| s.index), Some(2));
        assert!(doc.conversation(0).is_none());
        assert!(doc.conversation(3).is_none());
    }

    #[test]
    fn front_matter_lists_actors_variables_and_chapters() {
        let db = database();
        let mut style = ScriptStyle::default();
        style.npc_intros = vec![
            NpcIntro {
                name: "Henet".to_string(),
                intro: "Runs the company.".to_string(),
            },
            NpcIntro {
                name: "Veer".to_string(),
                intro: "Mysterious.".to_string(),
            },
        ];
        let text = ScriptDocument::new(&db, &style).render();
        assert!(text.contains("  • [1] Player (player)"));
        assert!(text.contains("  • [2] Henet (NPC)"));
        assert!(text.contains("  ● Henet: Runs the company."));
        assert!(!text.contains("Veer"));
        assert!(text.contains("  • satisfaction = 0\n    Note: Customer mood"));
        assert!(text.contains("  1. Prologue (2 dialogue nodes)\n     └─ Wake up"));
        assert!(text.contains("  2. Orphan (1 dialogue nodes)"));
        assert!(text.contains("# Chapter 1: Prologue"));
        assert!(text.contains("    ● [Henet] Sign here."));
        assert!(text.contains("  [Warning: no START node found]"));
        assert!(text.find("# Chapter 1").unwrap() < text.find("# Chapter 2").unwrap());
    }

    #[test]
    fn banner_lines_have_equal_width() {
        let lines = banner(&["TITLE".to_string(), String::new()]);
        assert_eq!(lines.len(), 4);
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == BANNER_WIDTH + 2));
        assert!(lines[1].contains("TITLE"));
    }
}
