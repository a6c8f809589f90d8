//! WASM bindings for dialogue-script: powers the in-browser script viewer.

use wasm_bindgen::prelude::*;

use dialogue_script::schema::node::Conversation;
use dialogue_script::{DialogueDatabase, ScriptDocument, ScriptStyle};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct ConversationInfo {
    index: usize,
    id: i64,
    title: String,
    nodes: usize,
}

#[derive(serde::Serialize)]
struct ConversationStats {
    index: usize,
    scenes: usize,
    rendered_nodes: usize,
    missing_entry: bool,
}

// ---------------------------------------------------------------------------
// One-shot rendering
// ---------------------------------------------------------------------------
fn load(json: &str, style_ron: Option<String>) -> Result<(DialogueDatabase, ScriptStyle), JsValue> {
    let database = DialogueDatabase::parse_json(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid database JSON: {e}")))?;
    let style = match style_ron {
        Some(ref ron) => ScriptStyle::parse_ron(ron)
            .map_err(|e| JsValue::from_str(&format!("Invalid style: {e}")))?,
        None => ScriptStyle::default(),
    };
    Ok((database, style))
}

/// Render a whole database export to script text.
#[wasm_bindgen]
pub fn render_script(json: &str, style_ron: Option<String>) -> Result<String, JsValue> {
    let (database, style) = load(json, style_ron)?;
    Ok(ScriptDocument::new(&database, &style).render())
}

/// Render one conversation (1-based index) of a database export.
#[wasm_bindgen]
pub fn render_conversation(
    json: &str,
    index: usize,
    style_ron: Option<String>,
) -> Result<String, JsValue> {
    let (database, style) = load(json, style_ron)?;
    ScriptDocument::new(&database, &style)
        .conversation(index)
        .map(|script| script.to_string())
        .ok_or_else(|| JsValue::from_str(&format!("No conversation at index {index}")))
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct ScriptViewer {
    database: DialogueDatabase,
    style: ScriptStyle,
}

#[wasm_bindgen]
impl ScriptViewer {
    /// Load a database export, optionally with a RON style.
    #[wasm_bindgen(constructor)]
    pub fn new(database_json: &str, style_ron: Option<String>) -> Result<ScriptViewer, JsError> {
        let database = DialogueDatabase::parse_json(database_json)
            .map_err(|e| JsError::new(&format!("Invalid database JSON: {e}")))?;
        let style = match style_ron {
            Some(ref ron) => ScriptStyle::parse_ron(ron)
                .map_err(|e| JsError::new(&format!("Invalid style: {e}")))?,
            None => ScriptStyle::default(),
        };
        Ok(ScriptViewer { database, style })
    }

    /// The full script document.
    pub fn render(&self) -> String {
        ScriptDocument::new(&self.database, &self.style).render()
    }

    /// One conversation's script by 1-based index.
    pub fn render_conversation(&self, index: usize) -> Result<String, JsError> {
        ScriptDocument::new(&self.database, &self.style)
            .conversation(index)
            .map(|script| script.to_string())
            .ok_or_else(|| JsError::new(&format!("No conversation at index {index}")))
    }

    /// JSON array of the conversations in the database.
    pub fn conversations(&self) -> Result<String, JsError> {
        let infos: Vec<ConversationInfo> = self
            .database
            .conversations
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let conversation = Conversation::from(record);
                ConversationInfo {
                    index: i + 1,
                    id: conversation.id.0,
                    title: conversation.title,
                    nodes: conversation.nodes.len(),
                }
            })
            .collect();
        serde_json::to_string(&infos)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// JSON array with scene and coverage counts per conversation.
    pub fn stats(&self) -> Result<String, JsError> {
        let stats: Vec<ConversationStats> = ScriptDocument::new(&self.database, &self.style)
            .conversations()
            .iter()
            .map(|script| ConversationStats {
                index: script.index,
                scenes: script.sections.len(),
                rendered_nodes: script.visit_order.len(),
                missing_entry: script.warning.is_some(),
            })
            .collect();
        serde_json::to_string(&stats)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }
}
