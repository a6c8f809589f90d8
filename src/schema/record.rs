/// Raw records of an exported dialogue database, as they appear in JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A titled value attached to actors, variables, conversations and entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub value: String,
}

/// Look up a field by exact title. A missing field reads as empty.
pub fn field_value<'a>(fields: &'a [Field], title: &str) -> &'a str {
    fields
        .iter()
        .find(|field| field.title == title)
        .map(|field| field.value.as_str())
        .unwrap_or("")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(rename = "destinationDialogueID")]
    pub destination_dialogue_id: i64,
    #[serde(rename = "destinationConversationID")]
    pub destination_conversation_id: i64,
    #[serde(rename = "isConnector", default)]
    pub is_connector: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: i64,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(rename = "conditionsString", default)]
    pub conditions_string: String,
    #[serde(rename = "userScript", default)]
    pub user_script: String,
    #[serde(rename = "outgoingLinks", default)]
    pub outgoing_links: Vec<LinkRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: i64,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(rename = "dialogueEntries", default)]
    pub dialogue_entries: Vec<EntryRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub id: i64,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRecord {
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A game variable as listed in the script header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    pub name: String,
    pub initial_value: String,
    pub description: String,
}

impl VariableRecord {
    pub fn info(&self) -> VariableInfo {
        VariableInfo {
            name: field_value(&self.fields, "Name").to_string(),
            initial_value: field_value(&self.fields, "Initial Value").to_string(),
            description: field_value(&self.fields, "Description").to_string(),
        }
    }
}

/// The whole exported database: actors, variables and conversations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueDatabase {
    #[serde(default)]
    pub actors: Vec<ActorRecord>,
    #[serde(default)]
    pub variables: Vec<VariableRecord>,
    #[serde(default)]
    pub conversations: Vec<ConversationRecord>,
}

impl DialogueDatabase {
    /// Load a database from an exported JSON file.
    pub fn load_from_json(path: &Path) -> Result<DialogueDatabase, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_json(&contents)
    }

    /// Parse a database from a JSON string. A leading byte-order mark is skipped.
    pub fn parse_json(input: &str) -> Result<DialogueDatabase, LoadError> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Ok(serde_json::from_str(input)?)
    }

    pub fn variables(&self) -> Vec<VariableInfo> {
        self.variables.iter().map(VariableRecord::info).collect()
    }
}
