use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::record::{field_value, ActorRecord};

/// How a speaking actor is presented in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// Narration, cutscenes, captions and other non-character output.
    System,
    /// The player-controlled character.
    Player,
    /// Any other character.
    Npc,
}

/// Classifies actor names against configurable name sets.
///
/// System names take precedence over player names when a name is in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorClassifier {
    pub system: FxHashSet<String>,
    pub player: FxHashSet<String>,
}

impl Default for ActorClassifier {
    fn default() -> Self {
        Self::new(
            [
                "Narrator",
                "Animation",
                "Cutscene",
                "Character Intro",
                "Caption",
                "Document",
                "Tutorial",
            ],
            ["Player"],
        )
    }
}

impl ActorClassifier {
    pub fn new<S, P>(system: S, player: P) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            system: system.into_iter().map(Into::into).collect(),
            player: player.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, name: &str) -> ActorKind {
        if self.system.contains(name) {
            ActorKind::System
        } else if self.player.contains(name) {
            ActorKind::Player
        } else {
            ActorKind::Npc
        }
    }
}

/// Actor ID to display name lookup, in database order.
#[derive(Debug, Clone, Default)]
pub struct ActorRoster {
    actors: Vec<(String, String)>,
    /// Actor ID to position in `actors`.
    index: FxHashMap<String, usize>,
}

impl ActorRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[ActorRecord]) -> Self {
        let mut roster = Self::new();
        for record in records {
            roster.insert(record.id.to_string(), field_value(&record.fields, "Name"));
        }
        roster
    }

    /// Register an actor. A repeated ID replaces the earlier name in place.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let id = id.into();
        let name = name.into();
        match self.index.get(&id) {
            Some(&pos) => self.actors[pos].1 = name,
            None => {
                self.index.insert(id.clone(), self.actors.len());
                self.actors.push((id, name));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&pos| self.actors[pos].1.as_str())
    }

    /// Display name for an actor ID, `Unknown(<id>)` when not registered.
    pub fn name_of(&self, id: &str) -> String {
        match self.get(id) {
            Some(name) => name.to_string(),
            None => format!("Unknown({})", id),
        }
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.actors.iter().any(|(_, n)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.actors.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::record::Field;

    #[test]
    fn classify_three_ways() {
        let classifier = ActorClassifier::default();
        assert_eq!(classifier.classify("Narrator"), ActorKind::System);
        assert_eq!(classifier.classify("Player"), ActorKind::Player);
        assert_eq!(classifier.classify("Receptionist"), ActorKind::Npc);
        assert_eq!(classifier.classify(""), ActorKind::Npc);
    }

    #[test]
    fn classifier_sets_are_overridable() {
        let classifier = ActorClassifier::new(["旁白", "过场"], ["Barks"]);
        assert_eq!(classifier.classify("旁白"), ActorKind::System);
        assert_eq!(classifier.classify("Barks"), ActorKind::Player);
        assert_eq!(classifier.classify("Narrator"), ActorKind::Npc);
    }

    #[test]
    fn system_wins_over_player() {
        let classifier = ActorClassifier::new(["Voice"], ["Voice"]);
        assert_eq!(classifier.classify("Voice"), ActorKind::System);
    }

    #[test]
    fn roster_from_records_keeps_order() {
        let records = vec![
            ActorRecord {
                id: 2,
                fields: vec![Field {
                    title: "Name".to_string(),
                    value: "Henet".to_string(),
                }],
            },
            ActorRecord {
                id: 1,
                fields: vec![Field {
                    title: "Name".to_string(),
                    value: "Player".to_string(),
                }],
            },
        ];
        let roster = ActorRoster::from_records(&records);
        let ids: Vec<&str> = roster.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(roster.name_of("2"), "Henet");
        assert_eq!(roster.name_of("9"), "Unknown(9)");
        assert!(roster.contains_name("Player"));
    }

    #[test]
    fn roster_insert_replaces_in_place() {
        let mut roster = ActorRoster::new();
        roster.insert("1", "Tom");
        roster.insert("2", "Veer");
        roster.insert("1", "Old Tom");
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("1"), Some("Old Tom"));
        assert_eq!(roster.get("2"), Some("Veer"));
        assert_eq!(roster.get("3"), None);
        let names: Vec<&str> = roster.iter().map(|(_, name)| name).collect();
        assert_eq!(names, vec!["Old Tom", "Veer"]);
    }
}
