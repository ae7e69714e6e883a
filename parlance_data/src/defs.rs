use serde::{Deserialize, Serialize};

/// Stable identifier used for actions, entities and directions.
pub type Id = String;

/// Top-level lexicon file: everything a story or extension contributes to the parser.
///
/// All sections are optional so a story can ship only the vocabulary it adds.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LexiconDef {
    /// Provenance label recorded on every registered entry (e.g. "story", "extension:music").
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub verbs: Vec<VerbDef>,
    #[serde(default)]
    pub directions: Vec<DirectionDef>,
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    #[serde(default)]
    pub prepositions: Vec<String>,
    #[serde(default)]
    pub adjectives: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<PatternDef>,
}

fn default_source() -> String {
    "story".to_string()
}

/// A set of verb words that all map to the same action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerbDef {
    pub action: Id,
    pub words: Vec<String>,
    #[serde(default)]
    pub prepositions: Vec<String>,
}

/// Words and abbreviations naming one direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectionDef {
    pub direction: Id,
    pub words: Vec<String>,
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

/// Nouns and adjectives that refer to a single world entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityDef {
    pub id: Id,
    pub nouns: Vec<String>,
    #[serde(default)]
    pub adjectives: Vec<String>,
    #[serde(default = "default_entity_priority")]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub in_scope: bool,
}

fn default_entity_priority() -> i32 {
    50
}

fn default_true() -> bool {
    true
}

/// Where a grammar pattern came from; mirrors the engine's pattern categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PatternCategoryDef {
    Standard,
    Library,
    #[default]
    Custom,
    System,
}

/// Declarative grammar pattern as authored, e.g. `"put|place <noun:held> on <noun:supporter>"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternDef {
    pub template: String,
    pub action: Id,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub category: PatternCategoryDef,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl PatternDef {
    /// Convenience constructor for a custom pattern with default settings.
    pub fn new(template: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            action: action.into(),
            priority: None,
            category: PatternCategoryDef::Custom,
            aliases: Vec::new(),
            enabled: true,
        }
    }
}
