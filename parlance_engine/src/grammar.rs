//! Grammar pattern registry types.
//!
//! Patterns are declarative templates such as `"put|place <noun:held> on <noun:supporter>"`:
//! a leading set of verb alternatives, optional literal words (also `|`-separated), and
//! placeholders. Templates are parsed once when registered; the resulting elements and
//! scope hints are stored alongside the pattern.
//!
//! Pattern priority only orders retrieval from the registry. It has nothing to do with
//! the confidence the matcher assigns to a candidate command.

pub mod registry;
pub mod standard;
mod template;

use std::fmt;

use parlance_data::{PatternCategoryDef, PatternDef};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use variantly::Variantly;

pub use registry::{GrammarRegistry, GrammarStats, PatternId, RegisteredPattern};
pub use standard::{minimal_grammar, standard_grammar};
pub use template::{ParsedTemplate, parse_template};

/// Priority used when a pattern does not set one.
pub const DEFAULT_PATTERN_PRIORITY: i32 = 50;

/// Origin of a pattern. Standard patterns cannot be removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "lowercase")]
pub enum PatternCategory {
    Standard,
    Library,
    Custom,
    System,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 4] = [
        PatternCategory::Standard,
        PatternCategory::Library,
        PatternCategory::Custom,
        PatternCategory::System,
    ];
}

impl From<PatternCategoryDef> for PatternCategory {
    fn from(value: PatternCategoryDef) -> Self {
        match value {
            PatternCategoryDef::Standard => PatternCategory::Standard,
            PatternCategoryDef::Library => PatternCategory::Library,
            PatternCategoryDef::Custom => PatternCategory::Custom,
            PatternCategoryDef::System => PatternCategory::System,
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternCategory::Standard => "standard",
            PatternCategory::Library => "library",
            PatternCategory::Custom => "custom",
            PatternCategory::System => "system",
        };
        f.write_str(name)
    }
}

/// Semantic precondition attached to a noun placeholder (`<noun:held>`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeHintKind {
    Held,
    Container,
    Supporter,
    Person,
    Door,
    Openable,
    Lockable,
    Visible,
    Reachable,
    Worn,
    Wearable,
    Edible,
    Enterable,
    SwitchedOn,
    Switchable,
    /// Story-defined hint the interpreter passes through untouched.
    Other(String),
}

impl ScopeHintKind {
    /// Classify a hint keyword. Matching ignores case so `switchedOn` and `switchedon` agree.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_lowercase().as_str() {
            "held" => ScopeHintKind::Held,
            "container" => ScopeHintKind::Container,
            "supporter" => ScopeHintKind::Supporter,
            "person" => ScopeHintKind::Person,
            "door" => ScopeHintKind::Door,
            "openable" => ScopeHintKind::Openable,
            "lockable" => ScopeHintKind::Lockable,
            "visible" => ScopeHintKind::Visible,
            "reachable" => ScopeHintKind::Reachable,
            "worn" => ScopeHintKind::Worn,
            "wearable" => ScopeHintKind::Wearable,
            "edible" => ScopeHintKind::Edible,
            "enterable" => ScopeHintKind::Enterable,
            "switchedon" | "switched_on" => ScopeHintKind::SwitchedOn,
            "switchable" => ScopeHintKind::Switchable,
            other => ScopeHintKind::Other(other.to_string()),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            ScopeHintKind::Held => "held",
            ScopeHintKind::Container => "container",
            ScopeHintKind::Supporter => "supporter",
            ScopeHintKind::Person => "person",
            ScopeHintKind::Door => "door",
            ScopeHintKind::Openable => "openable",
            ScopeHintKind::Lockable => "lockable",
            ScopeHintKind::Visible => "visible",
            ScopeHintKind::Reachable => "reachable",
            ScopeHintKind::Worn => "worn",
            ScopeHintKind::Wearable => "wearable",
            ScopeHintKind::Edible => "edible",
            ScopeHintKind::Enterable => "enterable",
            ScopeHintKind::SwitchedOn => "switchedon",
            ScopeHintKind::Switchable => "switchable",
            ScopeHintKind::Other(keyword) => keyword,
        }
    }
}

impl fmt::Display for ScopeHintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Scope hint for one noun placeholder. Checked downstream, never by the interpreter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeHint {
    /// Ordinal of the noun placeholder in the template (0 = first noun).
    pub position: usize,
    pub hint: ScopeHintKind,
    #[serde(default)]
    pub required: bool,
}

/// One structural piece of a parsed template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternElement {
    /// Literal word alternatives; the first element of every template is the verb.
    Words(Vec<String>),
    /// `<noun>` / `<second>` with an optional hint.
    Noun { position: usize, hint: Option<ScopeHintKind> },
    /// `<direction>`
    Direction,
    /// `<text>` / `<topic>`: free text passed through unresolved.
    Text,
}

impl PatternElement {
    /// Whether this element consumes an object from the input.
    pub fn is_slot(&self) -> bool {
        !matches!(self, PatternElement::Words(_))
    }

    pub fn accepts_word(&self, word: &str) -> bool {
        match self {
            PatternElement::Words(words) => words.iter().any(|w| w == word),
            _ => false,
        }
    }
}

/// A pattern as submitted to the registry. Build one with [`GrammarPattern::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarPattern {
    pub template: String,
    pub action: String,
    /// `None` takes the registry's configured default.
    #[serde(default)]
    pub priority: Option<i32>,
    pub category: PatternCategory,
    /// Explicit hints; when empty they are parsed from the template.
    #[serde(default)]
    pub scope_hints: Vec<ScopeHint>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl GrammarPattern {
    /// A custom pattern with default priority, enabled, hints parsed from the template.
    pub fn new(template: &str, action: &str) -> Self {
        Self {
            template: template.to_string(),
            action: action.to_string(),
            priority: None,
            category: PatternCategory::Custom,
            scope_hints: Vec::new(),
            aliases: Vec::new(),
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: PatternCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| (*a).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_scope_hints(mut self, hints: Vec<ScopeHint>) -> Self {
        self.scope_hints = hints;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl From<&PatternDef> for GrammarPattern {
    fn from(def: &PatternDef) -> Self {
        Self {
            template: def.template.clone(),
            action: def.action.clone(),
            priority: def.priority,
            category: def.category.into(),
            scope_hints: Vec::new(),
            aliases: def.aliases.clone(),
            enabled: def.enabled,
        }
    }
}

/// Registry-wide settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    pub allow_custom_patterns: bool,
    pub default_priority: i32,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            allow_custom_patterns: true,
            default_priority: DEFAULT_PATTERN_PRIORITY,
        }
    }
}

/// Failures from pattern registration and removal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("pattern for action '{action}' has an empty template")]
    EmptyTemplate { action: String },
    #[error("pattern '{template}' has no action id")]
    MissingAction { template: String },
    #[error("custom patterns are disabled (rejected '{template}')")]
    CustomPatternsDisabled { template: String },
    #[error("standard pattern '{template}' => '{action}' cannot be removed")]
    ProtectedPattern { template: String, action: String },
    #[error("kept {kept} standard pattern(s) for '{action}' after removing {removed} other(s)")]
    StandardPatternsKept { action: String, removed: usize, kept: usize },
    #[error("no pattern '{template}' => '{action}' is registered")]
    PatternNotFound { template: String, action: String },
    #[error("invalid pattern template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },
}

/// Lower-case and collapse whitespace; the canonical form used for indexing and lookups.
pub fn normalize_template(template: &str) -> String {
    template.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
