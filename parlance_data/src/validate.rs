use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or conflicting entries in a `LexiconDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    EmptyValue { kind: &'static str, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} '{id}'")
            },
            ValidationError::EmptyValue { kind, context } => {
                write!(f, "empty {kind} ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a lexicon for empty fields, duplicates and words the tokenizer can never match.
///
/// ```
/// use parlance_data::{EntityDef, LexiconDef, PatternDef, VerbDef, validate_lexicon};
///
/// let lexicon = LexiconDef {
///     verbs: vec![VerbDef {
///         action: "story.action.xyzzying".into(),
///         words: vec!["xyzzy".into()],
///         prepositions: Vec::new(),
///     }],
///     entities: vec![EntityDef {
///         id: "brass_lamp".into(),
///         nouns: vec!["lamp".into(), "lantern".into()],
///         adjectives: vec!["brass".into()],
///         priority: 50,
///         in_scope: true,
///     }],
///     patterns: vec![PatternDef::new("xyzzy", "story.action.xyzzying")],
///     ..LexiconDef::default()
/// };
/// assert!(validate_lexicon(&lexicon).is_empty());
/// ```
pub fn validate_lexicon(lexicon: &LexiconDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for verb in &lexicon.verbs {
        let context = format!("verbs for action '{}'", verb.action);
        if verb.action.trim().is_empty() {
            errors.push(ValidationError::EmptyValue {
                kind: "action id",
                context: format!("verb group {:?}", verb.words),
            });
        }
        check_words("verb", &verb.words, &context, &mut errors);
        check_single_words(&verb.prepositions, &context, &mut errors);
    }

    let mut directions = HashSet::new();
    track_ids(
        "direction",
        lexicon.directions.iter().map(|d| d.direction.as_str()),
        &mut directions,
        &mut errors,
    );
    for dir in &lexicon.directions {
        let context = format!("direction '{}'", dir.direction);
        check_words("direction word", &dir.words, &context, &mut errors);
        check_single_words(&dir.abbreviations, &context, &mut errors);
    }

    let mut entities = HashSet::new();
    track_ids(
        "entity",
        lexicon.entities.iter().map(|e| e.id.as_str()),
        &mut entities,
        &mut errors,
    );
    for entity in &lexicon.entities {
        let context = format!("entity '{}'", entity.id);
        if entity.id.trim().is_empty() {
            errors.push(ValidationError::EmptyValue {
                kind: "entity id",
                context: format!("entity nouns {:?}", entity.nouns),
            });
        }
        check_words("noun", &entity.nouns, &context, &mut errors);
        check_single_words(&entity.adjectives, &context, &mut errors);
    }

    check_single_words(&lexicon.prepositions, "prepositions", &mut errors);
    check_single_words(&lexicon.adjectives, "adjectives", &mut errors);

    let mut patterns = HashSet::new();
    for pattern in &lexicon.patterns {
        if pattern.template.trim().is_empty() {
            errors.push(ValidationError::EmptyValue {
                kind: "pattern template",
                context: format!("pattern for action '{}'", pattern.action),
            });
        }
        if pattern.action.trim().is_empty() {
            errors.push(ValidationError::EmptyValue {
                kind: "action id",
                context: format!("pattern '{}'", pattern.template),
            });
        }
        if pattern.category == PatternCategoryDef::Standard {
            errors.push(ValidationError::InvalidValue {
                context: format!(
                    "pattern '{}' uses the standard category, which is reserved for the built-in grammar",
                    pattern.template
                ),
            });
        }
        let key = format!("{} => {}", normalize(&pattern.template), pattern.action);
        if !patterns.insert(key.clone()) {
            errors.push(ValidationError::DuplicateId { kind: "pattern", id: key });
        }
        for alias in &pattern.aliases {
            if alias.trim().is_empty() {
                errors.push(ValidationError::EmptyValue {
                    kind: "pattern alias",
                    context: format!("pattern '{}'", pattern.template),
                });
            }
        }
    }

    errors
}

fn normalize(template: &str) -> String {
    template.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

/// A word list must be non-empty and every word must be a single whitespace-free token.
fn check_words(kind: &'static str, words: &[String], context: &str, errors: &mut Vec<ValidationError>) {
    if words.is_empty() {
        errors.push(ValidationError::EmptyValue {
            kind,
            context: context.to_string(),
        });
    }
    check_single_words(words, context, errors);
}

fn check_single_words(words: &[String], context: &str, errors: &mut Vec<ValidationError>) {
    for word in words {
        let trimmed = word.trim();
        if trimmed.is_empty() {
            errors.push(ValidationError::EmptyValue {
                kind: "word",
                context: context.to_string(),
            });
        } else if trimmed.contains(char::is_whitespace) {
            errors.push(ValidationError::InvalidValue {
                context: format!("'{trimmed}' in {context} spans several words and can never match a single token"),
            });
        }
    }
}
