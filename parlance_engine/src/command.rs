//! Command module
//!
//! Describes the command structures produced by the interpreter: the ephemeral
//! `CandidateCommand`s generated while matching, and the final `ParsedCommand`
//! handed to action resolution.
use serde::{Deserialize, Serialize};
use variantly::Variantly;

use crate::error::ParseError;
use crate::grammar::ScopeHint;

/// The five grammatical shapes the matcher recognizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// `go north` without the verb: `north`
    DirectionOnly,
    /// `look`
    VerbOnly,
    /// `take brass lamp`
    VerbNoun,
    /// `look at painting`
    VerbPrepNoun,
    /// `put sword in chest`
    VerbNounPrepNoun,
}

impl Shape {
    /// All shapes, in the order the matcher tries them (most structure first).
    pub const ALL: [Shape; 5] = [
        Shape::VerbNounPrepNoun,
        Shape::VerbPrepNoun,
        Shape::VerbNoun,
        Shape::VerbOnly,
        Shape::DirectionOnly,
    ];

    /// Fixed confidence for a candidate of this shape.
    ///
    /// Decreases with structural ambiguity and is independent of grammar pattern priority.
    pub const fn confidence(self) -> f64 {
        match self {
            Shape::VerbOnly => 1.0,
            Shape::DirectionOnly => 0.9,
            Shape::VerbNoun => 0.8,
            Shape::VerbPrepNoun => 0.7,
            Shape::VerbNounPrepNoun => 0.6,
        }
    }

    /// Stable snake_case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Shape::DirectionOnly => "direction_only",
            Shape::VerbOnly => "verb_only",
            Shape::VerbNoun => "verb_noun",
            Shape::VerbPrepNoun => "verb_prep_noun",
            Shape::VerbNounPrepNoun => "verb_noun_prep_noun",
        }
    }

    /// Minimum number of (non-article) tokens this shape needs.
    pub const fn min_tokens(self) -> usize {
        match self {
            Shape::DirectionOnly | Shape::VerbOnly => 1,
            Shape::VerbNoun => 2,
            Shape::VerbPrepNoun => 3,
            Shape::VerbNounPrepNoun => 4,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Quantifier and reference flags noticed inside the noun phrases.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFlags {
    /// An "all"-word appeared (`take all`).
    pub all: bool,
    /// An "except"-word appeared (`take all but lamp`).
    pub except: bool,
    /// A pronoun stood in for a noun (`take it`).
    pub pronoun: bool,
}

impl CommandFlags {
    pub fn any(&self) -> bool {
        self.all || self.except || self.pronoun
    }

    #[must_use]
    pub fn merge(self, other: CommandFlags) -> CommandFlags {
        CommandFlags {
            all: self.all || other.all,
            except: self.except || other.except,
            pronoun: self.pronoun || other.pronoun,
        }
    }
}

/// A noun phrase as typed plus everything it might refer to.
///
/// `candidates` are vocabulary-mapped ids, or the raw words themselves when nothing in the
/// phrase was a known noun; the scope resolver matches them against entities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NounPhrase {
    pub text: String,
    pub candidates: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

/// One structurally valid reading of the input. Lives only for a single parse call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateCommand {
    pub action: String,
    pub direct: Option<NounPhrase>,
    pub preposition: Option<String>,
    pub indirect: Option<NounPhrase>,
    pub original_input: String,
    pub shape: Shape,
    pub confidence: f64,
    pub flags: CommandFlags,
}

impl CandidateCommand {
    pub fn new(action: &str, shape: Shape, original_input: &str) -> Self {
        Self {
            action: action.to_string(),
            direct: None,
            preposition: None,
            indirect: None,
            original_input: original_input.to_string(),
            shape,
            confidence: shape.confidence(),
            flags: CommandFlags::default(),
        }
    }

    /// Number of object slots filled (direction-only counts none: the direction is the verb).
    pub fn object_count(&self) -> usize {
        if self.shape.is_direction_only() {
            return 0;
        }
        usize::from(self.direct.is_some()) + usize::from(self.indirect.is_some())
    }
}

/// Diagnostic extras attached to a successful parse.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParseExtras {
    pub shape: Shape,
    pub confidence: f64,
    pub flags: CommandFlags,
    /// Template of the highest-priority registry pattern consistent with the result, if any.
    pub pattern: Option<String>,
    /// Action that pattern is filed under. It can differ from `action` (`put .. in ..` is
    /// filed under inserting) and is only a hint; the parsed action is never replaced.
    pub pattern_action: Option<String>,
    /// Scope hints from that pattern, for the downstream resolver.
    pub scope_hints: Vec<ScopeHint>,
    /// Non-fatal problems noticed on the way (unknown words absorbed by literal fallback, ties).
    pub diagnostics: Vec<ParseError>,
}

/// Final output of the interpreter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParsedCommand {
    pub action: String,
    pub raw_input: String,
    pub direct_object: Option<NounPhrase>,
    pub preposition: Option<String>,
    pub indirect_object: Option<NounPhrase>,
    pub extras: ParseExtras,
}

impl ParsedCommand {
    /// Build the final command from the winning candidate.
    pub fn from_candidate(candidate: CandidateCommand) -> Self {
        Self {
            action: candidate.action,
            raw_input: candidate.original_input,
            direct_object: candidate.direct,
            preposition: candidate.preposition,
            indirect_object: candidate.indirect,
            extras: ParseExtras {
                shape: candidate.shape,
                confidence: candidate.confidence,
                flags: candidate.flags,
                pattern: None,
                pattern_action: None,
                scope_hints: Vec::new(),
                diagnostics: Vec::new(),
            },
        }
    }

    /// Direct object text, if any.
    pub fn noun_text(&self) -> Option<&str> {
        self.direct_object.as_ref().map(|np| np.text.as_str())
    }

    /// Indirect object text, if any.
    pub fn second_noun_text(&self) -> Option<&str> {
        self.indirect_object.as_ref().map(|np| np.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_ordering_is_fixed() {
        assert!(Shape::VerbNounPrepNoun.confidence() < Shape::VerbPrepNoun.confidence());
        assert!(Shape::VerbPrepNoun.confidence() < Shape::VerbNoun.confidence());
        assert!(Shape::VerbNoun.confidence() < Shape::DirectionOnly.confidence());
        assert!(Shape::DirectionOnly.confidence() < Shape::VerbOnly.confidence());
    }

    #[test]
    fn shape_names_are_snake_case() {
        assert_eq!(Shape::VerbNounPrepNoun.to_string(), "verb_noun_prep_noun");
        assert_eq!(serde_json::to_string(&Shape::DirectionOnly).unwrap(), "\"direction_only\"");
    }

    #[test]
    fn direction_only_fills_no_object_slots() {
        let mut candidate = CandidateCommand::new("if.action.going", Shape::DirectionOnly, "north");
        candidate.direct = Some(NounPhrase {
            text: "north".into(),
            candidates: vec!["north".into()],
            modifiers: Vec::new(),
        });
        assert_eq!(candidate.object_count(), 0);
        assert!((candidate.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn flags_merge() {
        let a = CommandFlags {
            all: true,
            ..CommandFlags::default()
        };
        let b = CommandFlags {
            pronoun: true,
            ..CommandFlags::default()
        };
        let merged = a.merge(b);
        assert!(merged.all && merged.pronoun && !merged.except);
        assert!(merged.any());
    }
}
