//! Parse errors and diagnostics.
//!
//! Callers branch on [`ParseErrorKind`] (or its stable [`ParseErrorKind::code`]),
//! never on the prose message, which comes from the active language's templates.

use serde::Serialize;
use thiserror::Error;
use variantly::Variantly;

/// Machine-readable kind of a parse failure or diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Variantly)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// No token anywhere in the input could be a verb (or direction).
    NoVerb,
    /// The leading word looks like a verb slot but maps to no known action.
    UnknownVerb,
    /// A token had no vocabulary entry at all.
    UnknownWord,
    /// Two surviving candidates were equally good.
    Ambiguous,
    /// Nothing to parse (empty or all-whitespace input, or only articles).
    Incomplete,
    /// A verb was present but no shape fit the rest of the input.
    PatternMismatch,
    /// Candidates existed but none reached the minimum confidence.
    BelowThreshold,
}

impl ParseErrorKind {
    /// Stable code, safe to persist or compare against.
    pub const fn code(self) -> &'static str {
        match self {
            ParseErrorKind::NoVerb => "no_verb",
            ParseErrorKind::UnknownVerb => "unknown_verb",
            ParseErrorKind::UnknownWord => "unknown_word",
            ParseErrorKind::Ambiguous => "ambiguous",
            ParseErrorKind::Incomplete => "incomplete",
            ParseErrorKind::PatternMismatch => "pattern_mismatch",
            ParseErrorKind::BelowThreshold => "below_threshold",
        }
    }

    /// Coarse category for callers that only distinguish a few failure families.
    pub const fn error_code(self) -> ErrorCode {
        match self {
            ParseErrorKind::NoVerb | ParseErrorKind::UnknownVerb | ParseErrorKind::UnknownWord => {
                ErrorCode::UnknownCommand
            },
            ParseErrorKind::Ambiguous => ErrorCode::AmbiguousInput,
            ParseErrorKind::Incomplete | ParseErrorKind::PatternMismatch | ParseErrorKind::BelowThreshold => {
                ErrorCode::InvalidSyntax
            },
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Coarse error families.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnknownCommand,
    AmbiguousInput,
    InvalidSyntax,
}

/// A structured parse failure (or a non-fatal diagnostic attached to a success).
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// The offending word(s), as typed.
    pub words: Vec<String>,
    /// Character offset of the first offending word, when one can be pinned down.
    pub position: Option<usize>,
    /// "Did you mean" material; never filled in by the interpreter itself.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            words: Vec::new(),
            position: None,
            suggestions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_word(mut self, word: &str, position: usize) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }
        self.words.push(word.to_string());
        self
    }

    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_message_not_kind() {
        let err = ParseError::new(ParseErrorKind::NoVerb, "I don't understand that.");
        assert_eq!(err.to_string(), "I don't understand that.");
        assert_eq!(err.kind.code(), "no_verb");
    }

    #[test]
    fn first_word_fixes_position() {
        let err = ParseError::new(ParseErrorKind::UnknownWord, "?")
            .with_word("frob", 5)
            .with_word("zork", 10);
        assert_eq!(err.position, Some(5));
        assert_eq!(err.words, vec!["frob".to_string(), "zork".to_string()]);
    }

    #[test]
    fn kinds_map_to_coarse_codes() {
        assert_eq!(ParseErrorKind::NoVerb.error_code(), ErrorCode::UnknownCommand);
        assert_eq!(ParseErrorKind::Ambiguous.error_code(), ErrorCode::AmbiguousInput);
        assert_eq!(ParseErrorKind::BelowThreshold.error_code(), ErrorCode::InvalidSyntax);
    }

    #[test]
    fn serializes_kind_as_code() {
        let err = ParseError::new(ParseErrorKind::PatternMismatch, "no").with_word("put", 0);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "pattern_mismatch");
        assert_eq!(json["position"], 0);
        assert!(json.get("suggestions").is_none());
    }
}
