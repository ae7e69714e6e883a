//! Debug channel
//!
//! Structured events describing each stage of a parse. They are handed to an optional
//! caller-supplied callback and never feed back into parsing.

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::command::{CandidateCommand, Shape};
use crate::error::ParseError;
use crate::matcher::ShapeAttempt;
use crate::tokenizer::Token;

/// Callback type accepted by [`crate::Parser::set_debug_callback`].
pub type DebugCallback = Box<dyn Fn(&DebugEvent)>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DebugEvent {
    pub id: Uuid,
    /// UTC, RFC 3339.
    pub timestamp: String,
    pub payload: DebugPayload,
}

impl DebugEvent {
    pub fn new(payload: DebugPayload) -> Self {
        let timestamp = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            timestamp,
            payload,
        }
    }

    /// Serialize for log files and tooling.
    ///
    /// # Errors
    /// Only if serialization itself fails, which plain data never does in practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn kind(&self) -> &'static str {
        match self.payload {
            DebugPayload::Tokenize { .. } => "tokenize",
            DebugPayload::PatternMatch { .. } => "pattern_match",
            DebugPayload::CandidateSelection { .. } => "candidate_selection",
            DebugPayload::ParseFailure { .. } => "parse_failure",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DebugPayload {
    Tokenize {
        input: String,
        tokens: Vec<TokenSummary>,
    },
    PatternMatch {
        input: String,
        attempts: Vec<ShapeAttempt>,
        total_candidates: usize,
    },
    CandidateSelection {
        ranked: Vec<CandidateSummary>,
        selected: Option<CandidateSummary>,
        filtered_out: usize,
        reason: String,
    },
    ParseFailure {
        input: String,
        error: ParseError,
    },
}

/// Compact view of a token for the debug channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenSummary {
    pub word: String,
    pub position: usize,
    /// `part_of_speech:maps_to` pairs.
    pub candidates: Vec<String>,
}

impl From<&Token> for TokenSummary {
    fn from(token: &Token) -> Self {
        Self {
            word: token.word.clone(),
            position: token.position,
            candidates: token
                .candidates
                .iter()
                .map(|c| format!("{:?}:{}", c.part_of_speech, c.maps_to).to_lowercase())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub action: String,
    pub shape: Shape,
    pub confidence: f64,
    pub direct: Option<String>,
    pub preposition: Option<String>,
    pub indirect: Option<String>,
}

impl From<&CandidateCommand> for CandidateSummary {
    fn from(candidate: &CandidateCommand) -> Self {
        Self {
            action: candidate.action.clone(),
            shape: candidate.shape,
            confidence: candidate.confidence,
            direct: candidate.direct.as_ref().map(|np| np.text.clone()),
            preposition: candidate.preposition.clone(),
            indirect: candidate.indirect.as_ref().map(|np| np.text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn events_get_distinct_ids_and_timestamps() {
        let a = DebugEvent::new(DebugPayload::Tokenize {
            input: "look".into(),
            tokens: Vec::new(),
        });
        let b = DebugEvent::new(DebugPayload::Tokenize {
            input: "look".into(),
            tokens: Vec::new(),
        });
        assert_ne!(a.id, b.id);
        assert!(!a.timestamp.is_empty());
        assert_eq!(a.kind(), "tokenize");
    }

    #[test]
    fn failure_serializes_with_kind_tag() {
        let event = DebugEvent::new(DebugPayload::ParseFailure {
            input: "xyzzy".into(),
            error: ParseError::new(ParseErrorKind::NoVerb, "no verb").with_word("xyzzy", 0),
        });
        let json = event.to_json().unwrap();
        assert!(json.contains("\"type\":\"parse_failure\""));
        assert!(json.contains("\"no_verb\""));
        assert!(json.contains("xyzzy"));
    }
}
