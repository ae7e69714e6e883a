//! Disambiguator
//!
//! Turns the matcher's candidates into one winner or one structured error:
//! 1. no candidates at all is "no verb" when no token could be a verb, else "pattern mismatch"
//! 2. every token without vocabulary yields an unknown-word diagnostic, fatal or not
//! 3. survivors are stable-sorted by confidence, highest first
//! 4. anything below the minimum confidence is dropped
//! 5. the first survivor wins; a tie with a different action is reported as ambiguous

use log::trace;

use crate::command::CandidateCommand;
use crate::error::{ParseError, ParseErrorKind};
use crate::language::{LanguageProvider, error_message};
use crate::matcher::MatchOutcome;
use crate::tokenizer::Token;
use crate::vocabulary::PartOfSpeech;

/// Result of ranking, with everything the debug channel and the caller may want to see.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub result: Result<CandidateCommand, ParseError>,
    /// Surviving candidates, best first.
    pub ranked: Vec<CandidateCommand>,
    /// How many candidates fell below the threshold.
    pub filtered_out: usize,
    /// Non-fatal problems: unknown words and ties.
    pub diagnostics: Vec<ParseError>,
}

impl Selection {
    /// Short label describing why the winner (or failure) came about.
    pub fn reason(&self) -> &'static str {
        match &self.result {
            Ok(_) if self.ranked.len() == 1 => "single_candidate",
            Ok(_) if self.diagnostics.iter().any(|d| d.kind.is_ambiguous()) => "tie_broken_by_shape_order",
            Ok(_) => "highest_confidence",
            Err(err) => err.kind.code(),
        }
    }
}

/// Rank candidates and pick one.
///
/// `all_tokens` is the full token list (articles included) used for unknown-word diagnostics;
/// `matched_tokens` is what the matcher actually saw and decides between no-verb and mismatch.
pub fn disambiguate(
    outcome: MatchOutcome,
    all_tokens: &[Token],
    matched_tokens: &[Token],
    min_confidence: f64,
    language: &dyn LanguageProvider,
) -> Selection {
    let mut diagnostics: Vec<ParseError> = all_tokens
        .iter()
        .filter(|t| t.is_unknown())
        .map(|t| {
            ParseError::new(
                ParseErrorKind::UnknownWord,
                error_message(language, ParseErrorKind::UnknownWord, Some(&t.word)),
            )
            .with_word(&t.word, t.position)
        })
        .collect();

    if !outcome.any_matched() {
        // a mismatch names the verb the player used; no-verb names whatever came first
        let verb = matched_tokens.iter().find(|t| t.has(PartOfSpeech::Verb));
        let (kind, culprit) = match verb {
            Some(verb) => (ParseErrorKind::PatternMismatch, Some(verb)),
            None => (ParseErrorKind::NoVerb, matched_tokens.first()),
        };
        let mut error = ParseError::new(kind, error_message(language, kind, culprit.map(|t| t.word.as_str())));
        if let Some(token) = culprit {
            error = error.with_word(&token.word, token.position);
        }
        trace!("no shape matched: {kind}");
        return Selection {
            result: Err(error),
            ranked: Vec::new(),
            filtered_out: 0,
            diagnostics,
        };
    }

    let mut ranked = outcome.candidates;
    // sort_by is stable: equal confidence keeps shape order, then generation order
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let before = ranked.len();
    ranked.retain(|c| c.confidence >= min_confidence);
    let filtered_out = before - ranked.len();

    let Some(best) = ranked.first().cloned() else {
        let kind = ParseErrorKind::BelowThreshold;
        let error = ParseError::new(kind, error_message(language, kind, None));
        return Selection {
            result: Err(error),
            ranked,
            filtered_out,
            diagnostics,
        };
    };

    if let Some(runner_up) = ranked.get(1)
        && runner_up.confidence.total_cmp(&best.confidence).is_eq()
        && runner_up.action != best.action
    {
        let verb = matched_tokens.first();
        let mut diag = ParseError::new(
            ParseErrorKind::Ambiguous,
            error_message(language, ParseErrorKind::Ambiguous, verb.map(|t| t.word.as_str())),
        );
        if let Some(token) = verb {
            diag = diag.with_word(&token.word, token.position);
        }
        diagnostics.push(diag);
    }

    trace!(
        "selected {} ({}, confidence {:.1}) from {} candidate(s)",
        best.action,
        best.shape,
        best.confidence,
        ranked.len()
    );
    Selection {
        result: Ok(best),
        ranked,
        filtered_out,
        diagnostics,
    }
}
