//! Pattern Matcher
//!
//! Tries the five fixed shapes against a token sequence (articles already removed) and
//! returns every structurally valid reading. Each shape fixes its own confidence; choosing
//! between readings is the disambiguator's job.
//!
//! Shape rules:
//! - `direction_only`: a single token with a direction interpretation.
//! - `verb_only`: a single token with a verb interpretation.
//! - `verb_noun`: verb then a noun phrase. Skipped when a preposition sits inside the
//!   phrase (anywhere but its last word), since one of the prepositional shapes covers it.
//! - `verb_prep_noun`: verb, a preposition directly after it, then a noun phrase. Later
//!   prepositions are left to `verb_noun_prep_noun`, so an adverb between verb and
//!   preposition (`look carefully at lamp`) reads as a first noun phrase (`carefully`).
//! - `verb_noun_prep_noun`: verb, noun phrase, preposition, noun phrase; every preposition
//!   from the third token up to the second-to-last is tried as the split point.

use log::trace;
use serde::Serialize;

use crate::actions;
use crate::command::{CandidateCommand, CommandFlags, NounPhrase, Shape};
use crate::tokenizer::Token;
use crate::vocabulary::{ALL_MARKER, EXCEPT_MARKER, PartOfSpeech};

/// How one shape fared against the input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShapeAttempt {
    pub shape: Shape,
    /// The input was long enough for this shape to be tried at all.
    pub attempted: bool,
    pub produced: usize,
}

impl ShapeAttempt {
    pub fn matched(&self) -> bool {
        self.produced > 0
    }
}

/// Every candidate from every shape, in shape order, plus per-shape bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub candidates: Vec<CandidateCommand>,
    pub attempts: Vec<ShapeAttempt>,
}

impl MatchOutcome {
    pub fn any_matched(&self) -> bool {
        !self.candidates.is_empty()
    }
}

/// Run all five shapes over `tokens`.
pub fn match_shapes(tokens: &[Token], original_input: &str) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();
    for shape in Shape::ALL {
        let attempted = applies(shape, tokens.len());
        let produced = if attempted {
            match_shape(shape, tokens, original_input)
        } else {
            Vec::new()
        };
        trace!("shape {shape}: {} candidate(s)", produced.len());
        outcome.attempts.push(ShapeAttempt {
            shape,
            attempted,
            produced: produced.len(),
        });
        outcome.candidates.extend(produced);
    }
    outcome
}

fn applies(shape: Shape, token_count: usize) -> bool {
    match shape {
        Shape::DirectionOnly | Shape::VerbOnly => token_count == 1,
        _ => token_count >= shape.min_tokens(),
    }
}

/// Candidates for a single shape. Returns nothing if the token count does not fit.
pub fn match_shape(shape: Shape, tokens: &[Token], original_input: &str) -> Vec<CandidateCommand> {
    if !applies(shape, tokens.len()) {
        return Vec::new();
    }
    match shape {
        Shape::DirectionOnly => direction_only(&tokens[0], original_input),
        Shape::VerbOnly => tokens[0]
            .candidates_of(PartOfSpeech::Verb)
            .map(|verb| CandidateCommand::new(&verb.maps_to, shape, original_input))
            .collect(),
        Shape::VerbNoun => verb_noun(tokens, original_input),
        Shape::VerbPrepNoun => verb_prep_noun(tokens, original_input),
        Shape::VerbNounPrepNoun => verb_noun_prep_noun(tokens, original_input),
    }
}

fn direction_only(token: &Token, original_input: &str) -> Vec<CandidateCommand> {
    token
        .candidates_of(PartOfSpeech::Direction)
        .map(|dir| {
            let mut candidate = CandidateCommand::new(actions::GOING, Shape::DirectionOnly, original_input);
            candidate.direct = Some(NounPhrase {
                text: token.normalized.clone(),
                candidates: vec![dir.maps_to.clone()],
                modifiers: Vec::new(),
            });
            candidate
        })
        .collect()
}

fn verb_noun(tokens: &[Token], original_input: &str) -> Vec<CandidateCommand> {
    let noun_tokens = &tokens[1..];
    let inner_preposition = noun_tokens[..noun_tokens.len() - 1]
        .iter()
        .any(|t| t.has(PartOfSpeech::Preposition));
    if inner_preposition {
        return Vec::new();
    }
    let Some((phrase, flags)) = extract_noun_phrase(noun_tokens) else {
        return Vec::new();
    };
    tokens[0]
        .candidates_of(PartOfSpeech::Verb)
        .map(|verb| {
            let mut candidate = CandidateCommand::new(&verb.maps_to, Shape::VerbNoun, original_input);
            candidate.direct = Some(phrase.clone());
            candidate.flags = flags;
            candidate
        })
        .collect()
}

fn verb_prep_noun(tokens: &[Token], original_input: &str) -> Vec<CandidateCommand> {
    let Some((phrase, flags)) = extract_noun_phrase(&tokens[2..]) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for verb in tokens[0].candidates_of(PartOfSpeech::Verb) {
        for prep in tokens[1].candidates_of(PartOfSpeech::Preposition) {
            let mut candidate = CandidateCommand::new(&verb.maps_to, Shape::VerbPrepNoun, original_input);
            candidate.preposition = Some(prep.maps_to.clone());
            candidate.direct = Some(phrase.clone());
            candidate.flags = flags;
            out.push(candidate);
        }
    }
    out
}

fn verb_noun_prep_noun(tokens: &[Token], original_input: &str) -> Vec<CandidateCommand> {
    let mut out = Vec::new();
    for split in 2..tokens.len() - 1 {
        if !tokens[split].has(PartOfSpeech::Preposition) {
            continue;
        }
        let (Some((first, first_flags)), Some((second, second_flags))) = (
            extract_noun_phrase(&tokens[1..split]),
            extract_noun_phrase(&tokens[split + 1..]),
        ) else {
            continue;
        };
        for verb in tokens[0].candidates_of(PartOfSpeech::Verb) {
            for prep in tokens[split].candidates_of(PartOfSpeech::Preposition) {
                let mut candidate = CandidateCommand::new(&verb.maps_to, Shape::VerbNounPrepNoun, original_input);
                candidate.direct = Some(first.clone());
                candidate.preposition = Some(prep.maps_to.clone());
                candidate.indirect = Some(second.clone());
                candidate.flags = first_flags.merge(second_flags);
                out.push(candidate);
            }
        }
    }
    out
}

/// Build a noun phrase from a token span.
///
/// Adjective-tagged words before the first noun become modifiers; every noun-tagged token
/// contributes its mapped ids. When no token is a known noun the raw words themselves are the
/// candidates and every word but the last is a modifier. Returns `None` for an empty span.
pub fn extract_noun_phrase(tokens: &[Token]) -> Option<(NounPhrase, CommandFlags)> {
    if tokens.is_empty() {
        return None;
    }

    let mut candidates: Vec<String> = Vec::new();
    let mut modifiers = Vec::new();
    let mut flags = CommandFlags::default();
    let mut noun_found = false;
    for token in tokens {
        flags.all |= token.maps_to(PartOfSpeech::Special, ALL_MARKER);
        flags.except |= token.maps_to(PartOfSpeech::Special, EXCEPT_MARKER);
        flags.pronoun |= token.has(PartOfSpeech::Pronoun);

        if !noun_found && token.has(PartOfSpeech::Adjective) && !token.has(PartOfSpeech::Noun) {
            modifiers.push(token.normalized.clone());
        }
        if token.has(PartOfSpeech::Noun) {
            noun_found = true;
            for noun in token.candidates_of(PartOfSpeech::Noun) {
                if !candidates.contains(&noun.maps_to) {
                    candidates.push(noun.maps_to.clone());
                }
            }
        }
    }

    let words: Vec<String> = tokens.iter().map(|t| t.normalized.clone()).collect();
    if candidates.is_empty() {
        for word in &words {
            if !candidates.contains(word) {
                candidates.push(word.clone());
            }
        }
        modifiers = words[..words.len() - 1].to_vec();
    }

    Some((
        NounPhrase {
            text: words.join(" "),
            candidates,
            modifiers,
        },
        flags,
    ))
}
