//! Parser facade
//!
//! Owns one vocabulary registry, one grammar registry and the active language, and runs the
//! pipeline: tokenize, drop articles, match the five shapes, disambiguate, then look up the
//! registry pattern that agrees with the winner so its scope hints travel with the command.
//!
//! Parsing borrows `&self` and never mutates anything. Reconfiguration (`reload`,
//! `set_language`, `apply_lexicon`, the `*_mut` accessors) needs `&mut self`, so the borrow
//! checker already rules out changing registries underneath an in-flight parse.

use log::{info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::command::{CandidateCommand, ParsedCommand, Shape};
use crate::debug::{CandidateSummary, DebugCallback, DebugEvent, DebugPayload, TokenSummary};
use crate::disambiguate::disambiguate;
use crate::error::{ParseError, ParseErrorKind};
use crate::grammar::{GrammarConfig, GrammarRegistry, RegisteredPattern, standard_grammar};
use crate::language::{EnglishLanguage, LanguageProvider, error_message};
use crate::matcher::match_shapes;
use crate::tokenizer::{Token, tokenize};
use crate::vocabulary::{PartOfSpeech, VocabularyRegistry};

/// Default minimum confidence a candidate needs to survive.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.1;

/// Tunable parser behaviour. Every field has a default, so a partial TOML file is fine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Drop article tokens before shape matching.
    pub ignore_articles: bool,
    pub min_confidence: f64,
    pub grammar: GrammarConfig,
    /// Attach the agreeing registry pattern (and its scope hints) to each result.
    pub consult_grammar: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            ignore_articles: true,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            grammar: GrammarConfig::default(),
            consult_grammar: true,
        }
    }
}

/// Everything one parse produced, for callers that want more than the winner.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseReport {
    pub result: Result<ParsedCommand, ParseError>,
    /// Surviving candidates, best first.
    pub candidates: Vec<CandidateCommand>,
    /// Non-fatal diagnostics followed by the fatal error, if there was one.
    pub errors: Vec<ParseError>,
}

impl ParseReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct Parser {
    vocabulary: VocabularyRegistry,
    grammar: GrammarRegistry,
    language: Box<dyn LanguageProvider>,
    options: ParserOptions,
    debug: Option<DebugCallback>,
}

impl Parser {
    /// Build a parser seeded from `language` and the standard grammar.
    pub fn new(language: Box<dyn LanguageProvider>, options: ParserOptions) -> Self {
        let mut parser = Self {
            vocabulary: VocabularyRegistry::new(),
            grammar: GrammarRegistry::with_config(options.grammar.clone()),
            language,
            options,
            debug: None,
        };
        parser.seed();
        parser
    }

    pub fn with_english() -> Self {
        Self::new(Box::new(EnglishLanguage::new()), ParserOptions::default())
    }

    pub fn vocabulary(&self) -> &VocabularyRegistry {
        &self.vocabulary
    }

    pub fn vocabulary_mut(&mut self) -> &mut VocabularyRegistry {
        &mut self.vocabulary
    }

    pub fn grammar(&self) -> &GrammarRegistry {
        &self.grammar
    }

    pub fn grammar_mut(&mut self) -> &mut GrammarRegistry {
        &mut self.grammar
    }

    pub fn language(&self) -> &dyn LanguageProvider {
        self.language.as_ref()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ParserOptions) {
        self.grammar.set_config(options.grammar.clone());
        self.options = options;
    }

    /// Switch language: both registries are cleared and rebuilt from the new language.
    pub fn set_language(&mut self, language: Box<dyn LanguageProvider>) {
        info!("switching parser language {} -> {}", self.language.code(), language.code());
        self.language = language;
        self.reload();
    }

    /// Clear both registries and reseed them from the active language (story switch).
    pub fn reload(&mut self) {
        self.vocabulary.clear();
        self.grammar.clear();
        self.seed();
    }

    pub fn set_debug_callback(&mut self, callback: impl Fn(&DebugEvent) + 'static) {
        self.debug = Some(Box::new(callback));
    }

    pub fn clear_debug_callback(&mut self) {
        self.debug = None;
    }

    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        tokenize(input, &self.vocabulary)
    }

    /// Interpret one line of input.
    ///
    /// # Errors
    /// A [`ParseError`] whose kind says why no command could be produced.
    pub fn parse(&self, input: &str) -> Result<ParsedCommand, ParseError> {
        self.parse_with_errors(input).result
    }

    /// Interpret one line of input, keeping every candidate and diagnostic.
    pub fn parse_with_errors(&self, input: &str) -> ParseReport {
        let tokens = self.tokenize(input);
        self.emit(|| DebugPayload::Tokenize {
            input: input.to_string(),
            tokens: tokens.iter().map(TokenSummary::from).collect(),
        });

        let matched: Vec<Token> = if self.options.ignore_articles {
            tokens.iter().filter(|t| !t.has(PartOfSpeech::Article)).cloned().collect()
        } else {
            tokens.clone()
        };

        if matched.is_empty() {
            let kind = ParseErrorKind::Incomplete;
            let error = ParseError::new(kind, error_message(self.language(), kind, None));
            return self.fail(input, error, Vec::new(), Vec::new());
        }

        let outcome = match_shapes(&matched, input);
        self.emit(|| DebugPayload::PatternMatch {
            input: input.to_string(),
            attempts: outcome.attempts.clone(),
            total_candidates: outcome.candidates.len(),
        });

        let selection = disambiguate(
            outcome,
            &tokens,
            &matched,
            self.options.min_confidence,
            self.language(),
        );
        self.emit(|| DebugPayload::CandidateSelection {
            ranked: selection.ranked.iter().map(CandidateSummary::from).collect(),
            selected: selection.result.as_ref().ok().map(CandidateSummary::from),
            filtered_out: selection.filtered_out,
            reason: selection.reason().to_string(),
        });

        let reason = selection.reason();
        match selection.result {
            Ok(best) => {
                let pattern = if self.options.consult_grammar {
                    self.agreeing_pattern(&best, &matched[0])
                } else {
                    None
                };
                let mut command = ParsedCommand::from_candidate(best);
                if let Some(pattern) = pattern {
                    command.extras.pattern = Some(pattern.template.clone());
                    command.extras.pattern_action = Some(pattern.action.clone());
                    command.extras.scope_hints = pattern.scope_hints.clone();
                }
                command.extras.diagnostics = selection.diagnostics.clone();
                trace!(
                    "parsed '{input}' as {} ({}, {reason})",
                    command.action, command.extras.shape
                );
                ParseReport {
                    result: Ok(command),
                    candidates: selection.ranked,
                    errors: selection.diagnostics,
                }
            },
            Err(error) => self.fail(input, error, selection.ranked, selection.diagnostics),
        }
    }

    fn fail(
        &self,
        input: &str,
        error: ParseError,
        candidates: Vec<CandidateCommand>,
        mut errors: Vec<ParseError>,
    ) -> ParseReport {
        trace!("failed to parse '{input}': {} ({})", error.kind, error.message);
        self.emit(|| DebugPayload::ParseFailure {
            input: input.to_string(),
            error: error.clone(),
        });
        errors.push(error.clone());
        ParseReport {
            result: Err(error),
            candidates,
            errors,
        }
    }

    /// Highest-priority enabled pattern for the leading verb laid out like the candidate:
    /// slots and the preposition in the same order. A pattern filed under the candidate's
    /// own action is preferred; otherwise the first structural match is taken.
    fn agreeing_pattern(&self, candidate: &CandidateCommand, verb: &Token) -> Option<&RegisteredPattern> {
        let agreeing: Vec<&RegisteredPattern> = self
            .grammar
            .find_patterns(&verb.normalized)
            .into_iter()
            .filter(|p| p.verbs.contains(&verb.normalized) && same_layout(p, candidate))
            .collect();
        agreeing
            .iter()
            .find(|p| p.action == candidate.action)
            .or_else(|| agreeing.first())
            .copied()
    }

    fn emit(&self, payload: impl FnOnce() -> DebugPayload) {
        if let Some(callback) = &self.debug {
            callback(&DebugEvent::new(payload()));
        }
    }

    fn seed(&mut self) {
        let language = self.language.as_ref();
        self.vocabulary.register_verbs(&language.verbs());
        self.vocabulary.register_directions(&language.directions());
        self.vocabulary.register_special(&language.special_vocabulary());
        self.vocabulary.register_prepositions(&language.prepositions());
        self.vocabulary.register_adjectives(&language.common_adjectives());
        if let Err(err) = self.grammar.add_patterns(standard_grammar()) {
            warn!("standard grammar did not load completely: {err}");
        }
        info!(
            "parser ready for {} ({} words, {} patterns)",
            language.name(),
            self.vocabulary.word_count(),
            self.grammar.len()
        );
    }
}

/// Whether the pattern's elements after the verb line up with the candidate's objects and
/// preposition (`put <noun> in <noun>` against `put sword in chest`).
fn same_layout(pattern: &RegisteredPattern, candidate: &CandidateCommand) -> bool {
    let tail = pattern.elements.get(1..).unwrap_or_default();
    let prep = candidate.preposition.as_deref();
    match (candidate.shape, tail) {
        (Shape::VerbOnly | Shape::DirectionOnly, []) => true,
        (Shape::VerbNoun, [slot]) => slot.is_slot(),
        (Shape::VerbPrepNoun, [words, slot]) => prep.is_some_and(|p| words.accepts_word(p)) && slot.is_slot(),
        (Shape::VerbNounPrepNoun, [first, words, second]) => {
            first.is_slot() && prep.is_some_and(|p| words.accepts_word(p)) && second.is_slot()
        },
        _ => false,
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::with_english()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::actions;
    use crate::grammar::ScopeHintKind;
    use crate::vocabulary::EntityVocabulary;

    fn parser() -> Parser {
        let mut parser = Parser::with_english();
        let vocab = parser.vocabulary_mut();
        vocab.register_entity(EntityVocabulary::new("lamp_id", &["lamp", "lantern"], &["brass"]));
        vocab.register_entity(EntityVocabulary::new("sword_id", &["sword"], &[]));
        vocab.register_entity(EntityVocabulary::new("chest_id", &["chest"], &["wooden"]));
        parser
    }

    #[test]
    fn articles_are_skipped() {
        let command = parser().parse("take the brass lamp").unwrap();
        assert_eq!(command.action, actions::TAKING);
        let direct = command.direct_object.unwrap();
        assert_eq!(direct.text, "brass lamp");
        assert_eq!(direct.candidates, vec!["lamp_id".to_string()]);
        assert_eq!(direct.modifiers, vec!["brass".to_string()]);
    }

    #[test]
    fn articles_kept_when_configured() {
        let mut parser = parser();
        parser.set_options(ParserOptions {
            ignore_articles: false,
            ..ParserOptions::default()
        });
        let command = parser.parse("take the lamp").unwrap();
        assert_eq!(command.noun_text(), Some("the lamp"));
    }

    #[test]
    fn empty_and_article_only_input_is_incomplete() {
        let parser = parser();
        assert_eq!(parser.parse("").unwrap_err().kind, ParseErrorKind::Incomplete);
        assert_eq!(parser.parse("   ").unwrap_err().kind, ParseErrorKind::Incomplete);
        assert_eq!(parser.parse("the").unwrap_err().kind, ParseErrorKind::Incomplete);
    }

    #[test]
    fn grammar_consult_attaches_scope_hints() {
        let command = parser().parse("put sword on chest").unwrap();
        assert_eq!(command.extras.shape, Shape::VerbNounPrepNoun);
        assert_eq!(command.action, actions::PUTTING);
        assert_eq!(command.extras.pattern.as_deref(), Some("put <noun> on|onto <noun:supporter>"));
        assert!(
            command
                .extras
                .scope_hints
                .iter()
                .any(|h| h.hint == ScopeHintKind::Supporter && h.position == 1)
        );

        assert_eq!(command.extras.pattern_action.as_deref(), Some(actions::PUTTING));
    }

    #[test]
    fn hints_come_from_patterns_filed_under_other_actions() {
        let parser = parser();
        let command = parser.parse("put lamp in chest").unwrap();
        assert_eq!(command.action, actions::PUTTING);
        assert_eq!(command.extras.pattern.as_deref(), Some("put <noun> in|into <noun:container>"));
        assert_eq!(command.extras.pattern_action.as_deref(), Some(actions::INSERTING));
        assert!(
            command
                .extras
                .scope_hints
                .iter()
                .any(|h| h.hint == ScopeHintKind::Container && h.position == 1)
        );

        let command = parser.parse("take lamp from chest").unwrap();
        assert_eq!(command.action, actions::TAKING);
        assert_eq!(command.extras.pattern_action.as_deref(), Some(actions::REMOVING));

        let command = parser.parse("take lamp off chest").unwrap();
        assert_eq!(command.extras.pattern.as_deref(), Some("take <noun> off <noun:supporter>"));

        let command = parser.parse("drop lamp in chest").unwrap();
        assert_eq!(command.extras.pattern.as_deref(), Some("drop <noun> in|into <noun:container>"));
    }

    #[test]
    fn particle_position_picks_the_pattern() {
        let command = parser().parse("put on lamp").unwrap();
        assert_eq!(command.extras.shape, Shape::VerbPrepNoun);
        assert_eq!(command.extras.pattern.as_deref(), Some("put on <noun:wearable>"));
        assert_eq!(command.extras.pattern_action.as_deref(), Some(actions::WEARING));
    }

    #[test]
    fn grammar_consult_can_be_disabled() {
        let mut parser = parser();
        parser.set_options(ParserOptions {
            consult_grammar: false,
            ..ParserOptions::default()
        });
        let command = parser.parse("put sword in chest").unwrap();
        assert!(command.extras.pattern.is_none());
        assert!(command.extras.scope_hints.is_empty());
    }

    #[test]
    fn report_carries_candidates_and_errors() {
        let parser = parser();
        let report = parser.parse_with_errors("take frobozz");
        assert!(report.is_success());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ParseErrorKind::UnknownWord);
        assert!(!report.candidates.is_empty());

        let report = parser.parse_with_errors("xyzzy");
        assert!(!report.is_success());
        // the unknown word diagnostic, then the fatal no-verb error
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[1].kind, ParseErrorKind::NoVerb);
    }

    #[test]
    fn debug_callback_sees_each_stage() {
        let mut parser = parser();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        parser.set_debug_callback(move |event| sink.borrow_mut().push(event.kind()));
        parser.parse("take lamp").unwrap();
        assert_eq!(
            *seen.borrow(),
            vec!["tokenize", "pattern_match", "candidate_selection"]
        );

        parser.clear_debug_callback();
        parser.parse("look").unwrap();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn reload_drops_story_vocabulary() {
        let mut parser = parser();
        assert!(parser.vocabulary().has_word("lamp"));
        parser.reload();
        assert!(!parser.vocabulary().has_word("lamp"));
        assert!(parser.vocabulary().has_word("take"));
        assert!(!parser.grammar().is_empty());
    }
}
