//! Loading lexicon and option files.
//!
//! Lexicons (story or extension vocabulary plus grammar patterns) are authored as TOML or
//! RON, picked by file extension. Parser options are TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use parlance_data::{LexiconDef, validate_lexicon};

use crate::grammar::GrammarPattern;
use crate::parser::{Parser, ParserOptions};
use crate::vocabulary::{DirectionVocabulary, EntityVocabulary, PartOfSpeech, VerbVocabulary, VocabSource};

/// What `Parser::apply_lexicon` registered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexiconSummary {
    pub verbs: usize,
    pub directions: usize,
    pub entities: usize,
    pub prepositions: usize,
    pub adjectives: usize,
    pub patterns: usize,
}

/// Read a lexicon from a `.toml` or `.ron` file.
///
/// # Errors
/// Unreadable file, unknown extension, or content that does not deserialize.
pub fn load_lexicon(path: &Path) -> Result<LexiconDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading lexicon from '{}'", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            toml::from_str(&text).with_context(|| format!("parsing lexicon TOML from '{}'", path.display()))
        },
        Some("ron") => ron::from_str(&text).with_context(|| format!("parsing lexicon RON from '{}'", path.display())),
        _ => bail!("lexicon '{}' must be a .toml or .ron file", path.display()),
    }
}

/// Read parser options from TOML. Missing keys keep their defaults.
///
/// # Errors
/// Unreadable file or invalid TOML.
pub fn load_parser_options(path: &Path) -> Result<ParserOptions> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading parser options from '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing parser options from '{}'", path.display()))
}

/// Validate a lexicon and return a single aggregated error.
fn validate(lexicon: &LexiconDef) -> Result<()> {
    let errors = validate_lexicon(lexicon);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("lexicon '{}' failed validation:\n{details}", lexicon.source);
}

impl Parser {
    /// Register a lexicon's vocabulary and patterns on top of the active language.
    ///
    /// Nothing is registered when validation fails. Re-applying a lexicon with the same
    /// `source` replaces its verbs, directions, prepositions and adjectives.
    ///
    /// # Errors
    /// Validation failures (aggregated), or the first pattern the grammar registry rejects;
    /// vocabulary registered before a rejected pattern stays registered.
    pub fn apply_lexicon(&mut self, lexicon: &LexiconDef) -> Result<LexiconSummary> {
        validate(lexicon)?;
        let source = lexicon.source.as_str();
        let vocab_source = VocabSource::from_label(source);
        let mut summary = LexiconSummary::default();

        if !lexicon.verbs.is_empty() {
            let verbs: Vec<VerbVocabulary> = lexicon
                .verbs
                .iter()
                .map(|def| VerbVocabulary {
                    action_id: def.action.clone(),
                    verbs: def.words.clone(),
                    prepositions: def.prepositions.clone(),
                })
                .collect();
            self.vocabulary_mut().register_dynamic_verbs(&verbs, source);
            summary.verbs = verbs.len();
        }

        if !lexicon.directions.is_empty() {
            let directions: Vec<DirectionVocabulary> = lexicon
                .directions
                .iter()
                .map(|def| DirectionVocabulary {
                    direction: def.direction.clone(),
                    words: def.words.clone(),
                    abbreviations: def.abbreviations.clone(),
                })
                .collect();
            self.vocabulary_mut().register_directions_as(
                &format!("lexicon-directions-{source}"),
                &directions,
                &vocab_source,
            );
            summary.directions = directions.len();
        }

        for def in &lexicon.entities {
            self.vocabulary_mut().register_entity(EntityVocabulary {
                entity_id: def.id.clone(),
                nouns: def.nouns.clone(),
                adjectives: def.adjectives.clone(),
                priority: def.priority,
                in_scope: def.in_scope,
            });
            summary.entities += 1;
        }

        if !lexicon.prepositions.is_empty() {
            self.vocabulary_mut().register_word_list(
                &format!("lexicon-prepositions-{source}"),
                &lexicon.prepositions,
                PartOfSpeech::Preposition,
                &vocab_source,
            );
            summary.prepositions = lexicon.prepositions.len();
        }
        if !lexicon.adjectives.is_empty() {
            self.vocabulary_mut().register_word_list(
                &format!("lexicon-adjectives-{source}"),
                &lexicon.adjectives,
                PartOfSpeech::Adjective,
                &vocab_source,
            );
            summary.adjectives = lexicon.adjectives.len();
        }

        for def in &lexicon.patterns {
            self.grammar_mut()
                .add_pattern(GrammarPattern::from(def))
                .with_context(|| format!("registering pattern '{}' from lexicon '{source}'", def.template))?;
            summary.patterns += 1;
        }

        info!(
            "lexicon '{source}': {} verb group(s), {} direction(s), {} entity vocabularies, {} pattern(s)",
            summary.verbs, summary.directions, summary.entities, summary.patterns
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlance_data::{EntityDef, PatternDef, VerbDef};

    fn lexicon() -> LexiconDef {
        LexiconDef {
            source: "story:cave".into(),
            verbs: vec![VerbDef {
                action: "story.action.xyzzying".into(),
                words: vec!["xyzzy".into(), "plugh".into()],
                prepositions: Vec::new(),
            }],
            entities: vec![EntityDef {
                id: "brass_lamp".into(),
                nouns: vec!["lamp".into()],
                adjectives: vec!["brass".into()],
                priority: 50,
                in_scope: false,
            }],
            patterns: vec![PatternDef::new("xyzzy", "story.action.xyzzying")],
            ..LexiconDef::default()
        }
    }

    #[test]
    fn applies_every_section() {
        let mut parser = Parser::with_english();
        let summary = parser.apply_lexicon(&lexicon()).unwrap();
        assert_eq!(summary.verbs, 1);
        assert_eq!(summary.entities, 1);
        assert_eq!(summary.patterns, 1);

        let command = parser.parse("plugh").unwrap();
        assert_eq!(command.action, "story.action.xyzzying");
        let xyzzy = parser.vocabulary().lookup("xyzzy");
        assert_eq!(xyzzy[0].source, VocabSource::Story("cave".into()));
        assert!(parser.vocabulary().in_scope_entities().is_empty());
    }

    #[test]
    fn invalid_lexicon_registers_nothing() {
        let mut parser = Parser::with_english();
        let mut bad = lexicon();
        bad.verbs[0].words.push("pick up".into());
        let err = parser.apply_lexicon(&bad).unwrap_err();
        assert!(err.to_string().contains("failed validation"));
        assert!(!parser.vocabulary().has_word("xyzzy"));
    }
}
