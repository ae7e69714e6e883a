use std::fs;

use parlance_engine as pe;

use pe::actions;
use pe::grammar::ScopeHintKind;
use pe::vocabulary::VocabSource;
use pe::{EnglishLanguage, ParseErrorKind, Parser, Shape, load_lexicon, load_parser_options};
use tempfile::tempdir;

const LIGHTHOUSE_TOML: &str = r#"
source = "story:lighthouse"

[[verbs]]
action = "story.action.ringing"
words = ["ring", "toll"]

[[directions]]
direction = "widdershins"
words = ["widdershins"]
abbreviations = ["wi"]

[[entities]]
id = "bell_id"
nouns = ["bell"]
adjectives = ["bronze"]

[[patterns]]
template = "ring|toll <noun:ringable>"
action = "story.action.ringing"
priority = 60
"#;

const MUSIC_RON: &str = r#"(
    source: "extension:music",
    verbs: [
        (action: "ext.action.playing", words: ["play", "strum"], prepositions: ["on"]),
    ],
    adjectives: ["tuneless"],
    patterns: [
        (template: "play|strum <noun> on <noun>", action: "ext.action.playing"),
    ],
)"#;

#[test]
fn toml_lexicon_adds_verbs_directions_and_patterns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lighthouse.toml");
    fs::write(&path, LIGHTHOUSE_TOML).unwrap();

    let lexicon = load_lexicon(&path).unwrap();
    let mut parser = Parser::with_english();
    let summary = parser.apply_lexicon(&lexicon).unwrap();
    assert_eq!(summary.verbs, 1);
    assert_eq!(summary.directions, 1);
    assert_eq!(summary.entities, 1);
    assert_eq!(summary.patterns, 1);

    let command = parser.parse("toll the bronze bell").unwrap();
    assert_eq!(command.action, "story.action.ringing");
    assert_eq!(command.extras.shape, Shape::VerbNoun);
    assert_eq!(command.extras.pattern.as_deref(), Some("ring|toll <noun:ringable>"));
    assert_eq!(
        command.extras.scope_hints[0].hint,
        ScopeHintKind::Other("ringable".to_string())
    );
    let direct = command.direct_object.unwrap();
    assert_eq!(direct.candidates, vec!["bell_id".to_string()]);
    assert_eq!(direct.modifiers, vec!["bronze".to_string()]);

    let command = parser.parse("wi").unwrap();
    assert_eq!(command.action, actions::GOING);
    assert_eq!(
        command.direct_object.unwrap().candidates,
        vec!["widdershins".to_string()]
    );
    let entry = &parser.vocabulary().lookup("widdershins")[0];
    assert_eq!(entry.source, VocabSource::Story("lighthouse".to_string()));
}

#[test]
fn ron_lexicon_supports_two_object_verbs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("music.ron");
    fs::write(&path, MUSIC_RON).unwrap();

    let lexicon = load_lexicon(&path).unwrap();
    assert_eq!(lexicon.source, "extension:music");
    let mut parser = Parser::with_english();
    let summary = parser.apply_lexicon(&lexicon).unwrap();
    assert_eq!(summary.adjectives, 1);

    let command = parser.parse("strum tuneless lute on table").unwrap();
    assert_eq!(command.action, "ext.action.playing");
    assert_eq!(command.extras.shape, Shape::VerbNounPrepNoun);
    assert_eq!(command.extras.pattern.as_deref(), Some("play|strum <noun> on <noun>"));
    let direct = command.direct_object.unwrap();
    // no known noun in the phrase: literal words, all but the last as modifiers
    assert_eq!(direct.candidates, vec!["tuneless".to_string(), "lute".to_string()]);
    assert_eq!(direct.modifiers, vec!["tuneless".to_string()]);
    assert_eq!(
        parser.vocabulary().lookup("strum")[0].source,
        VocabSource::Extension("music".to_string())
    );
}

#[test]
fn unsupported_and_malformed_files_are_reported() {
    let dir = tempdir().unwrap();

    let json = dir.path().join("lexicon.json");
    fs::write(&json, "{}").unwrap();
    let err = load_lexicon(&json).unwrap_err();
    assert!(err.to_string().contains(".toml or .ron"), "{err}");

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[[verbs]]\naction = 12").unwrap();
    let err = load_lexicon(&broken).unwrap_err();
    assert!(format!("{err:#}").contains("parsing lexicon TOML"), "{err:#}");

    let missing = dir.path().join("missing.ron");
    let err = load_lexicon(&missing).unwrap_err();
    assert!(err.to_string().contains("reading lexicon"), "{err}");
}

#[test]
fn parser_options_from_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("parser.toml");
    fs::write(
        &path,
        "min_confidence = 0.95\n\n[grammar]\nallow_custom_patterns = false\n",
    )
    .unwrap();

    let options = load_parser_options(&path).unwrap();
    assert!(options.ignore_articles);
    assert!(options.consult_grammar);
    assert!(!options.grammar.allow_custom_patterns);
    assert_eq!(options.grammar.default_priority, 50);

    let mut parser = Parser::new(Box::new(EnglishLanguage::new()), options);
    assert!(parser.parse("look").is_ok());
    assert_eq!(
        parser.parse("take lamp").unwrap_err().kind,
        ParseErrorKind::BelowThreshold
    );

    let lexicon_path = dir.path().join("lighthouse.toml");
    fs::write(&lexicon_path, LIGHTHOUSE_TOML).unwrap();
    let lexicon = load_lexicon(&lexicon_path).unwrap();
    let err = parser.apply_lexicon(&lexicon).unwrap_err();
    assert!(format!("{err:#}").contains("custom patterns are disabled"), "{err:#}");
}
