//! Validate lexicon files against the English parser and optionally try some input.
//!
//! Usage: `check_lexicon [--options parser.toml] <lexicon.toml|ron>... [--parse "text"]...`

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;

use parlance_engine::{EnglishLanguage, Parser, ParserOptions, load_lexicon, load_parser_options};

fn main() -> Result<()> {
    env_logger::init();

    let mut options_path: Option<PathBuf> = None;
    let mut lexicons = Vec::new();
    let mut inputs = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--options" => options_path = Some(args.next().context("--options needs a file")?.into()),
            "--parse" => inputs.push(args.next().context("--parse needs some text")?),
            _ => lexicons.push(PathBuf::from(arg)),
        }
    }
    if lexicons.is_empty() && inputs.is_empty() {
        bail!("usage: check_lexicon [--options parser.toml] <lexicon.toml|ron>... [--parse \"text\"]...");
    }

    let options = match &options_path {
        Some(path) => load_parser_options(path)?,
        None => ParserOptions::default(),
    };
    let mut parser = Parser::new(Box::new(EnglishLanguage::new()), options);

    for path in &lexicons {
        let lexicon = load_lexicon(path)?;
        let summary = parser
            .apply_lexicon(&lexicon)
            .with_context(|| format!("applying '{}'", path.display()))?;
        println!(
            "{}: {} verb group(s), {} direction(s), {} entities, {} preposition(s), {} adjective(s), {} pattern(s)",
            path.display(),
            summary.verbs,
            summary.directions,
            summary.entities,
            summary.prepositions,
            summary.adjectives,
            summary.patterns
        );
    }

    let stats = parser.grammar().stats();
    info!("{} words, {} patterns", parser.vocabulary().word_count(), stats.total_patterns);
    println!("vocabulary: {} words", parser.vocabulary().word_count());
    println!("grammar: {} patterns over {} verbs", stats.total_patterns, stats.verbs.len());
    for (category, count) in &stats.by_category {
        println!("  {category}: {count}");
    }

    for input in &inputs {
        let report = parser.parse_with_errors(input);
        match &report.result {
            Ok(command) => println!(
                "> {input}\n  {} [{} {:.1}] direct={:?} prep={:?} indirect={:?} pattern={:?}",
                command.action,
                command.extras.shape,
                command.extras.confidence,
                command.noun_text(),
                command.preposition,
                command.second_noun_text(),
                command.extras.pattern
            ),
            Err(err) => println!("> {input}\n  error {}: {}", err.kind, err.message),
        }
        for diagnostic in report.errors.iter().filter(|_| report.is_success()) {
            println!("  note {}: {}", diagnostic.kind, diagnostic.message);
        }
    }
    Ok(())
}
