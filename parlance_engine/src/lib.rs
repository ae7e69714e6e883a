#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const PARLANCE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Pipeline, leaves first
pub mod actions;
pub mod command;
pub mod error;
pub mod vocabulary;
pub mod tokenizer;
pub mod grammar;
pub mod matcher;
pub mod disambiguate;
pub mod language;
pub mod parser;

// Ambient
pub mod debug;
pub mod loader;

// Re-exports for convenience
pub use command::{CandidateCommand, CommandFlags, NounPhrase, ParseExtras, ParsedCommand, Shape};
pub use debug::{DebugEvent, DebugPayload};
pub use error::{ErrorCode, ParseError, ParseErrorKind};
pub use grammar::{GrammarConfig, GrammarError, GrammarPattern, GrammarRegistry, PatternCategory, ScopeHint};
pub use language::{EnglishLanguage, LanguageProvider};
pub use loader::{LexiconSummary, load_lexicon, load_parser_options};
pub use parser::{ParseReport, Parser, ParserOptions};
pub use tokenizer::{Token, tokenize};
pub use vocabulary::{PartOfSpeech, VocabularyEntry, VocabularyRegistry};
