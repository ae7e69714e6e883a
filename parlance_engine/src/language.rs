//! Language provider contract.
//!
//! A language supplies word lists that seed the vocabulary registry, a few morphology
//! helpers, list and name formatting, and message templates. The interpreter only talks
//! to [`LanguageProvider`]; [`EnglishLanguage`] is the bundled implementation.

pub mod english;

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::ParseErrorKind;
use crate::vocabulary::{DirectionVocabulary, PartOfSpeech, SpecialVocabulary, VerbVocabulary};

pub use english::EnglishLanguage;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\w+)(?::(\w+))?\}").expect("placeholder regex is valid");
}

/// Joining word for [`LanguageProvider::format_list`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

/// How an item name should be rendered by [`LanguageProvider::format_item_name`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemNameStyle {
    pub definite: bool,
    pub capitalize: bool,
    pub plural: bool,
    /// Proper names never take an article.
    pub proper: bool,
}

/// Everything the interpreter needs from a natural language.
pub trait LanguageProvider {
    /// BCP 47 style code, e.g. `en-US`.
    fn code(&self) -> &str;
    fn name(&self) -> &str;

    fn verbs(&self) -> Vec<VerbVocabulary>;
    fn directions(&self) -> Vec<DirectionVocabulary>;
    fn special_vocabulary(&self) -> SpecialVocabulary;
    fn prepositions(&self) -> Vec<String>;
    fn common_adjectives(&self) -> Vec<String>;

    fn lemmatize(&self, word: &str) -> String;
    fn pluralize(&self, noun: &str) -> String;
    fn indefinite_article(&self, noun: &str) -> &'static str;
    fn format_list(&self, items: &[&str], conjunction: Conjunction) -> String;
    fn format_item_name(&self, name: &str, style: ItemNameStyle) -> String;

    /// Raw template for a message key, if this language defines one.
    fn message_template(&self, key: &str) -> Option<&str>;

    /// Closed-class tags for a word, derived from this language's word lists.
    fn tag_word(&self, word: &str) -> Vec<PartOfSpeech> {
        let word = word.trim().to_lowercase();
        let special = self.special_vocabulary();
        let mut tags = Vec::new();
        if self.verbs().iter().any(|v| v.verbs.contains(&word)) {
            tags.push(PartOfSpeech::Verb);
        }
        if self
            .directions()
            .iter()
            .any(|d| d.words.contains(&word) || d.abbreviations.contains(&word))
        {
            tags.push(PartOfSpeech::Direction);
        }
        if self.prepositions().contains(&word) {
            tags.push(PartOfSpeech::Preposition);
        }
        if special.articles.contains(&word) {
            tags.push(PartOfSpeech::Article);
        }
        if special.pronouns.contains(&word) {
            tags.push(PartOfSpeech::Pronoun);
        }
        if special.all_words.contains(&word) || special.except_words.contains(&word) {
            tags.push(PartOfSpeech::Special);
        }
        if self.common_adjectives().contains(&word) {
            tags.push(PartOfSpeech::Adjective);
        }
        tags
    }

    /// Render the message `key` with `{name}` / `{name:cap|upper|lower}` placeholders filled.
    fn format_message(&self, key: &str, params: &[(&str, &str)]) -> Option<String> {
        self.message_template(key).map(|template| substitute(template, params))
    }
}

/// Fill `{key}` and `{key:modifier}` placeholders. Unknown keys are left as written.
pub fn substitute(template: &str, params: &[(&str, &str)]) -> String {
    let values: HashMap<&str, &str> = params.iter().copied().collect();
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let Some(value) = values.get(&caps[1]) else {
                return caps[0].to_string();
            };
            match caps.get(2).map(|m| m.as_str()) {
                Some("cap") => capitalize(value),
                Some("upper") => value.to_uppercase(),
                Some("lower") => value.to_lowercase(),
                _ => (*value).to_string(),
            }
        })
        .into_owned()
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prose for a parse error kind, from the language's templates or the English defaults.
pub fn error_message(language: &dyn LanguageProvider, kind: ParseErrorKind, word: Option<&str>) -> String {
    let params = [("word", word.unwrap_or_default())];
    language
        .format_message(kind.code(), &params)
        .unwrap_or_else(|| substitute(english::parser_message(kind.code()), &params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_with_modifiers() {
        let out = substitute(
            "{item:cap} is in {place}; {shout:upper} {quiet:lower}",
            &[("item", "lamp"), ("place", "the box"), ("shout", "hey"), ("quiet", "PSST")],
        );
        assert_eq!(out, "Lamp is in the box; HEY psst");
    }

    #[test]
    fn unknown_placeholders_survive() {
        assert_eq!(substitute("You see {thing}.", &[]), "You see {thing}.");
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    struct Silent;

    impl LanguageProvider for Silent {
        fn code(&self) -> &str {
            "xx"
        }
        fn name(&self) -> &str {
            "Silent"
        }
        fn verbs(&self) -> Vec<VerbVocabulary> {
            Vec::new()
        }
        fn directions(&self) -> Vec<DirectionVocabulary> {
            Vec::new()
        }
        fn special_vocabulary(&self) -> SpecialVocabulary {
            SpecialVocabulary::default()
        }
        fn prepositions(&self) -> Vec<String> {
            Vec::new()
        }
        fn common_adjectives(&self) -> Vec<String> {
            Vec::new()
        }
        fn lemmatize(&self, word: &str) -> String {
            word.to_string()
        }
        fn pluralize(&self, noun: &str) -> String {
            noun.to_string()
        }
        fn indefinite_article(&self, _noun: &str) -> &'static str {
            ""
        }
        fn format_list(&self, items: &[&str], _conjunction: Conjunction) -> String {
            items.join(" ")
        }
        fn format_item_name(&self, name: &str, _style: ItemNameStyle) -> String {
            name.to_string()
        }
        fn message_template(&self, _key: &str) -> Option<&str> {
            None
        }
    }

    #[test]
    fn error_messages_fall_back_to_english() {
        let message = error_message(&Silent, ParseErrorKind::UnknownWord, Some("frob"));
        assert!(message.contains("frob"));
        assert!(Silent.tag_word("anything").is_empty());
    }
}
