//! Vocabulary Registry
//!
//! Aggregates word-to-meaning mappings from several providers:
//! - base vocabulary from the active language (verbs, directions, special words)
//! - extension and story vocabulary registered at load time
//! - dynamic vocabulary attached to individual world entities
//!
//! A word may carry any number of interpretations (a "polysemous" word such as
//! `in`, which is both a direction and a preposition); all of them are kept and
//! `lookup` hands every one back to the caller. A word with no entries at all is
//! a perfectly valid answer and simply means "unknown word".
//!
//! The registry is owned by a `Parser` (or by the caller) and is rebuilt eagerly
//! whenever a provider changes, so lookups never mutate and can borrow `&self`.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use variantly::Variantly;

/// Marker `maps_to` value for pronoun entries.
pub const PRONOUN_MARKER: &str = "IT";
/// Marker `maps_to` value for article entries.
pub const ARTICLE_MARKER: &str = "ARTICLE";
/// Marker `maps_to` value for "all"-words.
pub const ALL_MARKER: &str = "ALL";
/// Marker `maps_to` value for "except"-words.
pub const EXCEPT_MARKER: &str = "EXCEPT";

/// Priority given to base language entries.
pub const BASE_PRIORITY: i32 = 100;
/// Priority given to direction abbreviations (slightly below full words).
pub const ABBREVIATION_PRIORITY: i32 = 90;
/// Priority given to story or extension verbs registered after the language loads.
pub const DYNAMIC_PRIORITY: i32 = 80;

/// Grammatical role a word can play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Verb,
    Noun,
    Adjective,
    Preposition,
    Article,
    Pronoun,
    Direction,
    /// "all"/"except" style quantifier words.
    Special,
}

/// Where a vocabulary entry came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabSource {
    Base,
    Extension(String),
    Story(String),
    Entity,
}

impl VocabSource {
    /// Classify a free-form source label from a lexicon file.
    pub fn from_label(label: &str) -> Self {
        match label.split_once(':') {
            Some(("extension", name)) => VocabSource::Extension(name.to_string()),
            Some(("story", name)) => VocabSource::Story(name.to_string()),
            _ if label == "base" => VocabSource::Base,
            _ if label == "entity" => VocabSource::Entity,
            _ => VocabSource::Story(label.to_string()),
        }
    }
}

/// Extra data carried by some entries; unused fields stay empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// Prepositions a verb commonly takes ("put ... in/on").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prepositions: Vec<String>,
    /// For entity vocabulary: whether the entity is currently in scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_scope: Option<bool>,
}

/// A single interpretation of a word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub part_of_speech: PartOfSpeech,
    /// Canonical action id, direction id, entity id or literal string.
    pub maps_to: String,
    pub priority: i32,
    pub source: VocabSource,
    #[serde(default)]
    pub metadata: EntryMetadata,
}

impl VocabularyEntry {
    pub fn new(word: &str, part_of_speech: PartOfSpeech, maps_to: impl Into<String>, source: VocabSource) -> Self {
        Self {
            word: word.trim().to_lowercase(),
            part_of_speech,
            maps_to: maps_to.into(),
            priority: BASE_PRIORITY,
            source,
            metadata: EntryMetadata::default(),
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Verb words mapping to one action, as supplied by a language or story.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbVocabulary {
    pub action_id: String,
    pub verbs: Vec<String>,
    #[serde(default)]
    pub prepositions: Vec<String>,
}

impl VerbVocabulary {
    pub fn new(action_id: &str, verbs: &[&str]) -> Self {
        Self {
            action_id: action_id.to_string(),
            verbs: verbs.iter().map(|v| (*v).to_string()).collect(),
            prepositions: Vec::new(),
        }
    }
}

/// Words and abbreviations for one direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionVocabulary {
    pub direction: String,
    pub words: Vec<String>,
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

impl DirectionVocabulary {
    pub fn new(direction: &str, words: &[&str], abbreviations: &[&str]) -> Self {
        Self {
            direction: direction.to_string(),
            words: words.iter().map(|w| (*w).to_string()).collect(),
            abbreviations: abbreviations.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// Closed-class words that shape a command without naming anything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialVocabulary {
    pub articles: Vec<String>,
    pub pronouns: Vec<String>,
    pub all_words: Vec<String>,
    pub except_words: Vec<String>,
}

/// Words the player may use for a particular world entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityVocabulary {
    pub entity_id: String,
    pub nouns: Vec<String>,
    pub adjectives: Vec<String>,
    pub priority: i32,
    pub in_scope: bool,
}

impl EntityVocabulary {
    pub fn new(entity_id: &str, nouns: &[&str], adjectives: &[&str]) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            nouns: nouns.iter().map(|n| (*n).to_string()).collect(),
            adjectives: adjectives.iter().map(|a| (*a).to_string()).collect(),
            priority: 50,
            in_scope: true,
        }
    }
}

/// A named batch of entries. Re-registering a provider id replaces the batch.
#[derive(Clone, Debug)]
struct VocabularyProvider {
    id: String,
    priority: i32,
    entries: Vec<VocabularyEntry>,
}

/// Central vocabulary store for one parser instance.
#[derive(Clone, Debug, Default)]
pub struct VocabularyRegistry {
    providers: Vec<VocabularyProvider>,
    entities: BTreeMap<String, EntityVocabulary>,
    entity_entries: Vec<VocabularyEntry>,
    by_word: HashMap<String, Vec<VocabularyEntry>>,
}

impl VocabularyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every interpretation of `word`, highest priority first. Case-insensitive.
    pub fn lookup(&self, word: &str) -> &[VocabularyEntry] {
        self.by_word
            .get(&word.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Interpretations of `word` restricted to one part of speech.
    pub fn lookup_as(&self, word: &str, part_of_speech: PartOfSpeech) -> Vec<&VocabularyEntry> {
        self.lookup(word)
            .iter()
            .filter(|entry| entry.part_of_speech == part_of_speech)
            .collect()
    }

    pub fn has_word(&self, word: &str) -> bool {
        !self.lookup(word).is_empty()
    }

    /// All entries of a given part of speech, in provider order.
    pub fn by_part_of_speech(&self, part_of_speech: PartOfSpeech) -> Vec<&VocabularyEntry> {
        self.providers
            .iter()
            .flat_map(|p| p.entries.iter())
            .chain(self.entity_entries.iter())
            .filter(|entry| entry.part_of_speech == part_of_speech)
            .collect()
    }

    /// Number of distinct words currently known.
    pub fn word_count(&self) -> usize {
        self.by_word.len()
    }

    /// Reset for a language or story switch: drops every provider and all entity vocabulary.
    pub fn clear(&mut self) {
        self.providers.clear();
        self.entities.clear();
        self.entity_entries.clear();
        self.by_word.clear();
        info!("vocabulary registry cleared");
    }

    /// Register (or replace) a provider's entries.
    pub fn register_provider(&mut self, id: &str, priority: i32, entries: Vec<VocabularyEntry>) {
        debug!("registering vocabulary provider '{id}' ({} entries)", entries.len());
        let provider = VocabularyProvider {
            id: id.to_string(),
            priority,
            entries,
        };
        match self.providers.iter_mut().find(|p| p.id == id) {
            Some(existing) => *existing = provider,
            None => self.providers.push(provider),
        }
        self.rebuild_index();
    }

    /// Remove a provider; returns false when no provider had that id.
    pub fn unregister_provider(&mut self, id: &str) -> bool {
        let before = self.providers.len();
        self.providers.retain(|p| p.id != id);
        let removed = self.providers.len() != before;
        if removed {
            self.rebuild_index();
        }
        removed
    }

    pub fn register_verbs(&mut self, verbs: &[VerbVocabulary]) {
        let entries = verb_entries(verbs, &VocabSource::Base, BASE_PRIORITY);
        self.register_provider("standard-verbs", BASE_PRIORITY, entries);
    }

    /// Verbs added after the language loads (stories, extensions); ranked below base verbs.
    pub fn register_dynamic_verbs(&mut self, verbs: &[VerbVocabulary], source: &str) {
        let entries = verb_entries(verbs, &VocabSource::from_label(source), DYNAMIC_PRIORITY);
        self.register_provider(&format!("dynamic-verbs-{source}"), DYNAMIC_PRIORITY, entries);
    }

    pub fn register_directions(&mut self, directions: &[DirectionVocabulary]) {
        self.register_directions_as("standard-directions", directions, &VocabSource::Base);
    }

    /// Register directions under a caller-chosen provider id (story-specific exits).
    pub fn register_directions_as(&mut self, provider_id: &str, directions: &[DirectionVocabulary], source: &VocabSource) {
        let mut entries = Vec::new();
        for dir in directions {
            for word in &dir.words {
                entries.push(VocabularyEntry::new(
                    word,
                    PartOfSpeech::Direction,
                    dir.direction.as_str(),
                    source.clone(),
                ));
            }
            for abbr in &dir.abbreviations {
                entries.push(
                    VocabularyEntry::new(abbr, PartOfSpeech::Direction, dir.direction.as_str(), source.clone())
                        .with_priority(ABBREVIATION_PRIORITY),
                );
            }
        }
        self.register_provider(provider_id, BASE_PRIORITY, entries);
    }

    pub fn register_prepositions(&mut self, prepositions: &[String]) {
        self.register_word_list("standard-prepositions", prepositions, PartOfSpeech::Preposition, &VocabSource::Base);
    }

    /// Common adjectives ("big", "red") that are not tied to a particular entity.
    pub fn register_adjectives(&mut self, adjectives: &[String]) {
        self.register_word_list("standard-adjectives", adjectives, PartOfSpeech::Adjective, &VocabSource::Base);
    }

    /// Register a flat list of words that map to themselves.
    pub fn register_word_list(
        &mut self,
        provider_id: &str,
        words: &[String],
        part_of_speech: PartOfSpeech,
        source: &VocabSource,
    ) {
        let entries = words
            .iter()
            .map(|w| VocabularyEntry::new(w, part_of_speech, w.trim().to_lowercase(), source.clone()))
            .collect();
        self.register_provider(provider_id, BASE_PRIORITY, entries);
    }

    /// Articles, pronouns, "all"-words and "except"-words.
    pub fn register_special(&mut self, special: &SpecialVocabulary) {
        let mut entries = Vec::new();
        for pronoun in &special.pronouns {
            entries.push(VocabularyEntry::new(pronoun, PartOfSpeech::Pronoun, PRONOUN_MARKER, VocabSource::Base));
        }
        for article in &special.articles {
            entries.push(VocabularyEntry::new(article, PartOfSpeech::Article, ARTICLE_MARKER, VocabSource::Base));
        }
        for word in &special.all_words {
            entries.push(VocabularyEntry::new(word, PartOfSpeech::Special, ALL_MARKER, VocabSource::Base));
        }
        for word in &special.except_words {
            entries.push(VocabularyEntry::new(word, PartOfSpeech::Special, EXCEPT_MARKER, VocabSource::Base));
        }
        self.register_provider("special-vocabulary", BASE_PRIORITY, entries);
    }

    /// Attach nouns/adjectives to an entity id. Replaces any earlier vocabulary for that entity.
    pub fn register_entity(&mut self, vocab: EntityVocabulary) {
        debug!("registering vocabulary for entity '{}'", vocab.entity_id);
        self.entities.insert(vocab.entity_id.clone(), vocab);
        self.rebuild_index();
    }

    pub fn unregister_entity(&mut self, entity_id: &str) -> bool {
        let removed = self.entities.remove(entity_id).is_some();
        if removed {
            self.rebuild_index();
        }
        removed
    }

    /// Record whether an entity is currently in scope. Does not change what `lookup` returns.
    pub fn update_entity_scope(&mut self, entity_id: &str, in_scope: bool) {
        if let Some(vocab) = self.entities.get_mut(entity_id) {
            vocab.in_scope = in_scope;
            let owned_by = |e: &&mut VocabularyEntry| e.source == VocabSource::Entity && e.maps_to == entity_id;
            for entry in self.entity_entries.iter_mut().filter(owned_by) {
                entry.metadata.in_scope = Some(in_scope);
            }
            for entry in self.by_word.values_mut().flat_map(|entries| entries.iter_mut()).filter(owned_by) {
                entry.metadata.in_scope = Some(in_scope);
            }
        }
    }

    pub fn in_scope_entities(&self) -> Vec<&EntityVocabulary> {
        self.entities.values().filter(|v| v.in_scope).collect()
    }

    fn collect_entity_entries(&self) -> Vec<VocabularyEntry> {
        let mut entries = Vec::new();
        for (entity_id, vocab) in &self.entities {
            for noun in &vocab.nouns {
                entries.push(entity_entry(noun, PartOfSpeech::Noun, entity_id, vocab));
            }
            for adj in &vocab.adjectives {
                entries.push(entity_entry(adj, PartOfSpeech::Adjective, entity_id, vocab));
            }
        }
        entries
    }

    fn rebuild_index(&mut self) {
        let mut providers: Vec<&VocabularyProvider> = self.providers.iter().collect();
        // stable: equal-priority providers keep registration order
        providers.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut by_word: HashMap<String, Vec<VocabularyEntry>> = HashMap::new();
        let entity_entries = self.collect_entity_entries();
        for entry in providers.iter().flat_map(|p| p.entries.iter()).chain(entity_entries.iter()) {
            if entry.word.is_empty() {
                continue;
            }
            if entry.word.contains(char::is_whitespace) {
                debug!("vocabulary word '{}' spans several tokens and will not match input", entry.word);
            }
            by_word.entry(entry.word.clone()).or_default().push(entry.clone());
        }
        for entries in by_word.values_mut() {
            entries.sort_by(|a, b| b.priority.cmp(&a.priority));
        }
        self.by_word = by_word;
        self.entity_entries = entity_entries;
    }
}

fn verb_entries(verbs: &[VerbVocabulary], source: &VocabSource, priority: i32) -> Vec<VocabularyEntry> {
    let mut entries = Vec::new();
    for def in verbs {
        for verb in &def.verbs {
            let mut entry =
                VocabularyEntry::new(verb, PartOfSpeech::Verb, def.action_id.as_str(), source.clone()).with_priority(priority);
            entry.metadata.prepositions = def.prepositions.clone();
            entries.push(entry);
        }
    }
    entries
}

fn entity_entry(word: &str, part_of_speech: PartOfSpeech, entity_id: &str, vocab: &EntityVocabulary) -> VocabularyEntry {
    let mut entry =
        VocabularyEntry::new(word, part_of_speech, entity_id, VocabSource::Entity).with_priority(vocab.priority);
    entry.metadata.in_scope = Some(vocab.in_scope);
    entry
}
