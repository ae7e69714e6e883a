//! Tokenizer
//!
//! Splits player input on whitespace and attaches every vocabulary interpretation
//! to each word. Unknown words are kept with an empty candidate list so later stages
//! can report them; nothing is ever dropped here (article filtering happens in the parser).

use serde::Serialize;

use crate::vocabulary::{PartOfSpeech, VocabSource, VocabularyRegistry};

/// One interpretation of a token, copied out of the vocabulary registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenCandidate {
    pub part_of_speech: PartOfSpeech,
    pub maps_to: String,
    pub priority: i32,
    pub source: VocabSource,
}

/// A single word of input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The word exactly as typed.
    pub word: String,
    /// Lower-cased form used for lookup and noun text.
    pub normalized: String,
    /// Character offset of the word in the original input.
    pub position: usize,
    pub candidates: Vec<TokenCandidate>,
}

impl Token {
    pub fn is_unknown(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn has(&self, part_of_speech: PartOfSpeech) -> bool {
        self.candidates.iter().any(|c| c.part_of_speech == part_of_speech)
    }

    /// Candidates of one part of speech, in priority order.
    pub fn candidates_of(&self, part_of_speech: PartOfSpeech) -> impl Iterator<Item = &TokenCandidate> {
        self.candidates.iter().filter(move |c| c.part_of_speech == part_of_speech)
    }

    /// True if any candidate of the given part of speech maps to `marker`.
    pub fn maps_to(&self, part_of_speech: PartOfSpeech, marker: &str) -> bool {
        self.candidates_of(part_of_speech).any(|c| c.maps_to == marker)
    }
}

/// Tokenize `input` against the registry. Deterministic for identical input and registry state.
pub fn tokenize(input: &str, vocabulary: &VocabularyRegistry) -> Vec<Token> {
    split_words(input)
        .into_iter()
        .map(|(position, word)| {
            let normalized = word.to_lowercase();
            let candidates = vocabulary
                .lookup(&normalized)
                .iter()
                .map(|entry| TokenCandidate {
                    part_of_speech: entry.part_of_speech,
                    maps_to: entry.maps_to.clone(),
                    priority: entry.priority,
                    source: entry.source.clone(),
                })
                .collect();
            Token {
                word: word.to_string(),
                normalized,
                position,
                candidates,
            }
        })
        .collect()
}

/// Whitespace-delimited words paired with their character (not byte) offsets.
fn split_words(input: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start: Option<(usize, usize)> = None; // (char offset, byte offset)
    for (char_pos, (byte_pos, ch)) in input.char_indices().enumerate() {
        if ch.is_whitespace() {
            if let Some((char_start, byte_start)) = start.take() {
                words.push((char_start, &input[byte_start..byte_pos]));
            }
        } else if start.is_none() {
            start = Some((char_pos, byte_pos));
        }
    }
    if let Some((char_start, byte_start)) = start {
        words.push((char_start, &input[byte_start..]));
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{DirectionVocabulary, VerbVocabulary};

    fn registry() -> VocabularyRegistry {
        let mut reg = VocabularyRegistry::new();
        reg.register_verbs(&[VerbVocabulary::new("if.action.taking", &["take"])]);
        reg.register_directions(&[DirectionVocabulary::new("in", &["in"], &[])]);
        reg.register_prepositions(&["in".to_string()]);
        reg
    }

    #[test]
    fn keeps_unknown_words_with_empty_candidates() {
        let tokens = tokenize("take the frobozz", &registry());
        assert_eq!(tokens.len(), 3);
        assert!(tokens[1].is_unknown());
        assert!(tokens[2].is_unknown());
        assert_eq!(tokens[2].word, "frobozz");
    }

    #[test]
    fn records_character_offsets() {
        let tokens = tokenize("  take   café lamp", &registry());
        let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![2, 9, 14]);
    }

    #[test]
    fn normalizes_case_but_keeps_original_word() {
        let tokens = tokenize("TAKE", &registry());
        assert_eq!(tokens[0].word, "TAKE");
        assert_eq!(tokens[0].normalized, "take");
        assert!(tokens[0].has(PartOfSpeech::Verb));
    }

    #[test]
    fn polysemous_token_carries_all_interpretations() {
        let tokens = tokenize("in", &registry());
        assert!(tokens[0].has(PartOfSpeech::Direction));
        assert!(tokens[0].has(PartOfSpeech::Preposition));
    }

    #[test]
    fn blank_input_yields_no_tokens() {
        assert!(tokenize(" \t\n", &registry()).is_empty());
    }

    #[test]
    fn deterministic() {
        let reg = registry();
        assert_eq!(tokenize("take in lamp", &reg), tokenize("take in lamp", &reg));
    }
}
