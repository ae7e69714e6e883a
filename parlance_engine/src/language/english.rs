//! English (US) language provider.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{Conjunction, ItemNameStyle, LanguageProvider, capitalize};
use crate::actions;
use crate::vocabulary::{DirectionVocabulary, SpecialVocabulary, VerbVocabulary};

/// Verb words per action. Only single words: the tokenizer never joins words.
const VERBS: &[(&str, &[&str])] = &[
    (actions::GOING, &["go", "move", "walk", "run", "head", "travel"]),
    (actions::ENTERING, &["enter"]),
    (actions::EXITING, &["exit", "leave"]),
    (actions::CLIMBING, &["climb", "scale", "ascend"]),
    (actions::LOOKING, &["look", "l"]),
    (actions::EXAMINING, &["examine", "x", "inspect", "check", "view", "read", "observe"]),
    (actions::SEARCHING, &["search", "find", "locate"]),
    (actions::LISTENING, &["listen", "hear"]),
    (actions::SMELLING, &["smell", "sniff"]),
    (actions::TOUCHING, &["touch", "feel"]),
    (actions::TAKING, &["take", "get", "pick", "grab", "acquire"]),
    (actions::DROPPING, &["drop", "discard"]),
    (actions::PUTTING, &["put", "place"]),
    (actions::INSERTING, &["insert"]),
    (actions::OPENING, &["open", "unwrap", "uncover"]),
    (actions::CLOSING, &["close", "shut", "cover"]),
    (actions::LOCKING, &["lock", "secure"]),
    (actions::UNLOCKING, &["unlock", "unsecure"]),
    (actions::SWITCHING_ON, &["activate", "start"]),
    (actions::SWITCHING_OFF, &["deactivate", "stop"]),
    (actions::PUSHING, &["push", "press", "shove"]),
    (actions::PULLING, &["pull", "tug", "drag"]),
    (actions::TURNING, &["turn", "rotate", "twist"]),
    (actions::USING, &["use", "utilize", "employ"]),
    (actions::GIVING, &["give", "hand", "offer"]),
    (actions::SHOWING, &["show", "display", "present"]),
    (actions::THROWING, &["throw", "toss", "hurl"]),
    (actions::ATTACKING, &["attack", "hit", "strike", "fight", "kill"]),
    (actions::WEARING, &["wear", "don", "equip"]),
    (actions::TAKING_OFF, &["remove", "doff", "unequip"]),
    (actions::EATING, &["eat", "consume", "devour"]),
    (actions::DRINKING, &["drink", "sip", "swallow", "quaff"]),
    (actions::TALKING, &["talk", "speak", "converse", "chat"]),
    (actions::ASKING, &["ask", "inquire", "question"]),
    (actions::TELLING, &["tell", "inform", "say"]),
    (actions::ANSWERING, &["answer", "respond", "reply"]),
    (actions::INVENTORY, &["inventory", "i", "inv"]),
    (actions::WAITING, &["wait", "z"]),
    (actions::SLEEPING, &["sleep", "nap", "doze", "rest", "slumber"]),
    (actions::SAVING, &["save"]),
    (actions::RESTORING, &["restore", "load"]),
    (actions::QUITTING, &["quit", "q"]),
    (actions::HELP, &["help", "?", "commands"]),
    (actions::ABOUT, &["about", "info", "credits"]),
    (actions::SCORING, &["score", "points"]),
];

/// Verbs that usually take a second object, and the prepositions they take it with.
const INDIRECT_VERBS: &[&str] = &[
    actions::PUTTING,
    actions::INSERTING,
    actions::USING,
    actions::GIVING,
    actions::SHOWING,
    actions::THROWING,
    actions::ASKING,
    actions::TELLING,
];
const INDIRECT_PREPOSITIONS: &[&str] = &["in", "on", "to", "with"];

const DIRECTIONS: &[(&str, &[&str], &[&str])] = &[
    ("north", &["north"], &["n"]),
    ("south", &["south"], &["s"]),
    ("east", &["east"], &["e"]),
    ("west", &["west"], &["w"]),
    ("northeast", &["northeast"], &["ne"]),
    ("northwest", &["northwest"], &["nw"]),
    ("southeast", &["southeast"], &["se"]),
    ("southwest", &["southwest"], &["sw"]),
    ("up", &["up", "upward", "upwards"], &["u"]),
    ("down", &["down", "downward", "downwards"], &["d"]),
    ("in", &["in", "inside"], &[]),
    ("out", &["out", "outside"], &[]),
];

const ARTICLES: &[&str] = &["a", "an", "the", "some"];
const PRONOUNS: &[&str] = &["it", "them", "him", "her"];
const ALL_WORDS: &[&str] = &["all", "everything", "every"];
const EXCEPT_WORDS: &[&str] = &["except", "but"];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before", "behind", "below",
    "beneath", "beside", "between", "beyond", "by", "down", "for", "from", "in", "inside", "into", "near", "of",
    "off", "on", "onto", "out", "outside", "over", "through", "to", "toward", "towards", "under", "underneath",
    "up", "upon", "with", "within", "without",
];

const ADJECTIVES: &[&str] = &[
    "big", "small", "large", "little", "tiny", "huge", "old", "new", "red", "blue", "green", "yellow", "black",
    "white", "brown", "gray", "grey", "golden", "silver", "brass", "wooden", "iron", "rusty", "shiny", "dark",
    "bright", "heavy", "light", "open", "closed", "broken",
];

/// Parser error prose, keyed by `ParseErrorKind::code`.
const PARSER_MESSAGES: &[(&str, &str)] = &[
    ("no_verb", "There was no verb in that sentence."),
    ("unknown_verb", "I don't know the verb '{word}'."),
    ("unknown_word", "I don't know the word '{word}'."),
    ("ambiguous", "'{word:cap}' could mean more than one thing here."),
    ("incomplete", "I beg your pardon?"),
    ("pattern_mismatch", "I only understood you as far as wanting to {word}."),
    ("below_threshold", "I'm not sure what you mean."),
];

/// Other interpreter-facing messages.
const GENERAL_MESSAGES: &[(&str, &str)] = &[
    ("missing_object", "What do you want to {verb}?"),
    ("missing_indirect_object", "What do you want to {verb} it {preposition}?"),
    ("unknown_object", "I don't know what '{object}' refers to."),
    ("ambiguous_object", "Which do you mean: {options}?"),
    ("object_not_found", "You can't see any such thing."),
];

lazy_static! {
    /// plural => singular
    static ref IRREGULAR_PLURALS: HashMap<&'static str, &'static str> = HashMap::from([
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("knives", "knife"),
        ("leaves", "leaf"),
        ("wolves", "wolf"),
        ("dice", "die"),
        ("oxen", "ox"),
    ]);
    static ref MESSAGES: HashMap<&'static str, &'static str> =
        PARSER_MESSAGES.iter().chain(GENERAL_MESSAGES.iter()).copied().collect();
}

/// English template for a parser message key; the key itself when none exists.
pub(crate) fn parser_message(key: &str) -> &str {
    PARSER_MESSAGES
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(key, |(_, template)| *template)
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

#[derive(Clone, Debug, Default)]
pub struct EnglishLanguage;

impl EnglishLanguage {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageProvider for EnglishLanguage {
    fn code(&self) -> &str {
        "en-US"
    }

    fn name(&self) -> &str {
        "English (US)"
    }

    fn verbs(&self) -> Vec<VerbVocabulary> {
        VERBS
            .iter()
            .map(|(action, words)| {
                let mut vocab = VerbVocabulary::new(action, words);
                if INDIRECT_VERBS.contains(action) {
                    vocab.prepositions = strings(INDIRECT_PREPOSITIONS);
                }
                vocab
            })
            .collect()
    }

    fn directions(&self) -> Vec<DirectionVocabulary> {
        DIRECTIONS
            .iter()
            .map(|(direction, words, abbreviations)| DirectionVocabulary::new(direction, words, abbreviations))
            .collect()
    }

    fn special_vocabulary(&self) -> SpecialVocabulary {
        SpecialVocabulary {
            articles: strings(ARTICLES),
            pronouns: strings(PRONOUNS),
            all_words: strings(ALL_WORDS),
            except_words: strings(EXCEPT_WORDS),
        }
    }

    fn prepositions(&self) -> Vec<String> {
        strings(PREPOSITIONS)
    }

    fn common_adjectives(&self) -> Vec<String> {
        strings(ADJECTIVES)
    }

    fn lemmatize(&self, word: &str) -> String {
        let lower = word.trim().to_lowercase();
        if let Some(singular) = IRREGULAR_PLURALS.get(lower.as_str()) {
            return (*singular).to_string();
        }
        let len = lower.chars().count();
        if lower == "yes" {
            return lower;
        }
        if len > 4 && lower.ends_with("ies") {
            return format!("{}y", &lower[..lower.len() - 3]);
        }
        if len > 3 && lower.ends_with("es") {
            return lower[..lower.len() - 2].to_string();
        }
        if len > 2 && lower.ends_with('s') && !lower.ends_with("ss") {
            return lower[..lower.len() - 1].to_string();
        }
        if len > 3 && lower.ends_with("ed") {
            let bytes = lower.as_bytes();
            // doubled consonant: "dropped" -> "drop"
            let doubled = bytes[bytes.len() - 3];
            if len > 4 && doubled == bytes[bytes.len() - 4] && !b"aeiou".contains(&doubled) {
                return lower[..lower.len() - 3].to_string();
            }
            return lower[..lower.len() - 2].to_string();
        }
        if len > 4 && lower.ends_with("ing") && !lower.contains('-') {
            return lower[..lower.len() - 3].to_string();
        }
        lower
    }

    fn pluralize(&self, noun: &str) -> String {
        if noun.is_empty() {
            return String::new();
        }
        let lower = noun.to_lowercase();
        if let Some((plural, _)) = IRREGULAR_PLURALS.iter().find(|(_, singular)| **singular == lower) {
            if noun == noun.to_uppercase() {
                return plural.to_uppercase();
            }
            if noun.starts_with(char::is_uppercase) {
                return capitalize(plural);
            }
            return (*plural).to_string();
        }
        if ["s", "x", "z", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
            return format!("{noun}es");
        }
        let mut rev = lower.chars().rev();
        if let (Some('y'), Some(before)) = (rev.next(), rev.next())
            && !"aeiou".contains(before)
        {
            let stem = &noun[..noun.len() - 1];
            let suffix = if noun == noun.to_uppercase() { "IES" } else { "ies" };
            return format!("{stem}{suffix}");
        }
        if lower.ends_with("fe") {
            return format!("{}ves", &noun[..noun.len() - 2]);
        }
        if lower.ends_with('f') {
            return format!("{}ves", &noun[..noun.len() - 1]);
        }
        format!("{noun}s")
    }

    fn indefinite_article(&self, noun: &str) -> &'static str {
        let lower = noun.trim().to_lowercase();
        if lower.starts_with("hour") || lower.starts_with("honest") {
            return "an";
        }
        if lower.starts_with("uni") || lower.starts_with("one") {
            return "a";
        }
        match lower.chars().next() {
            Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
            _ => "a",
        }
    }

    fn format_list(&self, items: &[&str], conjunction: Conjunction) -> String {
        let word = match conjunction {
            Conjunction::And => "and",
            Conjunction::Or => "or",
        };
        match items {
            [] => String::new(),
            [only] => (*only).to_string(),
            [first, second] => format!("{first} {word} {second}"),
            [rest @ .., last] => format!("{}, {word} {last}", rest.join(", ")),
        }
    }

    fn format_item_name(&self, name: &str, style: ItemNameStyle) -> String {
        let rendered = if style.proper {
            name.to_string()
        } else if style.definite {
            format!("the {name}")
        } else if style.plural {
            name.to_string()
        } else {
            format!("{} {name}", self.indefinite_article(name))
        };
        if style.capitalize {
            capitalize(&rendered)
        } else {
            rendered
        }
    }

    fn message_template(&self, key: &str) -> Option<&str> {
        MESSAGES.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::PartOfSpeech;

    #[test]
    fn verbs_are_single_words() {
        for verb in EnglishLanguage.verbs() {
            for word in &verb.verbs {
                assert!(!word.contains(' '), "multi-word verb '{word}' can never match");
            }
        }
    }

    #[test]
    fn indirect_verbs_carry_prepositions() {
        let verbs = EnglishLanguage.verbs();
        let putting = verbs.iter().find(|v| v.action_id == actions::PUTTING).unwrap();
        assert_eq!(putting.prepositions, strings(INDIRECT_PREPOSITIONS));
        let taking = verbs.iter().find(|v| v.action_id == actions::TAKING).unwrap();
        assert!(taking.prepositions.is_empty());
    }

    #[test]
    fn lemmatizes_common_forms() {
        let en = EnglishLanguage::new();
        assert_eq!(en.lemmatize("Boxes"), "box");
        assert_eq!(en.lemmatize("berries"), "berry");
        assert_eq!(en.lemmatize("lamps"), "lamp");
        assert_eq!(en.lemmatize("glass"), "glass");
        assert_eq!(en.lemmatize("dropped"), "drop");
        assert_eq!(en.lemmatize("opened"), "open");
        assert_eq!(en.lemmatize("walking"), "walk");
        assert_eq!(en.lemmatize("children"), "child");
        assert_eq!(en.lemmatize("yes"), "yes");
    }

    #[test]
    fn pluralizes_with_case() {
        let en = EnglishLanguage::new();
        assert_eq!(en.pluralize("box"), "boxes");
        assert_eq!(en.pluralize("berry"), "berries");
        assert_eq!(en.pluralize("key"), "keys");
        assert_eq!(en.pluralize("knife"), "knives");
        assert_eq!(en.pluralize("Child"), "Children");
        assert_eq!(en.pluralize("MOUSE"), "MICE");
        assert_eq!(en.pluralize("lamp"), "lamps");
    }

    #[test]
    fn articles_and_lists() {
        let en = EnglishLanguage::new();
        assert_eq!(en.indefinite_article("apple"), "an");
        assert_eq!(en.indefinite_article("hour"), "an");
        assert_eq!(en.indefinite_article("unicorn"), "a");
        assert_eq!(en.format_list(&[], Conjunction::And), "");
        assert_eq!(en.format_list(&["lamp", "sword"], Conjunction::Or), "lamp or sword");
        assert_eq!(
            en.format_list(&["lamp", "sword", "chest"], Conjunction::And),
            "lamp, sword, and chest"
        );
    }

    #[test]
    fn item_names() {
        let en = EnglishLanguage::new();
        assert_eq!(en.format_item_name("apple", ItemNameStyle::default()), "an apple");
        let style = ItemNameStyle {
            definite: true,
            capitalize: true,
            ..ItemNameStyle::default()
        };
        assert_eq!(en.format_item_name("lamp", style), "The lamp");
        let proper = ItemNameStyle {
            proper: true,
            ..ItemNameStyle::default()
        };
        assert_eq!(en.format_item_name("Zork", proper), "Zork");
    }

    #[test]
    fn tags_closed_class_words() {
        let en = EnglishLanguage::new();
        let tags = en.tag_word("in");
        assert!(tags.contains(&PartOfSpeech::Direction));
        assert!(tags.contains(&PartOfSpeech::Preposition));
        assert_eq!(en.tag_word("The"), vec![PartOfSpeech::Article]);
    }

    #[test]
    fn messages_format_with_modifiers() {
        let en = EnglishLanguage::new();
        assert_eq!(
            en.format_message("ambiguous", &[("word", "take")]).unwrap(),
            "'Take' could mean more than one thing here."
        );
        assert_eq!(
            en.format_message("missing_object", &[("verb", "open")]).unwrap(),
            "What do you want to open?"
        );
        assert!(en.format_message("no_such_key", &[]).is_none());
    }
}
