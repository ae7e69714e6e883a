use pest::Parser;
use pest_derive::Parser as PestParser;

use super::{GrammarError, PatternElement, ScopeHint, ScopeHintKind};

#[derive(PestParser)]
#[grammar = "src/grammar/template.pest"]
struct TemplateParser;

/// Structure extracted from a template string at registration time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedTemplate {
    /// Leading verb alternatives (`take|get` => `["take", "get"]`).
    pub verbs: Vec<String>,
    pub elements: Vec<PatternElement>,
    pub scope_hints: Vec<ScopeHint>,
}

impl ParsedTemplate {
    /// Number of placeholders that consume an object (nouns, directions and free text).
    pub fn slot_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_slot()).count()
    }
}

/// Parse a (normalized) template into verbs, elements and scope hints.
///
/// Only `<noun>` and `<second>` placeholders advance the scope-hint position, so in
/// `"give <noun:held> to <noun:person>"` the hints sit at positions 0 and 1.
pub fn parse_template(template: &str) -> Result<ParsedTemplate, GrammarError> {
    let invalid = |reason: String| GrammarError::InvalidTemplate {
        template: template.to_string(),
        reason,
    };

    let mut pairs = TemplateParser::parse(Rule::template, template).map_err(|e| invalid(e.to_string()))?;
    let root = pairs.next().ok_or_else(|| invalid("empty template".to_string()))?;

    let mut elements = Vec::new();
    let mut scope_hints = Vec::new();
    let mut noun_position = 0;
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::alternatives => {
                let words = pair.into_inner().map(|w| w.as_str().to_string()).collect();
                elements.push(PatternElement::Words(words));
            },
            Rule::placeholder => {
                let mut inner = pair.into_inner();
                let kind = inner.next().map(|p| p.as_str()).unwrap_or_default();
                let hint = inner.next().map(|p| ScopeHintKind::from_keyword(p.as_str()));
                match kind {
                    "noun" | "second" => {
                        if let Some(hint) = &hint {
                            scope_hints.push(ScopeHint {
                                position: noun_position,
                                hint: hint.clone(),
                                required: false,
                            });
                        }
                        elements.push(PatternElement::Noun {
                            position: noun_position,
                            hint,
                        });
                        noun_position += 1;
                    },
                    "direction" => elements.push(PatternElement::Direction),
                    "text" | "topic" => elements.push(PatternElement::Text),
                    other => return Err(invalid(format!("unknown placeholder '<{other}>'"))),
                }
            },
            Rule::EOI => {},
            other => return Err(invalid(format!("unexpected template element {other:?}"))),
        }
    }

    let verbs = match elements.first() {
        Some(PatternElement::Words(words)) => words.clone(),
        _ => return Err(invalid("template must start with a verb".to_string())),
    };
    Ok(ParsedTemplate {
        verbs,
        elements,
        scope_hints,
    })
}
