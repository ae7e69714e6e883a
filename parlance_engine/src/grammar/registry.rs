//! Grammar pattern registry.
//!
//! Patterns live in a slab addressed by [`PatternId`]. Two indexes point into it: one keyed
//! by each leading verb alternative (kept in descending priority order) and one keyed by
//! action id. Removing a pattern vacates its slab slot so ids stay stable.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use serde::Serialize;

use super::template::parse_template;
use super::{
    GrammarConfig, GrammarError, GrammarPattern, PatternCategory, PatternElement, ScopeHint, normalize_template,
};

/// Stable handle to a registered pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PatternId(usize);

/// A normalized pattern as stored by the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisteredPattern {
    pub id: PatternId,
    /// Lower-cased, whitespace-collapsed template.
    pub template: String,
    pub action: String,
    pub priority: i32,
    pub category: PatternCategory,
    pub scope_hints: Vec<ScopeHint>,
    pub enabled: bool,
    pub verbs: Vec<String>,
    pub elements: Vec<PatternElement>,
}

impl RegisteredPattern {
    /// Number of object-consuming placeholders.
    pub fn slot_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_slot()).count()
    }

    /// Literal words after the leading verb (`take <noun> off` => `[["off"]]`).
    pub fn literals(&self) -> impl Iterator<Item = &[String]> {
        self.elements.iter().skip(1).filter_map(|e| match e {
            PatternElement::Words(words) => Some(words.as_slice()),
            _ => None,
        })
    }
}

/// Summary counts, for tooling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GrammarStats {
    pub total_patterns: usize,
    pub by_category: BTreeMap<PatternCategory, usize>,
    pub by_action: BTreeMap<String, usize>,
    /// Every indexed verb, sorted.
    pub verbs: Vec<String>,
}

/// Declarative pattern store for one parser instance.
#[derive(Clone, Debug, Default)]
pub struct GrammarRegistry {
    config: GrammarConfig,
    patterns: Vec<Option<RegisteredPattern>>,
    by_verb: BTreeMap<String, Vec<PatternId>>,
    by_action: BTreeMap<String, Vec<PatternId>>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GrammarConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GrammarConfig) {
        self.config = config;
    }

    /// Number of live patterns (aliases count individually).
    pub fn len(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: PatternId) -> Option<&RegisteredPattern> {
        self.patterns.get(id.0).and_then(Option::as_ref)
    }

    /// Validate, normalize and index a pattern plus any aliases it declares.
    ///
    /// Aliases become independent patterns with the same action, priority and category;
    /// an alias's own aliases are never expanded. Returns the id of the primary pattern.
    ///
    /// # Errors
    /// Empty template or action, custom patterns while they are disabled, or a template
    /// that does not parse.
    pub fn add_pattern(&mut self, pattern: GrammarPattern) -> Result<PatternId, GrammarError> {
        let template = normalize_template(&pattern.template);
        if template.is_empty() {
            return Err(GrammarError::EmptyTemplate {
                action: pattern.action.clone(),
            });
        }
        let action = pattern.action.trim().to_string();
        if action.is_empty() {
            return Err(GrammarError::MissingAction { template });
        }
        if pattern.category == PatternCategory::Custom && !self.config.allow_custom_patterns {
            return Err(GrammarError::CustomPatternsDisabled { template });
        }

        // parse everything first so a bad alias leaves the registry untouched
        let priority = pattern.priority.unwrap_or(self.config.default_priority);
        let mut prepared = vec![(template, pattern.scope_hints.clone())];
        for alias in &pattern.aliases {
            let alias = normalize_template(alias);
            if alias.is_empty() {
                return Err(GrammarError::EmptyTemplate { action });
            }
            prepared.push((alias, Vec::new()));
        }
        let mut parsed_all = Vec::with_capacity(prepared.len());
        for (template, explicit_hints) in prepared {
            let parsed = parse_template(&template)?;
            let scope_hints = if explicit_hints.is_empty() {
                parsed.scope_hints.clone()
            } else {
                explicit_hints
            };
            parsed_all.push((template, parsed, scope_hints));
        }

        let mut primary = None;
        for (template, parsed, scope_hints) in parsed_all {
            let id = PatternId(self.patterns.len());
            let registered = RegisteredPattern {
                id,
                template,
                action: action.clone(),
                priority,
                category: pattern.category,
                scope_hints,
                enabled: pattern.enabled,
                verbs: parsed.verbs,
                elements: parsed.elements,
            };
            debug!(
                "grammar: '{}' => '{}' (priority {}, {})",
                registered.template, registered.action, registered.priority, registered.category
            );
            self.index(&registered);
            self.patterns.push(Some(registered));
            primary.get_or_insert(id);
        }
        // prepared always holds the primary template, so at least one id was assigned
        primary.ok_or(GrammarError::EmptyTemplate { action })
    }

    /// Register many patterns, stopping at the first failure.
    ///
    /// # Errors
    /// The first `add_pattern` error encountered.
    pub fn add_patterns(&mut self, patterns: impl IntoIterator<Item = GrammarPattern>) -> Result<usize, GrammarError> {
        let mut count = 0;
        for pattern in patterns {
            self.add_pattern(pattern)?;
            count += 1;
        }
        Ok(count)
    }

    /// Enabled patterns whose leading verb equals `input`'s first word, followed by those whose
    /// verb merely starts with it. Each group keeps descending priority order.
    pub fn find_patterns(&self, input: &str) -> Vec<&RegisteredPattern> {
        let Some(first) = input.split_whitespace().next().map(str::to_lowercase) else {
            return Vec::new();
        };

        let mut ids: Vec<PatternId> = Vec::new();
        if let Some(exact) = self.by_verb.get(&first) {
            ids.extend(exact);
        }
        for (verb, verb_ids) in self.by_verb.range(first.clone()..) {
            if !verb.starts_with(&first) {
                break;
            }
            if *verb != first {
                ids.extend(verb_ids);
            }
        }

        let mut seen = BTreeSet::new();
        ids.into_iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.get(id))
            .filter(|p| p.enabled)
            .collect()
    }

    /// Every pattern (enabled or not) registered for an action, in registration order.
    pub fn patterns_by_action(&self, action: &str) -> Vec<&RegisteredPattern> {
        self.by_action
            .get(action)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    pub fn patterns_by_category(&self, category: PatternCategory) -> Vec<&RegisteredPattern> {
        self.live().filter(|p| p.category == category).collect()
    }

    /// Remove every pattern with this template and action.
    ///
    /// # Errors
    /// `PatternNotFound` if none match, `ProtectedPattern` if a match is a standard pattern
    /// (in which case nothing is removed).
    pub fn remove_pattern(&mut self, template: &str, action: &str) -> Result<usize, GrammarError> {
        let template = normalize_template(template);
        let ids: Vec<PatternId> = self
            .live()
            .filter(|p| p.template == template && p.action == action)
            .map(|p| p.id)
            .collect();
        if ids.is_empty() {
            return Err(GrammarError::PatternNotFound {
                template,
                action: action.to_string(),
            });
        }
        if ids.iter().filter_map(|id| self.get(*id)).any(|p| p.category.is_standard()) {
            return Err(GrammarError::ProtectedPattern {
                template,
                action: action.to_string(),
            });
        }
        for id in &ids {
            self.remove_id(*id);
        }
        info!("grammar: removed '{template}' => '{action}'");
        Ok(ids.len())
    }

    /// Remove every non-standard pattern for an action. Standard patterns stay registered.
    ///
    /// # Errors
    /// `StandardPatternsKept` when standard patterns were skipped; the removals still happen
    /// and the error carries their count.
    pub fn remove_action(&mut self, action: &str) -> Result<usize, GrammarError> {
        let (kept, removable): (Vec<PatternId>, Vec<PatternId>) = self
            .by_action
            .get(action)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .partition(|id| self.get(*id).is_some_and(|p| p.category.is_standard()));
        for id in &removable {
            self.remove_id(*id);
        }
        if !removable.is_empty() {
            info!("grammar: removed {} pattern(s) for '{action}'", removable.len());
        }
        if kept.is_empty() {
            Ok(removable.len())
        } else {
            Err(GrammarError::StandardPatternsKept {
                action: action.to_string(),
                removed: removable.len(),
                kept: kept.len(),
            })
        }
    }

    /// Show or hide matching patterns without deleting them. Standard patterns may be toggled.
    ///
    /// # Errors
    /// `PatternNotFound` if no pattern has this template and action.
    pub fn set_pattern_enabled(&mut self, template: &str, action: &str, enabled: bool) -> Result<usize, GrammarError> {
        let template = normalize_template(template);
        let mut changed = 0;
        for pattern in self.patterns.iter_mut().flatten() {
            if pattern.template == template && pattern.action == action {
                pattern.enabled = enabled;
                changed += 1;
            }
        }
        if changed == 0 {
            return Err(GrammarError::PatternNotFound {
                template,
                action: action.to_string(),
            });
        }
        Ok(changed)
    }

    /// Drop every custom-category pattern; standard, library and system patterns stay.
    pub fn clear_custom_patterns(&mut self) -> usize {
        let ids: Vec<PatternId> = self
            .live()
            .filter(|p| p.category == PatternCategory::Custom)
            .map(|p| p.id)
            .collect();
        for id in &ids {
            self.remove_id(*id);
        }
        info!("grammar: cleared {} custom pattern(s)", ids.len());
        ids.len()
    }

    /// Forget everything, standard patterns included (language switch).
    pub fn clear(&mut self) {
        self.patterns.clear();
        self.by_verb.clear();
        self.by_action.clear();
        info!("grammar registry cleared");
    }

    pub fn stats(&self) -> GrammarStats {
        let mut stats = GrammarStats {
            by_category: PatternCategory::ALL.iter().map(|c| (*c, 0)).collect(),
            verbs: self.by_verb.keys().cloned().collect(),
            ..GrammarStats::default()
        };
        for pattern in self.live() {
            stats.total_patterns += 1;
            *stats.by_category.entry(pattern.category).or_default() += 1;
            *stats.by_action.entry(pattern.action.clone()).or_default() += 1;
        }
        stats
    }

    /// Scope hints for a template, parsed the same way registration does.
    ///
    /// # Errors
    /// `InvalidTemplate` if the template does not parse.
    pub fn parse_scope_hints(template: &str) -> Result<Vec<ScopeHint>, GrammarError> {
        Ok(parse_template(&normalize_template(template))?.scope_hints)
    }

    /// Assemble a template from verbs, parts and per-part hints.
    ///
    /// `hints` pairs a part index with a hint keyword; only placeholder parts take a hint.
    /// `build_pattern(&["put", "place"], &["<noun>", "on", "<noun>"], &[(2, "supporter")])`
    /// yields `"put|place <noun> on <noun:supporter>"`.
    pub fn build_pattern(verbs: &[&str], parts: &[&str], hints: &[(usize, &str)]) -> String {
        let mut result = verbs.join("|");
        for (i, part) in parts.iter().enumerate() {
            result.push(' ');
            let hint = hints.iter().find(|(index, _)| *index == i).map(|(_, hint)| *hint);
            match (part.strip_prefix('<').and_then(|p| p.strip_suffix('>')), hint) {
                (Some(inner), Some(hint)) => result.push_str(&format!("<{inner}:{hint}>")),
                _ => result.push_str(part),
            }
        }
        result
    }

    fn live(&self) -> impl Iterator<Item = &RegisteredPattern> {
        self.patterns.iter().flatten()
    }

    fn index(&mut self, pattern: &RegisteredPattern) {
        for verb in &pattern.verbs {
            let ids = self.by_verb.entry(verb.clone()).or_default();
            // insert after every pattern of equal or higher priority
            let at = ids
                .iter()
                .position(|id| {
                    self.patterns
                        .get(id.0)
                        .and_then(Option::as_ref)
                        .is_some_and(|p| p.priority < pattern.priority)
                })
                .unwrap_or(ids.len());
            ids.insert(at, pattern.id);
        }
        self.by_action.entry(pattern.action.clone()).or_default().push(pattern.id);
    }

    fn remove_id(&mut self, id: PatternId) {
        let Some(pattern) = self.patterns.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        for verb in &pattern.verbs {
            if let Some(ids) = self.by_verb.get_mut(verb) {
                ids.retain(|other| *other != id);
                if ids.is_empty() {
                    self.by_verb.remove(verb);
                }
            }
        }
        if let Some(ids) = self.by_action.get_mut(&pattern.action) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_action.remove(&pattern.action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ScopeHintKind;

    fn standard(template: &str, action: &str, priority: i32) -> GrammarPattern {
        GrammarPattern::new(template, action)
            .with_category(PatternCategory::Standard)
            .with_priority(priority)
    }

    #[test]
    fn indexes_every_verb_alternative() {
        let mut reg = GrammarRegistry::new();
        reg.add_pattern(GrammarPattern::new("Take|GET <noun>", "if.action.taking"))
            .unwrap();
        assert_eq!(reg.find_patterns("take lamp").len(), 1);
        assert_eq!(reg.find_patterns("get lamp")[0].template, "take|get <noun>");
        assert_eq!(reg.find_patterns("get")[0].priority, 50);
    }

    #[test]
    fn exact_matches_come_before_prefix_extensions_in_priority_order() {
        let mut reg = GrammarRegistry::new();
        reg.add_pattern(GrammarPattern::new("examine <noun>", "if.action.examining").with_priority(90))
            .unwrap();
        reg.add_pattern(GrammarPattern::new("ex <noun>", "story.action.ex").with_priority(10))
            .unwrap();
        reg.add_pattern(GrammarPattern::new("ex", "story.action.ex_alone").with_priority(40))
            .unwrap();
        let found: Vec<_> = reg.find_patterns("ex").iter().map(|p| p.template.as_str()).collect();
        assert_eq!(found, vec!["ex", "ex <noun>", "examine <noun>"]);
    }

    #[test]
    fn disabled_patterns_are_hidden_but_kept() {
        let mut reg = GrammarRegistry::new();
        reg.add_pattern(GrammarPattern::new("ring <noun>", "story.action.ringing"))
            .unwrap();
        reg.set_pattern_enabled("ring <noun>", "story.action.ringing", false)
            .unwrap();
        assert!(reg.find_patterns("ring bell").is_empty());
        assert_eq!(reg.patterns_by_action("story.action.ringing").len(), 1);
        reg.set_pattern_enabled("ring <noun>", "story.action.ringing", true)
            .unwrap();
        assert_eq!(reg.find_patterns("ring bell").len(), 1);
    }

    #[test]
    fn aliases_register_independently_one_level_deep() {
        let mut reg = GrammarRegistry::new();
        reg.add_pattern(
            GrammarPattern::new("ring <noun>", "story.action.ringing").with_aliases(&["toll <noun:held>"]),
        )
        .unwrap();
        assert_eq!(reg.len(), 2);
        let toll = reg.find_patterns("toll");
        assert_eq!(toll[0].action, "story.action.ringing");
        assert_eq!(toll[0].scope_hints[0].hint, ScopeHintKind::Held);
    }

    #[test]
    fn validation_failures() {
        let mut reg = GrammarRegistry::new();
        assert!(matches!(
            reg.add_pattern(GrammarPattern::new("   ", "x")),
            Err(GrammarError::EmptyTemplate { .. })
        ));
        assert!(matches!(
            reg.add_pattern(GrammarPattern::new("ring", "")),
            Err(GrammarError::MissingAction { .. })
        ));
        assert!(matches!(
            reg.add_pattern(GrammarPattern::new("ring <bell>", "x")),
            Err(GrammarError::InvalidTemplate { .. })
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn bad_alias_leaves_registry_untouched() {
        let mut reg = GrammarRegistry::new();
        let result = reg.add_pattern(GrammarPattern::new("ring <noun>", "x").with_aliases(&["<noun> ring"]));
        assert!(result.is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn custom_patterns_can_be_disabled() {
        let mut reg = GrammarRegistry::with_config(GrammarConfig {
            allow_custom_patterns: false,
            default_priority: 50,
        });
        match reg.add_pattern(GrammarPattern::new("ring <noun>", "x")) {
            Err(GrammarError::CustomPatternsDisabled { template }) => assert_eq!(template, "ring <noun>"),
            other => panic!("unexpected result: {other:?}"),
        }
        reg.add_pattern(GrammarPattern::new("ring <noun>", "x").with_category(PatternCategory::Library))
            .unwrap();
    }

    #[test]
    fn standard_patterns_are_protected() {
        let mut reg = GrammarRegistry::new();
        reg.add_pattern(standard("take|get <noun>", "if.action.taking", 50))
            .unwrap();
        reg.add_pattern(GrammarPattern::new("snatch <noun>", "if.action.taking"))
            .unwrap();

        match reg.remove_pattern("take|get <noun>", "if.action.taking") {
            Err(GrammarError::ProtectedPattern { .. }) => {},
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(reg.patterns_by_action("if.action.taking").len(), 2);
        assert_eq!(reg.find_patterns("take").len(), 1);

        // the story's own pattern goes, the standard one stays
        assert_eq!(
            reg.remove_action("if.action.taking"),
            Err(GrammarError::StandardPatternsKept {
                action: "if.action.taking".into(),
                removed: 1,
                kept: 1,
            })
        );
        assert!(reg.find_patterns("snatch").is_empty());
        let left = reg.patterns_by_action("if.action.taking");
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].template, "take|get <noun>");
    }

    #[test]
    fn removing_custom_patterns() {
        let mut reg = GrammarRegistry::new();
        reg.add_pattern(GrammarPattern::new("ring <noun>", "story.action.ringing"))
            .unwrap();
        reg.add_pattern(GrammarPattern::new("toll <noun>", "story.action.ringing"))
            .unwrap();
        assert_eq!(reg.remove_pattern("RING <noun>", "story.action.ringing"), Ok(1));
        assert!(matches!(
            reg.remove_pattern("ring <noun>", "story.action.ringing"),
            Err(GrammarError::PatternNotFound { .. })
        ));
        assert_eq!(reg.remove_action("story.action.ringing"), Ok(1));
        assert!(reg.is_empty());
        assert!(reg.stats().verbs.is_empty());
    }

    #[test]
    fn clear_custom_keeps_other_categories() {
        let mut reg = GrammarRegistry::new();
        reg.add_pattern(standard("look", "if.action.looking", 50)).unwrap();
        reg.add_pattern(GrammarPattern::new("ring", "story.action.ringing"))
            .unwrap();
        reg.add_pattern(GrammarPattern::new("xyzzy", "ext.action.magic").with_category(PatternCategory::Library))
            .unwrap();
        assert_eq!(reg.clear_custom_patterns(), 1);
        let stats = reg.stats();
        assert_eq!(stats.total_patterns, 2);
        assert_eq!(stats.by_category[&PatternCategory::Custom], 0);
        assert_eq!(stats.by_category[&PatternCategory::Library], 1);
        assert_eq!(stats.verbs, vec!["look".to_string(), "xyzzy".to_string()]);
        reg.clear();
        assert!(reg.is_empty());
    }

    #[test]
    fn explicit_hints_override_parsed_ones() {
        let mut reg = GrammarRegistry::new();
        let hints = vec![ScopeHint {
            position: 0,
            hint: ScopeHintKind::Reachable,
            required: true,
        }];
        let id = reg
            .add_pattern(GrammarPattern::new("poke <noun:held>", "story.action.poking").with_scope_hints(hints.clone()))
            .unwrap();
        assert_eq!(reg.get(id).unwrap().scope_hints, hints);
    }

    #[test]
    fn scope_hint_and_build_helpers() {
        let hints = GrammarRegistry::parse_scope_hints("give <noun:held> to <noun:person>").unwrap();
        assert_eq!(hints.len(), 2);
        assert_eq!(hints[1].position, 1);
        assert_eq!(hints[1].hint, ScopeHintKind::Person);

        let built = GrammarRegistry::build_pattern(&["put", "place"], &["<noun>", "on", "<noun>"], &[(2, "supporter")]);
        assert_eq!(built, "put|place <noun> on <noun:supporter>");
    }
}
