//! Requirements inference -- the minimal set of planning-language features a
//! domain exercises.
//!
//! The analyzer walks every operator precondition and effect list, every
//! method branch precondition and every axiom branch. It never stops at the
//! first match: the whole tree is visited so every applicable tag is found.

use crate::ast::*;
use crate::domain::Domain;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// A language feature flag.
///
/// Variants are declared in the lexicographic order of their wire tags, so
/// the derived `Ord` yields the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Requirement {
    ConditionalEffects,
    Disjunction,
    ExternalAssignment,
    ExternalCall,
    Negation,
    BaseFeatures,
    UniversalQuantification,
}

impl Requirement {
    pub const ALL: [Requirement; 7] = [
        Requirement::ConditionalEffects,
        Requirement::Disjunction,
        Requirement::ExternalAssignment,
        Requirement::ExternalCall,
        Requirement::Negation,
        Requirement::BaseFeatures,
        Requirement::UniversalQuantification,
    ];

    /// Tag written to the IR `requirements` array.
    pub fn tag(self) -> &'static str {
        match self {
            Requirement::ConditionalEffects => ":CE",
            Requirement::Disjunction => ":DP",
            Requirement::ExternalAssignment => ":E",
            Requirement::ExternalCall => ":F",
            Requirement::Negation => ":NP",
            Requirement::BaseFeatures => ":S",
            Requirement::UniversalQuantification => ":UP",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Requirement> {
        Requirement::ALL.into_iter().find(|r| r.tag() == tag)
    }

    /// Human-readable feature name.
    pub fn feature(self) -> &'static str {
        match self {
            Requirement::ConditionalEffects => "conditional-effects",
            Requirement::Disjunction => "disjunction",
            Requirement::ExternalAssignment => "external-assignment",
            Requirement::ExternalCall => "external-call",
            Requirement::Negation => "negation",
            Requirement::BaseFeatures => "base-features",
            Requirement::UniversalQuantification => "universal-quantification",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for Requirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// Deduplicated requirement set, iterated in canonical tag order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequirementSet(BTreeSet<Requirement>);

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, requirement: Requirement) -> bool {
        self.0.insert(requirement)
    }

    pub fn contains(&self, requirement: Requirement) -> bool {
        self.0.contains(&requirement)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Requirement> + '_ {
        self.0.iter().copied()
    }

    pub fn is_superset(&self, other: &RequirementSet) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Tags in canonical order.
    pub fn tags(&self) -> Vec<&'static str> {
        self.iter().map(Requirement::tag).collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.iter()
                .map(|r| serde_json::Value::String(r.tag().to_owned()))
                .collect(),
        )
    }
}

impl FromIterator<Requirement> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        RequirementSet(iter.into_iter().collect())
    }
}

/// Compute the requirement set of `domain`.
pub fn analyze_requirements(domain: &Domain) -> RequirementSet {
    let mut found = RequirementSet::new();
    found.insert(Requirement::BaseFeatures);

    let mut walk = Walk {
        pending: Vec::new(),
        found: &mut found,
    };
    for op in domain.operators() {
        walk.pending.extend(op.precondition.iter());
        for effect in op.effects.delete.iter().chain(op.effects.add.iter()) {
            walk.effect(effect);
        }
    }
    for method in domain.methods() {
        walk.pending
            .extend(method.branches.iter().filter_map(|b| b.precondition.as_ref()));
    }
    for axiom in domain.axioms() {
        walk.pending
            .extend(axiom.branches.iter().filter_map(|b| b.precondition.as_ref()));
    }
    walk.drain();

    tracing::debug!(domain = domain.name(), tags = ?found.tags(), "requirements inferred");
    found
}

/// Explicit work stack over expressions, so nesting depth is bounded only
/// by memory. Every node is visited.
struct Walk<'a, 's> {
    pending: Vec<&'a LogicalExpr>,
    found: &'s mut RequirementSet,
}

impl<'a> Walk<'a, '_> {
    fn effect(&mut self, effect: &'a Effect) {
        match effect {
            Effect::Atomic(_) | Effect::Protection(_) | Effect::Unknown { .. } => {}
            Effect::ForAll { premise, .. } => {
                self.found.insert(Requirement::ConditionalEffects);
                self.found.insert(Requirement::UniversalQuantification);
                self.pending.push(premise);
            }
        }
    }

    fn drain(&mut self) {
        while let Some(expr) = self.pending.pop() {
            match expr {
                LogicalExpr::Atomic(_) | LogicalExpr::Nil | LogicalExpr::Unknown { .. } => {}
                LogicalExpr::And(children) => self.pending.extend(children.iter()),
                LogicalExpr::Or(children) => {
                    self.found.insert(Requirement::Disjunction);
                    self.pending.extend(children.iter());
                }
                LogicalExpr::Not(inner) => {
                    self.found.insert(Requirement::Negation);
                    self.pending.push(inner);
                }
                LogicalExpr::ForAll {
                    premise,
                    consequence,
                } => {
                    self.found.insert(Requirement::UniversalQuantification);
                    self.pending.push(premise);
                    self.pending.push(consequence);
                }
                LogicalExpr::Call(_) => {
                    self.found.insert(Requirement::ExternalCall);
                }
                LogicalExpr::Assign { .. } => {
                    self.found.insert(Requirement::ExternalAssignment);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainBuilder;

    #[test]
    fn declaration_order_matches_tag_order() {
        let tags: Vec<_> = Requirement::ALL.iter().map(|r| r.tag()).collect();
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn tags_round_trip_through_from_tag() {
        for r in Requirement::ALL {
            assert_eq!(Requirement::from_tag(r.tag()), Some(r));
        }
        assert_eq!(Requirement::from_tag(":XYZ"), None);
    }

    #[test]
    fn empty_domain_requires_base_features_only() {
        let domain = DomainBuilder::new("empty").finish();
        assert_eq!(analyze_requirements(&domain).tags(), vec![":S"]);
    }

    #[test]
    fn nested_features_are_all_found() {
        let mut b = DomainBuilder::new("d");
        let t = b.primitive_task("!op");
        let p = b.constant("p");
        let pre = LogicalExpr::and(vec![
            LogicalExpr::not(LogicalExpr::or(vec![
                LogicalExpr::atom(p, vec![]),
                LogicalExpr::Call(CallTerm::new("check", vec![])),
            ])),
            LogicalExpr::Assign {
                var: 0,
                value: Term::Number(1.0),
            },
        ]);
        b.add_operator(Predicate::new(t, vec![]), Some(pre), EffectLists::default(), None);
        let found = analyze_requirements(&b.finish());
        assert_eq!(found.tags(), vec![":DP", ":E", ":F", ":NP", ":S"]);
    }

    #[test]
    fn forall_effect_premise_is_traversed() {
        let mut b = DomainBuilder::new("d");
        let t = b.primitive_task("!op");
        let p = b.constant("p");
        let effects = EffectLists::new(
            vec![Effect::ForAll {
                premise: LogicalExpr::not(LogicalExpr::atom(p, vec![])),
                templates: vec![Predicate::new(p, vec![])],
            }],
            vec![],
        );
        b.add_operator(Predicate::new(t, vec![]), None, effects, None);
        let found = analyze_requirements(&b.finish());
        assert_eq!(found.tags(), vec![":CE", ":NP", ":S", ":UP"]);
    }

    #[test]
    fn unknown_nodes_add_nothing() {
        let mut b = DomainBuilder::new("d");
        let t = b.primitive_task("!op");
        let effects = EffectLists::new(
            vec![],
            vec![Effect::Unknown {
                kind: "timed".to_owned(),
            }],
        );
        b.add_operator(
            Predicate::new(t, vec![]),
            Some(LogicalExpr::Unknown {
                kind: "preference".to_owned(),
            }),
            effects,
            None,
        );
        assert_eq!(analyze_requirements(&b.finish()).tags(), vec![":S"]);
    }

    #[test]
    fn serializes_as_tag_array() {
        let set: RequirementSet = [Requirement::Negation, Requirement::BaseFeatures]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            serde_json::json!([":NP", ":S"])
        );
        assert_eq!(set.to_json(), serde_json::json!([":NP", ":S"]));
    }

    #[test]
    fn deep_chains_are_walked_without_recursion() {
        let mut b = DomainBuilder::new("d");
        let t = b.primitive_task("!op");
        let p = b.constant("p");
        let mut pre = LogicalExpr::or(vec![
            LogicalExpr::atom(p, vec![]),
            LogicalExpr::Call(CallTerm::new("check", vec![])),
        ]);
        for _ in 0..200_000 {
            pre = LogicalExpr::not(pre);
        }
        let mut premise = LogicalExpr::atom(p, vec![]);
        for _ in 0..200_000 {
            premise = LogicalExpr::and(vec![premise, LogicalExpr::Nil]);
        }
        let effects = EffectLists::new(
            vec![],
            vec![Effect::ForAll {
                premise,
                templates: vec![],
            }],
        );
        b.add_operator(Predicate::new(t, vec![]), Some(pre), effects, None);
        let domain = b.finish();
        let found = analyze_requirements(&domain);
        assert_eq!(found.tags(), vec![":CE", ":DP", ":F", ":NP", ":S", ":UP"]);
    }
}
