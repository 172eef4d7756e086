//! End-to-end behaviour of the IR serializer over small hand-built domains.

use htn_core::*;
use serde_json::{json, Value};

/// Constants `[on, a, b]`, primitive task `move`, operator `move(?x)` with
/// precondition `on(?x,a)`, add `on(?x,b)` and delete `on(?x,a)`.
fn move_domain(precondition: Option<LogicalExpr>) -> Domain {
    let mut b = DomainBuilder::new("moves");
    let on = b.constant("on");
    let a = b.constant("a");
    let bb = b.constant("b");
    let x = b.variable("?x");
    let mv = b.primitive_task("!move");
    let pre = precondition
        .unwrap_or_else(|| LogicalExpr::atom(on, vec![Term::Variable(x), Term::Constant(a)]));
    b.add_operator(
        Predicate::new(mv, vec![Term::Variable(x)]),
        Some(pre),
        EffectLists::new(
            vec![Effect::Atomic(Predicate::new(on, vec![Term::Variable(x), Term::Constant(a)]))],
            vec![Effect::Atomic(Predicate::new(on, vec![Term::Variable(x), Term::Constant(bb)]))],
        ),
        None,
    );
    b.finish()
}

fn on_pred(x: &str, y: &str) -> Value {
    json!({
        "name": "on",
        "parameters": [
            {"name": x, "type": "Variable"},
            {"name": y, "type": "Constant"}
        ],
        "type": "predicate"
    })
}

#[test]
fn move_operator_serializes_deletes_before_adds() {
    let domain = move_domain(None);
    let value = serialize_domain(&domain, &IrOptions::default());
    assert_eq!(
        value["primitive_tasks"][0],
        json!({
            "effect": [
                {"expression": [on_pred("?x", "a")], "type": "not"},
                on_pred("?x", "b")
            ],
            "name": "move",
            "parameters": [{"name": "?x", "type": "Variable"}],
            "preconditions": on_pred("?x", "a")
        })
    );
}

#[test]
fn nil_precondition_differs_from_absent() {
    let domain = move_domain(Some(LogicalExpr::Nil));
    let value = serialize_domain(&domain, &IrOptions::default());
    assert_eq!(value["primitive_tasks"][0]["preconditions"], json!({"type": "nil"}));

    let mut b = DomainBuilder::new("d");
    let t = b.primitive_task("!always");
    b.add_operator(Predicate::new(t, vec![]), None, EffectLists::default(), None);
    let value = serialize_domain(&b.finish(), &IrOptions::default());
    assert_eq!(value["primitive_tasks"][0]["preconditions"], Value::Null);
}

#[test]
fn unknown_effect_still_yields_a_complete_document() {
    let mut b = DomainBuilder::new("d");
    let t = b.primitive_task("!op");
    let p = b.constant("p");
    b.add_operator(
        Predicate::new(t, vec![]),
        None,
        EffectLists::new(
            vec![],
            vec![
                Effect::Unknown {
                    kind: "durative".to_owned(),
                },
                Effect::Atomic(Predicate::new(p, vec![])),
            ],
        ),
        None,
    );
    let domain = b.finish();
    let doc = IrDocument::build(&domain, None, &IrOptions::default()).to_value();
    let effect = &doc["domain"]["primitive_tasks"][0]["effect"];
    assert_eq!(effect[0]["type"], "unknown");
    assert_eq!(effect[0]["kind"], "durative");
    assert_eq!(effect[1]["name"], "p");
    assert_eq!(doc["requirements"], json!([":S"]));
}

#[test]
fn serialization_is_byte_identical_across_runs() {
    let domain = move_domain(None);
    let options = IrOptions::default();
    let first = IrDocument::build(&domain, None, &options)
        .to_json_string(false)
        .unwrap();
    for _ in 0..5 {
        let again = IrDocument::build(&domain, None, &options)
            .to_json_string(false)
            .unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn adding_negation_only_adds_the_negation_tag() {
    let plain = move_domain(None);
    let before = analyze_requirements(&plain);
    assert!(!before.contains(Requirement::Negation));

    let negated = move_domain(Some(LogicalExpr::not(LogicalExpr::atom(
        0,
        vec![Term::Variable(0), Term::Constant(1)],
    ))));
    let after = analyze_requirements(&negated);
    assert!(after.contains(Requirement::Negation));
    assert!(after.is_superset(&before));
    assert_eq!(after.len(), before.len() + 1);
}

#[test]
fn resolved_names_match_interned_names() {
    let names = ["on", "a", "b", "table", "clear"];
    let mut b = DomainBuilder::new("d");
    let indices: Vec<usize> = names.iter().map(|n| b.constant(n)).collect();
    let domain = b.finish();
    let options = IrOptions::default();
    let s = IrSerializer::new(domain.symbols(), &options);
    for (name, index) in names.iter().zip(indices) {
        let value = s.predicate(&Predicate::new(index, vec![]), Category::Constant);
        assert_eq!(value["name"], *name);
    }
}

#[test]
fn out_of_range_heads_fall_back_to_synthetic_names() {
    let mut b = DomainBuilder::new("d");
    b.add_operator(Predicate::new(7, vec![]), None, EffectLists::default(), None);
    let value = serialize_domain(&b.finish(), &IrOptions::default());
    assert_eq!(value["primitive_tasks"][0]["name"], "primitive_task_7");
}

#[test]
fn one_bad_subtree_leaves_siblings_intact() {
    let mut b = DomainBuilder::new("d");
    let p = b.constant("p");
    let t = b.primitive_task("!op");
    let pre = LogicalExpr::and(vec![
        LogicalExpr::Or(vec![]),
        LogicalExpr::atom(p, vec![Term::Number(f64::NAN), Term::Number(1.5)]),
    ]);
    b.add_operator(Predicate::new(t, vec![]), Some(pre), EffectLists::default(), None);
    let value = serialize_domain(&b.finish(), &IrOptions::default());
    let pre = &value["primitive_tasks"][0]["preconditions"];
    assert_eq!(pre["type"], "and");
    assert_eq!(
        pre["left"],
        json!({"message": "disjunction requires at least two operands, found 0", "type": "error"})
    );
    assert_eq!(pre["right"]["parameters"][0]["type"], "error");
    assert_eq!(pre["right"]["parameters"][1], json!({"name": "1.5", "type": "Number"}));
}

#[test]
fn problem_attaches_without_changing_requirements() {
    let domain = move_domain(None);
    let options = IrOptions::default();
    let mut pb = ProblemBuilder::new(&domain, "p1");
    let c = pb.constant("c");
    pb.add_fact(Predicate::new(0, vec![Term::Constant(1), Term::Constant(c)]));
    pb.set_goal(TaskList::of(vec![TaskAtom::primitive(0, vec![Term::Constant(c)])]));
    let problem = pb.finish();

    let domain_only = IrDocument::build(&domain, None, &options).to_value();
    let combined = IrDocument::build(&domain, Some(&problem), &options).to_value();
    assert_eq!(domain_only["requirements"], combined["requirements"]);
    assert_eq!(domain_only["domain"], combined["domain"]);
    assert_eq!(combined["problem"]["additional_constants"], json!(["c"]));
    assert_eq!(combined["problem"]["init"][0]["parameters"], json!(["a", "c"]));
    assert_eq!(combined["problem"]["goal"]["tasks"][0]["name"], "move");
}
