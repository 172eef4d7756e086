//! The `problem` object.

use super::IrSerializer;
use crate::domain::Problem;
use crate::symbols::Category;
use serde_json::{json, Value};

impl IrSerializer<'_> {
    /// `init` facts carry their parameters as source-like strings; the goal
    /// is a flattened task list.
    pub fn problem(&self, problem: &Problem) -> Value {
        let init: Vec<Value> = problem
            .init()
            .iter()
            .map(|fact| {
                let (items, tail) = fact.params().flatten();
                let parameters: Vec<String> = items
                    .into_iter()
                    .chain(tail)
                    .map(|t| self.term_text(t))
                    .collect();
                json!({
                    "parameters": parameters,
                    "predicate": self.symbol_name(Category::Constant, fact.head()),
                })
            })
            .collect();
        json!({
            "additional_constants": problem.additional_constants(),
            "goal": {"tasks": self.tasks(problem.goal())},
            "init": init,
            "name": problem.name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Predicate, TaskAtom, TaskList, Term};
    use crate::domain::{DomainBuilder, ProblemBuilder};
    use crate::options::IrOptions;

    #[test]
    fn problem_section_shape() {
        let mut b = DomainBuilder::new("blocks");
        let on = b.constant("on");
        let a = b.constant("a");
        let stack = b.primitive_task("!stack");
        let domain = b.finish();

        let mut pb = ProblemBuilder::new(&domain, "p1");
        let table = pb.constant("table");
        pb.add_fact(Predicate::new(on, vec![Term::Constant(a), Term::Constant(table)]));
        pb.set_goal(TaskList::of(vec![TaskAtom::primitive(
            stack,
            vec![Term::Constant(a)],
        )]));
        let problem = pb.finish();

        let options = IrOptions::default();
        let value = IrSerializer::new(problem.symbols(), &options).problem(&problem);
        assert_eq!(
            value,
            json!({
                "additional_constants": ["table"],
                "goal": {"tasks": [{
                    "name": "stack",
                    "parameters": [{"name": "a", "type": "Constant"}],
                    "type": "predicate"
                }]},
                "init": [{"parameters": ["a", "table"], "predicate": "on"}],
                "name": "p1"
            })
        );
    }
}
