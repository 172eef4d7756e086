//! One-shot compilation: requirements, dispatch table and IR document for a
//! domain and an optional problem.

use crate::dispatch::{build_dispatch, DispatchTable};
use crate::document::IrDocument;
use crate::domain::{Domain, Problem};
use crate::options::IrOptions;
use crate::requirements::{analyze_requirements, RequirementSet};

/// Everything produced for one domain.
#[derive(Debug, Clone)]
pub struct Compilation<'d> {
    pub requirements: RequirementSet,
    pub dispatch: DispatchTable<'d>,
    pub document: IrDocument,
}

/// Run the analyzer, the dispatch builder and the serializer, in that order.
///
/// Never fails: serialization faults are contained inside the document.
pub fn compile<'d>(
    domain: &'d Domain,
    problem: Option<&Problem>,
    options: &IrOptions,
) -> Compilation<'d> {
    let _span = tracing::info_span!("compile", domain = domain.name()).entered();

    let requirements = analyze_requirements(domain);
    tracing::info!(tags = ?requirements.tags(), "requirements analyzed");

    let dispatch = build_dispatch(domain);
    tracing::info!(
        operators = domain.operators().len(),
        methods = domain.methods().len(),
        axioms = domain.axioms().len(),
        "dispatch table built"
    );

    let document = IrDocument::with_requirements(domain, requirements.clone(), problem, options);
    tracing::info!(with_problem = problem.is_some(), "IR document serialized");

    Compilation {
        requirements,
        dispatch,
        document,
    }
}
