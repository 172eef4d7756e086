//! Dispatch tables -- operators, methods and axioms grouped by the index of
//! the symbol they implement.
//!
//! `operators_for(i)` lists the operators whose head is primitive task `i`,
//! in declaration order; methods are keyed by compound task and axioms by
//! constant in the same way. Building the table never fails: an index with
//! no implementations simply has an empty bucket.
//!
//! Buckets are dense over the interned symbols of a category. A head index
//! past the end of the symbol table is a placeholder; those constructs are
//! kept in a sparse overflow map instead of stretching the dense table.

use crate::ast::{Axiom, Method, Operator};
use crate::domain::Domain;
use crate::symbols::Category;
use std::collections::BTreeMap;

/// Per-index buckets borrowed from a [`Domain`].
#[derive(Debug, Clone)]
pub struct DispatchTable<'d> {
    operators: Buckets<'d, Operator>,
    methods: Buckets<'d, Method>,
    axioms: Buckets<'d, Axiom>,
}

#[derive(Debug, Clone)]
struct Buckets<'d, T> {
    dense: Vec<Vec<&'d T>>,
    overflow: BTreeMap<usize, Vec<&'d T>>,
}

impl<'d, T> Buckets<'d, T> {
    fn build(items: &'d [T], symbols: usize, key: impl Fn(&T) -> usize) -> Self {
        let mut dense: Vec<Vec<&T>> = vec![Vec::new(); symbols];
        let mut overflow: BTreeMap<usize, Vec<&T>> = BTreeMap::new();
        for item in items {
            let index = key(item);
            match dense.get_mut(index) {
                Some(bucket) => bucket.push(item),
                None => overflow.entry(index).or_default().push(item),
            }
        }
        Buckets { dense, overflow }
    }

    fn get(&self, index: usize) -> &[&'d T] {
        match self.dense.get(index) {
            Some(bucket) => bucket,
            None => self.overflow.get(&index).map(Vec::as_slice).unwrap_or(&[]),
        }
    }
}

impl<'d> DispatchTable<'d> {
    pub fn operators_for(&self, task: usize) -> &[&'d Operator] {
        self.operators.get(task)
    }

    pub fn methods_for(&self, task: usize) -> &[&'d Method] {
        self.methods.get(task)
    }

    pub fn axioms_for(&self, constant: usize) -> &[&'d Axiom] {
        self.axioms.get(constant)
    }

    /// One bucket per primitive task index.
    pub fn operator_buckets(&self) -> &[Vec<&'d Operator>] {
        &self.operators.dense
    }

    /// One bucket per compound task index.
    pub fn method_buckets(&self) -> &[Vec<&'d Method>] {
        &self.methods.dense
    }

    /// One bucket per constant index.
    pub fn axiom_buckets(&self) -> &[Vec<&'d Axiom>] {
        &self.axioms.dense
    }

    /// Operators whose head lies outside the primitive task table.
    pub fn operator_overflow(&self) -> &BTreeMap<usize, Vec<&'d Operator>> {
        &self.operators.overflow
    }

    pub fn method_overflow(&self) -> &BTreeMap<usize, Vec<&'d Method>> {
        &self.methods.overflow
    }

    pub fn axiom_overflow(&self) -> &BTreeMap<usize, Vec<&'d Axiom>> {
        &self.axioms.overflow
    }
}

/// Build the dispatch table for `domain`.
pub fn build_dispatch(domain: &Domain) -> DispatchTable<'_> {
    let symbols = domain.symbols();
    let table = DispatchTable {
        operators: Buckets::build(
            domain.operators(),
            symbols.len(Category::PrimitiveTask),
            |o| o.head.head(),
        ),
        methods: Buckets::build(
            domain.methods(),
            symbols.len(Category::CompoundTask),
            |m| m.head.head(),
        ),
        axioms: Buckets::build(domain.axioms(), symbols.len(Category::Constant), |a| {
            a.head.head()
        }),
    };
    let placeholders =
        table.operators.overflow.len() + table.methods.overflow.len() + table.axioms.overflow.len();
    if placeholders > 0 {
        tracing::debug!(
            domain = domain.name(),
            placeholders,
            "heads outside the symbol table kept in overflow"
        );
    }
    tracing::debug!(
        domain = domain.name(),
        operator_buckets = table.operators.dense.len(),
        method_buckets = table.methods.dense.len(),
        axiom_buckets = table.axioms.dense.len(),
        "dispatch table built"
    );
    table
}
