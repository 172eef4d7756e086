//! Symbol table: stable per-category index assignment for constant,
//! primitive-task, compound-task and variable names.
//!
//! Each category is an append-only arena of names with a name -> index
//! lookup. Indices are handed out in first-insertion order and are never
//! reused or removed.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// The namespace a symbol is interned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Constant,
    PrimitiveTask,
    CompoundTask,
    Variable,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Constant,
        Category::PrimitiveTask,
        Category::CompoundTask,
        Category::Variable,
    ];

    /// Wire label, also used to build synthetic fallback names.
    pub fn label(self) -> &'static str {
        match self {
            Category::Constant => "constant",
            Category::PrimitiveTask => "primitive_task",
            Category::CompoundTask => "compound_task",
            Category::Variable => "variable",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default)]
struct Arena {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl Arena {
    fn intern(&mut self, name: &str) -> usize {
        if let Some(&index) = self.lookup.get(name) {
            return index;
        }
        let index = self.names.len();
        self.names.push(name.to_owned());
        self.lookup.insert(name.to_owned(), index);
        index
    }
}

/// Per-category name arenas shared by a domain and the problems layered on it.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    constants: Arena,
    primitive_tasks: Arena,
    compound_tasks: Arena,
    variables: Arena,
    /// Number of constants known when the domain was sealed.
    constants_size: Option<usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn arena(&self, category: Category) -> &Arena {
        match category {
            Category::Constant => &self.constants,
            Category::PrimitiveTask => &self.primitive_tasks,
            Category::CompoundTask => &self.compound_tasks,
            Category::Variable => &self.variables,
        }
    }

    fn arena_mut(&mut self, category: Category) -> &mut Arena {
        match category {
            Category::Constant => &mut self.constants,
            Category::PrimitiveTask => &mut self.primitive_tasks,
            Category::CompoundTask => &mut self.compound_tasks,
            Category::Variable => &mut self.variables,
        }
    }

    /// Return the index of `name` in `category`, appending it if unseen.
    pub fn intern(&mut self, category: Category, name: &str) -> usize {
        self.arena_mut(category).intern(name)
    }

    pub fn lookup(&self, category: Category, name: &str) -> Option<usize> {
        self.arena(category).lookup.get(name).copied()
    }

    pub fn name(&self, category: Category, index: usize) -> Option<&str> {
        self.arena(category).names.get(index).map(String::as_str)
    }

    /// Resolve an index to its name, or to the synthetic `<category>_<index>`
    /// placeholder when the index lies outside the table.
    pub fn resolve(&self, category: Category, index: usize) -> Cow<'_, str> {
        match self.name(category, index) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("{}_{}", category.label(), index)),
        }
    }

    pub fn len(&self, category: Category) -> usize {
        self.arena(category).names.len()
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.len(category) == 0
    }

    pub fn names(&self, category: Category) -> &[String] {
        &self.arena(category).names
    }

    /// Record the current constant count as the domain/problem boundary.
    /// Only the first call has an effect.
    pub fn seal_constants(&mut self) {
        if self.constants_size.is_none() {
            self.constants_size = Some(self.constants.names.len());
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.constants_size.is_some()
    }

    /// Number of domain constants. Before sealing this is the live count.
    pub fn constants_size(&self) -> usize {
        self.constants_size.unwrap_or(self.constants.names.len())
    }

    /// Constants interned after the domain was sealed, with their indices.
    pub fn problem_constants(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let start = self.constants_size();
        self.constants.names[start..]
            .iter()
            .enumerate()
            .map(move |(offset, name)| (start + offset, name.as_str()))
    }
}
