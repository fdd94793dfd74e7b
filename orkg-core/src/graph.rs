//! In-memory statement set with stable iteration order.

use std::{
    collections::{HashMap, hash_map::Entry},
    hash::{BuildHasher, RandomState},
};

use crate::Statement;

/// A set of [`Statement`]s.
///
/// Inserting a statement that is already present is a no-op. Iteration yields
/// statements in the order in which each distinct statement was first
/// inserted, so repeated iterations of the same graph agree.
///
/// Equality compares statement sets and ignores order.
///
/// # Examples
/// ```
/// use orkg_core::{Graph, Statement, Term};
///
/// let statement = Statement::new(
///     Term::iri("http://example.org/s"),
///     Term::iri("http://example.org/p"),
///     Term::iri("http://example.org/o"),
/// );
/// let mut graph = Graph::new();
/// assert!(graph.insert(statement.clone()));
/// assert!(!graph.insert(statement));
/// assert_eq!(graph.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    statements: Vec<Statement>,
    // Fingerprint -> position of the first statement with that fingerprint.
    index: HashMap<u64, usize>,
    // Positions of later statements whose fingerprint collided.
    collisions: HashMap<u64, Vec<usize>>,
    hasher: RandomState,
}

impl Graph {
    /// Construct an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `statement`, returning `false` when it was already present.
    pub fn insert(&mut self, statement: Statement) -> bool {
        let fingerprint = self.hasher.hash_one(&statement);
        self.insert_fingerprinted(fingerprint, statement)
    }

    fn insert_fingerprinted(&mut self, fingerprint: u64, statement: Statement) -> bool {
        if self.find(fingerprint, &statement) {
            return false;
        }
        let position = self.statements.len();
        match self.index.entry(fingerprint) {
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
            Entry::Occupied(_) => self.collisions.entry(fingerprint).or_default().push(position),
        }
        self.statements.push(statement);
        true
    }

    /// Report whether `statement` is part of the graph.
    #[must_use]
    pub fn contains(&self, statement: &Statement) -> bool {
        self.find(self.hasher.hash_one(statement), statement)
    }

    fn find(&self, fingerprint: u64, statement: &Statement) -> bool {
        let Some(&first) = self.index.get(&fingerprint) else {
            return false;
        };
        let holds = |position: usize| self.statements.get(position) == Some(statement);
        holds(first)
            || self
                .collisions
                .get(&fingerprint)
                .is_some_and(|positions| positions.iter().any(|&position| holds(position)))
    }

    /// Number of distinct statements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.statements.len()
    }

    /// Return whether the graph holds no statements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterate over the statements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Borrow the statements in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Statement] {
        &self.statements
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|statement| other.contains(statement))
    }
}

impl Eq for Graph {}

impl Extend<Statement> for Graph {
    fn extend<I: IntoIterator<Item = Statement>>(&mut self, iter: I) {
        for statement in iter {
            self.insert(statement);
        }
    }
}

impl FromIterator<Statement> for Graph {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
