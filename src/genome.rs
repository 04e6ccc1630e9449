//! Target sequence metadata (reference contig names and lengths).
//!
//! Targets keep the order in which the dataset header declares them;
//! whole-file runs walk them in that order.

use std::collections::HashMap;

use crate::error::{Result, WindowError};

/// A named reference contig with a fixed length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetSequence {
    pub name: String,
    pub length: u64,
}

impl TargetSequence {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// Ordered collection of target sequences with name lookup.
#[derive(Debug, Clone, Default)]
pub struct Targets {
    /// Map of target name to its position in `order`
    ids: HashMap<String, usize>,
    /// Targets in declared order
    order: Vec<TargetSequence>,
}

impl Targets {
    /// Create an empty target list.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Build from `(name, length)` pairs, keeping their order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut targets = Self::new();
        for (name, length) in pairs {
            targets.insert(name.into(), length);
        }
        targets
    }

    /// Insert a target (appends to order if new, otherwise updates its length).
    pub fn insert(&mut self, name: String, length: u64) {
        match self.ids.get(&name) {
            Some(&id) => self.order[id].length = length,
            None => {
                self.ids.insert(name.clone(), self.order.len());
                self.order.push(TargetSequence { name, length });
            }
        }
    }

    /// Position of a target in declared order (its tid in a BAM header).
    #[inline]
    pub fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    /// Look up a target by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&TargetSequence> {
        self.id(name).map(|id| &self.order[id])
    }

    /// Position of a target, failing for names the dataset does not declare.
    pub fn require_id(&self, name: &str) -> Result<usize> {
        self.id(name)
            .ok_or_else(|| WindowError::UnknownTarget(name.to_string()))
    }

    /// Look up a target by name, failing for names the dataset does not declare.
    pub fn require(&self, name: &str) -> Result<&TargetSequence> {
        self.require_id(name).map(|id| &self.order[id])
    }

    /// Iterate over targets in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &TargetSequence> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
