// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/candidates.rs
// Version: 1.0.0
//
// This file defines the candidate groups driven by the benchmark runner. A
// group is an ordered list of named search functions sharing one result
// shape; the first registered candidate is the reference for the others.
//
// Tree Location:
// - src/benchmark/candidates.rs (candidate registration)
// - Depends on: std

use std::fmt;

/// Boxed search function: `(text, marker) -> result`
pub type SearchFn<T> = Box<dyn Fn(&[u8], &[u8]) -> T>;

/// Result shape of a candidate group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// One integer per call (first index, or -1)
    SingleResult,
    /// Ordered integer sequence per call (all match positions)
    MultiResult,
}

impl GroupKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GroupKind::SingleResult => "single_result",
            GroupKind::MultiResult => "multi_result",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named search implementation
pub struct Candidate<T> {
    name: String,
    search: SearchFn<T>,
}

impl<T> Candidate<T> {
    pub fn new<F>(name: impl Into<String>, search: F) -> Self
    where
        F: Fn(&[u8], &[u8]) -> T + 'static,
    {
        Self {
            name: name.into(),
            search: Box::new(search),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the search once
    pub fn invoke(&self, text: &[u8], marker: &[u8]) -> T {
        (self.search)(text, marker)
    }
}

impl<T> fmt::Debug for Candidate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate").field("name", &self.name).finish()
    }
}

/// Ordered candidates sharing one result type
pub struct CandidateGroup<T> {
    kind: GroupKind,
    candidates: Vec<Candidate<T>>,
}

/// Candidates returning the first match index (-1 when absent)
pub type SingleResultGroup = CandidateGroup<i64>;

/// Candidates returning every match position in ascending order
pub type MultiResultGroup = CandidateGroup<Vec<i64>>;

impl CandidateGroup<i64> {
    pub fn single_result() -> Self {
        Self {
            kind: GroupKind::SingleResult,
            candidates: Vec::new(),
        }
    }
}

impl CandidateGroup<Vec<i64>> {
    pub fn multi_result() -> Self {
        Self {
            kind: GroupKind::MultiResult,
            candidates: Vec::new(),
        }
    }
}

impl<T> CandidateGroup<T> {
    /// Append a candidate; registration order is invocation order
    pub fn register<F>(&mut self, name: impl Into<String>, search: F) -> &mut Self
    where
        F: Fn(&[u8], &[u8]) -> T + 'static,
    {
        self.candidates.push(Candidate::new(name, search));
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<F>(mut self, name: impl Into<String>, search: F) -> Self
    where
        F: Fn(&[u8], &[u8]) -> T + 'static,
    {
        self.register(name, search);
        self
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The reference candidate, if any
    pub fn reference(&self) -> Option<&Candidate<T>> {
        self.candidates.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate<T>> {
        self.candidates.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.candidates.iter().map(Candidate::name).collect()
    }
}

impl<T> fmt::Debug for CandidateGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateGroup")
            .field("kind", &self.kind)
            .field("candidates", &self.names())
            .finish()
    }
}
