//! Defines the error types for the validation module.
use super::rules::Rule;
use crate::graph::{Edge, Identifier};
use std::fmt;
use thiserror::Error;

/// What a violation is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Node(Identifier),
    /// An edge, by its position in the graph's edge sequence.
    Edge { position: usize, source: Identifier, target: Identifier },
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Node(id) => write!(f, "node {}", id),
            Subject::Edge { position, source, target } => {
                write!(f, "edge #{} ({} -> {})", position, source, target)
            }
        }
    }
}

/// A single offending node or edge found by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub subject: Subject,
    /// A human-readable message embedding the offending identifier.
    pub message: String,
}

impl Violation {
    pub(crate) fn node(id: &Identifier, message: String) -> Self {
        Self { subject: Subject::Node(id.clone()), message }
    }

    pub(crate) fn edge(position: usize, edge: &Edge, message: String) -> Self {
        Self {
            subject: Subject::Edge {
                position,
                source: edge.source().clone(),
                target: edge.target().clone(),
            },
            message,
        }
    }
}

/// A graph-level failure: the first rule that did not hold, with every
/// violation that rule found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.rule, .violations))]
pub struct ValidationError {
    pub rule: Rule,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Every offending node or edge, in the order the rule found them.
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.violations.iter().map(|v| &v.subject)
    }
}

fn describe(rule: &Rule, violations: &[Violation]) -> String {
    match violations {
        [] => format!("{} rule failed", rule.name()),
        [only] => only.message.clone(),
        [first, rest @ ..] => {
            format!("{} (and {} more {} violation(s))", first.message, rest.len(), rule.name())
        }
    }
}
