//! Access paths - the route from a template root to a slot.
//!
//! A path renders in dotted form by stringifying each step's position:
//! `field3.field1`, `field2.1`, `field2.b`.

use crate::value::Key;
use std::fmt;

/// One hop into a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccessStep {
    /// Record field by name.
    Field(String),
    /// Mutable sequence index.
    Index(usize),
    /// Immutable sequence index.
    TupleIndex(usize),
    /// Mapping key.
    Key(Key),
}

impl AccessStep {
    /// The step's position, stringified.
    pub fn position(&self) -> String {
        self.to_string()
    }

    /// Container kind this step addresses.
    pub fn container(&self) -> &'static str {
        match self {
            AccessStep::Field(_) => "record",
            AccessStep::Index(_) => "list",
            AccessStep::TupleIndex(_) => "tuple",
            AccessStep::Key(_) => "map",
        }
    }
}

impl fmt::Display for AccessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessStep::Field(name) => f.write_str(name),
            AccessStep::Index(i) | AccessStep::TupleIndex(i) => write!(f, "{}", i),
            AccessStep::Key(key) => write!(f, "{}", key),
        }
    }
}

/// Ordered steps from the template root. The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AccessPath(Vec<AccessStep>);

impl AccessPath {
    /// The path addressing the template root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend this path by one step.
    pub fn child(&self, step: AccessStep) -> Self {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend_from_slice(&self.0);
        steps.push(step);
        Self(steps)
    }

    pub fn steps(&self) -> &[AccessStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last step and the steps leading to its container.
    pub fn split_last(&self) -> Option<(&AccessStep, &[AccessStep])> {
        self.0.split_last()
    }

    /// Dotted form, e.g. `field3.field1`.
    pub fn dotted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl From<Vec<AccessStep>> for AccessPath {
    fn from(steps: Vec<AccessStep>) -> Self {
        Self(steps)
    }
}

impl FromIterator<AccessStep> for AccessPath {
    fn from_iter<I: IntoIterator<Item = AccessStep>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
