//! Binding discovery.
//!
//! A depth-first pre-order walk over the template emits one `Binding` per
//! placeholder: record fields in declaration order, list and tuple elements
//! by ascending index, map entries in insertion order. The walk stops at a
//! placeholder and never looks inside its candidates.

use crate::access;
use crate::error::AccessError;
use crate::path::{AccessPath, AccessStep};
use crate::value::Value;
use tracing::debug;

/// A discovered placeholder: where it sits and what it may become.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Location from the template root.
    pub path: AccessPath,
    /// Candidate values, in placeholder order.
    pub values: Vec<Value>,
}

impl Binding {
    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One realization per candidate, in candidate order.
    pub fn realize(&self) -> impl Iterator<Item = BindingRealization<'_>> {
        self.values.iter().map(move |value| BindingRealization {
            path: &self.path,
            value,
        })
    }
}

/// One chosen candidate for one binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindingRealization<'a> {
    pub path: &'a AccessPath,
    pub value: &'a Value,
}

impl BindingRealization<'_> {
    /// Dotted path paired with the chosen value.
    pub fn specification(&self) -> (String, Value) {
        (self.path.dotted(), self.value.clone())
    }

    /// Write the chosen value into `target` at this binding's path.
    pub fn apply(&self, target: &mut Value) -> Result<(), AccessError> {
        access::apply(target, self.path, self.value.clone())
    }
}

/// Discover every placeholder in `template`, in pre-order.
///
/// The template must be acyclic.
pub fn discover_bindings(template: &Value) -> Vec<Binding> {
    let mut bindings = Vec::new();
    discover(&AccessPath::root(), template, &mut bindings);
    debug!(bindings = bindings.len(), "discovered template bindings");
    bindings
}

fn discover(path: &AccessPath, node: &Value, out: &mut Vec<Binding>) {
    match node {
        Value::Placeholder(placeholder) => out.push(Binding {
            path: path.clone(),
            values: placeholder.values().to_vec(),
        }),
        Value::Record(record) => {
            for (field, value) in record.fields() {
                discover(&path.child(AccessStep::Field(field.to_string())), value, out);
            }
        }
        Value::List(items) => {
            for (index, value) in items.iter().enumerate() {
                discover(&path.child(AccessStep::Index(index)), value, out);
            }
        }
        Value::Tuple(items) => {
            for (index, value) in items.iter().enumerate() {
                discover(&path.child(AccessStep::TupleIndex(index)), value, out);
            }
        }
        Value::Map(entries) => {
            for (key, value) in entries {
                discover(&path.child(AccessStep::Key(key.clone())), value, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => {}
    }
}
