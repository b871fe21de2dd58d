//! Uniform read/write over the four container kinds.
//!
//! Records, lists and maps are written in place. Tuples are never mutated:
//! a write builds a new tuple and stores it in the slot that held the old
//! one, so the parent container now references the new sequence while
//! everything above it stays as it was.
//!
//! `apply` walks a full path with a bottom-up rebuild: a tuple met on the
//! way down is copied, the write recurses into the copy, and the rebuilt
//! tuple replaces the old one. This covers tuples at any depth, including
//! the template root.

use crate::error::AccessError;
use crate::path::{AccessPath, AccessStep};
use crate::value::{Record, Tuple, Value};

/// Read the child of `container` addressed by `step`.
pub fn get<'v>(container: &'v Value, step: &AccessStep) -> Result<&'v Value, AccessError> {
    match (container, step) {
        (Value::Record(record), AccessStep::Field(field)) => {
            record.get(field).ok_or_else(|| missing_field(record, field))
        }
        (Value::List(items), AccessStep::Index(index)) => {
            items.get(*index).ok_or(AccessError::IndexOutOfBounds {
                container: "list",
                index: *index,
                len: items.len(),
            })
        }
        (Value::Tuple(tuple), AccessStep::TupleIndex(index)) => {
            tuple.get(*index).ok_or(AccessError::IndexOutOfBounds {
                container: "tuple",
                index: *index,
                len: tuple.len(),
            })
        }
        (Value::Map(map), AccessStep::Key(key)) => map
            .get(key)
            .ok_or_else(|| AccessError::MissingKey(key.clone())),
        (other, step) => Err(mismatch(other, step)),
    }
}

/// Overwrite the existing slot of `container` addressed by `step`.
///
/// Never inserts: absent fields, indices and keys are errors.
pub fn set(container: &mut Value, step: &AccessStep, value: Value) -> Result<(), AccessError> {
    match (container, step) {
        (Value::Tuple(tuple), AccessStep::TupleIndex(index)) => {
            *tuple = tuple.replaced(*index, value)?;
            Ok(())
        }
        (container, step) => {
            *slot_mut(container, step)? = value;
            Ok(())
        }
    }
}

/// Write `value` at `path` inside `root`. The empty path replaces `root`.
pub fn apply(root: &mut Value, path: &AccessPath, value: Value) -> Result<(), AccessError> {
    apply_steps(root, path.steps(), value)
}

fn apply_steps(node: &mut Value, steps: &[AccessStep], value: Value) -> Result<(), AccessError> {
    let Some((step, rest)) = steps.split_first() else {
        *node = value;
        return Ok(());
    };
    if rest.is_empty() {
        return set(node, step, value);
    }

    match (node, step) {
        (Value::Tuple(tuple), AccessStep::TupleIndex(index)) => {
            let mut items = tuple.to_vec();
            let len = items.len();
            let child = items.get_mut(*index).ok_or(AccessError::IndexOutOfBounds {
                container: "tuple",
                index: *index,
                len,
            })?;
            apply_steps(child, rest, value)?;
            *tuple = Tuple::from(items);
            Ok(())
        }
        (node, step) => apply_steps(slot_mut(node, step)?, rest, value),
    }
}

/// Mutable slot inside a record, list or map.
fn slot_mut<'v>(container: &'v mut Value, step: &AccessStep) -> Result<&'v mut Value, AccessError> {
    match (container, step) {
        (Value::Record(Record { name, fields }), AccessStep::Field(field)) => {
            fields
                .get_mut(field)
                .ok_or_else(|| AccessError::MissingField {
                    record: name.clone(),
                    field: field.clone(),
                })
        }
        (Value::List(items), AccessStep::Index(index)) => {
            let len = items.len();
            items.get_mut(*index).ok_or(AccessError::IndexOutOfBounds {
                container: "list",
                index: *index,
                len,
            })
        }
        (Value::Map(map), AccessStep::Key(key)) => map
            .get_mut(key)
            .ok_or_else(|| AccessError::MissingKey(key.clone())),
        (other, step) => Err(mismatch(other, step)),
    }
}

fn missing_field(record: &Record, field: &str) -> AccessError {
    AccessError::MissingField {
        record: record.name().to_string(),
        field: field.to_string(),
    }
}

fn mismatch(found: &Value, step: &AccessStep) -> AccessError {
    AccessError::KindMismatch {
        step: step.clone(),
        found: found.kind(),
    }
}
