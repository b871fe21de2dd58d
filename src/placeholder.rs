//! Placeholder - the leaf marker holding candidate values.

use crate::value::Value;
use std::sync::Arc;

/// Ordered list of candidate values for one template slot.
///
/// Candidates are opaque: a placeholder nested inside another placeholder's
/// candidates is carried as a plain value and never discovered. Zero
/// candidates is legal and zeroes out the whole template's realization
/// count. Duplicates count as distinct candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    values: Arc<[Value]>,
}

impl Placeholder {
    /// Create a placeholder from an explicit candidate list.
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A placeholder with no candidates.
    pub fn empty() -> Self {
        Self {
            values: Arc::from(Vec::new()),
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build a placeholder `Value` from candidate expressions.
///
/// ```
/// use template_realizer::{candidates, Value};
///
/// let slot = candidates![11, 12];
/// assert!(slot.is_placeholder());
/// assert!(matches!(candidates![], Value::Placeholder(p) if p.is_empty()));
/// ```
#[macro_export]
macro_rules! candidates {
    () => {
        $crate::Value::Placeholder($crate::Placeholder::empty())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Value::Placeholder($crate::Placeholder::new([$($crate::Value::from($value)),+]))
    };
}
