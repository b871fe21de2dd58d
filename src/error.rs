//! Error types for template access and loading.

use crate::path::AccessStep;
use crate::value::Key;
use thiserror::Error;

/// Errors raised when a read or write addresses a slot that does not exist.
///
/// Raised at apply time against the actual (possibly already rewritten)
/// container. Aborts the current realization only; realizations already
/// yielded are independent values and stay intact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// Record has no field with this name.
    #[error("record '{record}' has no field '{field}'")]
    MissingField {
        /// Record type name.
        record: String,
        /// Requested field.
        field: String,
    },

    /// Sequence index past the end.
    #[error("index {index} out of bounds for {container} of length {len}")]
    IndexOutOfBounds {
        /// "list" or "tuple".
        container: &'static str,
        /// Requested index.
        index: usize,
        /// Actual length.
        len: usize,
    },

    /// Mapping has no entry for this key.
    #[error("mapping has no key '{0}'")]
    MissingKey(Key),

    /// Step kind does not match the container it is applied to.
    #[error("cannot apply {} step '{step}' to a {found} value", .step.container())]
    KindMismatch {
        /// Offending step.
        step: AccessStep,
        /// Kind of the value actually found.
        found: &'static str,
    },
}

impl AccessError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::IndexOutOfBounds { .. } => "INDEX_OUT_OF_BOUNDS",
            Self::MissingKey(_) => "MISSING_KEY",
            Self::KindMismatch { .. } => "KIND_MISMATCH",
        }
    }
}

/// Errors raised while loading templates or converting realizations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A `$`-marker object is malformed.
    #[error("invalid '{marker}' marker: {reason}")]
    InvalidMarker {
        /// Marker key as configured.
        marker: String,
        /// What was wrong with it.
        reason: String,
    },

    /// JSON parse or conversion failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Access failure while realizing.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Realized value does not fit the requested type.
    #[error("cannot deserialize realization: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AccessError::MissingField {
            record: "Level1".into(),
            field: "field9".into(),
        };
        assert!(err.to_string().contains("Level1"));
        assert!(err.to_string().contains("field9"));

        let err = AccessError::IndexOutOfBounds {
            container: "tuple",
            index: 5,
            len: 3,
        };
        assert_eq!(err.to_string(), "index 5 out of bounds for tuple of length 3");

        let err = AccessError::MissingKey(Key::Str("k".into()));
        assert_eq!(err.to_string(), "mapping has no key 'k'");
    }

    #[test]
    fn error_codes() {
        assert_eq!(AccessError::MissingKey(Key::Int(1)).code(), "MISSING_KEY");
        let err = AccessError::KindMismatch {
            step: AccessStep::Index(0),
            found: "int",
        };
        assert_eq!(err.code(), "KIND_MISMATCH");
    }

    #[test]
    fn template_error_wraps_access() {
        let err: TemplateError = AccessError::MissingKey(Key::Int(3)).into();
        assert!(matches!(err, TemplateError::Access(AccessError::MissingKey(_))));
        assert_eq!(err.to_string(), "mapping has no key '3'");
    }
}
