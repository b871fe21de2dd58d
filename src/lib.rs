//! Template Realization
//!
//! Generates every concrete combination implied by a template: a nested
//! value in which some leaves are placeholders holding an ordered list of
//! candidate values.
//!
//! Key concepts:
//! - `Placeholder` - leaf marker with candidate values
//! - `AccessPath` - route from the root to a placeholder, rendered dotted (`field3.field1`)
//! - `Binding` - a discovered placeholder: path + candidates
//! - `TemplateRealization` - one substituted copy plus the `{dotted path: value}` choices
//!
//! # Pipeline
//!
//! ```text
//! template ──discover──▶ [Binding] ──cartesian──▶ (choice, ..) ──realize──▶ TemplateRealization
//!            (once)                  (lazy odometer)            (clone + apply)
//! ```
//!
//! # Example
//!
//! ```
//! use template_realizer::{candidates, count_realizations, realize_template, Record, Value};
//!
//! let template: Value = Record::new("Level1")
//!     .with("field1", 1)
//!     .with("field2", Value::list([Value::Int(1), candidates![11, 12], candidates![21, 22, 23]]))
//!     .with("field3", Record::new("Level2").with("field1", "abc"))
//!     .into();
//!
//! assert_eq!(count_realizations(&template), 6);
//!
//! let first = realize_template(&template).next().unwrap().unwrap();
//! assert_eq!(first.specification["field2.1"], Value::Int(11));
//! assert_eq!(first.specification["field2.2"], Value::Int(21));
//! ```
//!
//! Templates must be acyclic.

pub mod access;
mod binding;
mod cartesian;
mod error;
pub mod loader;
mod path;
mod placeholder;
mod realize;
mod value;

pub use binding::{discover_bindings, Binding, BindingRealization};
pub use cartesian::MixedRadix;
pub use error::{AccessError, TemplateError};
pub use loader::{
    from_json_str, from_json_str_with, from_json_value, from_json_value_with, from_yaml_str,
    from_yaml_str_with, LoaderConfig,
};
pub use path::{AccessPath, AccessStep};
pub use placeholder::Placeholder;
pub use realize::{
    count_realizations, realize, realize_template, Realizations, TemplateRealization,
};
pub use value::{Key, Record, Tuple, Value};
