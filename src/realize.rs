//! Template realization.
//!
//! Discovery runs once per call to [`realize_template`]; each realization is
//! built only when pulled, from a fresh clone of the template, so memory
//! stays bounded to one clone however large the combination space is.
//! Dropping the iterator early needs no cleanup.

use crate::binding::{discover_bindings, Binding, BindingRealization};
use crate::cartesian::{remaining_hint, select, MixedRadix};
use crate::error::{AccessError, TemplateError};
use crate::value::Value;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

/// One fully substituted template and the choices that produced it.
///
/// `specification` is keyed by dotted path. Paths that render to the same
/// dotted string share one entry and the later binding wins: a map holding
/// both `Key::Str("1")` and `Key::Int(1)` reports only the second choice
/// under `"1"`, although `realization` carries both. Read the chosen values
/// from `realization` when keys may collide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRealization {
    /// Dotted path → chosen value, in binding discovery order.
    pub specification: IndexMap<String, Value>,
    /// The template with every placeholder replaced.
    pub realization: Value,
}

impl TemplateRealization {
    /// JSON form: `{"specification": {...}, "realization": ...}`.
    pub fn to_json(&self) -> serde_json::Value {
        let specification = self
            .specification
            .iter()
            .map(|(path, value)| (path.clone(), value.to_json()))
            .collect();
        serde_json::json!({
            "specification": serde_json::Value::Object(specification),
            "realization": self.realization.to_json(),
        })
    }

    /// Deserialize the realized value into a typed structure.
    ///
    /// Records and maps become JSON objects, lists and tuples arrays.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, TemplateError> {
        serde_json::from_value(self.realization.to_json())
            .map_err(|e| TemplateError::Deserialize(e.to_string()))
    }
}

/// Build one realization from a clone of `template`.
pub fn realize(
    template: &Value,
    choices: &[BindingRealization<'_>],
) -> Result<TemplateRealization, AccessError> {
    let mut realization = template.clone();
    let mut specification = IndexMap::with_capacity(choices.len());

    for choice in choices {
        let (path, value) = choice.specification();
        specification.insert(path, value);
        choice.apply(&mut realization)?;
    }

    Ok(TemplateRealization {
        specification,
        realization,
    })
}

/// Lazy sequence of realizations of one template.
#[derive(Debug, Clone)]
pub struct Realizations<'t> {
    template: &'t Value,
    bindings: Vec<Binding>,
    counter: MixedRadix,
}

impl<'t> Realizations<'t> {
    fn new(template: &'t Value) -> Self {
        let bindings = discover_bindings(template);
        let counter = MixedRadix::new(bindings.iter().map(Binding::len).collect());
        debug!(
            bindings = bindings.len(),
            total = %counter.total(),
            "realizing template"
        );
        Self {
            template,
            bindings,
            counter,
        }
    }

    /// Bindings discovered in the template. Read-only for the whole run.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Number of realizations overall.
    pub fn total(&self) -> u128 {
        self.counter.total()
    }
}

impl Iterator for Realizations<'_> {
    type Item = Result<TemplateRealization, AccessError>;

    fn next(&mut self) -> Option<Self::Item> {
        let digits = self.counter.advance()?;
        trace!(?digits, "realizing combination");
        let choices = select(&self.bindings, digits);
        Some(realize(self.template, &choices))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(&self.counter)
    }
}

impl std::iter::FusedIterator for Realizations<'_> {}

/// Every realization of `template`, in cross-product order with the
/// last-discovered placeholder varying fastest.
///
/// A template without placeholders yields one realization equal to itself
/// with an empty specification. A placeholder without candidates yields
/// nothing. Call again to restart.
///
/// # Example
///
/// ```
/// use template_realizer::{candidates, realize_template, Record, Value};
///
/// let template: Value = Record::new("Run")
///     .with("seed", 7)
///     .with("rate", candidates![0.1, 0.2])
///     .into();
///
/// let specs: Vec<_> = realize_template(&template)
///     .map(|r| r.unwrap().specification["rate"].clone())
///     .collect();
/// assert_eq!(specs, vec![Value::Float(0.1), Value::Float(0.2)]);
/// ```
pub fn realize_template(template: &Value) -> Realizations<'_> {
    Realizations::new(template)
}

/// Number of realizations of `template`, without building any.
///
/// 1 when there are no placeholders, 0 when any placeholder is empty.
/// Saturates at `u128::MAX`.
pub fn count_realizations(template: &Value) -> u128 {
    let count = discover_bindings(template)
        .iter()
        .fold(1u128, |acc, binding| acc.saturating_mul(binding.len() as u128));
    trace!(%count, "counted realizations");
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates;
    use crate::value::{Key, Record};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_realize_applies_in_order() {
        let template: Value = Record::new("R")
            .with("a", candidates![1, 2])
            .with("b", Value::tuple([candidates!["x", "y"]]))
            .into();
        let bindings = discover_bindings(&template);
        let choices = select(&bindings, &[1, 0]);

        let result = realize(&template, &choices).unwrap();
        assert_eq!(
            result.specification.keys().collect::<Vec<_>>(),
            vec!["a", "b.0"]
        );
        assert_eq!(
            result.realization,
            Value::from(
                Record::new("R")
                    .with("a", 2)
                    .with("b", Value::tuple(["x"]))
            )
        );
    }

    #[test]
    fn test_realize_reports_access_errors() {
        let template: Value = Record::new("R").with("a", candidates![1]).into();
        let bindings = discover_bindings(&template);
        let choices = select(&bindings, &[0]);

        let reshaped: Value = Record::new("R").with("b", 0).into();
        let err = realize(&reshaped, &choices).unwrap_err();
        assert_eq!(err.code(), "MISSING_FIELD");
    }

    #[test]
    fn test_realizations_size_hint_tracks_progress() {
        let template = Value::list([candidates![1, 2, 3], candidates![4, 5]]);
        let mut realizations = realize_template(&template);
        assert_eq!(realizations.total(), 6);
        assert_eq!(realizations.bindings().len(), 2);
        assert_eq!(realizations.size_hint(), (6, Some(6)));
        realizations.next();
        realizations.next();
        assert_eq!(realizations.size_hint(), (4, Some(4)));
        assert_eq!(realizations.count(), 4);
    }

    #[test]
    fn test_root_placeholder_replaces_template() {
        let template = candidates!["a", "b"];
        let results: Vec<_> = realize_template(&template)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].realization, Value::from("b"));
        assert_eq!(results[1].specification.get(""), Some(&Value::from("b")));
    }

    #[test]
    fn test_count_matches_product() {
        let template = Value::map([
            ("a", candidates![1, 2, 3]),
            ("b", Value::list([candidates![1, 2], Value::Int(0)])),
        ]);
        assert_eq!(count_realizations(&template), 6);
        assert_eq!(count_realizations(&Value::Int(1)), 1);
        assert_eq!(
            count_realizations(&Value::list([candidates![1, 2], candidates![]])),
            0
        );
    }

    #[test]
    fn test_deserialize_into_typed_struct() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Run {
            seed: i64,
            tags: Vec<String>,
        }

        let template: Value = Record::new("Run")
            .with("seed", candidates![1, 2])
            .with("tags", Value::tuple(["fast"]))
            .into();
        let runs: Vec<Run> = realize_template(&template)
            .map(|r| r.unwrap().deserialize::<Run>().unwrap())
            .collect();
        assert_eq!(
            runs,
            vec![
                Run {
                    seed: 1,
                    tags: vec!["fast".into()]
                },
                Run {
                    seed: 2,
                    tags: vec!["fast".into()]
                },
            ]
        );
    }

    #[test]
    fn test_colliding_dotted_keys_keep_later_choice() {
        let template = Value::map([
            (Key::from("1"), candidates![1, 2]),
            (Key::Int(1), candidates![3, 4]),
        ]);
        let results: Vec<_> = realize_template(&template)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(results.len(), 4);

        let reported: Vec<_> = results
            .iter()
            .map(|r| {
                assert_eq!(r.specification.len(), 1);
                r.specification["1"].clone()
            })
            .collect();
        assert_eq!(
            reported,
            vec![Value::Int(3), Value::Int(4), Value::Int(3), Value::Int(4)]
        );
        assert_eq!(
            results[2].realization,
            Value::map([(Key::from("1"), Value::Int(2)), (Key::Int(1), Value::Int(3))])
        );
    }

    #[test]
    fn test_to_json_shape() {
        let template: Value = Record::new("R").with("a", candidates![1]).into();
        let first = realize_template(&template).next().unwrap().unwrap();
        assert_eq!(
            first.to_json(),
            serde_json::json!({"specification": {"a": 1}, "realization": {"a": 1}})
        );
    }
}
