//! Shared template fixtures for integration tests.
//!
//! Mirrors a two-level experiment configuration:
//! `Level1 { field1, field2, field3: Level2 { field1 } }`.

#![allow(dead_code)]

use template_realizer::{Record, TemplateRealization, Value};

/// Opt into log output with `RUST_LOG=template_realizer=trace`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn level2(field1: impl Into<Value>) -> Value {
    Record::new("Level2").with("field1", field1).into()
}

pub fn level1(
    field1: impl Into<Value>,
    field2: impl Into<Value>,
    field3: impl Into<Value>,
) -> Value {
    Record::new("Level1")
        .with("field1", field1)
        .with("field2", field2)
        .with("field3", field3)
        .into()
}

/// `Level1(field1=1, field2=[2, 3, 4], field3=Level2(field1='abc'))`
pub fn plain_template() -> Value {
    level1(1, vec![2, 3, 4], level2("abc"))
}

/// Build the expected realization from `(dotted path, value)` pairs.
pub fn expected(spec: &[(&str, Value)], realization: Value) -> TemplateRealization {
    TemplateRealization {
        specification: spec
            .iter()
            .map(|(path, value)| (path.to_string(), value.clone()))
            .collect(),
        realization,
    }
}
