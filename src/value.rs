//! Template value model.
//!
//! A template is a plain `Value` tree. Records carry their field list as
//! runtime data, in declaration order, so discovery never needs reflection.
//!
//! ```text
//! Value
//! ├── scalars: Null | Bool | Int | Float | Str
//! ├── Record { name, fields: IndexMap<String, Value> }
//! ├── List(Vec<Value>)            (mutable sequence)
//! ├── Tuple(Arc<[Value]>)         (immutable sequence, replaced on write)
//! ├── Map(IndexMap<Key, Value>)   (insertion order)
//! └── Placeholder(candidates)
//! ```

use crate::access;
use crate::error::AccessError;
use crate::path::AccessPath;
use crate::placeholder::Placeholder;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Mapping key. The hashable subset of scalars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{}", b),
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Value::Bool(b),
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::Str(s),
        }
    }
}

/// Named record with a fixed, ordered field list.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub(crate) name: String,
    pub(crate) fields: IndexMap<String, Value>,
}

impl Record {
    /// Create a record with no fields yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Declare a field. Redeclaring a field replaces its value in place.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Immutable sequence.
///
/// Never mutated in place: a write builds a new tuple and the slot that held
/// the old one is pointed at it. Clones share storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple(Arc<[Value]>);

impl Tuple {
    pub fn new<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.0.to_vec()
    }

    /// Build a new tuple with `value` substituted at `index`.
    pub fn replaced(&self, index: usize, value: Value) -> Result<Tuple, AccessError> {
        let mut items = self.to_vec();
        let len = items.len();
        let slot = items.get_mut(index).ok_or(AccessError::IndexOutOfBounds {
            container: "tuple",
            index,
            len,
        })?;
        *slot = value;
        Ok(Self::from(items))
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(items: Vec<Value>) -> Self {
        Self(items.into())
    }
}

/// A template node.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Record(Record),
    List(Vec<Value>),
    Tuple(Tuple),
    Map(IndexMap<Key, Value>),
    Placeholder(Placeholder),
}

impl Value {
    /// Build a mutable sequence.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build an immutable sequence.
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Tuple(Tuple::new(items))
    }

    /// Build a mapping; entries keep the given order.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Record(_) => "record",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "map",
            Value::Placeholder(_) => "placeholder",
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Value::Placeholder(_))
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&Tuple> {
        match self {
            Value::Tuple(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<Key, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Read the value at `path`. The empty path addresses `self`.
    pub fn get_path(&self, path: &AccessPath) -> Result<&Value, AccessError> {
        path.steps()
            .iter()
            .try_fold(self, |node, step| access::get(node, step))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Tuple> for Value {
    fn from(t: Tuple) -> Self {
        Value::Tuple(t)
    }
}

impl From<Placeholder> for Value {
    fn from(p: Placeholder) -> Self {
        Value::Placeholder(p)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::AccessStep;

    #[test]
    fn test_record_keeps_declaration_order() {
        let record = Record::new("Level1")
            .with("field1", 1)
            .with("field2", vec![2, 3, 4])
            .with("field3", "abc");
        let names: Vec<_> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["field1", "field2", "field3"]);
        assert_eq!(record.name(), "Level1");
    }

    #[test]
    fn test_record_redeclare_keeps_position() {
        let record = Record::new("R").with("a", 1).with("b", 2).with("a", 3);
        let fields: Vec<_> = record.fields().collect();
        assert_eq!(fields, vec![("a", &Value::Int(3)), ("b", &Value::Int(2))]);
    }

    #[test]
    fn test_tuple_replaced_builds_new_tuple() {
        let original = Tuple::new([1, 2, 3]);
        let replaced = original.replaced(1, Value::Int(20)).unwrap();
        assert_eq!(replaced, Tuple::new([1, 20, 3]));
        assert_eq!(original, Tuple::new([1, 2, 3]));
    }

    #[test]
    fn test_tuple_replaced_out_of_bounds() {
        let err = Tuple::new([1]).replaced(4, Value::Null).unwrap_err();
        assert_eq!(
            err,
            AccessError::IndexOutOfBounds {
                container: "tuple",
                index: 4,
                len: 1
            }
        );
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let map = Value::map([("z", 1), ("a", 2), ("m", 3)]);
        let keys: Vec<_> = map.as_map().unwrap().keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_get_path() {
        let value = Value::from(
            Record::new("Level1")
                .with("field2", Value::tuple([Value::map([(7, "seven")])]))
                .with("field3", Record::new("Level2").with("field1", "abc")),
        );

        let path = AccessPath::from(vec![
            AccessStep::Field("field2".into()),
            AccessStep::TupleIndex(0),
            AccessStep::Key(Key::Int(7)),
        ]);
        assert_eq!(value.get_path(&path).unwrap(), &Value::from("seven"));
        assert_eq!(value.get_path(&AccessPath::root()).unwrap(), &value);

        let missing = AccessPath::from(vec![AccessStep::Field("nope".into())]);
        assert_eq!(value.get_path(&missing).unwrap_err().code(), "MISSING_FIELD");
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::from("k").to_string(), "k");
        assert_eq!(Key::from(42).to_string(), "42");
        assert_eq!(Key::from(true).to_string(), "true");
    }
}
