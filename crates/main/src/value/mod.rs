//! Runtime values checked by the validator.
//!
//! A [`Value`] is the dynamic view of a concrete input or output. Derived
//! types produce one through [`ToValue`]; untyped callers can build one by
//! hand or convert a `serde_json::Value`.

mod convert;

pub use convert::ToValue;

/// Ordered list of record fields (binding name, value).
pub type RecordFields = Vec<(String, Value)>;

/// A dynamic value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent value (`None`, JSON `null`).
    #[default]
    Null,
    /// A present optional or pointer value (`Some(x)`, `Box<T>`). Never
    /// zero, whatever it holds.
    Present(Box<Value>),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    String(String),
    List(Vec<Value>),
    /// Key/value mapping in insertion order.
    Map(Vec<(Value, Value)>),
    Record(Record),
}

/// A structured record with named fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    /// Name of the declared type; empty for records built from JSON objects.
    pub type_name: String,
    pub fields: RecordFields,
}

impl Record {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    #[must_use]
    pub fn with(mut self, binding: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((binding.into(), value.into()));
        self
    }

    /// Locate a field by its binding name.
    #[must_use]
    pub fn get(&self, binding: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == binding)
            .map(|(_, value)| value)
    }

    /// True when every field holds a zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_zero())
    }
}

impl Value {
    /// Wrap a value as present.
    #[must_use]
    pub fn present(value: impl Into<Value>) -> Self {
        Value::Present(Box::new(value.into()))
    }

    /// The value behind every [`Value::Present`] layer.
    #[must_use]
    pub fn resolve(&self) -> &Value {
        let mut value = self;
        while let Value::Present(inner) = value {
            value = inner;
        }
        value
    }

    /// True for the zero value of each kind: null, `false`, `0`, `'\0'`, the
    /// empty string, an empty list or map, and a record whose fields are all
    /// zero. A present value is not zero even when it holds one.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Present(_) => false,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::UInt(n) => *n == 0,
            Value::Float(n) => *n == 0.0,
            Value::Char(c) => *c == '\0',
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Record(record) => record.is_zero(),
        }
    }

    /// Short name of this value's kind, used in error messages. Present
    /// values report the kind they hold.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.resolve() {
            Value::Null => "null",
            Value::Present(_) => "present",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    /// The record behind any presence layers.
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self.resolve() {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Value::present)
    }
}

/// JSON objects become anonymous records so that untyped payloads can be
/// validated against introspected fields.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Record(Record {
                type_name: String::new(),
                fields: entries
                    .into_iter()
                    .map(|(name, value)| (name, Value::from(value)))
                    .collect(),
            }),
        }
    }
}
