//! Option values carried by navigation bar props and published payloads.
//!
//! # Equality
//!
//! Change suppression in the proxy relies on [`Value`]'s `PartialEq`, which is
//! a deep structural comparison with these rules:
//!
//! - lists compare element by element, in order
//! - maps compare by key, insertion order is ignored
//! - numbers compare numerically, `Int(1) == Float(1.0)` and `NaN == NaN`
//! - drivers compare by driver identity
//! - actions compare by callback identity: cloning an [`ActionRef`] keeps it
//!   equal, building a new closure does not

use crate::animation::DriverHandle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

/// Ordered option map, used for props, payloads and style sheets.
pub type Options = IndexMap<String, Value>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(Options),
    #[serde(skip_deserializing)]
    Driver(DriverHandle),
    #[serde(skip_deserializing)]
    Action(ActionRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Options> {
        match self {
            Value::Map(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_driver(&self) -> Option<&DriverHandle> {
        match self {
            Value::Driver(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&ActionRef> {
        match self {
            Value::Action(value) => Some(value),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Driver(a), Value::Driver(b)) => a == b,
            (Value::Action(a), Value::Action(b)) => a == b,
            _ => false,
        }
    }
}

// Drivers and actions are runtime handles, they serialize as their labels.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::Text(value) => serializer.serialize_str(value),
            Value::List(items) => items.serialize(serializer),
            Value::Map(map) => map.serialize(serializer),
            Value::Driver(driver) => serializer.collect_str(driver),
            Value::Action(action) => serializer.collect_str(action),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Options> for Value {
    fn from(value: Options) -> Self {
        Value::Map(value)
    }
}

impl From<DriverHandle> for Value {
    fn from(value: DriverHandle) -> Self {
        Value::Driver(value)
    }
}

impl From<ActionRef> for Value {
    fn from(value: ActionRef) -> Self {
        Value::Action(value)
    }
}

/// Function-valued option, e.g. the handler behind a back button.
#[derive(Clone)]
pub struct ActionRef {
    name: Rc<str>,
    callback: Rc<dyn Fn()>,
}

impl ActionRef {
    pub fn new(name: impl Into<String>, callback: impl Fn() + 'static) -> Self {
        ActionRef {
            name: Rc::from(name.into()),
            callback: Rc::new(callback),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invoke(&self) {
        (self.callback)()
    }
}

impl PartialEq for ActionRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.callback), Rc::as_ptr(&other.callback))
    }
}

impl fmt::Debug for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action:{}", self.name)
    }
}
