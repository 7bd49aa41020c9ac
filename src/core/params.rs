//! Parameter placeholders resolved across a transition.
//!
//! The target state of a transition can declare properties it does not know
//! yet as placeholders. Once the source state's terminal outcome is known,
//! each placeholder is replaced by the parameter of the same name emitted
//! by that outcome, falling back to a declared default.

use crate::core::item::Record;
use crate::error::EngineError;
use serde_json::Value;
use std::collections::BTreeMap;

/// A deferred property value, resolved from the source state's outcome
/// parameters at transition time.
///
/// # Example
///
/// ```rust
/// use trackstate::core::ParamRef;
/// use trackstate::record;
///
/// let name = ParamRef::new("name");
/// let params = record! { "name": "Jonathan" };
/// assert_eq!(name.resolve(&params).unwrap(), "Jonathan");
///
/// // No value supplied and no default: resolution fails the transition.
/// assert!(name.resolve(&record! {}).is_err());
///
/// // A declared default fills the gap.
/// let reason = ParamRef::new("reason").or("unknown");
/// assert_eq!(reason.resolve(&record! {}).unwrap(), "unknown");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamRef {
    name: String,
    default: Option<Value>,
}

impl ParamRef {
    /// A placeholder for the source parameter with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// Declare a default used when the source never emits the parameter.
    pub fn or(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The source parameter name this placeholder resolves from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve against the source state's terminal outcome parameters.
    ///
    /// A supplied parameter always wins over the default.
    pub fn resolve(&self, params: &Record) -> Result<Value, EngineError> {
        if let Some(value) = params.get(&self.name) {
            return Ok(value.clone());
        }
        self.default
            .clone()
            .ok_or_else(|| EngineError::UnresolvedParameter(self.name.clone()))
    }
}

/// A raw property supplied to `transition`: either a concrete value or a
/// placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// A value known up front.
    Value(Value),
    /// A value resolved from the source state's outcome parameters.
    Param(ParamRef),
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i32> for Property {
    fn from(value: i32) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for Property {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<u64> for Property {
    fn from(value: u64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<f64> for Property {
    fn from(value: f64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<bool> for Property {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<ParamRef> for Property {
    fn from(param: ParamRef) -> Self {
        Self::Param(param)
    }
}

/// The description of a transition's target item: named properties, some of
/// which may still be placeholders.
///
/// Placeholders only exist on this type; `track` takes fully-resolved
/// [`Record`]s, so a placeholder can never be smuggled outside a
/// transition.
///
/// # Example
///
/// ```rust
/// use trackstate::core::{ParamRef, PropertySpec};
/// use trackstate::record;
///
/// let spec = PropertySpec::new()
///     .set("name", ParamRef::new("name"))
///     .set("reason", "defected");
///
/// let record = spec.resolve(&record! { "name": "Jonathan" }).unwrap();
/// assert_eq!(record["name"], "Jonathan");
/// assert_eq!(record["reason"], "defected");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySpec {
    entries: BTreeMap<String, Property>,
}

impl PropertySpec {
    /// An empty property spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property to a concrete value or a placeholder.
    pub fn set(mut self, key: impl Into<String>, property: impl Into<Property>) -> Self {
        self.entries.insert(key.into(), property.into());
        self
    }

    /// Resolve every placeholder against the source outcome parameters,
    /// producing the record the target item is built from.
    pub fn resolve(&self, params: &Record) -> Result<Record, EngineError> {
        let mut record = Record::new();
        for (key, property) in &self.entries {
            let value = match property {
                Property::Value(value) => value.clone(),
                Property::Param(param) => param.resolve(params)?,
            };
            record.insert(key.clone(), value);
        }
        Ok(record)
    }
}

impl From<Record> for PropertySpec {
    fn from(record: Record) -> Self {
        let entries = record
            .into_iter()
            .map(|(key, value)| (key, Property::Value(value)))
            .collect();
        Self { entries }
    }
}
