//! View options
//!
//! A view definition is a flat mapping of option keys to scalar or list
//! values. This module gives that mapping a closed set of value shapes and
//! typed accessors that report shape errors instead of guessing.

use super::errors::{Result, ViewError};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A single option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Plain string
    Str(String),
    /// Boolean flag
    Bool(bool),
    /// Integer
    Int(i64),
    /// Ordered list of strings
    List(Vec<String>),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Options describing one view instance.
///
/// Keys are kept sorted so that iteration (and therefore debug output) is
/// stable; generation itself never depends on key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    values: BTreeMap<String, OptionValue>,
}

impl ViewOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option, replacing any previous value.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Inserts an option in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Returns true if `key` is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The view name, if present as a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self.values.get("name") {
            Some(OptionValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Reads a string option.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::TypeMismatch`] if the value is not a string.
    pub fn str(&self, key: &str) -> Result<Option<&str>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(OptionValue::Str(s)) => Ok(Some(s)),
            Some(_) => Err(mismatch(key, "string")),
        }
    }

    /// Reads a boolean option.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::TypeMismatch`] if the value is not a boolean.
    pub fn flag(&self, key: &str) -> Result<Option<bool>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(OptionValue::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(mismatch(key, "boolean")),
        }
    }

    /// Reads a list option.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::TypeMismatch`] if the value is not a list.
    pub fn list(&self, key: &str) -> Result<Option<&[String]>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(OptionValue::List(items)) => Ok(Some(items)),
            Some(_) => Err(mismatch(key, "list of strings")),
        }
    }

    /// Reads a string or integer option rendered as text.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::TypeMismatch`] for booleans and lists.
    pub fn scalar_text(&self, key: &str) -> Result<Option<String>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(OptionValue::Str(s)) => Ok(Some(s.clone())),
            Some(OptionValue::Int(i)) => Ok(Some(i.to_string())),
            Some(_) => Err(mismatch(key, "string or integer")),
        }
    }

    /// Iterates over all options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn mismatch(key: &str, expected: &'static str) -> ViewError {
    ViewError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}

fn scalar_to_string(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(if *b { "True" } else { "False" }.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(mismatch(key, "list of scalars")),
    }
}

fn convert(key: &str, value: &Value) -> Result<Option<OptionValue>> {
    let converted = match value {
        Value::Null => return Ok(None),
        Value::String(s) => OptionValue::Str(s.clone()),
        Value::Bool(b) => OptionValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => OptionValue::Int(i),
            None => return Err(mismatch(key, "integer")),
        },
        Value::Sequence(items) => OptionValue::List(
            items
                .iter()
                .map(|item| scalar_to_string(key, item))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Tagged(tagged) => return convert(key, &tagged.value),
        Value::Mapping(_) => {
            return Err(mismatch(key, "string, boolean, integer or list"));
        }
    };
    Ok(Some(converted))
}

impl TryFrom<&Mapping> for ViewOptions {
    type Error = ViewError;

    fn try_from(mapping: &Mapping) -> Result<Self> {
        let mut options = Self::new();
        for (key, value) in mapping {
            let Some(key) = key.as_str() else {
                return Err(ViewError::Parse(format!(
                    "option keys must be strings, got {key:?}"
                )));
            };
            if let Some(value) = convert(key, value)? {
                options.insert(key, value);
            }
        }
        Ok(options)
    }
}

impl TryFrom<&Value> for ViewOptions {
    type Error = ViewError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Mapping(mapping) => Self::try_from(mapping),
            other => Err(ViewError::Parse(format!(
                "view definition must be a mapping, got {}",
                yaml_kind(other)
            ))),
        }
    }
}

pub(crate) fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ViewOptions {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        ViewOptions::try_from(&value).unwrap()
    }

    #[test]
    fn test_from_yaml_scalars() {
        let options = parse("name: v\nrecurse: true\nrefresh-frequency: 5\n");
        assert_eq!(options.name(), Some("v"));
        assert_eq!(options.flag("recurse").unwrap(), Some(true));
        assert_eq!(
            options.scalar_text("refresh-frequency").unwrap(),
            Some("5".to_string())
        );
    }

    #[test]
    fn test_from_yaml_stringifies_list_entries() {
        let options = parse("job-name:\n  - build\n  - 42\n");
        let jobs = options.list("job-name").unwrap().unwrap();
        assert_eq!(jobs, ["build", "42"]);
    }

    #[test]
    fn test_from_yaml_null_is_unset() {
        let options = parse("name: v\ndescription: ~\n");
        assert!(!options.contains("description"));
    }

    #[test]
    fn test_from_yaml_rejects_nested_mapping() {
        let value: Value = serde_yaml::from_str("columns:\n  status: yes\n").unwrap();
        let err = ViewOptions::try_from(&value).unwrap_err();
        assert!(matches!(err, ViewError::TypeMismatch { ref key, .. } if key == "columns"));
    }

    #[test]
    fn test_from_yaml_rejects_non_mapping() {
        let value: Value = serde_yaml::from_str("- a\n- b\n").unwrap();
        let err = ViewOptions::try_from(&value).unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn test_flag_type_mismatch() {
        let options = ViewOptions::new().set("recurse", "yes");
        let err = options.flag("recurse").unwrap_err();
        assert_eq!(
            err,
            ViewError::TypeMismatch {
                key: "recurse".to_string(),
                expected: "boolean",
            }
        );
    }

    #[test]
    fn test_list_type_mismatch() {
        let options = ViewOptions::new().set("columns", "status");
        assert!(options.list("columns").is_err());
    }

    #[test]
    fn test_scalar_text_rejects_bool() {
        let options = ViewOptions::new().set("no-of-displayed-builds", true);
        assert!(options.scalar_text("no-of-displayed-builds").is_err());
    }

    #[test]
    fn test_option_value_display() {
        assert_eq!(OptionValue::from(vec!["a", "b"]).to_string(), "[a, b]");
        assert_eq!(OptionValue::Int(3).to_string(), "3");
        assert_eq!(OptionValue::Bool(false).to_string(), "false");
    }
}
