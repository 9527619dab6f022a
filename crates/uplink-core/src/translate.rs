//! Field translators, one per topic category.
//!
//! | Category | Slice | Shape |
//! |----------|-------|-------|
//! | environment | `data.value` | `key=value,...` text |
//! | lock status | `locks` | sequence of `{ "value": state }` |
//! | power usage | `data.powerValue` | `key=value,...` text |
//! | power alarm | `alarmType` | alarm code |
//! | screen alarm | `data.value` | alarm code |
//!
//! Values are carried through as text, never coerced to numbers. Table misses
//! are kept as `undefined` entries rather than dropped.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::{trace, warn};

use crate::error::{DecodeError, Result};
use crate::tables::{
    lock_field, AlarmType, EnvironmentKey, Label, LockState, PowerPeriod, TranslationTable,
};
use crate::topic::Category;

/// A translated telemetry value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Present in the record but without a value; omitted when serialized.
    Undefined,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Undefined => None,
        }
    }
}

impl From<Label> for FieldValue {
    fn from(label: Label) -> Self {
        match label {
            Label::Known(s) => FieldValue::Text(s.to_string()),
            Label::Undefined => FieldValue::Undefined,
        }
    }
}

/// Telemetry fields keyed by display label.
///
/// Fields keep the order they were first inserted in. Inserting under an
/// existing name replaces the value in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Telemetry {
    fields: IndexMap<String, FieldValue>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text value of a field, if it exists and is defined.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Telemetry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let defined: Vec<(&String, &str)> = self
            .fields
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s)))
            .collect();
        let mut map = serializer.serialize_map(Some(defined.len()))?;
        for (name, value) in defined {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

const ENVIRONMENT_PATH: &str = "data.value";
const LOCKS_PATH: &str = "locks";
const POWER_USAGE_PATH: &str = "data.powerValue";
const POWER_ALARM_PATH: &str = "alarmType";
const SCREEN_ALARM_PATH: &str = "data.value";

/// Translate the category's slice of a decoded payload.
pub fn translate(category: Category, payload: &Value) -> Result<Telemetry> {
    match category {
        Category::Environment => {
            let text = text_slice(payload, category, ENVIRONMENT_PATH)?;
            Ok(translate_key_values::<EnvironmentKey>(category, text))
        }
        Category::LockStatus => {
            let locks = sequence_slice(payload, category, LOCKS_PATH)?;
            translate_locks(locks)
        }
        Category::PowerUsage => {
            let text = text_slice(payload, category, POWER_USAGE_PATH)?;
            Ok(translate_key_values::<PowerPeriod>(category, text))
        }
        Category::PowerAlarm => {
            let code = text_slice(payload, category, POWER_ALARM_PATH)?;
            Ok(translate_alarm(category, code))
        }
        Category::ScreenAlarm => {
            let code = text_slice(payload, category, SCREEN_ALARM_PATH)?;
            Ok(translate_alarm(category, code))
        }
    }
}

/// Translate `key=value` pairs separated by commas.
///
/// The key is the text before the first `=`, the value the text up to the
/// next `=` (or the end). A token without `=` has an undefined value.
pub fn translate_key_values<T: TranslationTable>(category: Category, text: &str) -> Telemetry {
    let mut telemetry = Telemetry::new();
    for token in text.split(',') {
        let mut parts = token.split('=');
        let key = parts.next().unwrap_or_default();
        let value = match parts.next() {
            Some(v) => FieldValue::Text(v.to_string()),
            None => FieldValue::Undefined,
        };
        let label = T::lookup(key);
        if !label.is_known() {
            warn!("Unmapped {} key '{}'", category, key);
        }
        trace!("{}: {} -> {} = {:?}", category, key, label, value);
        telemetry.insert(label.as_str(), value);
    }
    telemetry
}

/// Translate lock states, one field per element in sequence order.
///
/// A null element aborts the message; an element without a text `value`
/// resolves to an undefined state.
pub fn translate_locks(locks: &[Value]) -> Result<Telemetry> {
    let mut telemetry = Telemetry::new();
    for (index, lock) in locks.iter().enumerate() {
        if lock.is_null() {
            return Err(DecodeError::UnexpectedKind {
                category: Category::LockStatus,
                path: LOCKS_PATH,
                expected: "a sequence of lock entries",
            });
        }
        let label = match lock.get("value").and_then(Value::as_str) {
            Some(state) => LockState::lookup(state),
            None => Label::Undefined,
        };
        if !label.is_known() {
            warn!("Unmapped lock state at index {}: {}", index, lock);
        }
        telemetry.insert(lock_field(index), label.into());
    }
    Ok(telemetry)
}

/// Translate a single alarm code. Shared by the power and screen alarm topics.
pub fn translate_alarm(category: Category, code: &str) -> Telemetry {
    let label = AlarmType::lookup(code);
    if !label.is_known() {
        warn!("Unmapped {} code '{}'", category, code);
    }
    let mut telemetry = Telemetry::new();
    telemetry.insert(AlarmType::FIELD, label.into());
    telemetry
}

/// Walk a dot-separated path.
///
/// Stepping into an absent or null value is an error; stepping into a scalar
/// or sequence yields `None`; a missing key yields `None`.
fn slice<'a>(
    payload: &'a Value,
    category: Category,
    path: &'static str,
) -> Result<Option<&'a Value>> {
    let mut current = Some(payload);
    for segment in path.split('.') {
        current = match current {
            None | Some(Value::Null) => {
                return Err(DecodeError::MissingSlice { category, path })
            }
            Some(Value::Object(map)) => map.get(segment),
            Some(_) => None,
        };
    }
    Ok(current)
}

fn text_slice<'a>(payload: &'a Value, category: Category, path: &'static str) -> Result<&'a str> {
    match slice(payload, category, path)? {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(DecodeError::UnexpectedKind {
            category,
            path,
            expected: "text",
        }),
        None => Err(DecodeError::MissingSlice { category, path }),
    }
}

fn sequence_slice<'a>(
    payload: &'a Value,
    category: Category,
    path: &'static str,
) -> Result<&'a [Value]> {
    match slice(payload, category, path)? {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(DecodeError::UnexpectedKind {
            category,
            path,
            expected: "a sequence",
        }),
        None => Err(DecodeError::MissingSlice { category, path }),
    }
}
