use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Mapping node of an event. Keys are sorted, so encoded output is stable.
pub type EventMap = BTreeMap<String, EventValue>;

/// A tracking event, or any node inside one.
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    /// Mapping of text keys to nested values.
    Map(EventMap),
    /// Ordered sequence of nested values.
    Seq(Vec<EventValue>),
    /// Already-decoded text.
    Text(String),
    /// Raw bytes of uncertain text encoding.
    Bytes(Vec<u8>),
    /// Integer or floating point number.
    Number(EventNumber),
    /// Boolean flag.
    Bool(bool),
    /// Explicit null.
    Null,
    /// Calendar date with no time component.
    Date(NaiveDate),
    /// Date-time, with or without a UTC offset.
    DateTime(EventDateTime),
}

/// Numeric scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventNumber {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Binary float. Non-finite values have no JSON form.
    Float(f64),
}

impl EventNumber {
    /// Returns `false` for NaN and the infinities.
    pub fn is_finite(&self) -> bool {
        match self {
            EventNumber::Float(f) => f.is_finite(),
            EventNumber::Int(_) | EventNumber::UInt(_) => true,
        }
    }
}

/// Date-time scalar. A naive value is taken to already be in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDateTime {
    /// No timezone attached.
    Naive(NaiveDateTime),
    /// Carries a fixed offset from UTC.
    Offset(DateTime<FixedOffset>),
}

impl EventDateTime {
    /// The same instant, expressed in UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            EventDateTime::Naive(dt) => dt.and_utc(),
            EventDateTime::Offset(dt) => dt.with_timezone(&Utc),
        }
    }

    /// ISO-8601 text in UTC with an explicit `+00:00` suffix.
    ///
    /// Microseconds are written only when non-zero, e.g.
    /// `2012-05-01T07:27:01.000200+00:00` or `2012-05-01T07:27:01+00:00`.
    pub fn to_iso_utc(&self) -> String {
        let utc = self.to_utc();
        // leap seconds report >= 1_000_000
        let micros = utc.timestamp_subsec_micros() % 1_000_000;
        let seconds = utc.format("%Y-%m-%dT%H:%M:%S");
        if micros == 0 {
            format!("{}+00:00", seconds)
        } else {
            format!("{}.{:06}+00:00", seconds, micros)
        }
    }
}

impl EventValue {
    /// Builds a mapping from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, EventValue)>,
    {
        EventValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Looks up `key` when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&EventValue> {
        match self {
            EventValue::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Borrows the text of a `Text` value, or of a `Bytes` value holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EventValue::Text(s) => Some(s),
            EventValue::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }
}

impl Serialize for EventNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            EventNumber::Int(i) => serializer.serialize_i64(i),
            EventNumber::UInt(u) => serializer.serialize_u64(u),
            EventNumber::Float(f) if f.is_finite() => serializer.serialize_f64(f),
            EventNumber::Float(f) => Err(S::Error::custom(format!(
                "non-finite number {} has no JSON representation",
                f
            ))),
        }
    }
}

impl Serialize for EventValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EventValue::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            EventValue::Seq(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            EventValue::Text(s) => serializer.serialize_str(s),
            EventValue::Bytes(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(S::Error::custom)?;
                serializer.serialize_str(text)
            }
            EventValue::Number(n) => n.serialize(serializer),
            EventValue::Bool(b) => serializer.serialize_bool(*b),
            EventValue::Null => serializer.serialize_unit(),
            EventValue::Date(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            EventValue::DateTime(dt) => serializer.serialize_str(&dt.to_iso_utc()),
        }
    }
}

impl From<bool> for EventValue {
    fn from(b: bool) -> Self {
        EventValue::Bool(b)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for EventValue {
            fn from(n: $t) -> Self {
                EventValue::Number(EventNumber::Int(i64::from(n)))
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for EventValue {
            fn from(n: $t) -> Self {
                EventValue::Number(EventNumber::UInt(u64::from(n)))
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<f32> for EventValue {
    fn from(f: f32) -> Self {
        EventValue::Number(EventNumber::Float(f64::from(f)))
    }
}

impl From<f64> for EventValue {
    fn from(f: f64) -> Self {
        EventValue::Number(EventNumber::Float(f))
    }
}

impl From<&str> for EventValue {
    fn from(s: &str) -> Self {
        EventValue::Text(s.to_string())
    }
}

impl From<String> for EventValue {
    fn from(s: String) -> Self {
        EventValue::Text(s)
    }
}

impl From<Vec<u8>> for EventValue {
    fn from(bytes: Vec<u8>) -> Self {
        EventValue::Bytes(bytes)
    }
}

impl From<&[u8]> for EventValue {
    fn from(bytes: &[u8]) -> Self {
        EventValue::Bytes(bytes.to_vec())
    }
}

impl From<NaiveDate> for EventValue {
    fn from(date: NaiveDate) -> Self {
        EventValue::Date(date)
    }
}

impl From<NaiveDateTime> for EventValue {
    fn from(dt: NaiveDateTime) -> Self {
        EventValue::DateTime(EventDateTime::Naive(dt))
    }
}

impl From<DateTime<FixedOffset>> for EventValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        EventValue::DateTime(EventDateTime::Offset(dt))
    }
}

impl From<DateTime<Utc>> for EventValue {
    fn from(dt: DateTime<Utc>) -> Self {
        EventValue::DateTime(EventDateTime::Offset(DateTime::<FixedOffset>::from(dt)))
    }
}

impl From<Vec<EventValue>> for EventValue {
    fn from(items: Vec<EventValue>) -> Self {
        EventValue::Seq(items)
    }
}

impl From<EventMap> for EventValue {
    fn from(map: EventMap) -> Self {
        EventValue::Map(map)
    }
}

impl<T: Into<EventValue>> From<Option<T>> for EventValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(EventValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for EventValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => EventValue::Null,
            Value::Bool(b) => EventValue::Bool(b),
            Value::Number(n) => {
                let number = if let Some(i) = n.as_i64() {
                    EventNumber::Int(i)
                } else if let Some(u) = n.as_u64() {
                    EventNumber::UInt(u)
                } else {
                    // serde_json only holds finite floats
                    EventNumber::Float(n.as_f64().unwrap_or_default())
                };
                EventValue::Number(number)
            }
            Value::String(s) => EventValue::Text(s),
            Value::Array(items) => EventValue::Seq(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                EventValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl<K: Into<String>> FromIterator<(K, EventValue)> for EventValue {
    fn from_iter<I: IntoIterator<Item = (K, EventValue)>>(iter: I) -> Self {
        EventValue::map(iter)
    }
}
