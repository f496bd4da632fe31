//! Display model: the closed set of shapes the formatter knows how to render.
//!
//! Domain types convert themselves into a [`DisplayValue`] once, through
//! [`Describe`], at the boundary between a command and the formatter. The
//! formatter never inspects domain types directly.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A renderable value of any shape.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// `None` is an unset timestamp and renders empty.
    Timestamp(Option<DateTime<Utc>>),
    List(Vec<DisplayValue>),
    Record(Record),
    /// Key/value pairs in insertion order.
    Map(Vec<(String, DisplayValue)>),
}

impl DisplayValue {
    /// Lists, records and maps. Timestamps count as scalars.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            DisplayValue::List(_) | DisplayValue::Record(_) | DisplayValue::Map(_)
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DisplayValue::Null)
    }

    pub fn text(value: impl Into<String>) -> Self {
        DisplayValue::Text(value.into())
    }
}

/// One named field of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    ident: String,
    serial_name: Option<String>,
    value: DisplayValue,
}

impl Field {
    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn value(&self) -> &DisplayValue {
        &self.value
    }

    /// Key used by the structured-document encodings.
    pub fn key(&self) -> &str {
        self.serial_name.as_deref().unwrap_or(&self.ident)
    }

    /// Column or row header used by the table encoding.
    pub fn display_name(&self) -> String {
        match &self.serial_name {
            Some(name) => name.to_uppercase(),
            None => super::cell::header_name(&self.ident),
        }
    }
}

/// An ordered set of named fields, i.e. a single domain object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field known only by its identifier.
    pub fn field(mut self, ident: impl Into<String>, value: impl Into<DisplayValue>) -> Self {
        self.fields.push(Field {
            ident: ident.into(),
            serial_name: None,
            value: value.into(),
        });
        self
    }

    /// Add a field that also carries its external serialization name.
    pub fn field_as(
        mut self,
        ident: impl Into<String>,
        serial_name: impl Into<String>,
        value: impl Into<DisplayValue>,
    ) -> Self {
        self.fields.push(Field {
            ident: ident.into(),
            serial_name: Some(serial_name.into()),
            value: value.into(),
        });
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, ident: &str) -> Option<&DisplayValue> {
        self.fields
            .iter()
            .find(|f| f.ident == ident)
            .map(|f| &f.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Capability every result type implements to become renderable.
pub trait Describe {
    fn describe(&self) -> DisplayValue;
}

impl Describe for DisplayValue {
    fn describe(&self) -> DisplayValue {
        self.clone()
    }
}

impl Describe for Record {
    fn describe(&self) -> DisplayValue {
        DisplayValue::Record(self.clone())
    }
}

impl<T: Describe> Describe for [T] {
    fn describe(&self) -> DisplayValue {
        DisplayValue::List(self.iter().map(Describe::describe).collect())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(&self) -> DisplayValue {
        self.as_slice().describe()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(&self) -> DisplayValue {
        match self {
            Some(value) => value.describe(),
            None => DisplayValue::Null,
        }
    }
}

impl<V: Describe> Describe for BTreeMap<String, V> {
    fn describe(&self) -> DisplayValue {
        DisplayValue::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.describe()))
                .collect(),
        )
    }
}

impl Describe for str {
    fn describe(&self) -> DisplayValue {
        DisplayValue::Text(self.to_string())
    }
}

impl Describe for String {
    fn describe(&self) -> DisplayValue {
        DisplayValue::Text(self.clone())
    }
}

impl Describe for bool {
    fn describe(&self) -> DisplayValue {
        DisplayValue::Bool(*self)
    }
}

impl Describe for i64 {
    fn describe(&self) -> DisplayValue {
        DisplayValue::Int(*self)
    }
}

impl From<bool> for DisplayValue {
    fn from(value: bool) -> Self {
        DisplayValue::Bool(value)
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        DisplayValue::Int(value)
    }
}

impl From<i32> for DisplayValue {
    fn from(value: i32) -> Self {
        DisplayValue::Int(i64::from(value))
    }
}

impl From<u32> for DisplayValue {
    fn from(value: u32) -> Self {
        DisplayValue::Int(i64::from(value))
    }
}

impl From<u64> for DisplayValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => DisplayValue::Int(n),
            Err(_) => DisplayValue::Text(value.to_string()),
        }
    }
}

impl From<usize> for DisplayValue {
    fn from(value: usize) -> Self {
        DisplayValue::from(value as u64)
    }
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        DisplayValue::Float(value)
    }
}

impl From<String> for DisplayValue {
    fn from(value: String) -> Self {
        DisplayValue::Text(value)
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        DisplayValue::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for DisplayValue {
    fn from(value: DateTime<Utc>) -> Self {
        DisplayValue::Timestamp(Some(value))
    }
}

impl From<Record> for DisplayValue {
    fn from(value: Record) -> Self {
        DisplayValue::Record(value)
    }
}

impl<T: Into<DisplayValue>> From<Option<T>> for DisplayValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DisplayValue::Null)
    }
}

impl<T: Into<DisplayValue>> From<Vec<T>> for DisplayValue {
    fn from(value: Vec<T>) -> Self {
        DisplayValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DisplayValue>> From<BTreeMap<String, T>> for DisplayValue {
    fn from(value: BTreeMap<String, T>) -> Self {
        DisplayValue::Map(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl Serialize for DisplayValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DisplayValue::Null => serializer.serialize_none(),
            DisplayValue::Bool(b) => serializer.serialize_bool(*b),
            DisplayValue::Int(n) => serializer.serialize_i64(*n),
            DisplayValue::Float(f) => serializer.serialize_f64(*f),
            DisplayValue::Text(s) => serializer.serialize_str(s),
            DisplayValue::Timestamp(Some(t)) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            DisplayValue::Timestamp(None) => serializer.serialize_none(),
            DisplayValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DisplayValue::Record(record) => record.serialize(serializer),
            DisplayValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(field.key(), &field.value)?;
        }
        map.end()
    }
}
