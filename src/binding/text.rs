//! Deserializer over flat text pairs (query string, route values).
//!
//! Keys are canonicalized to lower case and matched against the target
//! struct's declared field names the same way, so `PageSize`, `pagesize`
//! and `pageSize` all reach a field serialized as `pageSize`. Values stay
//! text until the target type asks for something else, at which point they
//! are parsed explicitly; a parse failure is reported with the field name.
//!
//! Two declared fields that collapse to the same lower-cased name are not
//! detected; the last one wins.

use serde::de::{self, DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess, Visitor};
use serde::forward_to_deserialize_any;
use std::collections::HashMap;
use std::fmt;

/// Failure while reading text pairs into a shape.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// A required field had no pair.
    #[error("missing field `{0}`")]
    Missing(&'static str),

    /// A value could not be converted.
    #[error("{message}")]
    Invalid {
        field: Option<String>,
        message: String,
    },
}

impl TextError {
    fn invalid(message: impl Into<String>) -> Self {
        TextError::Invalid {
            field: None,
            message: message.into(),
        }
    }

    fn at(self, key: &str) -> Self {
        match self {
            TextError::Invalid { field: None, message } => TextError::Invalid {
                field: Some(key.to_string()),
                message,
            },
            other => other,
        }
    }
}

impl de::Error for TextError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        TextError::invalid(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        TextError::Missing(field)
    }
}

/// Deserialize `T` from key/value pairs. Later duplicates win.
pub fn from_pairs<T: DeserializeOwned>(pairs: &[(String, String)]) -> Result<T, TextError> {
    let mut entries: HashMap<String, String> = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        entries.insert(key.to_lowercase(), value.clone());
    }
    T::deserialize(TextMap { entries })
}

struct TextMap {
    entries: HashMap<String, String>,
}

impl<'de> de::Deserializer<'de> for TextMap {
    type Error = TextError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TextError> {
        visitor.visit_map(TextMapAccess::new(self.entries.into_iter().collect()))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, TextError> {
        let declared: HashMap<String, &'static str> =
            fields.iter().map(|field| (field.to_lowercase(), *field)).collect();

        let entries = self
            .entries
            .into_iter()
            .map(|(key, value)| match declared.get(&key) {
                Some(field) => ((*field).to_string(), value),
                None => (key, value),
            })
            .collect();
        visitor.visit_map(TextMapAccess::new(entries))
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TextError> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, TextError> {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map enum
        identifier ignored_any
    }
}

struct TextMapAccess {
    entries: std::vec::IntoIter<(String, String)>,
    pending: Option<(String, String)>,
}

impl TextMapAccess {
    fn new(entries: Vec<(String, String)>) -> Self {
        Self {
            entries: entries.into_iter(),
            pending: None,
        }
    }
}

impl<'de> MapAccess<'de> for TextMapAccess {
    type Error = TextError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, TextError> {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };
        let key_de: de::value::StringDeserializer<TextError> = key.clone().into_deserializer();
        let parsed = seed.deserialize(key_de)?;
        self.pending = Some((key, value));
        Ok(Some(parsed))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, TextError> {
        let (key, value) = self
            .pending
            .take()
            .ok_or_else(|| TextError::invalid("value requested before its key"))?;
        seed.deserialize(TextValue(value)).map_err(|err| err.at(&key))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// A single text value, parsed on demand.
struct TextValue(String);

macro_rules! parse_number {
    ($($method:ident => $visit:ident : $ty:ty),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TextError> {
                match self.0.parse::<$ty>() {
                    Ok(number) => visitor.$visit(number),
                    Err(err) => Err(TextError::invalid(format!(
                        "`{}` is not a valid {}: {}",
                        self.0,
                        stringify!($ty),
                        err
                    ))),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for TextValue {
    type Error = TextError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TextError> {
        visitor.visit_string(self.0)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TextError> {
        match parse_bool(&self.0) {
            Some(flag) => visitor.visit_bool(flag),
            None => Err(TextError::invalid(format!("`{}` is not a boolean", self.0))),
        }
    }

    parse_number! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TextError> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(TextError::invalid(format!("`{}` is not a single character", self.0))),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TextError> {
        if self.0.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TextError> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, TextError> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, TextError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, TextError> {
        let inner: de::value::StringDeserializer<TextError> = self.0.into_deserializer();
        inner.deserialize_enum(name, variants, visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TextError> {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        i128 u128 str string bytes byte_buf seq tuple tuple_struct map struct identifier
    }
}

pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
