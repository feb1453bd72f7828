use std::slice;

use serde::{
    de::{value::StrDeserializer, DeserializeOwned, DeserializeSeed, MapAccess, SeqAccess, Visitor},
    Deserializer,
};

use crate::de::{ElementRecord, RecordProperty};
use crate::PlyError;

impl ElementRecord {
    /// Map this record onto any `Deserialize` struct or map, keyed by
    /// property name.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, PlyError> {
        T::deserialize(RecordDeserializer { record: self })
    }
}

pub(crate) struct RecordDeserializer<'a> {
    record: &'a ElementRecord,
}

impl<'de, 'a> Deserializer<'de> for RecordDeserializer<'a> {
    type Error = PlyError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(RecordMapAccess {
            properties: self.record.properties().iter(),
            pending: None,
        })
    }

    serde::forward_to_deserialize_any! {
        bool i8 u8 i16 u16 i32 u32 i64 u64 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct RecordMapAccess<'a> {
    properties: slice::Iter<'a, RecordProperty>,
    pending: Option<&'a RecordProperty>,
}

impl<'de, 'a> MapAccess<'de> for RecordMapAccess<'a> {
    type Error = PlyError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        let Some(prop) = self.properties.next() else {
            return Ok(None);
        };
        self.pending = Some(prop);
        seed.deserialize(StrDeserializer::<PlyError>::new(&prop.name))
            .map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        let prop = self
            .pending
            .take()
            .ok_or_else(|| PlyError::Deserialize("value requested before key".to_string()))?;
        seed.deserialize(PropertyDeserializer { prop })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.properties.len())
    }
}

macro_rules! forward_to_scalar {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value, Self::Error>
            where
                V: Visitor<'de>,
            {
                self.scalar()?.$method(visitor)
            }
        )*
    };
}

struct PropertyDeserializer<'a> {
    prop: &'a RecordProperty,
}

impl PropertyDeserializer<'_> {
    fn scalar(&self) -> Result<NumberDeserializer, PlyError> {
        if self.prop.is_list {
            return Err(PlyError::Deserialize(format!(
                "list property '{}' cannot be read as a number",
                self.prop.name
            )));
        }
        Ok(NumberDeserializer(
            self.prop.values.first().copied().unwrap_or(0.0),
        ))
    }
}

impl<'de, 'a> Deserializer<'de> for PropertyDeserializer<'a> {
    type Error = PlyError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        if self.prop.is_list {
            self.deserialize_seq(visitor)
        } else {
            self.scalar()?.deserialize_any(visitor)
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        // A property that is declared is always present.
        visitor.visit_some(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(ListAccess {
            values: self.prop.values.iter(),
        })
    }

    forward_to_scalar! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_f32 deserialize_f64
    }

    serde::forward_to_deserialize_any! {
        i128 u128 char str string bytes byte_buf unit unit_struct newtype_struct
        tuple tuple_struct map struct enum identifier ignored_any
    }
}

struct ListAccess<'a> {
    values: slice::Iter<'a, f64>,
}

impl<'de, 'a> SeqAccess<'de> for ListAccess<'a> {
    type Error = PlyError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        self.values
            .next()
            .map(|value| seed.deserialize(NumberDeserializer(*value)))
            .transpose()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.values.len())
    }
}

macro_rules! visit_cast {
    ($($method:ident => $visit:ident as $ty:ty),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value, Self::Error>
            where
                V: Visitor<'de>,
            {
                visitor.$visit(self.0 as $ty)
            }
        )*
    };
}

/// A decoded number handed to whatever numeric type the target field has.
/// Casts follow `as` semantics: floats truncate toward zero and saturate.
struct NumberDeserializer(f64);

impl<'de> Deserializer<'de> for NumberDeserializer {
    type Error = PlyError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(self.0)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_bool(self.0 != 0.0)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    visit_cast! {
        deserialize_i8 => visit_i8 as i8,
        deserialize_i16 => visit_i16 as i16,
        deserialize_i32 => visit_i32 as i32,
        deserialize_i64 => visit_i64 as i64,
        deserialize_u8 => visit_u8 as u8,
        deserialize_u16 => visit_u16 as u16,
        deserialize_u32 => visit_u32 as u32,
        deserialize_u64 => visit_u64 as u64,
        deserialize_f32 => visit_f32 as f32,
    }

    serde::forward_to_deserialize_any! {
        f64 i128 u128 char str string bytes byte_buf unit unit_struct newtype_struct
        seq tuple tuple_struct map struct enum identifier ignored_any
    }
}
