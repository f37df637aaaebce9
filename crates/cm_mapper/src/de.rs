//! The deserializer every read goes through.
//!
//! [`Reader`] wraps a format's deserializer and follows the path of the value
//! being read through maps, sequences and enum variants. It records the
//! values the target type skips, which are the properties it has no field
//! (or alias) for, and can read empty text in optional positions as `None`.

use alloc::borrow::Cow;
use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;

use serde::de::value::{
    BorrowedBytesDeserializer, BorrowedStrDeserializer, BytesDeserializer, EnumAccessDeserializer,
    MapAccessDeserializer, SeqAccessDeserializer, StringDeserializer,
};
use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, IntoDeserializer, MapAccess, SeqAccess, Unexpected,
    VariantAccess, Visitor,
};

// -----------------------------------------------------------------------------
// Tracker

/// State shared by every [`Reader`] of one read.
pub(crate) struct Tracker {
    empty_as_null: bool,
    text_scalars: bool,
    skipped: RefCell<Vec<String>>,
}

impl Tracker {
    /// `text_scalars` is set for formats whose scalars are all text.
    pub(crate) fn new(empty_as_null: bool, text_scalars: bool) -> Self {
        Self {
            empty_as_null,
            text_scalars,
            skipped: RefCell::new(Vec::new()),
        }
    }

    fn skip(&self, path: &str) {
        // `$text` and `$value` are XML content, not properties.
        if path.is_empty() || path.rsplit('.').next().is_some_and(|last| last.starts_with('$')) {
            return;
        }
        self.skipped.borrow_mut().push(path.to_owned());
    }

    /// Sorted paths of the skipped values.
    pub(crate) fn into_skipped(self) -> Vec<String> {
        let mut paths = self.skipped.into_inner();
        paths.sort();
        paths.dedup();
        paths
    }
}

fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

macro_rules! forward_deserialize {
    ($($method:ident($($arg:ident: $ty:ty),*);)*) => {$(
        fn $method<V: Visitor<'de>>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value, Self::Error> {
            let (inner, visitor) = self.split(visitor);
            inner.$method($($arg,)* visitor)
        }
    )*};
}

macro_rules! forward_visit {
    ($($method:ident($ty:ty);)*) => {$(
        fn $method<E: de::Error>(self, v: $ty) -> Result<V::Value, E> {
            self.visitor.$method(v)
        }
    )*};
}

// -----------------------------------------------------------------------------
// Reader

/// Deserializer of the value at `path`.
pub(crate) struct Reader<'t, D> {
    inner: D,
    tracker: &'t Tracker,
    path: String,
}

impl<'t, D> Reader<'t, D> {
    pub(crate) fn new(inner: D, tracker: &'t Tracker) -> Self {
        Self::at(inner, tracker, String::new())
    }

    fn at(inner: D, tracker: &'t Tracker, path: String) -> Self {
        Self { inner, tracker, path }
    }

    fn split<V>(self, visitor: V) -> (D, Wrap<'t, V>) {
        let visitor = Wrap {
            visitor,
            tracker: self.tracker,
            path: self.path,
        };
        (self.inner, visitor)
    }
}

impl<'de, D: Deserializer<'de>> Deserializer<'de> for Reader<'_, D> {
    type Error = D::Error;

    forward_deserialize! {
        deserialize_any();
        deserialize_bool();
        deserialize_i8();
        deserialize_i16();
        deserialize_i32();
        deserialize_i64();
        deserialize_i128();
        deserialize_u8();
        deserialize_u16();
        deserialize_u32();
        deserialize_u64();
        deserialize_u128();
        deserialize_f32();
        deserialize_f64();
        deserialize_char();
        deserialize_str();
        deserialize_string();
        deserialize_bytes();
        deserialize_byte_buf();
        deserialize_unit();
        deserialize_unit_struct(name: &'static str);
        deserialize_newtype_struct(name: &'static str);
        deserialize_seq();
        deserialize_tuple(len: usize);
        deserialize_tuple_struct(name: &'static str, len: usize);
        deserialize_map();
        deserialize_struct(name: &'static str, fields: &'static [&'static str]);
        deserialize_enum(name: &'static str, variants: &'static [&'static str]);
        deserialize_identifier();
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, D::Error> {
        if self.tracker.empty_as_null {
            // Null, empty text and present values all arrive through `deserialize_any`.
            let nullable = Nullable {
                visitor,
                tracker: self.tracker,
                path: self.path,
            };
            self.inner.deserialize_any(nullable)
        } else {
            let (inner, visitor) = self.split(visitor);
            inner.deserialize_option(visitor)
        }
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, D::Error> {
        self.tracker.skip(&self.path);
        self.inner.deserialize_ignored_any(visitor)
    }

    fn is_human_readable(&self) -> bool {
        self.inner.is_human_readable()
    }
}

// -----------------------------------------------------------------------------
// Wrap

/// Passes every value on, keeping nested maps and sequences tracked.
struct Wrap<'t, V> {
    visitor: V,
    tracker: &'t Tracker,
    path: String,
}

impl<'de, V: Visitor<'de>> Visitor<'de> for Wrap<'_, V> {
    type Value = V::Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.visitor.expecting(f)
    }

    forward_visit! {
        visit_bool(bool);
        visit_i8(i8);
        visit_i16(i16);
        visit_i32(i32);
        visit_i64(i64);
        visit_i128(i128);
        visit_u8(u8);
        visit_u16(u16);
        visit_u32(u32);
        visit_u64(u64);
        visit_u128(u128);
        visit_f32(f32);
        visit_f64(f64);
        visit_char(char);
        visit_str(&str);
        visit_borrowed_str(&'de str);
        visit_string(String);
        visit_bytes(&[u8]);
        visit_borrowed_bytes(&'de [u8]);
        visit_byte_buf(Vec<u8>);
    }

    fn visit_none<E: de::Error>(self) -> Result<V::Value, E> {
        self.visitor.visit_none()
    }

    fn visit_unit<E: de::Error>(self) -> Result<V::Value, E> {
        self.visitor.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<V::Value, D::Error> {
        self.visitor.visit_some(Reader::at(deserializer, self.tracker, self.path))
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(self, deserializer: D) -> Result<V::Value, D::Error> {
        self.visitor.visit_newtype_struct(Reader::at(deserializer, self.tracker, self.path))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<V::Value, A::Error> {
        self.visitor.visit_seq(Items::new(seq, self.tracker, self.path))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<V::Value, A::Error> {
        self.visitor.visit_map(Entries::new(map, self.tracker, self.path))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<V::Value, A::Error> {
        self.visitor.visit_enum(Variants {
            data,
            tracker: self.tracker,
            path: self.path,
        })
    }
}

// -----------------------------------------------------------------------------
// Nullable

/// Reads an optional value, taking empty text as `None`.
struct Nullable<'t, V> {
    visitor: V,
    tracker: &'t Tracker,
    path: String,
}

impl<V> Nullable<'_, V> {
    fn text<'de, E: de::Error>(self, text: Cow<'_, str>) -> Result<V::Value, E>
    where
        V: Visitor<'de>,
    {
        if text.is_empty() {
            return self.visitor.visit_none();
        }
        if self.tracker.text_scalars {
            return self.visitor.visit_some(Text::new(text));
        }
        match text {
            Cow::Borrowed(text) => self.visitor.visit_some(text.into_deserializer()),
            Cow::Owned(text) => self.visitor.visit_some(text.into_deserializer()),
        }
    }
}

macro_rules! visit_some_scalar {
    ($($method:ident($ty:ty);)*) => {$(
        fn $method<E: de::Error>(self, v: $ty) -> Result<V::Value, E> {
            self.visitor.visit_some(v.into_deserializer())
        }
    )*};
}

impl<'de, V: Visitor<'de>> Visitor<'de> for Nullable<'_, V> {
    type Value = V::Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.visitor.expecting(f)
    }

    visit_some_scalar! {
        visit_bool(bool);
        visit_i8(i8);
        visit_i16(i16);
        visit_i32(i32);
        visit_i64(i64);
        visit_i128(i128);
        visit_u8(u8);
        visit_u16(u16);
        visit_u32(u32);
        visit_u64(u64);
        visit_u128(u128);
        visit_f32(f32);
        visit_f64(f64);
        visit_char(char);
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<V::Value, E> {
        self.text(Cow::Borrowed(v))
    }

    fn visit_borrowed_str<E: de::Error>(self, v: &'de str) -> Result<V::Value, E> {
        if v.is_empty() || self.tracker.text_scalars {
            return self.text(Cow::Borrowed(v));
        }
        self.visitor.visit_some(BorrowedStrDeserializer::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<V::Value, E> {
        self.text(Cow::Owned(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<V::Value, E> {
        self.visitor.visit_some(BytesDeserializer::new(v))
    }

    fn visit_borrowed_bytes<E: de::Error>(self, v: &'de [u8]) -> Result<V::Value, E> {
        self.visitor.visit_some(BorrowedBytesDeserializer::new(v))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<V::Value, E> {
        self.visitor.visit_some(BytesDeserializer::new(&v))
    }

    fn visit_none<E: de::Error>(self) -> Result<V::Value, E> {
        self.visitor.visit_none()
    }

    fn visit_unit<E: de::Error>(self) -> Result<V::Value, E> {
        self.visitor.visit_none()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<V::Value, D::Error> {
        self.visitor.visit_some(Reader::at(deserializer, self.tracker, self.path))
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(self, deserializer: D) -> Result<V::Value, D::Error> {
        self.visitor.visit_some(Reader::at(deserializer, self.tracker, self.path))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<V::Value, A::Error> {
        let items = Items::new(seq, self.tracker, self.path);
        self.visitor.visit_some(SeqAccessDeserializer::new(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<V::Value, A::Error> {
        if !self.tracker.text_scalars {
            let entries = Entries::new(map, self.tracker, self.path);
            return self.visitor.visit_some(MapAccessDeserializer::new(entries));
        }
        // XML elements arrive as maps: `<a/>` is empty, `<a>text</a>` may
        // hold its text under `$text`.
        let Some(key) = map.next_key::<String>()? else {
            return self.visitor.visit_none();
        };
        if key == "$text" || key == "$value" {
            let text: String = map.next_value()?;
            return self.text(Cow::Owned(text));
        }
        let mut entries = Entries::new(map, self.tracker, self.path);
        entries.pending = Some(key);
        self.visitor.visit_some(MapAccessDeserializer::new(entries))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<V::Value, A::Error> {
        let variants = Variants {
            data,
            tracker: self.tracker,
            path: self.path,
        };
        self.visitor.visit_some(EnumAccessDeserializer::new(variants))
    }
}

// -----------------------------------------------------------------------------
// Text

/// Text read as whichever scalar the target asks for.
struct Text<'a, E> {
    text: Cow<'a, str>,
    marker: PhantomData<E>,
}

impl<'a, E> Text<'a, E> {
    fn new(text: Cow<'a, str>) -> Self {
        Self {
            text,
            marker: PhantomData,
        }
    }
}

macro_rules! parse_text {
    ($($method:ident => $visit:ident;)*) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, E> {
            match self.text.trim().parse() {
                Ok(v) => visitor.$visit(v),
                Err(_) => Err(E::invalid_value(Unexpected::Str(&self.text), &visitor)),
            }
        }
    )*};
}

impl<'de, E: de::Error> Deserializer<'de> for Text<'_, E> {
    type Error = E;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, E> {
        match self.text {
            Cow::Borrowed(text) => visitor.visit_str(text),
            Cow::Owned(text) => visitor.visit_string(text),
        }
    }

    parse_text! {
        deserialize_bool => visit_bool;
        deserialize_i8 => visit_i8;
        deserialize_i16 => visit_i16;
        deserialize_i32 => visit_i32;
        deserialize_i64 => visit_i64;
        deserialize_i128 => visit_i128;
        deserialize_u8 => visit_u8;
        deserialize_u16 => visit_u16;
        deserialize_u32 => visit_u32;
        deserialize_u64 => visit_u64;
        deserialize_u128 => visit_u128;
        deserialize_f32 => visit_f32;
        deserialize_f64 => visit_f64;
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, E> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value, E> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, E> {
        match self.text {
            Cow::Borrowed(text) => text.into_deserializer().deserialize_enum(name, variants, visitor),
            Cow::Owned(text) => text.into_deserializer().deserialize_enum(name, variants, visitor),
        }
    }

    serde::forward_to_deserialize_any! {
        char str string bytes byte_buf unit unit_struct seq tuple tuple_struct map struct identifier ignored_any
    }
}

// -----------------------------------------------------------------------------
// Sequences

struct Items<'t, A> {
    seq: A,
    tracker: &'t Tracker,
    path: String,
    index: usize,
}

impl<'t, A> Items<'t, A> {
    fn new(seq: A, tracker: &'t Tracker, path: String) -> Self {
        Self {
            seq,
            tracker,
            path,
            index: 0,
        }
    }
}

impl<'de, A: SeqAccess<'de>> SeqAccess<'de> for Items<'_, A> {
    type Error = A::Error;

    fn next_element_seed<S: DeserializeSeed<'de>>(&mut self, seed: S) -> Result<Option<S::Value>, A::Error> {
        let path = format!("{}[{}]", self.path, self.index);
        self.index += 1;
        self.seq.next_element_seed(Seeded {
            seed,
            tracker: self.tracker,
            path,
        })
    }

    fn size_hint(&self) -> Option<usize> {
        self.seq.size_hint()
    }
}

/// A seed deserialized at `path`.
struct Seeded<'t, S> {
    seed: S,
    tracker: &'t Tracker,
    path: String,
}

impl<'de, S: DeserializeSeed<'de>> DeserializeSeed<'de> for Seeded<'_, S> {
    type Value = S::Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<S::Value, D::Error> {
        self.seed.deserialize(Reader::at(deserializer, self.tracker, self.path))
    }
}

// -----------------------------------------------------------------------------
// Maps

struct Entries<'t, A> {
    map: A,
    tracker: &'t Tracker,
    path: String,
    /// The key of the value read next.
    key: Option<String>,
    /// A key taken from `map` before it was handed over.
    pending: Option<String>,
}

impl<'t, A> Entries<'t, A> {
    fn new(map: A, tracker: &'t Tracker, path: String) -> Self {
        Self {
            map,
            tracker,
            path,
            key: None,
            pending: None,
        }
    }
}

impl<'de, A: MapAccess<'de>> MapAccess<'de> for Entries<'_, A> {
    type Error = A::Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, A::Error> {
        self.key = None;
        if let Some(key) = self.pending.take() {
            let value = seed.deserialize(StringDeserializer::<A::Error>::new(key.clone()))?;
            self.key = Some(key);
            return Ok(Some(value));
        }
        self.map.next_key_seed(KeySeed { seed, key: &mut self.key })
    }

    fn next_value_seed<S: DeserializeSeed<'de>>(&mut self, seed: S) -> Result<S::Value, A::Error> {
        let path = match self.key.take() {
            Some(key) => child(&self.path, &key),
            None => self.path.clone(),
        };
        self.map.next_value_seed(Seeded {
            seed,
            tracker: self.tracker,
            path,
        })
    }

    fn size_hint(&self) -> Option<usize> {
        self.map.size_hint()
    }
}

/// Records the key it reads into `key`.
struct KeySeed<'k, S> {
    seed: S,
    key: &'k mut Option<String>,
}

impl<'de, S: DeserializeSeed<'de>> DeserializeSeed<'de> for KeySeed<'_, S> {
    type Value = S::Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<S::Value, D::Error> {
        self.seed.deserialize(KeyReader {
            inner: deserializer,
            key: self.key,
        })
    }
}

struct KeyReader<'k, D> {
    inner: D,
    key: &'k mut Option<String>,
}

impl<'k, D> KeyReader<'k, D> {
    fn split<V>(self, visitor: V) -> (D, KeyVisitor<'k, V>) {
        (self.inner, KeyVisitor { visitor, key: self.key })
    }
}

impl<'de, D: Deserializer<'de>> Deserializer<'de> for KeyReader<'_, D> {
    type Error = D::Error;

    forward_deserialize! {
        deserialize_any();
        deserialize_bool();
        deserialize_i8();
        deserialize_i16();
        deserialize_i32();
        deserialize_i64();
        deserialize_i128();
        deserialize_u8();
        deserialize_u16();
        deserialize_u32();
        deserialize_u64();
        deserialize_u128();
        deserialize_f32();
        deserialize_f64();
        deserialize_char();
        deserialize_str();
        deserialize_string();
        deserialize_bytes();
        deserialize_byte_buf();
        deserialize_option();
        deserialize_unit();
        deserialize_unit_struct(name: &'static str);
        deserialize_newtype_struct(name: &'static str);
        deserialize_seq();
        deserialize_tuple(len: usize);
        deserialize_tuple_struct(name: &'static str, len: usize);
        deserialize_map();
        deserialize_struct(name: &'static str, fields: &'static [&'static str]);
        deserialize_enum(name: &'static str, variants: &'static [&'static str]);
        deserialize_identifier();
        deserialize_ignored_any();
    }

    fn is_human_readable(&self) -> bool {
        self.inner.is_human_readable()
    }
}

struct KeyVisitor<'k, V> {
    visitor: V,
    key: &'k mut Option<String>,
}

macro_rules! record_visit {
    ($($method:ident($ty:ty);)*) => {$(
        fn $method<E: de::Error>(self, v: $ty) -> Result<V::Value, E> {
            *self.key = Some(v.to_string());
            self.visitor.$method(v)
        }
    )*};
}

impl<'de, V: Visitor<'de>> Visitor<'de> for KeyVisitor<'_, V> {
    type Value = V::Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.visitor.expecting(f)
    }

    record_visit! {
        visit_bool(bool);
        visit_i8(i8);
        visit_i16(i16);
        visit_i32(i32);
        visit_i64(i64);
        visit_i128(i128);
        visit_u8(u8);
        visit_u16(u16);
        visit_u32(u32);
        visit_u64(u64);
        visit_u128(u128);
        visit_f32(f32);
        visit_f64(f64);
        visit_char(char);
        visit_str(&str);
        visit_borrowed_str(&'de str);
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<V::Value, E> {
        *self.key = Some(v.clone());
        self.visitor.visit_string(v)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<V::Value, E> {
        *self.key = Some(String::from_utf8_lossy(v).into_owned());
        self.visitor.visit_bytes(v)
    }

    fn visit_borrowed_bytes<E: de::Error>(self, v: &'de [u8]) -> Result<V::Value, E> {
        *self.key = Some(String::from_utf8_lossy(v).into_owned());
        self.visitor.visit_borrowed_bytes(v)
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<V::Value, E> {
        *self.key = Some(String::from_utf8_lossy(&v).into_owned());
        self.visitor.visit_byte_buf(v)
    }

    fn visit_none<E: de::Error>(self) -> Result<V::Value, E> {
        self.visitor.visit_none()
    }

    fn visit_unit<E: de::Error>(self) -> Result<V::Value, E> {
        self.visitor.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<V::Value, D::Error> {
        self.visitor.visit_some(deserializer)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(self, deserializer: D) -> Result<V::Value, D::Error> {
        self.visitor.visit_newtype_struct(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<V::Value, A::Error> {
        self.visitor.visit_seq(seq)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<V::Value, A::Error> {
        self.visitor.visit_map(map)
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<V::Value, A::Error> {
        self.visitor.visit_enum(data)
    }
}

// -----------------------------------------------------------------------------
// Enums

struct Variants<'t, A> {
    data: A,
    tracker: &'t Tracker,
    path: String,
}

impl<'de, 't, A: EnumAccess<'de>> EnumAccess<'de> for Variants<'t, A> {
    type Error = A::Error;
    type Variant = Variant<'t, A::Variant>;

    fn variant_seed<S: DeserializeSeed<'de>>(self, seed: S) -> Result<(S::Value, Self::Variant), A::Error> {
        let mut name = None;
        let (value, variant) = self.data.variant_seed(KeySeed { seed, key: &mut name })?;
        let path = match name {
            Some(name) => child(&self.path, &name),
            None => self.path,
        };
        let variant = Variant {
            variant,
            tracker: self.tracker,
            path,
        };
        Ok((value, variant))
    }
}

struct Variant<'t, A> {
    variant: A,
    tracker: &'t Tracker,
    path: String,
}

impl<'de, A: VariantAccess<'de>> VariantAccess<'de> for Variant<'_, A> {
    type Error = A::Error;

    fn unit_variant(self) -> Result<(), A::Error> {
        self.variant.unit_variant()
    }

    fn newtype_variant_seed<S: DeserializeSeed<'de>>(self, seed: S) -> Result<S::Value, A::Error> {
        self.variant.newtype_variant_seed(Seeded {
            seed,
            tracker: self.tracker,
            path: self.path,
        })
    }

    fn tuple_variant<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value, A::Error> {
        let visitor = Wrap {
            visitor,
            tracker: self.tracker,
            path: self.path,
        };
        self.variant.tuple_variant(len, visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, A::Error> {
        let visitor = Wrap {
            visitor,
            tracker: self.tracker,
            path: self.path,
        };
        self.variant.struct_variant(fields, visitor)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::{Reader, Tracker};

    fn read<T: for<'de> Deserialize<'de>>(json: &str, empty_as_null: bool) -> (T, Vec<String>) {
        let tracker = Tracker::new(empty_as_null, false);
        let mut de = serde_json::Deserializer::from_str(json);
        let value = T::deserialize(Reader::new(&mut de, &tracker)).unwrap();
        (value, tracker.into_skipped())
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Pen {
        #[serde(alias = "colour")]
        color: String,
        #[serde(rename = "@id")]
        id: u32,
        tip: Option<Tip>,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Tip {
        Fine,
        Broad { width: f32 },
    }

    #[test]
    fn skipped_paths() {
        let json = r#"{"colour":"red","@id":1,"cap":true,"tip":{"Broad":{"width":2.0,"angle":30}}}"#;
        let (pen, skipped) = read::<Pen>(json, false);
        assert_eq!(pen.color, "red");
        assert_eq!(pen.id, 1);
        assert_eq!(pen.tip, Some(Tip::Broad { width: 2.0 }));
        assert_eq!(skipped, ["cap", "tip.Broad.angle"]);
    }

    #[test]
    fn maps_and_sequences_skip_nothing() {
        let (value, skipped) = read::<BTreeMap<String, Vec<u32>>>(r#"{"a":[1,2],"b":[]}"#, false);
        assert_eq!(value["a"], [1, 2]);
        assert!(skipped.is_empty());

        let (pens, skipped) = read::<Vec<Pen>>(r#"[{"color":"b","@id":2,"tip":"Fine","x":0}]"#, false);
        assert_eq!(pens[0].tip, Some(Tip::Fine));
        assert_eq!(skipped, ["[0].x"]);
    }

    #[test]
    fn empty_text_in_optional_positions() {
        let json = r#"{"color":"","@id":3,"tip":""}"#;
        let (pen, _) = read::<Pen>(json, true);
        assert_eq!(pen.color, "");
        assert_eq!(pen.tip, None);

        let (pen, skipped) = read::<Pen>(r#"{"color":"g","@id":4,"tip":{"Broad":{"width":1.5,"ink":1}}}"#, true);
        assert_eq!(pen.tip, Some(Tip::Broad { width: 1.5 }));
        assert_eq!(skipped, ["tip.Broad.ink"]);

        let (count, _) = read::<Option<u8>>("7", true);
        assert_eq!(count, Some(7));
    }

    #[test]
    fn text_scalars_parse_on_demand() {
        use serde::de::value::Error;

        let text: super::Text<'_, Error> = super::Text::new("42".into());
        assert_eq!(u16::deserialize(text).unwrap(), 42);

        let text: super::Text<'_, Error> = super::Text::new("Fine".into());
        assert_eq!(Tip::deserialize(text).unwrap(), Tip::Fine);

        let text: super::Text<'_, Error> = super::Text::new("x1".into());
        assert!(u8::deserialize(text).is_err());
    }
}
