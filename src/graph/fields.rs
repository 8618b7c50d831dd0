//! Field-level reading and dumping shared by every node and edge variant.
//!
//! Entities are built from an untyped JSON object. A `FieldReader` takes the
//! declared fields out of that object one by one, records every failure with its
//! location, remembers which fields were explicitly supplied, and keeps whatever
//! is left over as open-schema extras. A `Dumper` does the reverse.

use super::identifier::Identifier;
use serde_json::{Map, Number, Value};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// An untyped JSON object.
pub type JsonMap = Map<String, Value>;

/// One step of a field location: an object key or a list index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocItem {
    Key(String),
    Index(usize),
}

impl fmt::Display for LocItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocItem::Key(k) => write!(f, "{}", k),
            LocItem::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for LocItem {
    fn from(value: &str) -> Self {
        LocItem::Key(value.to_string())
    }
}

impl From<usize> for LocItem {
    fn from(value: usize) -> Self {
        LocItem::Index(value)
    }
}

/// Path from the entity root to the failing field, e.g. `references.0.year`.
pub type Loc = SmallVec<[LocItem; 4]>;

/// The category of a field-level error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// A required field was not supplied.
    Missing,
    /// The supplied value has the wrong JSON type.
    WrongType,
    /// A discriminant does not match the variant being built.
    Literal,
    /// A field that the variant never allows was supplied.
    Forbidden,
}

/// A single field-level failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {msg}", format_loc(.loc))]
pub struct FieldError {
    pub loc: Loc,
    pub msg: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub(crate) fn missing() -> Self {
        Self::new(FieldErrorKind::Missing, "Field required".to_string())
    }

    pub(crate) fn wrong_type(expected: &str) -> Self {
        Self::new(FieldErrorKind::WrongType, format!("Input should be a valid {}", expected))
    }

    pub(crate) fn literal(expected: &str) -> Self {
        Self::new(FieldErrorKind::Literal, format!("Input should be '{}'", expected))
    }

    pub(crate) fn forbidden(msg: &str) -> Self {
        Self::new(FieldErrorKind::Forbidden, msg.to_string())
    }

    fn new(kind: FieldErrorKind, msg: String) -> Self {
        Self { loc: Loc::new(), msg, kind }
    }

    /// Prefixes the location with the enclosing key or index.
    pub(crate) fn within(mut self, item: impl Into<LocItem>) -> Self {
        self.loc.insert(0, item.into());
        self
    }

    /// The location rendered as a dotted path.
    pub fn path(&self) -> String {
        format_loc(&self.loc)
    }
}

fn format_loc(loc: &Loc) -> String {
    if loc.is_empty() {
        return "(root)".to_string();
    }
    loc.iter().map(|item| item.to_string()).collect::<Vec<_>>().join(".")
}

/// Every field-level failure of one entity, in field-read order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} validation error(s) for {entity}: {}", .errors.len(), summarize(.errors))]
pub struct EntityError {
    /// Name of the variant that was being built, e.g. `Process`.
    pub entity: &'static str,
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

/// Controls how entities are dumped back to untyped JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// Omit declared fields that were not explicitly supplied at construction.
    pub exclude_unset: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self { exclude_unset: true }
    }
}

impl DumpOptions {
    /// Emits every declared field, absent optionals as `null`.
    pub fn full() -> Self {
        Self { exclude_unset: false }
    }
}

/// Which declared fields were supplied, plus any undeclared ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenFields {
    pub(crate) set: BTreeSet<&'static str>,
    pub extra: JsonMap,
}

impl OpenFields {
    /// Whether the declared field `key` was explicitly supplied.
    pub fn is_set(&self, key: &str) -> bool {
        self.set.contains(key)
    }
}

/// A number that remembers the JSON representation it was read from.
///
/// `1` and `1.0` carry the same value but dump back differently.
#[derive(Debug, Clone, PartialEq)]
pub struct Real(Number);

impl Real {
    /// Returns `None` for NaN and infinities, which JSON cannot carry.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Real)
    }

    pub fn value(&self) -> f64 {
        self.0.as_f64().unwrap_or(f64::NAN)
    }

    pub fn as_number(&self) -> &Number {
        &self.0
    }
}

impl From<i64> for Real {
    fn from(value: i64) -> Self {
        Real(Number::from(value))
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Conversions ---

/// Typed conversion out of an untyped JSON value. Error locations are relative
/// to the value being converted.
pub(crate) trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>>;
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(vec![FieldError::wrong_type("string")]),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(vec![FieldError::wrong_type("boolean")]),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>> {
        match value.as_i64() {
            Some(i) => Ok(i),
            None => Err(vec![FieldError::wrong_type("integer")]),
        }
    }
}

impl FromValue for Real {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>> {
        match value {
            Value::Number(n) => Ok(Real(n)),
            _ => Err(vec![FieldError::wrong_type("number")]),
        }
    }
}

impl FromValue for JsonMap {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>> {
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(vec![FieldError::wrong_type("dictionary")]),
        }
    }
}

impl FromValue for Identifier {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>> {
        match value {
            Value::String(s) => Ok(Identifier::Str(s)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Identifier::Int(i)),
                None => Err(vec![FieldError::wrong_type("integer or string")]),
            },
            _ => Err(vec![FieldError::wrong_type("integer or string")]),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>> {
        let Value::Array(items) = value else {
            return Err(vec![FieldError::wrong_type("list")]);
        };
        let mut out = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for (i, item) in items.into_iter().enumerate() {
            match T::from_value(item) {
                Ok(v) => out.push(v),
                Err(errs) => errors.extend(errs.into_iter().map(|e| e.within(i))),
            }
        }
        if errors.is_empty() {
            Ok(out)
        } else {
            Err(errors)
        }
    }
}

/// Typed conversion back into an untyped JSON value.
pub(crate) trait ToField {
    fn to_field(&self, opts: &DumpOptions) -> Value;
}

impl ToField for String {
    fn to_field(&self, _: &DumpOptions) -> Value {
        Value::String(self.clone())
    }
}

impl ToField for bool {
    fn to_field(&self, _: &DumpOptions) -> Value {
        Value::Bool(*self)
    }
}

impl ToField for i64 {
    fn to_field(&self, _: &DumpOptions) -> Value {
        Value::from(*self)
    }
}

impl ToField for Real {
    fn to_field(&self, _: &DumpOptions) -> Value {
        Value::Number(self.0.clone())
    }
}

impl ToField for JsonMap {
    fn to_field(&self, _: &DumpOptions) -> Value {
        Value::Object(self.clone())
    }
}

impl ToField for Identifier {
    fn to_field(&self, _: &DumpOptions) -> Value {
        match self {
            Identifier::Int(i) => Value::from(*i),
            Identifier::Str(s) => Value::String(s.clone()),
        }
    }
}

impl<T: ToField> ToField for Vec<T> {
    fn to_field(&self, opts: &DumpOptions) -> Value {
        Value::Array(self.iter().map(|v| v.to_field(opts)).collect())
    }
}

impl<T: ToField> ToField for Option<T> {
    fn to_field(&self, opts: &DumpOptions) -> Value {
        self.as_ref().map_or(Value::Null, |v| v.to_field(opts))
    }
}

// --- Reader ---

/// How a variant checks its discriminant field.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Tag {
    /// Built directly: the tag must equal this value, and defaults to it when absent.
    Fixed(&'static str),
    /// Built through the registry: any string tag that dispatched here is accepted.
    Dispatched,
}

pub(crate) struct FieldReader {
    entity: &'static str,
    fields: JsonMap,
    set: BTreeSet<&'static str>,
    errors: Vec<FieldError>,
}

impl FieldReader {
    pub(crate) fn new(entity: &'static str, fields: JsonMap) -> Self {
        Self { entity, fields, set: BTreeSet::new(), errors: Vec::new() }
    }

    fn take(&mut self, key: &'static str) -> Option<Value> {
        let value = self.fields.remove(key);
        if value.is_some() {
            self.set.insert(key);
        }
        value
    }

    fn convert<T: FromValue>(&mut self, key: &'static str, value: Value) -> Option<T> {
        match T::from_value(value) {
            Ok(v) => Some(v),
            Err(errors) => {
                self.errors.extend(errors.into_iter().map(|e| e.within(key)));
                None
            }
        }
    }

    /// A field that must be present and non-null.
    pub(crate) fn required<T: FromValue>(&mut self, key: &'static str) -> Option<T> {
        match self.take(key) {
            Some(value) => self.convert(key, value),
            None => {
                self.errors.push(FieldError::missing().within(key));
                None
            }
        }
    }

    /// A nullable field. The outer `None` means the value failed to convert.
    pub(crate) fn optional<T: FromValue>(&mut self, key: &'static str) -> Option<Option<T>> {
        match self.take(key) {
            None | Some(Value::Null) => Some(None),
            Some(value) => self.convert(key, value).map(Some),
        }
    }

    /// A field that may be absent but, when present, must not be null.
    pub(crate) fn non_null<T: FromValue>(&mut self, key: &'static str) -> Option<Option<T>> {
        match self.take(key) {
            None => Some(None),
            Some(value) => self.convert(key, value).map(Some),
        }
    }

    pub(crate) fn tag(&mut self, key: &'static str, tag: Tag) -> Option<String> {
        match tag {
            Tag::Dispatched => self.required(key),
            Tag::Fixed(expected) => match self.take(key) {
                None => Some(expected.to_string()),
                Some(Value::String(s)) if s == expected => Some(s),
                Some(_) => {
                    self.errors.push(FieldError::literal(expected).within(key));
                    None
                }
            },
        }
    }

    pub(crate) fn forbid(&mut self, key: &'static str, msg: &str) {
        if self.fields.contains_key(key) {
            self.errors.push(FieldError::forbidden(msg).within(key));
        }
    }

    /// Fails with every collected error, or hands the leftover fields to `build`.
    pub(crate) fn finish<T>(
        self,
        build: impl FnOnce(OpenFields) -> Option<T>,
    ) -> Result<T, EntityError> {
        let entity = self.entity;
        if !self.errors.is_empty() {
            return Err(EntityError { entity, errors: self.errors });
        }
        build(OpenFields { set: self.set, extra: self.fields })
            .ok_or_else(|| EntityError { entity, errors: Vec::new() })
    }
}

/// Unwraps the JSON object an entity is built from.
pub(crate) fn expect_object(entity: &'static str, value: Value) -> Result<JsonMap, EntityError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(EntityError { entity, errors: vec![FieldError::wrong_type("dictionary")] }),
    }
}

// --- Dumper ---

pub(crate) struct Dumper<'a> {
    out: JsonMap,
    open: &'a OpenFields,
    opts: &'a DumpOptions,
}

impl<'a> Dumper<'a> {
    pub(crate) fn new(open: &'a OpenFields, opts: &'a DumpOptions) -> Self {
        Self { out: JsonMap::new(), open, opts }
    }

    /// Discriminants are always written so that the dump reloads to the same variant.
    pub(crate) fn tag(&mut self, key: &'static str, value: &str) -> &mut Self {
        self.out.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    pub(crate) fn field<T: ToField>(&mut self, key: &'static str, value: &T) -> &mut Self {
        if !self.opts.exclude_unset || self.open.is_set(key) {
            self.out.insert(key.to_string(), value.to_field(self.opts));
        }
        self
    }

    pub(crate) fn finish(mut self) -> JsonMap {
        for (k, v) in &self.open.extra {
            self.out.insert(k.clone(), v.clone());
        }
        self.out
    }
}
