//! Compile-time field tables used to resolve filter and sort keys.
//!
//! Each entity that can be shaped by the query layer declares the fields a
//! client may filter or sort on, together with the storage column and a typed
//! accessor. Keys coming from the query string are resolved against this
//! table case-insensitively; anything that does not resolve is ignored.

use std::fmt;

/// Primitive kind of a field, which decides how filter values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String field, filtered by case-sensitive substring containment.
    Text,
    /// Non-string field, filtered by exact match on its string form.
    Integer,
}

/// Value of a field read through its accessor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

/// A field a client is allowed to filter or sort on.
pub struct FieldDef<E> {
    /// Name exposed in the query string.
    pub name: &'static str,
    /// Column (document key) in the backing store.
    pub column: &'static str,
    pub kind: FieldKind,
    /// Reads the field from an in-memory entity.
    #[cfg_attr(not(test), allow(dead_code))]
    pub value: fn(&E) -> FieldValue,
}

impl<E> FieldDef<E> {
    #[cfg(test)]
    pub fn read(&self, entity: &E) -> FieldValue {
        (self.value)(entity)
    }
}

/// Entity with a known, fixed set of filterable and sortable fields.
pub trait Filterable: Sized + 'static {
    /// Name used in diagnostics.
    const ENTITY_NAME: &'static str;

    const FIELDS: &'static [FieldDef<Self>];

    /// Resolve a query-string key to a field, ignoring ASCII case.
    fn resolve_field(key: &str) -> Option<&'static FieldDef<Self>> {
        Self::FIELDS
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(key.trim()))
    }
}
