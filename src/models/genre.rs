use serde::{Deserialize, Serialize};

use crate::query::{FieldDef, FieldKind, FieldValue, Filterable};

/// Genre document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: i32,
    pub name: String,
}

impl Filterable for Genre {
    const ENTITY_NAME: &'static str = "Genre";

    const FIELDS: &'static [FieldDef<Self>] = &[
        FieldDef {
            name: "id",
            column: "_id",
            kind: FieldKind::Integer,
            value: |genre| FieldValue::Integer(i64::from(genre.id)),
        },
        FieldDef {
            name: "name",
            column: "name",
            kind: FieldKind::Text,
            value: |genre| FieldValue::Text(genre.name.clone()),
        },
    ];
}
