//! Genre-related response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Genre;

/// Genre data returned in API responses
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct GenreResponse {
    /// Genre's unique identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Genre name
    #[schema(example = "Drama")]
    pub name: String,
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}
