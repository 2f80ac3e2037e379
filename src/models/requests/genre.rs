//! Genre-related request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Genre;
use crate::validators::validate_genre_name;

/// Request payload for creating or replacing a genre
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenreCreationRequest {
    /// Genre name (required, at most 50 characters, first letter uppercase)
    #[validate(
        required(message = "You must fill the Name field"),
        length(
            max = 50,
            message = "The field Name must be a string with a maximum length of 50"
        ),
        custom(function = "validate_genre_name")
    )]
    #[schema(example = "Drama")]
    pub name: Option<String>,
}

impl GenreCreationRequest {
    /// Build the entity stored under `id`. Call after validation.
    pub fn into_genre(self, id: i32) -> Genre {
        Genre {
            id,
            name: self.name.unwrap_or_default(),
        }
    }
}
