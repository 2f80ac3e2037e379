//! Error message constants used throughout the application.

// Genre errors
pub const ERR_GENRE_NOT_FOUND: &str = "Genre not found";
pub const ERR_ID_ALLOCATION_FAILED: &str = "Failed to allocate a genre identifier";
pub const ERR_LOCATION_FAILED: &str = "Failed to build the location of the created genre";

// Validation errors
pub const ERR_NAME_REQUIRED: &str = "You must fill the Name field";
pub const ERR_NAME_TOO_LONG: &str = "The field Name must be a string with a maximum length of 50";
pub const ERR_FIRST_LETTER_UPPERCASE: &str = "The first letter must be uppercase";
pub const ERR_VALIDATION_FAILED: &str = "Validation failed";
