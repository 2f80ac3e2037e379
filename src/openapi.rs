use utoipa::OpenApi;

use crate::models::{ErrorResponse, GenreCreationRequest, GenreResponse, HealthResponse};

/// OpenAPI documentation for the Movies API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies API",
        version = "1.0.0",
        description = "REST API for managing movie genres, with filtering, sorting and pagination on list endpoints.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Genres", description = "Genre management endpoints (CRUD operations)")
    ),
    paths(
        crate::handlers::get_genres,
        crate::handlers::get_genre,
        crate::handlers::create_genre,
        crate::handlers::update_genre,
        crate::handlers::delete_genre,
        crate::routes::health_check
    ),
    components(
        schemas(
            GenreCreationRequest,
            GenreResponse,
            ErrorResponse,
            HealthResponse
        )
    )
)]
pub struct ApiDoc;
