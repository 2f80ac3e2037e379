use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::constants::{CODE_INVALID_JSON, CODE_INVALID_QUERY};
use crate::errors::ApiError;
use crate::handlers;
use crate::models::HealthResponse;
use crate::openapi::ApiDoc;
use crate::repositories::GenreStore;

/// Register the API routes for genres kept in `R`.
pub fn configure_routes<R: GenreStore>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(CODE_INVALID_JSON, err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(CODE_INVALID_QUERY, err.to_string()).into()
    }))
    .service(
        web::scope("/api")
            // Health check
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/v1/genres")
                    // List genres with filters, sorting and pagination / create a genre
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::get_genres::<R>))
                            .route(web::post().to(handlers::create_genre::<R>)),
                    )
                    // Read, replace or delete one genre
                    .service(
                        web::resource("/{id}")
                            .name(handlers::GET_GENRE_BY_ID_ROUTE)
                            .route(web::get().to(handlers::get_genre::<R>))
                            .route(web::put().to(handlers::update_genre::<R>))
                            .route(web::delete().to(handlers::delete_genre::<R>)),
                    ),
            ),
    );
}

/// Serve the OpenAPI document. Mounted only in development.
pub fn configure_docs(cfg: &mut web::ServiceConfig) {
    cfg.route("/api-docs/openapi.json", web::get().to(openapi_json));
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
