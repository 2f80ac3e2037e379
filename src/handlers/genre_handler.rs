//! Genre handlers for the CRUD endpoints.
//!
//! GET responses go through the output cache; every successful write evicts
//! the genres tag before its response is returned.

use actix_web::http::header::LOCATION;
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info, warn};
use validator::Validate;

use crate::constants::{
    CODE_GENRE_NOT_FOUND, CODE_INTERNAL_ERROR, ERR_GENRE_NOT_FOUND, ERR_LOCATION_FAILED,
    GENRES_CACHE_TAG, TOTAL_RECORDS_COUNT_HEADER,
};
use crate::errors::ApiError;
use crate::models::{GenreCreationRequest, GenreResponse};
use crate::query::PaginationRequest;
use crate::repositories::GenreStore;
use crate::services::{CachedResponse, GenreService, OutputCache};
use crate::validators::validation_errors_to_api_error;

/// Route name used to build the `Location` of created genres.
pub const GET_GENRE_BY_ID_ROUTE: &str = "get_genre_by_id";

/// List genres with filtering, sorting and pagination
///
/// Any other query parameter whose name matches a genre field filters on it:
/// `name` by case-insensitive substring, `id` by exact value. Unknown fields are
/// ignored.
#[utoipa::path(
    get,
    path = "/api/v1/genres",
    tag = "Genres",
    params(
        ("pageIndex" = Option<i64>, Query, description = "Zero-based page index (default: 0)"),
        ("pageSize" = Option<i64>, Query, description = "Items per page (default: 10, max: 50)"),
        ("sortBy" = Option<String>, Query, description = "Sort expression `field.direction`, e.g. `name.desc`"),
        ("name" = Option<String>, Query, description = "Substring the genre name must contain, ignoring case"),
        ("id" = Option<i32>, Query, description = "Exact genre ID")
    ),
    responses(
        (status = 200, description = "Page of genres", body = [GenreResponse],
            headers(
                ("total-records-count" = u64, description = "Number of genres matching the filters")
            )
        ),
        (status = 400, description = "Invalid pagination value", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_genres<R: GenreStore>(
    genre_service: web::Data<GenreService<R>>,
    output_cache: web::Data<OutputCache>,
    query: web::Query<Vec<(String, String)>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let cache_key = req.uri().to_string();
    if let Some(cached) = output_cache.get(&cache_key) {
        return Ok(cached.to_http_response());
    }

    let ticket = output_cache.ticket(&[GENRES_CACHE_TAG]);
    let params = query.into_inner();
    let pagination = PaginationRequest::from_query(&params).map_err(|e| {
        warn!("Invalid pagination parameters: {}", e);
        e
    })?;

    let (genres, total_records) = genre_service.list(&params, &pagination).await?;
    debug!("Listing {} genres of {} matching", genres.len(), total_records);

    let response = CachedResponse::json(&genres)?
        .with_header(TOTAL_RECORDS_COUNT_HEADER, total_records.to_string());
    output_cache
        .insert(&cache_key, &ticket, response.clone())
        .await;

    Ok(response.to_http_response())
}

/// Get a specific genre by ID
#[utoipa::path(
    get,
    path = "/api/v1/genres/{id}",
    tag = "Genres",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre found", body = GenreResponse),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre<R: GenreStore>(
    path: web::Path<i32>,
    genre_service: web::Data<GenreService<R>>,
    output_cache: web::Data<OutputCache>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let cache_key = req.uri().to_string();
    if let Some(cached) = output_cache.get(&cache_key) {
        return Ok(cached.to_http_response());
    }

    let ticket = output_cache.ticket(&[GENRES_CACHE_TAG]);
    let genre_id = path.into_inner();
    let genre = genre_service.get(genre_id).await?.ok_or_else(|| {
        warn!("Genre not found with id: {}", genre_id);
        ApiError::not_found(CODE_GENRE_NOT_FOUND, ERR_GENRE_NOT_FOUND)
    })?;

    let response = CachedResponse::json(&genre)?;
    output_cache
        .insert(&cache_key, &ticket, response.clone())
        .await;

    Ok(response.to_http_response())
}

/// Create a new genre
///
/// Responds with the created genre and a `Location` header pointing at it.
#[utoipa::path(
    post,
    path = "/api/v1/genres",
    tag = "Genres",
    request_body = GenreCreationRequest,
    responses(
        (status = 201, description = "Genre created", body = GenreResponse,
            headers(
                ("Location" = String, description = "URL of the created genre")
            )
        ),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse)
    )
)]
pub async fn create_genre<R: GenreStore>(
    genre_service: web::Data<GenreService<R>>,
    output_cache: web::Data<OutputCache>,
    body: web::Json<GenreCreationRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(|e| {
        warn!("Validation failed for create genre: {}", e);
        validation_errors_to_api_error(e)
    })?;

    let genre = genre_service.create(body.into_inner()).await?;
    output_cache.evict_by_tag(GENRES_CACHE_TAG);

    let location = req
        .url_for(GET_GENRE_BY_ID_ROUTE, [genre.id.to_string()])
        .map_err(|e| {
            ApiError::internal(CODE_INTERNAL_ERROR, format!("{}: {}", ERR_LOCATION_FAILED, e))
        })?;

    info!("Genre {} created at {}", genre.id, location);
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, location.to_string()))
        .json(genre))
}

/// Replace an existing genre
#[utoipa::path(
    put,
    path = "/api/v1/genres/{id}",
    tag = "Genres",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    request_body = GenreCreationRequest,
    responses(
        (status = 204, description = "Genre updated"),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre<R: GenreStore>(
    path: web::Path<i32>,
    genre_service: web::Data<GenreService<R>>,
    output_cache: web::Data<OutputCache>,
    body: web::Json<GenreCreationRequest>,
) -> Result<HttpResponse, ApiError> {
    let genre_id = path.into_inner();

    body.validate().map_err(|e| {
        warn!("Validation failed for update genre {}: {}", genre_id, e);
        validation_errors_to_api_error(e)
    })?;

    genre_service.update(genre_id, body.into_inner()).await?;
    output_cache.evict_by_tag(GENRES_CACHE_TAG);

    Ok(HttpResponse::NoContent().finish())
}

/// Delete a genre
#[utoipa::path(
    delete,
    path = "/api/v1/genres/{id}",
    tag = "Genres",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre<R: GenreStore>(
    path: web::Path<i32>,
    genre_service: web::Data<GenreService<R>>,
    output_cache: web::Data<OutputCache>,
) -> Result<HttpResponse, ApiError> {
    let genre_id = path.into_inner();

    genre_service.delete(genre_id).await?;
    output_cache.evict_by_tag(GENRES_CACHE_TAG);

    Ok(HttpResponse::NoContent().finish())
}
