//! CORS policy for browser clients.
//!
//! Only configured origins are allowed. Any method and header is accepted,
//! and the record-count header is exposed so paginated tables can read it.

use actix_cors::Cors;
use log::{info, warn};

use crate::constants::TOTAL_RECORDS_COUNT_HEADER;

/// Build the CORS middleware for the given allowed origins.
///
/// Usage:
/// ```ignore
/// App::new().wrap(build_cors(&CONFIG.allowed_origins))
/// ```
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        warn!("No allowed origins configured; cross-origin requests will be rejected");
    }

    let cors = allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| {
            info!("CORS: allowing origin {}", origin);
            cors.allowed_origin(origin)
        });

    cors.allow_any_method()
        .allow_any_header()
        .block_on_origin_mismatch(true)
        .expose_headers([TOTAL_RECORDS_COUNT_HEADER])
}
