//! Operator dashboard endpoints.
//!
//! - `GET /api/dashboard`: counters plus one row per issued link.
//! - `GET /api/dashboard/export`: the same rows as a CSV download.

mod export;
mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/dashboard";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("/export", get().to(export::process))
}
