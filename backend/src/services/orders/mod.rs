//! Order catalog endpoints.
//!
//! - `POST /api/orders/upload`: multipart upload with a `file` field holding
//!   a `.xlsx` workbook (read from the configured sheet) or a `.csv` file.
//!   A valid file replaces the whole catalog; an invalid one is rejected
//!   with the reason and the catalog stays as it was.
//! - `GET /api/orders/eligible`: orders that may still receive a link.

mod eligible;
mod upload;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/orders";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("/eligible", get().to(eligible::process))
}
