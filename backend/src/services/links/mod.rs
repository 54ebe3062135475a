//! Survey link endpoints.
//!
//! - `POST /api/links/generate`: mints (or returns the existing) token for
//!   each requested order id and answers with the survey URLs.
//! - `POST /api/links/reset`: drops pending links (`"pending"`) or the whole
//!   registry (`"all"`). Irreversible.
//! - `GET /api/links/{token}`: resolves a token to its order snapshot.

mod generate;
mod reset;
mod resolve;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/links";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/generate", post().to(generate::process))
        .route("/reset", post().to(reset::process))
        .route("/{token}", get().to(resolve::process))
}
