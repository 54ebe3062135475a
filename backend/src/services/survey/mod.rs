//! Customer-facing survey endpoint.
//!
//! `POST /api/survey/submit` records a rating and comment for a token. The
//! token must resolve to an order first; a second submission for the same
//! token is acknowledged as already received and changes nothing.

mod submit;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/survey";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/submit", post().to(submit::process))
}
