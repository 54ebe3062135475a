//! Rendering surface entry point.
//!
//! - `GET /api/view`: the operator dashboard together with the orders still
//!   eligible for a link.
//! - `GET /api/view?link_id=<token>`: the customer survey form for that
//!   token, or `404` with an `invalid_link` view. A request carrying a
//!   `link_id` never receives dashboard data.

mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/view";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(get::process))
}
