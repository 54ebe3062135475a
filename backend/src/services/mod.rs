//! HTTP surface of the survey server.
//!
//! One sub-module per API area, each exposing a `configure_routes` scope and
//! one file per endpoint with a `process` handler. Handlers only translate
//! between HTTP and the operations in `crate::survey`.

pub mod dashboard;
pub mod links;
pub mod orders;
pub mod survey;
pub mod view;

use crate::error::SurveyError;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};

/// Registers every API scope on an application.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(view::configure_routes())
        .service(links::configure_routes())
        .service(survey::configure_routes())
        .service(orders::configure_routes())
        .service(dashboard::configure_routes());
}

/// Logs a failed operation and turns it into its HTTP response.
pub(crate) fn failure(context: &str, err: SurveyError) -> HttpResponse {
    if err.status_code().is_server_error() {
        error!("{} failed: {}", context, err);
    } else {
        warn!("{} rejected: {}", context, err);
    }
    err.error_response()
}
