use crate::services::failure;
use crate::state::AppState;
use crate::survey::links;
use actix_web::{web, HttpResponse, Responder};
use common::requests::ResetLinksRequest;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<ResetLinksRequest>,
) -> impl Responder {
    let scope = payload.scope;
    match state.write(move |store| links::reset(store, scope)).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => failure("reset links", e),
    }
}
