use crate::services::failure;
use crate::state::AppState;
use crate::survey::links;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(state: web::Data<AppState>, token: web::Path<String>) -> impl Responder {
    let token = token.into_inner();
    match state.read(move |store| links::resolve(store, &token)).await {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(e) => failure("resolve link", e),
    }
}
