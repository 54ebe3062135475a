use crate::services::failure;
use crate::state::AppState;
use crate::survey::eligibility;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let policy = state.config.eligibility;
    match state
        .read(move |store| eligibility::load_eligible(store, policy))
        .await
    {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => failure("list eligible orders", e),
    }
}
