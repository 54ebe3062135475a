use crate::services::failure;
use crate::state::AppState;
use crate::survey::report;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let public_url = state.config.public_url.clone();
    match state
        .read(move |store| report::load_dashboard(store, &public_url))
        .await
    {
        Ok(dashboard) => HttpResponse::Ok().json(dashboard),
        Err(e) => failure("load dashboard", e),
    }
}
