use crate::error::SurveyError;
use crate::services::failure;
use crate::state::AppState;
use crate::survey::links;
use actix_web::{web, HttpResponse, Responder};
use common::model::link::GeneratedLink;
use common::requests::GenerateLinksRequest;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<GenerateLinksRequest>,
) -> impl Responder {
    match generate_links(&state, payload.into_inner()).await {
        Ok(generated) => HttpResponse::Ok().json(generated),
        Err(e) => failure("generate links", e),
    }
}

async fn generate_links(
    state: &AppState,
    req: GenerateLinksRequest,
) -> Result<Vec<GeneratedLink>, SurveyError> {
    let policy = state.config.eligibility;
    let public_url = state.config.public_url.clone();
    state
        .write(move |store| links::generate_many(store, &req.order_ids, policy, &public_url))
        .await
}
