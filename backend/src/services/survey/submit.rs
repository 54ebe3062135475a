use crate::error::SurveyError;
use crate::services::failure;
use crate::state::AppState;
use crate::survey::{links, responses};
use actix_web::{web, HttpResponse, Responder};
use common::model::response::{Rating, SubmitOutcome};
use common::requests::SubmitResponseRequest;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SubmitResponseRequest>,
) -> impl Responder {
    match submit_response(&state, payload.into_inner()).await {
        Ok(outcome) => HttpResponse::Ok().json(serde_json::json!({
            "outcome": outcome,
            "message": outcome.message(),
        })),
        Err(e) => failure("submit survey", e),
    }
}

async fn submit_response(
    state: &AppState,
    req: SubmitResponseRequest,
) -> Result<SubmitOutcome, SurveyError> {
    let rating = Rating::try_from(req.rating)?;
    let comment = req.comment.unwrap_or_default();
    let token = req.link_id;
    state
        .write(move |store| {
            links::resolve(store, &token)?;
            responses::submit(store, &token, rating, &comment)
        })
        .await
}
