use crate::error::SurveyError;
use crate::services::failure;
use crate::state::AppState;
use crate::survey::route::{self, Route};
use actix_web::{web, HttpResponse, Responder};
use common::model::view::View;
use common::requests::ViewQuery;

pub(crate) async fn process(state: web::Data<AppState>, query: web::Query<ViewQuery>) -> impl Responder {
    let route = Route::from_link_id(query.link_id.as_deref());
    match render_view(&state, route).await {
        Ok(view @ View::InvalidLink { .. }) => HttpResponse::NotFound().json(view),
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => failure("render view", e),
    }
}

async fn render_view(state: &AppState, route: Route) -> Result<View, SurveyError> {
    let policy = state.config.eligibility;
    let public_url = state.config.public_url.clone();
    state
        .read(move |store| route::render(store, &route, policy, &public_url))
        .await
}
