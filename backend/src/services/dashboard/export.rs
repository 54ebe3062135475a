use crate::services::failure;
use crate::state::AppState;
use crate::survey::report;
use actix_web::{web, HttpResponse, Responder};

const EXPORT_FILENAME: &str = "survey_links.csv";

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let public_url = state.config.public_url.clone();
    let exported = state
        .read(move |store| {
            let dashboard = report::load_dashboard(store, &public_url)?;
            report::export_csv(&dashboard)
        })
        .await;

    match exported {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ))
            .body(body),
        Err(e) => failure("export dashboard", e),
    }
}
