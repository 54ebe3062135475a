use crate::error::SurveyError;
use crate::services::failure;
use crate::state::AppState;
use crate::survey::catalog;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::model::catalog::CatalogSummary;
use futures_util::StreamExt;

pub(crate) async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    match upload_orders(&state, payload).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => failure("upload orders", e),
    }
}

/// Reads the `file` part into memory, then validates and stores it.
///
/// Other parts are drained and ignored; a second `file` part is rejected. Nothing is written unless the whole
/// file parses and carries every required column.
async fn upload_orders(
    state: &AppState,
    mut payload: Multipart,
) -> Result<CatalogSummary, SurveyError> {
    let limit = state.config.max_upload_bytes;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| SurveyError::InvalidUpload(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() != Some("file") {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| SurveyError::InvalidUpload(e.to_string()))?;
            }
            continue;
        }

        if upload.is_some() {
            return Err(SurveyError::InvalidUpload(
                "only one file may be uploaded at a time".to_string(),
            ));
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        catalog::UploadFormat::from_filename(&filename)?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| SurveyError::InvalidUpload(e.to_string()))?;
            if bytes.len() + chunk.len() > limit {
                return Err(SurveyError::InvalidUpload(format!(
                    "file exceeds {} MB",
                    limit / (1024 * 1024)
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        upload = Some((filename, bytes));
    }

    let (filename, bytes) = upload.ok_or(SurveyError::EmptyUpload)?;
    if bytes.is_empty() {
        return Err(SurveyError::EmptyUpload);
    }
    let sheet_name = state.config.sheet_name.clone();
    state
        .write(move |store| catalog::upload_catalog(store, &filename, &bytes, &sheet_name))
        .await
}
