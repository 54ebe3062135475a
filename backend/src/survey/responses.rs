use crate::error::SurveyError;
use crate::storage::SurveyStore;
use common::model::response::{Rating, ResponseRecord, SubmitOutcome};
use log::{info, warn};

/// Appends a response for `token` unless one is already logged.
///
/// A second submission leaves the log untouched and reports
/// `AlreadyRecorded`. The registry is not consulted; callers gate on
/// `links::resolve` first.
pub fn submit(
    store: &dyn SurveyStore,
    token: &str,
    rating: Rating,
    comment: &str,
) -> Result<SubmitOutcome, SurveyError> {
    let token = token.trim();
    let mut responses = store.load_responses()?;
    if responses.iter().any(|r| r.token == token) {
        warn!("Duplicate survey submission ignored for token {}", token);
        return Ok(SubmitOutcome::AlreadyRecorded);
    }

    responses.push(ResponseRecord {
        token: token.to_string(),
        rating: Some(rating.value()),
        comment: comment.to_string(),
    });
    store.save_responses(&responses)?;
    info!("Survey response recorded (rating {})", rating);
    Ok(SubmitOutcome::Recorded)
}

pub fn is_answered(store: &dyn SurveyStore, token: &str) -> Result<bool, SurveyError> {
    let token = token.trim();
    Ok(store.load_responses()?.iter().any(|r| r.token == token))
}
