use crate::model::link::ResetScope;
use serde::{Deserialize, Serialize};

/// Request payload for the link generation endpoint.
/// Carries the order ids the operator selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateLinksRequest {
    pub order_ids: Vec<String>,
}

/// Request payload for the link reset endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetLinksRequest {
    pub scope: ResetScope,
}

/// Request payload sent by the customer form.
///
/// `rating` stays a plain integer here so an out-of-range value reaches the
/// server and is reported, instead of failing JSON extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseRequest {
    pub link_id: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Query string of the rendering surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewQuery {
    pub link_id: Option<String>,
}
