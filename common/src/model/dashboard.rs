use crate::model::link::LinkState;
use serde::{Deserialize, Serialize};

/// Counters shown at the top of the administrator dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub links: usize,
    pub answered: usize,
    pub pending: usize,
    /// Percentage of links with a response, `0.0` when no link exists.
    pub response_rate: f64,
    /// Mean over answered links with a readable rating.
    pub mean_rating: Option<f64>,
}

/// One registry row joined with the catalog and the response log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRow {
    pub order_id: String,
    pub token: String,
    pub url: String,
    pub state: LinkState,
    pub client: Option<String>,
    pub service: Option<String>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub rows: Vec<DashboardRow>,
}
