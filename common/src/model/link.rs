use serde::{Deserialize, Serialize};

/// Registry row binding an order to its survey token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub order_id: String,
    pub token: String,
}

/// Result of a generation request for one order.
///
/// `created` is false when the order already had a token and the existing
/// one was handed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLink {
    pub order_id: String,
    pub token: String,
    pub url: String,
    pub created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    Pending,
    Answered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetScope {
    /// Drop only links that have no response yet.
    Pending,
    /// Drop the whole registry.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSummary {
    pub removed: usize,
    pub kept: usize,
}
