use crate::model::dashboard::Dashboard;
use crate::model::order::{OrderRecord, OrderSnapshot};
use serde::{Deserialize, Serialize};

/// What the rendering surface should show for a request.
///
/// A request carrying a `link_id` only ever yields `Survey` or
/// `InvalidLink`; the dashboard is reachable exclusively without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Survey {
        order: OrderSnapshot,
        already_answered: bool,
    },
    InvalidLink {
        message: String,
    },
    Dashboard {
        dashboard: Dashboard,
        eligible: Vec<OrderRecord>,
    },
}
