use crate::error::SurveyError;
use crate::storage::SurveyStore;
use crate::survey::links::survey_url;
use common::model::dashboard::{Dashboard, DashboardRow, DashboardStats};
use common::model::link::{LinkRecord, LinkState};
use common::model::order::OrderRecord;
use common::model::response::ResponseRecord;
use std::collections::HashMap;

const EXPORT_HEADERS: [&str; 8] = [
    "order_id", "token", "url", "state", "client", "service", "rating", "comment",
];

// First entry wins if a token was somehow logged twice.
fn responses_by_token(responses: &[ResponseRecord]) -> HashMap<&str, &ResponseRecord> {
    let mut by_token = HashMap::new();
    for r in responses {
        by_token.entry(r.token.as_str()).or_insert(r);
    }
    by_token
}

pub fn compute_stats(links: &[LinkRecord], responses: &[ResponseRecord]) -> DashboardStats {
    let by_token = responses_by_token(responses);
    let answered: Vec<&ResponseRecord> = links
        .iter()
        .filter_map(|l| by_token.get(l.token.as_str()).copied())
        .collect();

    let total = links.len();
    let ratings: Vec<f64> = answered
        .iter()
        .filter_map(|r| r.rating)
        .map(f64::from)
        .collect();

    DashboardStats {
        links: total,
        answered: answered.len(),
        pending: total - answered.len(),
        response_rate: if total == 0 {
            0.0
        } else {
            answered.len() as f64 * 100.0 / total as f64
        },
        mean_rating: if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        },
    }
}

pub fn build_dashboard(
    orders: &[OrderRecord],
    links: &[LinkRecord],
    responses: &[ResponseRecord],
    public_url: &str,
) -> Dashboard {
    let by_token = responses_by_token(responses);
    let by_order: HashMap<&str, &OrderRecord> =
        orders.iter().map(|o| (o.order_id.as_str(), o)).collect();

    let rows = links
        .iter()
        .map(|link| {
            let response = by_token.get(link.token.as_str());
            let order = by_order.get(link.order_id.as_str());
            DashboardRow {
                order_id: link.order_id.clone(),
                token: link.token.clone(),
                url: survey_url(public_url, &link.token),
                state: if response.is_some() {
                    LinkState::Answered
                } else {
                    LinkState::Pending
                },
                client: order.map(|o| o.client.clone()),
                service: order.map(|o| o.service.clone()),
                rating: response.and_then(|r| r.rating),
                comment: response.map(|r| r.comment.clone()),
            }
        })
        .collect();

    Dashboard {
        stats: compute_stats(links, responses),
        rows,
    }
}

pub fn load_dashboard(store: &dyn SurveyStore, public_url: &str) -> Result<Dashboard, SurveyError> {
    let orders = store.load_orders()?;
    let links = store.load_links()?;
    let responses = store.load_responses()?;
    Ok(build_dashboard(&orders, &links, &responses, public_url))
}

/// Serializes the dashboard table as CSV, header row included.
pub fn export_csv(dashboard: &Dashboard) -> Result<Vec<u8>, SurveyError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let csv_err = |e: csv::Error| SurveyError::Storage(e.into());

    writer.write_record(EXPORT_HEADERS).map_err(csv_err)?;
    for row in &dashboard.rows {
        let state = match row.state {
            LinkState::Answered => "answered",
            LinkState::Pending => "pending",
        };
        let rating = row.rating.map(|r| r.to_string()).unwrap_or_default();
        writer
            .write_record([
                row.order_id.as_str(),
                row.token.as_str(),
                row.url.as_str(),
                state,
                row.client.as_deref().unwrap_or(""),
                row.service.as_deref().unwrap_or(""),
                rating.as_str(),
                row.comment.as_deref().unwrap_or(""),
            ])
            .map_err(csv_err)?;
    }
    writer
        .into_inner()
        .map_err(|e| SurveyError::Storage(e.into_error().into()))
}
