//! Survey token lifecycle: unissued, pending, answered.
//!
//! A token moves from pending to answered when the response log gains an
//! entry for it; only an explicit reset can send a pending token back to
//! unissued. Answered tokens survive a pending-only reset.

use crate::error::SurveyError;
use crate::storage::SurveyStore;
use crate::survey::eligibility::EligibilityPolicy;
use common::model::link::{GeneratedLink, LinkRecord, ResetScope, ResetSummary};
use common::model::order::OrderSnapshot;
use log::info;
use std::collections::HashSet;
use uuid::Uuid;

/// Link a customer opens to answer the survey for `token`.
pub fn survey_url(public_url: &str, token: &str) -> String {
    format!("{}?link_id={}", public_url.trim_end_matches('/'), token)
}

/// Returns the token for `order_id`, minting and persisting one if the
/// order has none. The boolean is true when a new token was created.
pub fn generate(
    store: &dyn SurveyStore,
    order_id: &str,
    policy: EligibilityPolicy,
) -> Result<(LinkRecord, bool), SurveyError> {
    let order_id = order_id.trim();
    let orders = store.load_orders()?;
    let order = orders
        .iter()
        .find(|o| o.order_id == order_id)
        .ok_or_else(|| SurveyError::OrderNotFound(order_id.to_string()))?;
    if !policy.admits(order) {
        return Err(SurveyError::OrderNotEligible {
            order_id: order_id.to_string(),
            status: order.status.clone(),
        });
    }

    let mut links = store.load_links()?;
    if let Some(existing) = links.iter().find(|l| l.order_id == order_id) {
        return Ok((existing.clone(), false));
    }

    let taken: HashSet<&str> = links.iter().map(|l| l.token.as_str()).collect();
    let mut token = Uuid::new_v4().to_string();
    while taken.contains(token.as_str()) {
        token = Uuid::new_v4().to_string();
    }

    let record = LinkRecord {
        order_id: order_id.to_string(),
        token,
    };
    links.push(record.clone());
    store.save_links(&links)?;
    info!("Survey link created for order {}", order_id);
    Ok((record, true))
}

/// Generates links for several orders in request order.
///
/// Stops at the first order that fails; links generated before it remain.
pub fn generate_many(
    store: &dyn SurveyStore,
    order_ids: &[String],
    policy: EligibilityPolicy,
    public_url: &str,
) -> Result<Vec<GeneratedLink>, SurveyError> {
    let mut generated = Vec::with_capacity(order_ids.len());
    for order_id in order_ids {
        let (record, created) = generate(store, order_id, policy)?;
        generated.push(GeneratedLink {
            url: survey_url(public_url, &record.token),
            order_id: record.order_id,
            token: record.token,
            created,
        });
    }
    Ok(generated)
}

/// Looks up the order behind `token`, reading registry and catalog afresh.
pub fn resolve(store: &dyn SurveyStore, token: &str) -> Result<OrderSnapshot, SurveyError> {
    let token = token.trim();
    let links = store.load_links()?;
    let link = links
        .iter()
        .find(|l| l.token == token)
        .ok_or(SurveyError::LinkNotFound)?;

    let orders = store.load_orders()?;
    orders
        .iter()
        .find(|o| o.order_id == link.order_id)
        .map(|o| o.snapshot())
        .ok_or(SurveyError::LinkNotFound)
}

pub fn reset(store: &dyn SurveyStore, scope: ResetScope) -> Result<ResetSummary, SurveyError> {
    let links = store.load_links()?;
    let total = links.len();

    let summary = match scope {
        ResetScope::All => {
            store.clear_links()?;
            ResetSummary {
                removed: total,
                kept: 0,
            }
        }
        ResetScope::Pending => {
            let responses = store.load_responses()?;
            let answered: HashSet<&str> = responses.iter().map(|r| r.token.as_str()).collect();
            let kept: Vec<LinkRecord> = links
                .iter()
                .filter(|l| answered.contains(l.token.as_str()))
                .cloned()
                .collect();
            if kept.is_empty() {
                store.clear_links()?;
            } else if kept.len() != total {
                store.save_links(&kept)?;
            }
            ResetSummary {
                removed: total - kept.len(),
                kept: kept.len(),
            }
        }
    };

    info!(
        "Link registry reset ({:?}): {} removed, {} kept",
        scope, summary.removed, summary.kept
    );
    Ok(summary)
}
