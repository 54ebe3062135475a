use crate::error::SurveyError;
use crate::storage::SurveyStore;
use common::model::link::LinkRecord;
use common::model::order::OrderRecord;
use std::collections::HashSet;
use std::str::FromStr;

/// Which order statuses may receive a survey link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EligibilityPolicy {
    /// Anything that is not cancelled.
    #[default]
    NotCancelled,
    /// Only orders marked as concluded.
    CompletedOnly,
}

impl EligibilityPolicy {
    pub fn admits(self, order: &OrderRecord) -> bool {
        match self {
            EligibilityPolicy::NotCancelled => !order.is_cancelled(),
            EligibilityPolicy::CompletedOnly => order.is_completed(),
        }
    }
}

impl FromStr for EligibilityPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "not-cancelled" => Ok(EligibilityPolicy::NotCancelled),
            "completed-only" => Ok(EligibilityPolicy::CompletedOnly),
            _ => Err(()),
        }
    }
}

/// Orders admitted by `policy` that have no registry entry yet, in catalog order.
pub fn eligible_orders(
    orders: &[OrderRecord],
    links: &[LinkRecord],
    policy: EligibilityPolicy,
) -> Vec<OrderRecord> {
    let linked: HashSet<&str> = links.iter().map(|l| l.order_id.as_str()).collect();
    orders
        .iter()
        .filter(|o| policy.admits(o) && !linked.contains(o.order_id.as_str()))
        .cloned()
        .collect()
}

pub fn load_eligible(
    store: &dyn SurveyStore,
    policy: EligibilityPolicy,
) -> Result<Vec<OrderRecord>, SurveyError> {
    let orders = store.load_orders()?;
    let links = store.load_links()?;
    Ok(eligible_orders(&orders, &links, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::fixtures::{link, order};

    fn ids(orders: &[OrderRecord]) -> Vec<&str> {
        orders.iter().map(|o| o.order_id.as_str()).collect()
    }

    #[test]
    fn cancelled_and_linked_orders_are_excluded() {
        let orders = vec![
            order("1", "Concluído"),
            order("2", " CANCELLED "),
            order("3", "Agendado"),
            order("4", "concluded"),
        ];
        let links = vec![link("4", "t4")];

        let eligible = eligible_orders(&orders, &links, EligibilityPolicy::NotCancelled);
        assert_eq!(ids(&eligible), vec!["1", "3"]);
    }

    #[test]
    fn completed_only_policy_requires_a_completion_marker() {
        let orders = vec![order("1", "Concluído"), order("3", "Agendado")];
        let eligible = eligible_orders(&orders, &[], EligibilityPolicy::CompletedOnly);
        assert_eq!(ids(&eligible), vec!["1"]);
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!("not_cancelled".parse::<EligibilityPolicy>(), Ok(EligibilityPolicy::NotCancelled));
        assert_eq!("Completed-Only".parse::<EligibilityPolicy>(), Ok(EligibilityPolicy::CompletedOnly));
        assert_eq!("everything".parse::<EligibilityPolicy>(), Err(()));
    }
}
