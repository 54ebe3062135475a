use serde::{Deserialize, Serialize};

const CANCELLED_MARKERS: [&str; 4] = ["cancelled", "canceled", "cancelado", "cancelada"];
const COMPLETED_MARKERS: [&str; 6] = [
    "concluded",
    "completed",
    "concluido",
    "concluído",
    "concluida",
    "concluída",
];

/// One row of the uploaded service-order spreadsheet.
///
/// Every field is kept as text: the catalog is only ever replaced wholesale,
/// and the order id is compared as a string against the link registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub status: String,
    pub client: String,
    pub service: String,
    pub date: String,
    pub provider: String,
}

impl OrderRecord {
    /// Status trimmed and lowercased, the form every comparison uses.
    pub fn normalized_status(&self) -> String {
        self.status.trim().to_lowercase()
    }

    pub fn is_cancelled(&self) -> bool {
        CANCELLED_MARKERS.contains(&self.normalized_status().as_str())
    }

    pub fn is_completed(&self) -> bool {
        COMPLETED_MARKERS.contains(&self.normalized_status().as_str())
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            order_id: self.order_id.clone(),
            client: self.client.clone(),
            service: self.service.clone(),
            date: self.date.clone(),
            provider: self.provider.clone(),
        }
    }
}

/// What a customer sees about their order on the survey form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: String,
    pub client: String,
    pub service: String,
    pub date: String,
    pub provider: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: &str) -> OrderRecord {
        OrderRecord {
            order_id: "1".into(),
            status: status.into(),
            client: "Ana".into(),
            service: "Limpeza".into(),
            date: "2024-05-01".into(),
            provider: "Bia".into(),
        }
    }

    #[test]
    fn status_is_compared_trimmed_and_case_insensitive() {
        assert!(order("  Cancelled ").is_cancelled());
        assert!(order("CANCELADO").is_cancelled());
        assert!(order(" Concluído").is_completed());
        assert!(!order("Agendado").is_completed());
        assert!(!order("Agendado").is_cancelled());
    }
}
