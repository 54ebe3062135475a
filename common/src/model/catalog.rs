use serde::{Deserialize, Serialize};

/// Columns an uploaded order spreadsheet must provide.
///
/// Each column has a canonical name and the header used by the
/// operator's own spreadsheet; either is accepted, compared trimmed and
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    OrderId,
    Status,
    Client,
    Service,
    Date,
    Provider,
}

impl OrderColumn {
    pub const ALL: [OrderColumn; 6] = [
        OrderColumn::OrderId,
        OrderColumn::Status,
        OrderColumn::Client,
        OrderColumn::Service,
        OrderColumn::Date,
        OrderColumn::Provider,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrderColumn::OrderId => "order_id",
            OrderColumn::Status => "status",
            OrderColumn::Client => "client",
            OrderColumn::Service => "service",
            OrderColumn::Date => "date",
            OrderColumn::Provider => "provider",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            OrderColumn::OrderId => &["os"],
            OrderColumn::Status => &["status serviço", "status servico"],
            OrderColumn::Client => &["cliente"],
            OrderColumn::Service => &["serviço", "servico"],
            OrderColumn::Date => &["data 1", "data"],
            OrderColumn::Provider => &["prestador"],
        }
    }

    /// Whether an already-normalized (trimmed, lowercased) header names this column.
    pub fn matches(self, header: &str) -> bool {
        header == self.name() || self.aliases().contains(&header)
    }
}

/// Outcome of a successful catalog upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub orders: usize,
    pub skipped_blank: usize,
    pub duplicates_dropped: usize,
}
