use crate::error::StoreError;
use crate::storage::SurveyStore;
use common::model::link::LinkRecord;
use common::model::order::OrderRecord;
use common::model::response::ResponseRecord;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryStore {
    orders: Mutex<Vec<OrderRecord>>,
    links: Mutex<Vec<LinkRecord>>,
    responses: Mutex<Vec<ResponseRecord>>,
}

// A poisoned table still holds the last fully written vector.
fn lock<T>(table: &Mutex<T>) -> MutexGuard<'_, T> {
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SurveyStore for MemoryStore {
    fn load_orders(&self) -> Result<Vec<OrderRecord>, StoreError> {
        Ok(lock(&self.orders).clone())
    }

    fn save_orders(&self, orders: &[OrderRecord]) -> Result<(), StoreError> {
        *lock(&self.orders) = orders.to_vec();
        Ok(())
    }

    fn load_links(&self) -> Result<Vec<LinkRecord>, StoreError> {
        Ok(lock(&self.links).clone())
    }

    fn save_links(&self, links: &[LinkRecord]) -> Result<(), StoreError> {
        *lock(&self.links) = links.to_vec();
        Ok(())
    }

    fn load_responses(&self) -> Result<Vec<ResponseRecord>, StoreError> {
        Ok(lock(&self.responses).clone())
    }

    fn save_responses(&self, responses: &[ResponseRecord]) -> Result<(), StoreError> {
        *lock(&self.responses) = responses.to_vec();
        Ok(())
    }
}
