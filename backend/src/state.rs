//! Shared application state handed to every request handler.
//!
//! Handlers never call the store on the async workers directly: each
//! operation is moved onto the blocking pool, and operations that write
//! are additionally serialized through one async mutex so two requests can
//! never interleave a read-modify-write of the same table.

use crate::config::Config;
use crate::error::SurveyError;
use crate::storage::SurveyStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A clonable container for the store and configuration.
///
/// Created once in `main.rs` and registered as `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SurveyStore>,
    pub config: Arc<Config>,
    /// Held for the whole duration of a mutating operation.
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn SurveyStore>, config: Config) -> Self {
        AppState {
            store,
            config: Arc::new(config),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Runs a read-only operation against the store on the blocking pool.
    pub async fn read<T, F>(&self, op: F) -> Result<T, SurveyError>
    where
        F: FnOnce(&dyn SurveyStore) -> Result<T, SurveyError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|join_err| SurveyError::Task(join_err.to_string()))?
    }

    /// Like `read`, but exclusive with every other write.
    ///
    /// The guard moves into the blocking task, so the lock is released when
    /// the operation finishes even if the calling future was dropped first.
    pub async fn write<T, F>(&self, op: F) -> Result<T, SurveyError>
    where
        F: FnOnce(&dyn SurveyStore) -> Result<T, SurveyError> + Send + 'static,
        T: Send + 'static,
    {
        let guard = self.write_lock.clone().lock_owned().await;
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            op(store.as_ref())
        })
        .await
        .map_err(|join_err| SurveyError::Task(join_err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use common::model::link::LinkRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[actix_web::test]
    async fn writes_are_visible_to_later_reads() {
        let state = AppState::new(Arc::new(MemoryStore::default()), Config::default());
        state
            .write(|store| {
                store.save_links(&[LinkRecord {
                    order_id: "1".into(),
                    token: "t".into(),
                }])?;
                Ok(())
            })
            .await
            .unwrap();

        let count = state.read(|store| Ok(store.load_links()?.len())).await.unwrap();
        assert_eq!(count, 1);
    }

    #[actix_web::test]
    async fn dropped_writer_keeps_the_lock_until_its_work_ends() {
        let state = AppState::new(Arc::new(MemoryStore::default()), Config::default());
        let inside = Arc::new(AtomicUsize::new(0));
        let overlaps = Arc::new(AtomicUsize::new(0));

        let (slow_inside, slow_overlaps) = (inside.clone(), overlaps.clone());
        let slow = state.write(move |_| {
            if slow_inside.fetch_add(1, Ordering::SeqCst) > 0 {
                slow_overlaps.fetch_add(1, Ordering::SeqCst);
            }
            std::thread::sleep(Duration::from_millis(300));
            slow_inside.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        });
        let timed_out = actix_web::rt::time::timeout(Duration::from_millis(20), slow).await;
        assert!(timed_out.is_err());

        let (next_inside, next_overlaps) = (inside.clone(), overlaps.clone());
        state
            .write(move |_| {
                if next_inside.fetch_add(1, Ordering::SeqCst) > 0 {
                    next_overlaps.fetch_add(1, Ordering::SeqCst);
                }
                next_inside.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    }
}
