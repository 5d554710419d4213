//! Live snapshot feed
//!
//! Keeps the authoritative record set in memory, applies confirmed storage
//! changes to it and broadcasts a full snapshot (records, summary, chart)
//! after each one. Applying a change and publishing its snapshot happen
//! under one lock, so versions go out strictly increasing.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info};

use rust_decimal::Decimal;
use spendwise_core::{Change, Database, DonutChart, ExpenseRecord, RecordSet, Result, Summary};

/// Snapshots buffered per subscriber before it starts lagging
const CHANNEL_CAPACITY: usize = 64;

/// Everything a client needs to re-render after a change
#[derive(Debug, Clone, Serialize)]
pub struct LiveSnapshot {
    pub version: u64,
    pub records: Vec<ExpenseRecord>,
    pub summary: Summary,
    pub chart: DonutChart,
}

impl LiveSnapshot {
    fn compute(version: u64, records: &RecordSet, budget_limit: Decimal) -> Self {
        let summary = Summary::compute(records.records(), budget_limit);
        let chart = DonutChart::from_totals(&summary.totals);
        Self {
            version,
            records: records.records().to_vec(),
            summary,
            chart,
        }
    }
}

struct FeedState {
    records: RecordSet,
    current: Arc<LiveSnapshot>,
}

pub struct LiveFeed {
    state: Mutex<FeedState>,
    tx: broadcast::Sender<Arc<LiveSnapshot>>,
    budget_limit: Decimal,
}

impl LiveFeed {
    pub fn new(records: Vec<ExpenseRecord>, budget_limit: Decimal) -> Self {
        let records = RecordSet::from_records(records);
        let current = Arc::new(LiveSnapshot::compute(0, &records, budget_limit));
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            state: Mutex::new(FeedState { records, current }),
            tx,
            budget_limit,
        }
    }

    /// Seed the feed from everything currently in storage
    pub fn load(db: &Database, budget_limit: Decimal) -> Result<Self> {
        let records = db.list_expenses()?;
        info!(records = records.len(), "Loaded live feed");
        Ok(Self::new(records, budget_limit))
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        // State is only written after the next snapshot has been computed, so
        // a poisoned lock still holds a matching set and snapshot
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Latest published snapshot
    pub fn current(&self) -> Arc<LiveSnapshot> {
        self.lock().current.clone()
    }

    /// Apply a change that storage has already confirmed
    ///
    /// Returns the new snapshot, or `None` when the change was a no-op.
    pub fn apply(&self, change: Change) -> Option<Arc<LiveSnapshot>> {
        let mut state = self.lock();
        self.apply_locked(&mut state, change)
    }

    /// Run a storage write and apply the change it reports under the feed lock
    ///
    /// Writes that go through here reach the record set in the order storage
    /// saw them. A failed write publishes nothing.
    pub fn commit<T, E, F>(&self, write: F) -> std::result::Result<T, E>
    where
        F: FnOnce() -> std::result::Result<(T, Option<Change>), E>,
    {
        let mut state = self.lock();
        let (value, change) = write()?;
        if let Some(change) = change {
            self.apply_locked(&mut state, change);
        }
        Ok(value)
    }

    fn apply_locked(&self, state: &mut FeedState, change: Change) -> Option<Arc<LiveSnapshot>> {
        let mut records = state.records.clone();
        if !records.apply(change) {
            debug!("Change already reflected in live feed");
            return None;
        }

        let version = state.current.version + 1;
        let snapshot = Arc::new(LiveSnapshot::compute(version, &records, self.budget_limit));

        state.records = records;
        state.current = snapshot.clone();

        // No subscribers is fine; the snapshot is still current
        let receivers = self.tx.send(snapshot.clone()).unwrap_or(0);
        debug!(version, receivers, "Published snapshot");

        Some(snapshot)
    }

    /// Current snapshot plus a receiver for every later one
    ///
    /// Taken under the state lock, so nothing can be published between the
    /// two and the receiver starts exactly after the returned snapshot.
    pub fn subscribe(&self) -> (Arc<LiveSnapshot>, broadcast::Receiver<Arc<LiveSnapshot>>) {
        let state = self.lock();
        (state.current.clone(), self.tx.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendwise_core::{Category, StoredCategory};
    use std::str::FromStr;

    fn record(id: i64, amount: &str) -> ExpenseRecord {
        ExpenseRecord {
            id,
            description: format!("expense {}", id),
            amount: Decimal::from_str(amount).unwrap(),
            category: StoredCategory::Known(Category::Food),
            timestamp: chrono::DateTime::from_timestamp_millis(id * 1000).unwrap(),
        }
    }

    fn limit() -> Decimal {
        Decimal::from(1000)
    }

    #[test]
    fn test_initial_snapshot() {
        let feed = LiveFeed::new(vec![record(1, "100"), record(2, "50")], limit());
        let snapshot = feed.current();

        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.records[0].id, 2);
        assert_eq!(snapshot.summary.totals.grand_total(), Decimal::from(150));
    }

    #[test]
    fn test_apply_bumps_version() {
        let feed = LiveFeed::new(vec![], limit());

        let first = feed.apply(Change::Added(record(1, "600"))).unwrap();
        assert_eq!(first.version, 1);
        assert!(!first.summary.is_over_budget());

        let second = feed.apply(Change::Added(record(2, "500"))).unwrap();
        assert_eq!(second.version, 2);
        assert!(second.summary.is_over_budget());
        assert_eq!(feed.current().version, 2);
    }

    #[test]
    fn test_noop_change_not_published() {
        let feed = LiveFeed::new(vec![record(1, "10")], limit());
        let (_, mut rx) = feed.subscribe();

        assert!(feed.apply(Change::Removed(99)).is_none());
        assert!(feed.apply(Change::Added(record(1, "10"))).is_none());
        assert_eq!(feed.current().version, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_subscriber_sees_changes_in_order() {
        let feed = LiveFeed::new(vec![], limit());
        let (initial, mut rx) = feed.subscribe();
        assert_eq!(initial.version, 0);
        assert_eq!(feed.subscriber_count(), 1);

        feed.apply(Change::Added(record(1, "100")));
        feed.apply(Change::Added(record(2, "200")));
        feed.apply(Change::Removed(1));

        let versions: Vec<u64> = vec![
            rx.recv().await.unwrap().version,
            rx.recv().await.unwrap().version,
            rx.recv().await.unwrap().version,
        ];
        assert_eq!(versions, vec![1, 2, 3]);
        assert_eq!(feed.current().summary.totals.grand_total(), Decimal::from(200));
    }

    #[test]
    fn test_huge_amounts_keep_feed_working() {
        let feed = LiveFeed::new(vec![record(1, "0")], limit());
        let max = Decimal::MAX.to_string();

        let first = feed.apply(Change::Added(record(2, &max))).unwrap();
        assert_eq!(first.version, 1);

        let second = feed.apply(Change::Added(record(3, &max))).unwrap();
        assert_eq!(second.version, 2);
        assert_eq!(second.summary.totals.grand_total(), Decimal::MAX);

        let third = feed.apply(Change::Added(record(4, "1"))).unwrap();
        assert_eq!(third.version, 3);
        assert_eq!(third.records.len(), 4);
        assert_eq!(feed.current().version, 3);
    }

    fn draft(description: &str) -> spendwise_core::ExpenseDraft {
        spendwise_core::NewExpense::new(
            description,
            Decimal::from(100),
            spendwise_core::CategoryChoice::Auto,
        )
        .resolve(&spendwise_core::RuleTable::default())
        .unwrap()
    }

    #[test]
    fn test_failed_commit_publishes_nothing() {
        let feed = LiveFeed::new(vec![], limit());
        let (_, mut rx) = feed.subscribe();

        let result: std::result::Result<(), &str> = feed.commit(|| Err("disk full"));
        assert!(result.is_err());
        assert_eq!(feed.current().version, 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_delete_racing_create_never_leaves_ghost_record() {
        let db = Database::in_memory().unwrap();
        let feed = LiveFeed::new(vec![], limit());
        let (id_tx, id_rx) = std::sync::mpsc::channel();
        let (db_ref, feed_ref) = (&db, &feed);

        std::thread::scope(|scope| {
            scope.spawn(move || {
                let (db, feed) = (db_ref, feed_ref);
                feed.commit(|| {
                    let record = db.insert_expense(&draft("Zomato dinner"))?;
                    // Let the delete run while the add is still pending
                    id_tx.send(record.id).unwrap();
                    std::thread::sleep(std::time::Duration::from_millis(100));
                    Ok::<_, spendwise_core::Error>((record.clone(), Some(Change::Added(record))))
                })
                .unwrap();
            });

            scope.spawn(move || {
                let (db, feed) = (db_ref, feed_ref);
                let id = id_rx.recv().unwrap();
                let deleted = feed
                    .commit(|| {
                        let deleted = db.delete_expense(id)?;
                        Ok::<_, spendwise_core::Error>((
                            deleted,
                            deleted.then_some(Change::Removed(id)),
                        ))
                    })
                    .unwrap();
                assert!(deleted);
            });
        });

        let snapshot = feed.current();
        assert_eq!(snapshot.version, 2);
        assert!(snapshot.records.is_empty());
        assert!(db.list_expenses().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_ahead() {
        let feed = LiveFeed::new(vec![], limit());
        let (_, mut rx) = feed.subscribe();

        for id in 1..=(CHANNEL_CAPACITY as i64 + 10) {
            feed.apply(Change::Added(record(id, "1")));
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(_))
        ));
        let next = rx.recv().await.unwrap();
        assert!(next.version > 1);
    }
}
