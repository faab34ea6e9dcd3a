//! The ledger façade: every operation the transport layer calls.

use chrono::Utc;
use pesalog_core::{Classifier, LedgerEntry};
use pesalog_ingest::{FieldAliases, RawRow};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{LedgerError, StoreError};
use crate::pipeline::{IngestOutcome, build_entries};
use crate::query::{EntryPage, ListRequest};
use crate::reports::{CategoryTotal, MonthTotal, month_series, rank_categories};
use crate::store::{
    AggregateSpec, DateRange, EntryFilter, EntryStore, EntryUpdate, GroupKey,
};

const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Ingestion, queries, and aggregates over one [`EntryStore`].
///
/// Stateless apart from its configuration: every call recomputes from
/// the store, and any call can be re-issued after a failure.
pub struct Ledger {
    store: Arc<dyn EntryStore>,
    aliases: FieldAliases,
    classifier: Classifier,
    store_timeout: Duration,
}

impl Ledger {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Ledger {
            store,
            aliases: FieldAliases::default(),
            classifier: Classifier::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_aliases(mut self, aliases: FieldAliases) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Bound a store round-trip by the configured timeout.
    async fn store_call<T>(
        &self,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout = ?self.store_timeout, "store call timed out");
                Err(StoreError::Timeout(self.store_timeout))
            }
        }
    }

    /// Ingest one batch of raw rows.
    ///
    /// Rows are processed independently; rejected rows are counted, not
    /// fatal. The accepted set is persisted in a single all-or-nothing
    /// batch insert.
    pub async fn ingest(&self, rows: &[RawRow]) -> Result<IngestOutcome, LedgerError> {
        let outcome = build_entries(rows, &self.aliases, &self.classifier, Utc::now());
        info!(
            total = rows.len(),
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected,
            "ingesting statement batch"
        );

        if !outcome.accepted.is_empty() {
            self.store_call(self.store.insert_batch(&outcome.accepted))
                .await
                .map_err(|source| LedgerError::BatchPersistFailed {
                    attempted: outcome.accepted.len(),
                    source,
                })?;
        }
        Ok(outcome)
    }

    /// Ad hoc classification, e.g. when previewing a manual correction.
    pub fn classify(&self, description: &str) -> String {
        self.classifier.classify(description)
    }

    /// Paginated, filtered listing, newest first.
    pub async fn list(&self, req: &ListRequest) -> Result<EntryPage, LedgerError> {
        let page = req.page.max(1);
        let skip = (page - 1).saturating_mul(req.page_size);
        let filter = EntryFilter {
            category: req.category.clone(),
            direction: req.direction,
            range: req.range,
        };

        let (entries, total) = self
            .store_call(self.store.find(&filter, skip, req.page_size))
            .await?;
        Ok(EntryPage {
            entries,
            total,
            page,
            page_size: req.page_size,
        })
    }

    /// Debit spend per category, highest total first.
    pub async fn spending_by_category(
        &self,
        range: Option<DateRange>,
    ) -> Result<Vec<CategoryTotal>, LedgerError> {
        let spec = AggregateSpec::new(
            GroupKey::Category,
            EntryFilter {
                direction: Some(pesalog_core::Direction::Debit),
                range,
                ..EntryFilter::default()
            },
        );
        let rows = self.store_call(self.store.aggregate(&spec)).await?;
        Ok(rank_categories(rows))
    }

    /// Debit spend per calendar month, chronological.
    pub async fn spending_by_month(&self) -> Result<Vec<MonthTotal>, LedgerError> {
        let spec = AggregateSpec::new(
            GroupKey::Month,
            EntryFilter {
                direction: Some(pesalog_core::Direction::Debit),
                ..EntryFilter::default()
            },
        );
        let rows = self.store_call(self.store.aggregate(&spec)).await?;
        Ok(month_series(rows))
    }

    /// Manual category correction, the one mutation outside ingestion.
    pub async fn update_category(
        &self,
        id: &str,
        category: &str,
    ) -> Result<LedgerEntry, LedgerError> {
        let update = EntryUpdate {
            category: Some(category.to_string()),
        };
        self.store_call(self.store.update_by_id(id, update))
            .await?
            .ok_or_else(|| LedgerError::EntryNotFound(id.to_string()))
    }

    /// Administrative removal, passed through to the store.
    pub async fn remove(&self, id: &str) -> Result<(), LedgerError> {
        let deleted = self.store_call(self.store.delete_by_id(id)).await?;
        if deleted {
            Ok(())
        } else {
            Err(LedgerError::EntryNotFound(id.to_string()))
        }
    }
}
