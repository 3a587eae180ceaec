use crate::stats::{compute_stats, daily_activity, type_distribution};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use textcraft_core::{
    DashboardSummary, HistoryFilter, HistoryPage, NewTransformation, Result, TextCraftError,
    TransformationRecord, TransformationStats, TransformationStore, DEFAULT_PAGE_SIZE,
    RECENT_LIMIT,
};
use uuid::Uuid;

/// In-memory record store.
///
/// Records live in one map keyed by id; the per-user transformation
/// counters live beside them. The counter increment after a create is
/// sequential, not transactional — the counter is a usage metric, not a
/// derived count.
#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<Uuid, TransformationRecord>,
    counters: DashMap<Uuid, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The owner's append-only transformation counter.
    pub fn transformation_count(&self, owner: Uuid) -> u64 {
        self.counters.get(&owner).map(|c| *c).unwrap_or(0)
    }

    /// Snapshot of the owner's records, newest first.
    fn owned_records(&self, owner: Uuid) -> Vec<TransformationRecord> {
        let mut records: Vec<TransformationRecord> = self
            .records
            .iter()
            .filter(|entry| entry.user_id == owner)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records
    }
}

#[async_trait]
impl TransformationStore for MemoryStore {
    async fn create(&self, new: NewTransformation) -> Result<TransformationRecord> {
        let record = new.into_record(Utc::now());
        let owner = record.user_id;
        self.records.insert(record.id, record.clone());
        *self.counters.entry(owner).or_insert(0) += 1;
        Ok(record)
    }

    async fn get(&self, owner: Uuid, id: Uuid) -> Result<TransformationRecord> {
        self.records
            .get(&id)
            .filter(|record| record.user_id == owner)
            .map(|record| record.value().clone())
            .ok_or(TextCraftError::NotFound)
    }

    async fn list(
        &self,
        owner: Uuid,
        filter: &HistoryFilter,
        page: usize,
        limit: usize,
    ) -> Result<HistoryPage> {
        let page = page.max(1);
        let limit = if limit == 0 { DEFAULT_PAGE_SIZE } else { limit };

        let matching: Vec<TransformationRecord> = self
            .owned_records(owner)
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();

        let total = matching.len();
        let records = matching
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Ok(HistoryPage {
            records,
            total,
            page,
            limit,
            pages: HistoryPage::page_count(total, limit),
        })
    }

    async fn toggle_saved(&self, owner: Uuid, id: Uuid) -> Result<TransformationRecord> {
        let mut entry = self
            .records
            .get_mut(&id)
            .filter(|record| record.user_id == owner)
            .ok_or(TextCraftError::NotFound)?;

        entry.saved = !entry.saved;
        // keep last_modified monotonic even if the clock steps backwards
        entry.last_modified = Utc::now().max(entry.last_modified);
        Ok(entry.value().clone())
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<()> {
        self.records
            .remove_if(&id, |_, record| record.user_id == owner)
            .map(|_| ())
            .ok_or(TextCraftError::NotFound)
    }

    async fn stats(&self, owner: Uuid) -> Result<TransformationStats> {
        let records = self.owned_records(owner);
        let refs: Vec<&TransformationRecord> = records.iter().collect();
        Ok(compute_stats(&refs))
    }

    async fn dashboard_summary(
        &self,
        owner: Uuid,
        anchor: DateTime<Utc>,
    ) -> Result<DashboardSummary> {
        let records = self.owned_records(owner);
        let refs: Vec<&TransformationRecord> = records.iter().collect();

        Ok(DashboardSummary {
            total_transformations: self.transformation_count(owner),
            saved_count: records.iter().filter(|r| r.saved).count(),
            recent: records.iter().take(RECENT_LIMIT).cloned().collect(),
            type_distribution: type_distribution(&refs),
            daily_activity: daily_activity(&refs, anchor),
        })
    }
}
