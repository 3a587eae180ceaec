use crate::{
    DashboardSummary, HistoryFilter, HistoryPage, NewTransformation, Result, TransformationRecord,
    TransformationStats,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persistence contract for transformation records.
///
/// Every read and mutation is scoped to an owner; a record that exists but
/// belongs to someone else is reported exactly like a missing one
/// ([`crate::TextCraftError::NotFound`]).
#[async_trait]
pub trait TransformationStore: Send + Sync {
    /// Persist a new record and increment the owner's running
    /// transformation counter. The two steps are sequential, not
    /// transactional; the counter is a non-authoritative usage metric.
    async fn create(&self, new: NewTransformation) -> Result<TransformationRecord>;

    async fn get(&self, owner: Uuid, id: Uuid) -> Result<TransformationRecord>;

    /// Filtered, paginated listing, newest-first. `page` is 1-indexed.
    async fn list(
        &self,
        owner: Uuid,
        filter: &HistoryFilter,
        page: usize,
        limit: usize,
    ) -> Result<HistoryPage>;

    /// Flip the saved flag and bump `last_modified`.
    async fn toggle_saved(&self, owner: Uuid, id: Uuid) -> Result<TransformationRecord>;

    /// Remove the record permanently. The owner's counter is unaffected.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<()>;

    async fn stats(&self, owner: Uuid) -> Result<TransformationStats>;

    /// Dashboard aggregation anchored at `anchor` (tests pin it; callers
    /// pass now).
    async fn dashboard_summary(
        &self,
        owner: Uuid,
        anchor: DateTime<Utc>,
    ) -> Result<DashboardSummary>;
}
