use crate::{Family, OperationKind, TransformationRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const RECENT_LIMIT: usize = 5;

/// History listing filters. All criteria are independently combinable and
/// conjunctive.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Exact operation kind.
    pub kind: Option<OperationKind>,
    /// Operation family.
    pub family: Option<Family>,
    /// Saved records only.
    pub saved_only: bool,
    /// Case-insensitive substring match against original OR transformed
    /// text.
    pub search: Option<String>,
}

impl HistoryFilter {
    pub fn matches(&self, record: &TransformationRecord) -> bool {
        if let Some(kind) = &self.kind {
            if record.transformation_type != *kind {
                return false;
            }
        }
        if let Some(family) = self.family {
            if record.transformation_type.family() != family {
                return false;
            }
        }
        if self.saved_only && !record.saved {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_original = record.original_text.to_lowercase().contains(&needle);
            let in_transformed = record.transformed_text.to_lowercase().contains(&needle);
            if !in_original && !in_transformed {
                return false;
            }
        }
        true
    }
}

/// One page of history results, newest-first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub records: Vec<TransformationRecord>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub pages: usize,
}

impl HistoryPage {
    pub fn page_count(total: usize, limit: usize) -> usize {
        total.div_ceil(limit.max(1))
    }
}

/// Count for one exact operation kind, used by stats breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindCount {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub count: usize,
}

/// Per-family record counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyCounts {
    pub style: usize,
    pub email: usize,
    pub insight: usize,
}

/// Aggregate view over a user's stored transformations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationStats {
    pub total: usize,
    pub saved: usize,
    pub by_family: FamilyCounts,
    /// Descending by count; ties break on the wire tag for a stable order.
    pub by_kind: Vec<KindCount>,
}

/// Record count for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: usize,
}

/// Dashboard summary for one user.
///
/// `total_transformations` reads the append-only per-user counter, not the
/// live record count, so deletions never lower it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_transformations: u64,
    pub saved_count: usize,
    pub recent: Vec<TransformationRecord>,
    pub type_distribution: Vec<KindCount>,
    /// Seven entries, oldest first, zero-count days included.
    pub daily_activity: Vec<DailyActivity>,
}
