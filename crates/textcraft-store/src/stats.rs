use chrono::{DateTime, Days, Utc};
use std::collections::HashMap;
use textcraft_core::{
    DailyActivity, Family, FamilyCounts, KindCount, OperationKind, TransformationRecord,
    TransformationStats,
};

/// Aggregate a user's records into the stats shape.
pub fn compute_stats(records: &[&TransformationRecord]) -> TransformationStats {
    let mut by_family = FamilyCounts::default();
    for record in records {
        match record.transformation_type.family() {
            Family::Style => by_family.style += 1,
            Family::Email => by_family.email += 1,
            Family::Insight => by_family.insight += 1,
        }
    }

    TransformationStats {
        total: records.len(),
        saved: records.iter().filter(|r| r.saved).count(),
        by_family,
        by_kind: type_distribution(records),
    }
}

/// Count records per exact kind, descending by count. Ties break on the
/// wire tag so the ordering is stable across runs.
pub fn type_distribution(records: &[&TransformationRecord]) -> Vec<KindCount> {
    let mut counts: HashMap<OperationKind, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.transformation_type.clone()).or_default() += 1;
    }

    let mut distribution: Vec<KindCount> = counts
        .into_iter()
        .map(|(kind, count)| KindCount { kind, count })
        .collect();
    distribution.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.kind.wire_tag().cmp(&b.kind.wire_tag()))
    });
    distribution
}

/// Bucket record creation times into the trailing 7 UTC calendar days
/// ending on `anchor`'s day. One entry per day, oldest first, zero-count
/// days included.
pub fn daily_activity(
    records: &[&TransformationRecord],
    anchor: DateTime<Utc>,
) -> Vec<DailyActivity> {
    let today = anchor.date_naive();
    let mut counts: HashMap<chrono::NaiveDate, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.created_at.date_naive()).or_default() += 1;
    }

    (0..7)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DailyActivity {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use textcraft_core::NewTransformation;
    use uuid::Uuid;

    fn record_with_kind(tag: &str) -> TransformationRecord {
        NewTransformation::new(
            Uuid::new_v4(),
            "in".into(),
            "out".into(),
            OperationKind::parse_wire_tag(tag),
        )
        .into_record(Utc::now())
    }

    fn record_created_at(day: DateTime<Utc>) -> TransformationRecord {
        NewTransformation::new(
            Uuid::new_v4(),
            "in".into(),
            "out".into(),
            OperationKind::parse_wire_tag("formal"),
        )
        .into_record(day)
    }

    #[test]
    fn stats_count_families_and_saved() {
        let mut records = vec![
            record_with_kind("formal"),
            record_with_kind("casual"),
            record_with_kind("email_followup"),
            record_with_kind("insight_sentiment"),
        ];
        records[0].saved = true;

        let refs: Vec<&TransformationRecord> = records.iter().collect();
        let stats = compute_stats(&refs);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.saved, 1);
        assert_eq!(stats.by_family.style, 2);
        assert_eq!(stats.by_family.email, 1);
        assert_eq!(stats.by_family.insight, 1);
    }

    #[test]
    fn type_distribution_sorts_descending_with_stable_ties() {
        let records = vec![
            record_with_kind("casual"),
            record_with_kind("casual"),
            record_with_kind("formal"),
            record_with_kind("emoji"),
        ];
        let refs: Vec<&TransformationRecord> = records.iter().collect();
        let distribution = type_distribution(&refs);

        assert_eq!(distribution[0].kind.wire_tag(), "casual");
        assert_eq!(distribution[0].count, 2);
        // emoji and formal both count 1; tag order decides
        assert_eq!(distribution[1].kind.wire_tag(), "emoji");
        assert_eq!(distribution[2].kind.wire_tag(), "formal");
    }

    #[test]
    fn daily_activity_fills_the_full_window() {
        let anchor = Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap();
        // records on window days 1, 3, 3 and 5 (day 7 = anchor day)
        let records = vec![
            record_created_at(anchor - chrono::Duration::days(6)),
            record_created_at(anchor - chrono::Duration::days(4)),
            record_created_at(anchor - chrono::Duration::days(4)),
            record_created_at(anchor - chrono::Duration::days(2)),
        ];
        let refs: Vec<&TransformationRecord> = records.iter().collect();
        let activity = daily_activity(&refs, anchor);

        assert_eq!(activity.len(), 7);
        let counts: Vec<usize> = activity.iter().map(|a| a.count).collect();
        assert_eq!(counts, vec![1, 0, 2, 0, 1, 0, 0]);
        assert_eq!(activity[0].date, (anchor - chrono::Duration::days(6)).date_naive());
        assert_eq!(activity[6].date, anchor.date_naive());
    }

    #[test]
    fn records_outside_the_window_are_ignored() {
        let anchor = Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap();
        let records = vec![
            record_created_at(anchor - chrono::Duration::days(10)),
            record_created_at(anchor),
        ];
        let refs: Vec<&TransformationRecord> = records.iter().collect();
        let activity = daily_activity(&refs, anchor);
        let total: usize = activity.iter().map(|a| a.count).sum();
        assert_eq!(total, 1);
    }
}
