use crate::models::{DashboardData, HistoryData, MonthlyStats};
use crate::storage::{EntryStore, StorageResult};
use chrono::{Duration, Local, NaiveDate};

pub const RECENT_LIMIT: u32 = 7;
pub const HISTORY_MONTHS: i64 = 6;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn month_prefix(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn build_dashboard_at(store: &EntryStore, today: NaiveDate) -> StorageResult<DashboardData> {
    let month = month_prefix(today);
    let recent_entries = store.list_recent(RECENT_LIMIT)?;
    let month_counts = store.count_by_emotion_for_month_prefix(&month)?;

    Ok(DashboardData {
        today: date_key(today),
        recent_entries,
        month,
        month_counts,
    })
}

/// Month prefixes for the history aggregates, newest first.
///
/// Steps back in fixed 30-day strides rather than calendar months, so a
/// prefix can repeat (31-day months) or be skipped entirely (February).
pub fn trailing_month_prefixes(today: NaiveDate) -> Vec<String> {
    (0..HISTORY_MONTHS)
        .map(|i| month_prefix(today - Duration::days(30 * i)))
        .collect()
}

pub fn build_history_at(store: &EntryStore, today: NaiveDate) -> StorageResult<HistoryData> {
    let entries = store.list_all()?;

    let mut monthly_stats = Vec::new();
    for month in trailing_month_prefixes(today) {
        let stats = store.count_by_emotion_for_month_prefix(&month)?;
        if !stats.is_empty() {
            monthly_stats.push(MonthlyStats { month, stats });
        }
    }

    Ok(HistoryData {
        entries,
        monthly_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotions::Emotion;
    use crate::storage::tests::temp_store;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn prefixes_step_back_thirty_days() {
        assert_eq!(
            trailing_month_prefixes(date(2024, 6, 15)),
            ["2024-06", "2024-05", "2024-04", "2024-03", "2024-02", "2024-01"]
        );
    }

    #[test]
    fn prefixes_drift_around_short_and_long_months() {
        assert_eq!(
            trailing_month_prefixes(date(2024, 3, 31)),
            ["2024-03", "2024-03", "2024-01", "2024-01", "2023-12", "2023-11"]
        );
    }

    #[test]
    fn dashboard_limits_recent_and_counts_current_month() {
        let tmp = temp_store();
        let store = &tmp.store;
        for day in 1..=9 {
            store
                .upsert_entry(&format!("2024-03-{day:02}"), Emotion::Joy, None)
                .unwrap();
        }
        store.upsert_entry("2024-02-28", Emotion::Anger, None).unwrap();
        store.upsert_entry("2024-03-10", Emotion::Calm, None).unwrap();

        let dashboard = build_dashboard_at(store, date(2024, 3, 12)).unwrap();
        assert_eq!(dashboard.today, "2024-03-12");
        assert_eq!(dashboard.month, "2024-03");
        assert_eq!(dashboard.recent_entries.len(), 7);
        assert_eq!(dashboard.recent_entries[0].date, "2024-03-10");
        assert_eq!(dashboard.month_counts.get(&Emotion::Joy), Some(&9));
        assert_eq!(dashboard.month_counts.get(&Emotion::Calm), Some(&1));
        assert_eq!(dashboard.month_counts.get(&Emotion::Anger), None);
    }

    #[test]
    fn history_skips_empty_months() {
        let tmp = temp_store();
        let store = &tmp.store;
        store.upsert_entry("2024-06-02", Emotion::Joy, None).unwrap();
        store.upsert_entry("2024-06-03", Emotion::Sadness, None).unwrap();
        store.upsert_entry("2024-04-20", Emotion::Love, None).unwrap();
        store.upsert_entry("2023-01-01", Emotion::Calm, None).unwrap();

        let history = build_history_at(store, date(2024, 6, 15)).unwrap();
        assert_eq!(history.entries.len(), 4);
        assert_eq!(history.entries[0].date, "2024-06-03");

        let months: Vec<_> = history.monthly_stats.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, ["2024-06", "2024-04"]);
        assert_eq!(history.monthly_stats[0].stats.get(&Emotion::Joy), Some(&1));
        assert_eq!(history.monthly_stats[0].stats.get(&Emotion::Sadness), Some(&1));
    }

    #[test]
    fn history_on_empty_store() {
        let tmp = temp_store();
        let history = build_history_at(&tmp.store, date(2024, 6, 15)).unwrap();
        assert!(history.entries.is_empty());
        assert!(history.monthly_stats.is_empty());
    }
}
