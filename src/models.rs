use crate::emotions::Emotion;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One journal entry; at most one exists per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionEntry {
    pub id: i64,
    pub date: String,
    pub emotion_type: Emotion,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

pub type EmotionCounts = BTreeMap<Emotion, u32>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyStats {
    pub month: String,
    pub stats: EmotionCounts,
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub today: String,
    pub recent_entries: Vec<EmotionEntry>,
    pub month: String,
    pub month_counts: EmotionCounts,
}

#[derive(Debug, Serialize)]
pub struct HistoryData {
    pub entries: Vec<EmotionEntry>,
    pub monthly_stats: Vec<MonthlyStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub emotion: Emotion,
    pub color: String,
}

pub type CalendarData = BTreeMap<String, CalendarCell>;

/// Form body posted by the record page. Fields default to empty so that a
/// missing field is treated like any other invalid submission.
#[derive(Debug, Default, Deserialize)]
pub struct RecordForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub emotion_type: String,
    #[serde(default)]
    pub note: Option<String>,
}
