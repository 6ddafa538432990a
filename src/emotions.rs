use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the seven fixed emotion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Anger,
    Sadness,
    Calm,
    Excitement,
    Anxiety,
    Love,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Joy,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Calm,
        Emotion::Excitement,
        Emotion::Anxiety,
        Emotion::Love,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Anger => "anger",
            Emotion::Sadness => "sadness",
            Emotion::Calm => "calm",
            Emotion::Excitement => "excitement",
            Emotion::Anxiety => "anxiety",
            Emotion::Love => "love",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion type: {0}")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|emotion| emotion.code() == value)
            .ok_or_else(|| UnknownEmotion(value.to_string()))
    }
}

impl ToSql for Emotion {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for Emotion {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;
        code.parse().map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}

/// Display metadata for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionInfo {
    pub emotion: Emotion,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Immutable category table, built once at startup and shared with handlers.
#[derive(Debug, Clone)]
pub struct EmotionCatalog {
    entries: Vec<EmotionInfo>,
}

impl EmotionCatalog {
    pub fn new() -> Self {
        let entries = Emotion::ALL
            .into_iter()
            .map(|emotion| {
                let (name, color, icon) = match emotion {
                    Emotion::Joy => ("喜び", "#FFD700", "😊"),
                    Emotion::Anger => ("怒り", "#FF4444", "😠"),
                    Emotion::Sadness => ("悲しみ", "#4A90E2", "😢"),
                    Emotion::Calm => ("穏やか", "#90EE90", "😌"),
                    Emotion::Excitement => ("興奮", "#FF6B35", "🤩"),
                    Emotion::Anxiety => ("不安", "#9B59B6", "😰"),
                    Emotion::Love => ("愛情", "#FF1744", "😍"),
                };
                EmotionInfo {
                    emotion,
                    name,
                    color,
                    icon,
                }
            })
            .collect();

        Self { entries }
    }

    /// Categories in display order.
    pub fn iter(&self) -> impl Iterator<Item = &EmotionInfo> {
        self.entries.iter()
    }

    pub fn info(&self, emotion: Emotion) -> &EmotionInfo {
        // Every variant is inserted by `new`, in declaration order.
        &self.entries[emotion as usize]
    }

    /// Matches a submitted code exactly, returning `None` for anything
    /// outside the set.
    pub fn lookup(&self, code: &str) -> Option<&EmotionInfo> {
        code.parse::<Emotion>().ok().map(|emotion| self.info(emotion))
    }
}

impl Default for EmotionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_emotion() {
        let catalog = EmotionCatalog::new();
        assert_eq!(catalog.iter().count(), 7);
        for emotion in Emotion::ALL {
            assert_eq!(catalog.info(emotion).emotion, emotion);
        }
        assert_eq!(catalog.info(Emotion::Sadness).color, "#4A90E2");
        assert_eq!(catalog.info(Emotion::Love).icon, "😍");
    }

    #[test]
    fn lookup_rejects_unknown_codes() {
        let catalog = EmotionCatalog::new();
        assert_eq!(catalog.lookup("calm").map(|info| info.emotion), Some(Emotion::Calm));
        assert!(catalog.lookup("boredom").is_none());
        assert!(catalog.lookup("").is_none());
        assert!(catalog.lookup("Joy").is_none());
        assert!(catalog.lookup(" joy ").is_none());
        assert!(catalog.lookup("joy\n").is_none());
    }

    #[test]
    fn codes_round_trip_through_from_str() {
        for emotion in Emotion::ALL {
            assert_eq!(emotion.code().parse::<Emotion>(), Ok(emotion));
        }
        assert_eq!(
            "rage".parse::<Emotion>(),
            Err(UnknownEmotion("rage".to_string()))
        );
    }
}
