use serde::{Deserialize, Serialize};

/// Category applied when an ingested item carries none.
pub const DEFAULT_CATEGORY: &str = "State";

/// One deduplicated topic as persisted in the `news` table.
///
/// `title` and `summary` are the originals from the first sighting, kept
/// verbatim for display. `topic_key` is internal dedup state and is not
/// serialized in API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub category: String,
    #[serde(skip_serializing)]
    pub topic_key: String,
    pub repetition_count: i64,
    pub score: i64,
    /// Milliseconds since epoch of the first sighting; never updated.
    pub created_at: i64,
}

/// Raw ingestion payload as posted by feed collectors. Every field is
/// optional at the wire level; validation decides what gets stored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNews {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
}

impl RawNews {
    /// Checks required fields and applies the category default.
    /// Returns `None` when the item should be skipped.
    pub fn validate(self) -> Option<NewNews> {
        match (self.title, self.summary) {
            (Some(title), Some(summary)) if !title.is_empty() && !summary.is_empty() => {
                Some(NewNews {
                    title,
                    summary,
                    category: self
                        .category
                        .filter(|c| !c.is_empty())
                        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                })
            }
            _ => None,
        }
    }
}

/// A validated item ready for the dedup store.
#[derive(Debug, Clone)]
pub struct NewNews {
    pub title: String,
    pub summary: String,
    pub category: String,
}

/// What the store did with an ingested item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Required fields missing, nothing written.
    Skipped,
    /// First sighting of the topic, new row inserted.
    Saved,
    /// Existing topic, repetition count and score updated.
    Updated,
}
