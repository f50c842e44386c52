use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row, Transaction};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{NewNews, NewsItem, RawNews, UpsertOutcome};
use crate::topic::{canonicalize, topic_key, trending_score};

use super::schema::SCHEMA;

/// Dedup store over a single SQLite connection.
///
/// All calls are serialized on the connection's worker thread, so the
/// lookup-branch-write inside `ingest` is indivisible per process. The
/// UNIQUE constraint on `topic_key` plus the merge fallback covers the
/// remaining multi-process race.
pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            // Fail fast instead of hanging on a locked database file.
            conn.busy_timeout(Duration::from_secs(5))?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Ingests a raw item: validates, canonicalizes, and either inserts a
    /// new topic row or merges into the existing one.
    pub async fn ingest(&self, raw: RawNews) -> Result<UpsertOutcome> {
        let Some(item) = raw.validate() else {
            return Ok(UpsertOutcome::Skipped);
        };

        let outcome = self
            .conn
            .call(move |conn| {
                let key = topic_key(&canonicalize(&item.title));
                let now_ms = Utc::now().timestamp_millis();

                let tx = conn.transaction()?;
                let outcome = match merge_existing(&tx, &key, now_ms)? {
                    Some(outcome) => outcome,
                    None => match insert_new(&tx, &item, &key, now_ms) {
                        Ok(()) => UpsertOutcome::Saved,
                        // A concurrent writer won the insert; merge instead.
                        Err(e) if is_unique_violation(&e) => {
                            match merge_existing(&tx, &key, now_ms)? {
                                Some(outcome) => outcome,
                                None => return Err(e.into()),
                            }
                        }
                        Err(e) => return Err(e.into()),
                    },
                };
                tx.commit()?;
                Ok(outcome)
            })
            .await?;
        Ok(outcome)
    }

    /// Top stories across all categories, score descending.
    pub async fn top_trending(&self, limit: u32) -> Result<Vec<NewsItem>> {
        let items = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, title, summary, category, topic_key, repetition_count, score, created_at
                     FROM news ORDER BY score DESC LIMIT ?1",
                )?;
                let items = stmt
                    .query_map(params![limit], |row| Ok(news_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(items)
            })
            .await?;
        Ok(items)
    }

    /// Top stories within one category (exact match), score descending.
    pub async fn top_by_category(&self, category: &str, limit: u32) -> Result<Vec<NewsItem>> {
        let category = category.to_string();
        let items = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, title, summary, category, topic_key, repetition_count, score, created_at
                     FROM news WHERE category = ?1 ORDER BY score DESC LIMIT ?2",
                )?;
                let items = stmt
                    .query_map(params![category, limit], |row| Ok(news_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(items)
            })
            .await?;
        Ok(items)
    }

    /// Deletes every topic first sighted before `cutoff_ms`, regardless of
    /// score or repetition count. Returns the number of rows removed.
    pub async fn sweep_expired(&self, cutoff_ms: i64) -> Result<usize> {
        let deleted = self
            .conn
            .call(move |conn| {
                let deleted =
                    conn.execute("DELETE FROM news WHERE created_at < ?1", params![cutoff_ms])?;
                Ok(deleted)
            })
            .await?;
        Ok(deleted)
    }

    #[cfg(test)]
    async fn set_created_at(&self, key: &str, created_at_ms: i64) -> Result<()> {
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE news SET created_at = ?1 WHERE topic_key = ?2",
                    params![created_at_ms, key],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

fn merge_existing(
    tx: &Transaction,
    key: &str,
    now_ms: i64,
) -> rusqlite::Result<Option<UpsertOutcome>> {
    let existing = tx
        .query_row(
            "SELECT repetition_count, category, created_at FROM news WHERE topic_key = ?1",
            params![key],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )
        .optional()?;

    let Some((count, category, created_at)) = existing else {
        return Ok(None);
    };

    // The category is fixed at first sighting; the merge recomputes the
    // score against the stored one, not whatever the new request carried.
    let new_count = count + 1;
    let new_score = trending_score(new_count, &category, created_at, now_ms);
    tx.execute(
        "UPDATE news SET repetition_count = ?1, score = ?2 WHERE topic_key = ?3",
        params![new_count, new_score, key],
    )?;
    Ok(Some(UpsertOutcome::Updated))
}

fn insert_new(tx: &Transaction, item: &NewNews, key: &str, now_ms: i64) -> rusqlite::Result<()> {
    let score = trending_score(1, &item.category, now_ms, now_ms);
    tx.execute(
        "INSERT INTO news (title, summary, category, topic_key, repetition_count, score, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![item.title, item.summary, item.category, key, 1i64, score, now_ms],
    )?;
    Ok(())
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn news_from_row(row: &Row) -> NewsItem {
    NewsItem {
        id: row.get(0).unwrap(),
        title: row.get(1).unwrap(),
        summary: row.get(2).unwrap(),
        category: row.get(3).unwrap(),
        topic_key: row.get(4).unwrap(),
        repetition_count: row.get(5).unwrap(),
        score: row.get(6).unwrap(),
        created_at: row.get(7).unwrap(),
    }
}
