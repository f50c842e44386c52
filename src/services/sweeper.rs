use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::db::Repository;

/// Background retention sweep: on a fixed interval, deletes every topic
/// whose first sighting fell out of the retention window.
///
/// Runs independently of request handling. A sweep failure is logged and
/// the next tick proceeds normally.
pub struct Sweeper {
    handle: JoinHandle<()>,
}

impl Sweeper {
    pub fn start(repo: Arc<Repository>, interval: Duration, retention: Duration) -> Self {
        let retention_ms = retention.as_millis() as i64;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; skip it so the sweep
            // cadence starts one interval after boot.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let cutoff_ms = Utc::now().timestamp_millis() - retention_ms;
                match repo.sweep_expired(cutoff_ms).await {
                    Ok(0) => tracing::debug!("retention sweep found nothing to delete"),
                    Ok(deleted) => tracing::info!("retention sweep removed {} expired topics", deleted),
                    Err(e) => tracing::warn!("retention sweep failed: {}", e),
                }
            }
        });

        Self { handle }
    }

    pub fn shutdown(self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawNews;

    #[tokio::test]
    async fn sweeper_starts_and_stops_without_disturbing_fresh_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.db");
        let repo = Arc::new(Repository::new(path.to_str().unwrap()).await.unwrap());

        repo.ingest(RawNews {
            title: Some("Fresh Story".to_string()),
            summary: Some("s".to_string()),
            category: None,
        })
        .await
        .unwrap();

        let sweeper = Sweeper::start(
            repo.clone(),
            Duration::from_millis(10),
            Duration::from_secs(24 * 3600),
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
        sweeper.shutdown();

        assert_eq!(repo.top_trending(20).await.unwrap().len(), 1);
    }
}
