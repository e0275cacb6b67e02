// ==================== CATALOG SYNC SCHEDULER ====================
// Background job that imports SWAPI films on every configured interval

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::config::SyncConfig;
use crate::services::{sync_service, SyncReport};
use crate::state::AppState;
use crate::utils::error::AppError;

/// Starts the catalog sync scheduler.
/// The first run happens one interval after startup; each run finishes before the next tick.
pub fn start_catalog_sync_scheduler(state: AppState, config: &SyncConfig) -> Option<JoinHandle<()>> {
    if !config.enabled {
        log::info!("⏸️  Catalog sync scheduler disabled");
        return None;
    }

    let period = Duration::from_secs(config.interval_secs);
    log::info!("📅 Starting catalog sync scheduler (every {}s)", period.as_secs());

    let handle = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            // Already logged; the next tick retries
            let _ = run_sync_cycle(&state).await;
        }
    });

    log::info!("✅ Catalog sync scheduler started successfully");
    Some(handle)
}

pub async fn run_sync_cycle(state: &AppState) -> Result<SyncReport, AppError> {
    log::info!("⏰ Scheduled catalog sync...");

    match sync_service::sync_movies(state.movies.as_ref(), state.catalog.as_ref()).await {
        Ok(report) => {
            log::info!(
                "✅ Scheduled sync completed: {} inserted, {} skipped",
                report.inserted,
                report.skipped
            );
            Ok(report)
        }
        Err(e) => {
            log::error!("❌ Scheduled sync failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingCatalog, TestContext};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_cycle_inserts_catalog() {
        let ctx = TestContext::new();

        let report = run_sync_cycle(&ctx.state).await.unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(ctx.movies.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_cycle_failure_reported() {
        let ctx = TestContext::with_catalog(Arc::new(FailingCatalog));
        assert!(run_sync_cycle(&ctx.state).await.is_err());
        assert!(ctx.movies.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_scheduler_not_spawned() {
        let ctx = TestContext::new();
        let handle = start_catalog_sync_scheduler(
            ctx.state.clone(),
            &SyncConfig {
                enabled: false,
                interval_secs: 60,
            },
        );
        assert!(handle.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_waits_one_interval() {
        let ctx = TestContext::new();
        let handle = start_catalog_sync_scheduler(
            ctx.state.clone(),
            &SyncConfig {
                enabled: true,
                interval_secs: 60,
            },
        )
        .unwrap();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(ctx.movies.snapshot().is_empty());

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(ctx.movies.snapshot().len(), 2);

        handle.abort();
    }
}
