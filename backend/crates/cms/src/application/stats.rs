//! Dashboard, blog statistics and health

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::stats::{BlogStats, Dashboard};
use crate::domain::repository::StatsRepository;
use crate::error::CmsResult;

#[derive(Debug, Clone)]
pub struct HealthReport {
    pub database_ok: bool,
    /// Store error text; only shown in debug builds
    pub database_error: Option<String>,
    pub latency_ms: u128,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.database_ok
    }
}

pub struct StatsService<R>
where
    R: StatsRepository,
{
    repo: Arc<R>,
}

impl<R> StatsService<R>
where
    R: StatsRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn dashboard(&self) -> CmsResult<Dashboard> {
        self.repo.dashboard().await
    }

    pub async fn blog_stats(&self) -> CmsResult<BlogStats> {
        self.repo.blog_stats().await
    }

    /// Never fails; a broken store is reported, not raised
    pub async fn health(&self) -> HealthReport {
        let started = std::time::Instant::now();
        let result = self.repo.ping().await;
        let latency_ms = started.elapsed().as_millis();

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Health check failed");
        }

        HealthReport {
            database_ok: result.is_ok(),
            database_error: result.err().map(|e| e.to_string()),
            latency_ms,
            checked_at: Utc::now(),
        }
    }
}
