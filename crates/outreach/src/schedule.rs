//! Daily schedule placeholders for running campaign runs.

use std::sync::Arc;

use chrono::Duration;
use database::{campaign_run, schedule, time::format_date, Database, RunStatus};
use serde::Serialize;

use crate::clock::Clock;
use crate::context::SweepContext;
use crate::error::OutreachError;

/// Counters for one schedule pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    pub runs_seen: u64,
    pub created: u64,
    /// Runs that already had today's entry.
    pub existing: u64,
    pub failures: u64,
}

/// Creates today's schedule entry for every running campaign run.
pub struct ScheduleEntryCreator {
    db: Database,
    clock: Arc<dyn Clock>,
    page_size: i64,
}

impl ScheduleEntryCreator {
    pub fn new(db: Database, clock: Arc<dyn Clock>, page_size: i64) -> Self {
        Self {
            db,
            clock,
            page_size: page_size.max(1),
        }
    }

    pub fn from_context(ctx: &SweepContext) -> Self {
        Self::new(ctx.db.clone(), ctx.clock.clone(), ctx.config.run_page_size)
    }

    /// Create-if-absent an entry scheduled for today that reads yesterday's
    /// data. Individual insert failures are logged and counted; only a
    /// failure to list runs is returned.
    pub async fn run(&self) -> Result<ScheduleReport, OutreachError> {
        let today = self.clock.now().date_naive();
        let scheduled_for = format_date(today);
        let data_fetch_date = format_date(today - Duration::days(1));

        let pool = self.db.pool();
        let mut report = ScheduleReport::default();
        let mut offset = 0i64;

        loop {
            let runs =
                campaign_run::list_by_status(pool, RunStatus::Running, self.page_size, offset).await?;
            if runs.is_empty() {
                break;
            }
            offset += runs.len() as i64;

            for run in runs {
                report.runs_seen += 1;
                match schedule::insert_if_absent(pool, &run.id, &scheduled_for, &data_fetch_date).await {
                    Ok(true) => report.created += 1,
                    Ok(false) => report.existing += 1,
                    Err(e) => {
                        tracing::warn!("Failed to create schedule entry for run {}: {}", run.id, e);
                        report.failures += 1;
                    }
                }
            }
        }

        tracing::info!(
            "Schedule entries for {}: {} created, {} existing, {} failed",
            scheduled_for,
            report.created,
            report.existing,
            report.failures
        );

        Ok(report)
    }
}
