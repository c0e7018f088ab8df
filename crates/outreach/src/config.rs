//! Sweep configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::OutreachError;

const DEFAULT_LEAD_PAGE_SIZE: i64 = 100;
const DEFAULT_CAMPAIGN_PAGE_SIZE: i64 = 50;
const DEFAULT_RUN_PAGE_SIZE: i64 = 100;
const DEFAULT_CONCURRENCY: usize = 8;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ENQUEUE_TIMEOUT_SECS: u64 = 10;

/// Paging, concurrency and timeout settings for sweeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Due leads fetched per keyset page.
    pub lead_page_size: i64,

    /// Campaigns fetched per offset page.
    pub campaign_page_size: i64,

    /// Running campaign runs fetched per offset page.
    pub run_page_size: i64,

    /// Leads processed in parallel within one page.
    pub concurrency: usize,

    /// Upper bound on one generation call.
    pub generation_timeout: Duration,

    /// Upper bound on one enqueue call.
    pub enqueue_timeout: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            lead_page_size: DEFAULT_LEAD_PAGE_SIZE,
            campaign_page_size: DEFAULT_CAMPAIGN_PAGE_SIZE,
            run_page_size: DEFAULT_RUN_PAGE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
            enqueue_timeout: Duration::from_secs(DEFAULT_ENQUEUE_TIMEOUT_SECS),
        }
    }
}

fn positive<T>(name: &str, default: T) -> Result<T, OutreachError>
where
    T: FromStr + PartialOrd + Default,
{
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(OutreachError::Configuration(format!(
            "{} must be a positive integer, got {:?}",
            name, raw
        ))),
    }
}

impl SweepConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `OUTREACH_LEAD_PAGE_SIZE` - Due leads per page (default: 100)
    /// - `OUTREACH_CAMPAIGN_PAGE_SIZE` - Campaigns per page (default: 50)
    /// - `OUTREACH_RUN_PAGE_SIZE` - Campaign runs per page (default: 100)
    /// - `OUTREACH_CONCURRENCY` - Parallel leads per page (default: 8)
    /// - `OUTREACH_GENERATION_TIMEOUT_SECS` - Generation timeout (default: 30)
    /// - `OUTREACH_ENQUEUE_TIMEOUT_SECS` - Enqueue timeout (default: 10)
    ///
    /// Set but invalid values are rejected rather than ignored.
    pub fn from_env() -> Result<Self, OutreachError> {
        Ok(Self {
            lead_page_size: positive("OUTREACH_LEAD_PAGE_SIZE", DEFAULT_LEAD_PAGE_SIZE)?,
            campaign_page_size: positive("OUTREACH_CAMPAIGN_PAGE_SIZE", DEFAULT_CAMPAIGN_PAGE_SIZE)?,
            run_page_size: positive("OUTREACH_RUN_PAGE_SIZE", DEFAULT_RUN_PAGE_SIZE)?,
            concurrency: positive("OUTREACH_CONCURRENCY", DEFAULT_CONCURRENCY)?,
            generation_timeout: Duration::from_secs(positive(
                "OUTREACH_GENERATION_TIMEOUT_SECS",
                DEFAULT_GENERATION_TIMEOUT_SECS,
            )?),
            enqueue_timeout: Duration::from_secs(positive(
                "OUTREACH_ENQUEUE_TIMEOUT_SECS",
                DEFAULT_ENQUEUE_TIMEOUT_SECS,
            )?),
        })
    }

    /// Set the lead page size.
    pub fn with_lead_page_size(mut self, size: i64) -> Self {
        self.lead_page_size = size.max(1);
        self
    }

    /// Set the campaign page size.
    pub fn with_campaign_page_size(mut self, size: i64) -> Self {
        self.campaign_page_size = size.max(1);
        self
    }

    /// Set the run page size.
    pub fn with_run_page_size(mut self, size: i64) -> Self {
        self.run_page_size = size.max(1);
        self
    }

    /// Set the per-page concurrency.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the generation timeout.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Set the enqueue timeout.
    pub fn with_enqueue_timeout(mut self, timeout: Duration) -> Self {
        self.enqueue_timeout = timeout;
        self
    }
}
