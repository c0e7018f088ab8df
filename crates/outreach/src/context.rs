//! Explicitly constructed sweep dependencies.

use std::sync::Arc;

use brain_core::Brain;
use database::Database;

use crate::clock::{Clock, SystemClock};
use crate::config::SweepConfig;
use crate::queue::DeliveryQueue;
use crate::selector::{RandomSelector, VariantSelector};

/// Handles shared by the sweep driver and the schedule creator.
///
/// Built once at process start and released with [`SweepContext::shutdown`].
#[derive(Clone)]
pub struct SweepContext {
    pub db: Database,
    pub brain: Arc<dyn Brain>,
    pub queue: Arc<dyn DeliveryQueue>,
    pub clock: Arc<dyn Clock>,
    pub selector: Arc<dyn VariantSelector>,
    pub config: SweepConfig,
}

impl SweepContext {
    /// Context with the wall clock, random variant selection and default
    /// configuration.
    pub fn new(db: Database, brain: Arc<dyn Brain>, queue: Arc<dyn DeliveryQueue>) -> Self {
        Self {
            db,
            brain,
            queue,
            clock: Arc::new(SystemClock),
            selector: Arc::new(RandomSelector),
            config: SweepConfig::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_selector(mut self, selector: Arc<dyn VariantSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_config(mut self, config: SweepConfig) -> Self {
        self.config = config;
        self
    }

    /// Close the database pool.
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}
