//! Progressive reminder orchestration for multi-touch sales outreach.
//!
//! Leads that received an initial outbound message move through up to
//! seven follow-up stages. Each sweep picks the leads whose cadence window
//! has elapsed, writes a stage- and engagement-appropriate reminder through
//! a [`Brain`](brain_core::Brain), hands it to a [`DeliveryQueue`], and
//! advances the lead one stage.
//!
//! # Components
//!
//! - [`catalog`] - static strategy per stage
//! - [`engagement`] - engagement level from interaction flags
//! - [`adjuster`] - strategy plus engagement into a [`Directive`]
//! - [`request`] - lead, product and timing facts into a [`ContentRequest`]
//! - [`generator`] - generation, validation and fallback
//! - [`sweep`] - the paginated campaign/stage/lead loop
//! - [`schedule`] - daily schedule placeholders for running runs
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use outreach::{CampaignSweepDriver, LoggingQueue, SweepContext};
//! use tokio_util::sync::CancellationToken;
//!
//! let db = database::Database::connect("sqlite:outreach.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let ctx = SweepContext::new(db, Arc::new(brain), Arc::new(LoggingQueue));
//! let report = CampaignSweepDriver::new(ctx.clone())
//!     .run(&CancellationToken::new())
//!     .await?;
//! println!("advanced {} leads", report.advanced);
//! ctx.shutdown().await;
//! ```

pub mod adjuster;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod context;
pub mod engagement;
pub mod error;
pub mod generator;
pub mod queue;
pub mod request;
pub mod schedule;
pub mod selector;
pub mod sweep;

pub use adjuster::{Directive, Urgency};
pub use catalog::{strategy_for, Strategy};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::SweepConfig;
pub use context::SweepContext;
pub use engagement::{classify, EngagementLevel, Interaction};
pub use error::OutreachError;
pub use generator::{ContentSource, GeneratedReminder, ReminderGenerator};
pub use queue::{DeliveryItem, DeliveryQueue, DeliveryReceipt, LoggingQueue, NoOpQueue, OutboxQueue};
pub use request::{ContentRequest, ContentRequestBuilder};
pub use schedule::{ScheduleEntryCreator, ScheduleReport};
pub use selector::{RandomSelector, RotatingSelector, VariantSelector};
pub use sweep::{CampaignSweepDriver, SweepReport};
