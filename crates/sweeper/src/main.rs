use std::env;
use std::sync::Arc;

use chat_brain::{Brain, ChatBrain};
use clap::{Parser, Subcommand, ValueEnum};
use database::Database;
use outreach::{
    CampaignSweepDriver, DeliveryQueue, LoggingQueue, OutboxQueue, ScheduleEntryCreator,
    SweepConfig, SweepContext, SystemClock,
};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATABASE_URL: &str = "sqlite:outreach.db?mode=rwc";

#[derive(Debug, Parser)]
#[command(name = "sweeper")]
#[command(about = "Create daily schedule entries and send due sales reminders")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// SQLite URL. Falls back to DATABASE_URL env.
    #[arg(long)]
    database_url: Option<String>,

    /// Where generated reminders go
    #[arg(long, value_enum, default_value_t = QueueKind::Outbox)]
    queue: QueueKind,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Due leads per page (overrides OUTREACH_LEAD_PAGE_SIZE)
    #[arg(long)]
    page_size: Option<i64>,

    /// Leads processed in parallel (overrides OUTREACH_CONCURRENCY)
    #[arg(long)]
    concurrency: Option<usize>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Create today's schedule entry for every running campaign run
    Schedule,
    /// Run one reminder sweep
    Sweep,
    /// Schedule, then sweep
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum QueueKind {
    /// Append to the database outbox
    Outbox,
    /// Log reminders without queueing them
    Log,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Cancel the returned token on Ctrl+C so a sweep stops between pages.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, stopping after the current page");
            token_clone.cancel();
        }
    });

    token
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.log_json);

    let url = args
        .database_url
        .clone()
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
    let db = Database::connect(&url).await?;
    db.migrate().await?;

    let mut config = SweepConfig::from_env()?;
    if let Some(size) = args.page_size {
        config = config.with_lead_page_size(size);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }

    if matches!(args.command, Command::Schedule | Command::All) {
        let creator =
            ScheduleEntryCreator::new(db.clone(), Arc::new(SystemClock), config.run_page_size);
        let report = creator.run().await?;
        println!("{}", serde_json::to_string(&report)?);
    }

    if matches!(args.command, Command::Sweep | Command::All) {
        let brain = ChatBrain::from_env()?;
        info!("Sweeping with brain: {}", brain.name());

        let queue: Arc<dyn DeliveryQueue> = match args.queue {
            QueueKind::Outbox => Arc::new(OutboxQueue::new(db.clone())),
            QueueKind::Log => Arc::new(LoggingQueue),
        };
        let ctx = SweepContext::new(db.clone(), Arc::new(brain), queue).with_config(config);

        let cancel = install_signal_handler();
        let report = CampaignSweepDriver::new(ctx.clone()).run(&cancel).await?;
        println!("{}", serde_json::to_string(&report)?);
        ctx.shutdown().await;
    } else {
        db.close().await;
    }

    Ok(())
}
