//! Shared fixtures for outreach integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use brain_core::Brain;
use chrono::{DateTime, TimeZone, Utc};
use database::{
    account, campaign, campaign_run, company, lead, outbound, product, time::format_timestamp,
    Account, Campaign, Channel, Company, Database, Lead, OutboundMessage, Product,
};
use outreach::{DeliveryQueue, FixedClock, RotatingSelector, SweepConfig, SweepContext};

pub const CAMPAIGN_ID: &str = "spring-launch";
pub const RUN_ID: &str = "run-1";
pub const ORIGINAL_SUBJECT: &str = "Quick question about your sales pipeline";

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub async fn test_db() -> Database {
    let db = Database::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    db.migrate().await.unwrap();
    db
}

/// Account, company, product and one running campaign run.
pub async fn seed_campaign(db: &Database, reminder_count: i64, cadence_days: i64) {
    let pool = db.pool();

    account::create_account(
        pool,
        &Account {
            id: "acct-1".to_string(),
            name: "Vendor Sales".to_string(),
            sender_name: "Jordan Blake".to_string(),
            sender_email: "jordan@vendor.test".to_string(),
        },
    )
    .await
    .unwrap();

    company::create_company(
        pool,
        &Company {
            id: "acme".to_string(),
            name: "Acme Corp".to_string(),
            industry: Some("SaaS".to_string()),
            size_bucket: Some("51-200".to_string()),
        },
    )
    .await
    .unwrap();

    product::create_product(
        pool,
        &Product {
            id: "pipeline-pro".to_string(),
            name: "Pipeline Pro".to_string(),
            description: "Forecasting for revenue teams".to_string(),
        },
    )
    .await
    .unwrap();
    product::add_benefit(pool, "pipeline-pro", "Forecasts that close on time", Some("SaaS"), None)
        .await
        .unwrap();
    product::add_benefit(pool, "pipeline-pro", "Claims triage", Some("Insurance"), None)
        .await
        .unwrap();

    campaign::create_campaign(
        pool,
        &Campaign {
            id: CAMPAIGN_ID.to_string(),
            account_id: "acct-1".to_string(),
            product_id: Some("pipeline-pro".to_string()),
            name: "Spring launch".to_string(),
            reminder_count,
            cadence_days,
            channel: Channel::Email,
            is_active: true,
        },
    )
    .await
    .unwrap();

    campaign_run::create_run(pool, RUN_ID, CAMPAIGN_ID).await.unwrap();
    campaign_run::mark_running(pool, RUN_ID, "2025-03-01T00:00:00Z")
        .await
        .unwrap();
}

/// A second running campaign on the same account and product.
pub async fn seed_other_campaign(db: &Database, id: &str, run_id: &str, cadence_days: i64) {
    let pool = db.pool();
    campaign::create_campaign(
        pool,
        &Campaign {
            id: id.to_string(),
            account_id: "acct-1".to_string(),
            product_id: Some("pipeline-pro".to_string()),
            name: "Legacy import".to_string(),
            reminder_count: 3,
            cadence_days,
            channel: Channel::Email,
            is_active: true,
        },
    )
    .await
    .unwrap();

    campaign_run::create_run(pool, run_id, id).await.unwrap();
    campaign_run::mark_running(pool, run_id, "2025-03-01T00:00:00Z")
        .await
        .unwrap();
}

pub async fn seed_lead_row(db: &Database, n: usize) {
    lead::create_lead(
        db.pool(),
        &Lead {
            id: format!("lead-{}", n),
            account_id: "acct-1".to_string(),
            company_id: "acme".to_string(),
            first_name: "Dana".to_string(),
            last_name: format!("Reyes{}", n),
            email: format!("dana{}@acme.test", n),
            title: Some("VP Sales".to_string()),
            department: Some("Sales".to_string()),
        },
    )
    .await
    .unwrap();
}

pub fn message(n: usize, sent_at: DateTime<Utc>) -> OutboundMessage {
    OutboundMessage {
        id: format!("msg-{}", n),
        campaign_id: CAMPAIGN_ID.to_string(),
        run_id: RUN_ID.to_string(),
        lead_id: format!("lead-{}", n),
        subject: ORIGINAL_SUBJECT.to_string(),
        body: "Hi Dana, ...".to_string(),
        sent_at: format_timestamp(sent_at),
    }
}

/// A lead plus its initial outbound message.
pub async fn seed_lead(db: &Database, n: usize, sent_at: DateTime<Utc>) {
    seed_lead_row(db, n).await;
    assert!(outbound::record_outbound_message(db.pool(), &message(n, sent_at))
        .await
        .unwrap());
}

pub fn context(
    db: &Database,
    brain: impl Brain + 'static,
    queue: Arc<dyn DeliveryQueue>,
    clock: Arc<FixedClock>,
) -> SweepContext {
    SweepContext::new(db.clone(), Arc::new(brain), queue)
        .with_clock(clock)
        .with_selector(Arc::new(RotatingSelector))
        .with_config(
            SweepConfig::default()
                .with_lead_page_size(2)
                .with_concurrency(2)
                .with_generation_timeout(Duration::from_millis(200))
                .with_enqueue_timeout(Duration::from_millis(200)),
        )
}
