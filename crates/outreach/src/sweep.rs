//! Campaign sweep driver.
//!
//! One sweep walks every sweepable campaign (offset pages), each campaign's
//! sending stages in ascending order, and the leads due at each stage
//! (keyset pages on the reminder-state row ID). For every due lead it
//! generates a reminder, enqueues it, and only then advances the lead's
//! stage with a conditional update keyed on the stage it was read at.
//!
//! ```text
//! campaigns (offset) ──► stages (ascending) ──► due leads (keyset on id)
//!                                                   │
//!                          group by account ◄───────┘
//!                                 │
//!                   per lead: generate ─► enqueue ─► advance
//! ```
//!
//! Failure scope:
//! - generation failures are absorbed by the fallback reminder
//! - enqueue failures and timeouts leave that lead at its stage
//! - a campaign whose product or cadence cannot be resolved is skipped
//! - a failed due-lead listing ends that stage only
//! - a failed campaign listing ends the sweep with an error

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use database::{
    account, campaign, company, lead, outbound, product, reminder_state,
    time::format_timestamp, Account, AdvanceOutcome, Campaign, DueQuery, Lead, ReminderState,
    Stage,
};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::adjuster::adjust;
use crate::catalog::strategy_for;
use crate::context::SweepContext;
use crate::engagement::{classify, Interaction};
use crate::error::OutreachError;
use crate::generator::ReminderGenerator;
use crate::queue::DeliveryItem;
use crate::request::{CampaignProduct, ContentRequestBuilder, LeadContext};

/// Counters for one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub campaigns: u64,
    pub stages: u64,
    pub pages: u64,
    pub leads_seen: u64,
    pub advanced: u64,
    /// Advanced leads whose reminder used the fallback template.
    pub fallbacks: u64,
    pub enqueue_failures: u64,
    /// Leads another writer advanced first.
    pub stale: u64,
    /// Leads skipped because a record lookup or the stage write failed.
    pub lead_failures: u64,
    pub stage_failures: u64,
    pub campaign_failures: u64,
    pub cancelled: bool,
}

impl SweepReport {
    fn record(&mut self, outcome: LeadOutcome) {
        match outcome {
            LeadOutcome::Advanced { fallback } => {
                self.advanced += 1;
                if fallback {
                    self.fallbacks += 1;
                }
            }
            LeadOutcome::EnqueueFailed => self.enqueue_failures += 1,
            LeadOutcome::Stale => self.stale += 1,
            LeadOutcome::Failed => self.lead_failures += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeadOutcome {
    Advanced { fallback: bool },
    EnqueueFailed,
    Stale,
    Failed,
}

enum StageEnd {
    Complete,
    Cancelled,
}

/// Per-campaign data shared by every lead in the campaign.
struct CampaignScope<'a> {
    campaign: &'a Campaign,
    product: Option<CampaignProduct>,
    /// Leads last touched at or before this instant are due.
    due_before: String,
}

/// Drives reminder sweeps over all sweepable campaigns.
pub struct CampaignSweepDriver {
    ctx: SweepContext,
    generator: ReminderGenerator,
}

impl CampaignSweepDriver {
    pub fn new(ctx: SweepContext) -> Self {
        let generator = ReminderGenerator::new(
            ctx.brain.clone(),
            ctx.selector.clone(),
            ctx.config.generation_timeout,
        );
        Self { ctx, generator }
    }

    /// Run one sweep.
    ///
    /// Stops between pages and stages once `cancel` fires; the report then
    /// has `cancelled` set. Only a failure to list campaigns is returned as
    /// an error.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<SweepReport, OutreachError> {
        let started = self.ctx.clock.now();
        let mut report = SweepReport::default();
        let page_size = self.ctx.config.campaign_page_size.max(1);
        let mut offset = 0i64;

        tracing::info!("Starting reminder sweep at {}", format_timestamp(started));

        loop {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let campaigns = campaign::list_sweepable(self.ctx.db.pool(), page_size, offset).await?;
            if campaigns.is_empty() {
                break;
            }
            offset += campaigns.len() as i64;

            for campaign in &campaigns {
                report.campaigns += 1;
                if let StageEnd::Cancelled =
                    self.sweep_campaign(campaign, started, &mut report, cancel).await
                {
                    report.cancelled = true;
                    break;
                }
            }

            if report.cancelled {
                break;
            }
        }

        tracing::info!(
            campaigns = report.campaigns,
            advanced = report.advanced,
            fallbacks = report.fallbacks,
            enqueue_failures = report.enqueue_failures,
            stage_failures = report.stage_failures,
            cancelled = report.cancelled,
            "Reminder sweep finished"
        );

        Ok(report)
    }

    async fn sweep_campaign(
        &self,
        campaign: &Campaign,
        started: DateTime<Utc>,
        report: &mut SweepReport,
        cancel: &CancellationToken,
    ) -> StageEnd {
        let Some(due_cutoff) = started.checked_sub_signed(campaign.cadence()) else {
            tracing::error!(
                "Skipping campaign {}: cadence of {} days is out of range",
                campaign.id,
                campaign.cadence_days
            );
            report.campaign_failures += 1;
            return StageEnd::Complete;
        };

        let product = match self.load_product(campaign).await {
            Ok(product) => product,
            Err(e) => {
                tracing::error!("Skipping campaign {}: failed to load product: {}", campaign.id, e);
                report.campaign_failures += 1;
                return StageEnd::Complete;
            }
        };

        let scope = CampaignScope {
            campaign,
            product,
            due_before: format_timestamp(due_cutoff),
        };

        for stage in campaign.sending_stages() {
            if cancel.is_cancelled() {
                return StageEnd::Cancelled;
            }

            report.stages += 1;
            match self.sweep_stage(&scope, stage, report, cancel).await {
                Ok(StageEnd::Complete) => {}
                Ok(StageEnd::Cancelled) => return StageEnd::Cancelled,
                Err(e) => {
                    tracing::error!(
                        "Stage {} of campaign {} aborted: {}",
                        stage,
                        campaign.id,
                        e
                    );
                    report.stage_failures += 1;
                }
            }
        }

        StageEnd::Complete
    }

    async fn load_product(&self, campaign: &Campaign) -> Result<Option<CampaignProduct>, OutreachError> {
        let Some(product_id) = campaign.product_id.as_deref() else {
            return Ok(None);
        };

        let pool = self.ctx.db.pool();
        let product = product::get_product(pool, product_id).await?;
        let benefits = product::list_benefits(pool, product_id).await?;
        Ok(Some(CampaignProduct { product, benefits }))
    }

    /// Keyset-paged pass over the leads due at one stage.
    async fn sweep_stage(
        &self,
        scope: &CampaignScope<'_>,
        stage: Stage,
        report: &mut SweepReport,
        cancel: &CancellationToken,
    ) -> Result<StageEnd, OutreachError> {
        let mut after_id = 0i64;

        loop {
            if cancel.is_cancelled() {
                return Ok(StageEnd::Cancelled);
            }

            let query = DueQuery {
                campaign_id: &scope.campaign.id,
                stage,
                due_before: &scope.due_before,
                after_id,
                limit: self.ctx.config.lead_page_size.max(1),
            };
            let page = reminder_state::list_due(self.ctx.db.pool(), &query).await?;
            let Some(last) = page.last() else {
                return Ok(StageEnd::Complete);
            };
            after_id = last.id;

            tracing::debug!(
                "Campaign {} stage {}: {} due leads (cursor {})",
                scope.campaign.id,
                stage,
                page.len(),
                after_id
            );
            report.pages += 1;
            report.leads_seen += page.len() as u64;

            for outcome in self.process_page(scope, page).await {
                report.record(outcome);
            }
        }
    }

    /// Process one page, grouped by owning account.
    async fn process_page(&self, scope: &CampaignScope<'_>, page: Vec<ReminderState>) -> Vec<LeadOutcome> {
        let pool = self.ctx.db.pool();
        let mut outcomes = Vec::with_capacity(page.len());
        let mut by_account: BTreeMap<String, Vec<(ReminderState, Lead)>> = BTreeMap::new();

        for state in page {
            match lead::get_lead(pool, &state.lead_id).await {
                Ok(lead) => by_account
                    .entry(lead.account_id.clone())
                    .or_default()
                    .push((state, lead)),
                Err(e) => {
                    tracing::warn!("Skipping reminder state {}: lead lookup failed: {}", state.id, e);
                    outcomes.push(LeadOutcome::Failed);
                }
            }
        }

        for (account_id, members) in by_account {
            let account = match account::get_account(pool, &account_id).await {
                Ok(account) => account,
                Err(e) => {
                    tracing::warn!(
                        "Skipping {} leads of account {}: {}",
                        members.len(),
                        account_id,
                        e
                    );
                    outcomes.extend(members.iter().map(|_| LeadOutcome::Failed));
                    continue;
                }
            };

            let results: Vec<LeadOutcome> = stream::iter(members)
                .map(|(state, lead)| self.process_lead(scope, &account, state, lead))
                .buffer_unordered(self.ctx.config.concurrency.max(1))
                .collect()
                .await;
            outcomes.extend(results);
        }

        outcomes
    }

    /// Generate, enqueue and advance one lead.
    async fn process_lead(
        &self,
        scope: &CampaignScope<'_>,
        account: &Account,
        state: ReminderState,
        lead: Lead,
    ) -> LeadOutcome {
        let pool = self.ctx.db.pool();

        let company = match company::get_company(pool, &lead.company_id).await {
            Ok(company) => company,
            Err(e) => {
                tracing::warn!("Skipping lead {}: company lookup failed: {}", lead.id, e);
                return LeadOutcome::Failed;
            }
        };
        let original = match outbound::get_outbound_message(pool, &state.message_id).await {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Skipping lead {}: original message lookup failed: {}", lead.id, e);
                return LeadOutcome::Failed;
            }
        };

        let interaction = Interaction::from_state(&state, self.ctx.clock.now());
        let directive = adjust(strategy_for(state.stage), classify(&interaction), &interaction);
        let request = ContentRequestBuilder::new(self.ctx.clock.as_ref(), self.ctx.selector.as_ref())
            .build(
                directive,
                &interaction,
                LeadContext {
                    lead: &lead,
                    company: &company,
                    account,
                    original: &original,
                    product: scope.product.as_ref(),
                },
            );

        let reminder = self.generator.generate(&request).await;
        let fallback = reminder.is_fallback();

        let item = DeliveryItem {
            lead_id: lead.id.clone(),
            campaign_id: scope.campaign.id.clone(),
            run_id: original.run_id.clone(),
            message_id: state.message_id.clone(),
            stage: state.stage,
            recipient_email: lead.email.clone(),
            sender_email: account.sender_email.clone(),
            subject: reminder.subject,
            body: reminder.body,
        };

        let timeout = self.ctx.config.enqueue_timeout;
        match tokio::time::timeout(timeout, self.ctx.queue.enqueue(&item)).await {
            Ok(Ok(receipt)) => {
                tracing::debug!(
                    "Enqueued {} reminder for lead {} as {}",
                    state.stage,
                    lead.id,
                    receipt.queue_id
                );
            }
            Ok(Err(e)) => {
                tracing::warn!("Lead {} left at {}: {}", lead.id, state.stage, e);
                return LeadOutcome::EnqueueFailed;
            }
            Err(_) => {
                let e = OutreachError::Timeout {
                    operation: "enqueue",
                    elapsed: timeout,
                };
                tracing::warn!("Lead {} left at {}: {}", lead.id, state.stage, e);
                return LeadOutcome::EnqueueFailed;
            }
        }

        let sent_at = format_timestamp(self.ctx.clock.now());
        match reminder_state::advance_stage(pool, state.id, state.stage, &sent_at).await {
            Ok(AdvanceOutcome::Advanced(next)) => {
                tracing::info!("Lead {} advanced {} -> {}", lead.id, state.stage, next);
                LeadOutcome::Advanced { fallback }
            }
            Ok(AdvanceOutcome::Stale) => {
                tracing::warn!(
                    "Lead {} was moved past {} by another writer after its reminder was enqueued",
                    lead.id,
                    state.stage
                );
                LeadOutcome::Stale
            }
            Err(e) => {
                tracing::error!("Failed to advance lead {} from {}: {}", lead.id, state.stage, e);
                LeadOutcome::Failed
            }
        }
    }
}
