//! Database models.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::stage::{Stage, MAX_REMINDERS};

/// Longest cadence a campaign may use. Larger stored values are clamped.
pub const MAX_CADENCE_DAYS: i64 = 3650;

/// A sending account. Leads are owned by an account, whose mailbox signs
/// and sends every reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: String,
    /// Display name of the account (e.g., the sales team).
    pub name: String,
    /// Name used to sign outgoing mail.
    pub sender_name: String,
    /// From address for outgoing mail.
    pub sender_email: String,
}

/// A prospect's company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    /// Headcount bucket (e.g., "1-10", "51-200", "enterprise").
    pub size_bucket: Option<String>,
}

/// A product pitched by a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// A benefit phrase tied to the ideal customer profile it speaks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductBenefit {
    pub id: i64,
    pub product_id: String,
    pub benefit: String,
    /// Industry of the profile this benefit targets.
    pub icp_industry: Option<String>,
    /// Company size bucket of the profile this benefit targets.
    pub icp_company_size: Option<String>,
    /// Ordering within the product.
    pub position: i64,
}

/// A prospect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Lead {
    pub id: String,
    /// Owning sending account.
    pub account_id: String,
    pub company_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub title: Option<String>,
    pub department: Option<String>,
}

/// Delivery channel of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Channel {
    Email,
    /// Voice outreach; handled outside the reminder sweep.
    Call,
}

/// An outbound campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Campaign {
    pub id: String,
    pub account_id: String,
    pub product_id: Option<String>,
    pub name: String,
    /// Configured number of reminders (clamped to 0..=7 when read).
    pub reminder_count: i64,
    /// Minimum days between two touches.
    pub cadence_days: i64,
    pub channel: Channel,
    pub is_active: bool,
}

impl Campaign {
    /// Reminder count clamped to the supported range.
    pub fn effective_reminder_count(&self) -> u8 {
        self.reminder_count.clamp(0, i64::from(MAX_REMINDERS)) as u8
    }

    /// Cadence window, clamped to `1..=MAX_CADENCE_DAYS` days.
    pub fn cadence(&self) -> Duration {
        Duration::days(self.cadence_days.clamp(1, MAX_CADENCE_DAYS))
    }

    /// Stages this campaign sweeps, ascending.
    pub fn sending_stages(&self) -> impl Iterator<Item = Stage> {
        Stage::sending_stages(self.reminder_count)
    }
}

/// Lifecycle state of a campaign run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
        }
    }
}

/// One execution of a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CampaignRun {
    pub id: String,
    pub campaign_id: String,
    pub status: RunStatus,
    pub started_at: Option<String>,
}

/// Per-run, per-day schedule placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ScheduleEntry {
    pub id: i64,
    pub run_id: String,
    /// Day the run is scheduled for (`YYYY-MM-DD`).
    pub scheduled_for: String,
    /// Day whose data the run should read (`YYYY-MM-DD`).
    pub data_fetch_date: String,
    pub created_at: String,
}

/// The initial message a reminder sequence follows up on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OutboundMessage {
    pub id: String,
    pub campaign_id: String,
    pub run_id: String,
    pub lead_id: String,
    pub subject: String,
    pub body: String,
    pub sent_at: String,
}

/// Reminder progress for one outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ReminderState {
    /// Stable row key; sweeps page on it.
    pub id: i64,
    pub message_id: String,
    pub campaign_id: String,
    pub lead_id: String,
    pub stage: Stage,
    /// Last touch (original send or latest reminder), UTC.
    pub last_sent_at: String,
    pub opened: bool,
    pub replied: bool,
    pub meeting_booked: bool,
}

impl ReminderState {
    /// Whether engagement has ended the sequence for this lead.
    pub fn is_engaged_terminal(&self) -> bool {
        self.replied || self.meeting_booked
    }
}

/// Engagement flag reported by delivery telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementFlag {
    Opened,
    Replied,
    MeetingBooked,
}

impl EngagementFlag {
    pub(crate) fn column(&self) -> &'static str {
        match self {
            EngagementFlag::Opened => "opened",
            EngagementFlag::Replied => "replied",
            EngagementFlag::MeetingBooked => "meeting_booked",
        }
    }
}

/// A queued reminder awaiting delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OutboxItem {
    pub id: i64,
    pub lead_id: String,
    pub campaign_id: String,
    pub run_id: String,
    pub message_id: String,
    /// Stage the reminder was sent from.
    pub stage: Stage,
    pub recipient_email: String,
    pub sender_email: String,
    pub subject: String,
    pub body: String,
    pub created_at: String,
}

/// Fields for a new outbox row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOutboxItem {
    pub lead_id: String,
    pub campaign_id: String,
    pub run_id: String,
    pub message_id: String,
    pub stage: Stage,
    pub recipient_email: String,
    pub sender_email: String,
    pub subject: String,
    pub body: String,
}
