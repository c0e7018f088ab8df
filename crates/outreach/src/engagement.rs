//! Engagement classification.

use chrono::{DateTime, Utc};
use database::{time::parse_timestamp, ReminderState};
use serde::{Deserialize, Serialize};

/// What a lead has done with the messages sent so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Interaction {
    pub opened: bool,
    pub replied: bool,
    pub meeting_booked: bool,
    /// Whole days since the last touch, in UTC. Negative when unknown.
    pub days_since_sent: i64,
}

impl Interaction {
    /// Sentinel for an unreadable or future last-sent timestamp.
    pub const UNKNOWN_DAYS: i64 = -1;

    /// Build the interaction record for a stored state as seen at `now`.
    pub fn from_state(state: &ReminderState, now: DateTime<Utc>) -> Self {
        let days_since_sent = match parse_timestamp(&state.last_sent_at) {
            Ok(sent) if sent <= now => (now - sent).num_days(),
            Ok(_) => Self::UNKNOWN_DAYS,
            Err(e) => {
                tracing::warn!(state_id = state.id, error = %e, "Unreadable last-sent timestamp");
                Self::UNKNOWN_DAYS
            }
        };

        Self {
            opened: state.opened,
            replied: state.replied,
            meeting_booked: state.meeting_booked,
            days_since_sent,
        }
    }
}

/// Engagement level of a lead, most engaged first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    Booked,
    High,
    Medium,
    Low,
}

impl EngagementLevel {
    pub fn label(self) -> &'static str {
        match self {
            EngagementLevel::Booked => "booked",
            EngagementLevel::High => "high",
            EngagementLevel::Medium => "medium",
            EngagementLevel::Low => "low",
        }
    }
}

/// Classify an interaction record.
///
/// Precedence is booked, then replied, then opened. A booked meeting always
/// wins over a reply.
pub fn classify(interaction: &Interaction) -> EngagementLevel {
    if interaction.meeting_booked {
        EngagementLevel::Booked
    } else if interaction.replied {
        EngagementLevel::High
    } else if interaction.opened {
        EngagementLevel::Medium
    } else {
        EngagementLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use database::Stage;

    fn interaction(opened: bool, replied: bool, meeting_booked: bool) -> Interaction {
        Interaction {
            opened,
            replied,
            meeting_booked,
            days_since_sent: 3,
        }
    }

    #[test]
    fn test_classify_every_flag_combination() {
        for bits in 0u8..8 {
            let opened = bits & 1 != 0;
            let replied = bits & 2 != 0;
            let booked = bits & 4 != 0;

            let expected = if booked {
                EngagementLevel::Booked
            } else if replied {
                EngagementLevel::High
            } else if opened {
                EngagementLevel::Medium
            } else {
                EngagementLevel::Low
            };

            assert_eq!(classify(&interaction(opened, replied, booked)), expected);
        }
    }

    #[test]
    fn test_booked_dominates_reply() {
        assert_eq!(classify(&interaction(true, true, true)), EngagementLevel::Booked);
        assert_eq!(classify(&interaction(false, true, true)), EngagementLevel::Booked);
    }

    fn state(last_sent_at: &str) -> ReminderState {
        ReminderState {
            id: 1,
            message_id: "m1".to_string(),
            campaign_id: "c1".to_string(),
            lead_id: "l1".to_string(),
            stage: Stage::Initial,
            last_sent_at: last_sent_at.to_string(),
            opened: true,
            replied: false,
            meeting_booked: false,
        }
    }

    #[test]
    fn test_from_state_counts_whole_days() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let interaction = Interaction::from_state(&state("2025-03-05T10:00:00Z"), now);
        assert_eq!(interaction.days_since_sent, 4);
        assert!(interaction.opened);
    }

    #[test]
    fn test_from_state_unknown_days() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(
            Interaction::from_state(&state("not a time"), now).days_since_sent,
            Interaction::UNKNOWN_DAYS
        );
        assert_eq!(
            Interaction::from_state(&state("2025-04-01T00:00:00Z"), now).days_since_sent,
            Interaction::UNKNOWN_DAYS
        );
    }
}
