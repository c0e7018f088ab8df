//! Strategy adjustment by engagement.

use serde::{Deserialize, Serialize};

use crate::catalog::Strategy;
use crate::engagement::{EngagementLevel, Interaction};

/// How hard a reminder should press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Moderate,
    Low,
    FinalAttempt,
}

impl Urgency {
    pub fn label(self) -> &'static str {
        match self {
            Urgency::High => "high",
            Urgency::Moderate => "moderate",
            Urgency::Low => "low",
            Urgency::FinalAttempt => "final attempt",
        }
    }

    /// Writing guidance for the generator.
    pub fn guidance(self) -> &'static str {
        match self {
            Urgency::High => "The lead is warm. Suggest a concrete next step and a specific time.",
            Urgency::Moderate => "Interest is likely. Keep momentum with a clear but easy next step.",
            Urgency::Low => "Keep the ask light. Focus on value rather than timing.",
            Urgency::FinalAttempt => {
                "It has been a long time. Acknowledge the gap and ask whether to close the loop."
            }
        }
    }
}

/// Resolved messaging instructions for one reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub strategy: &'static Strategy,
    pub engagement: EngagementLevel,
    pub tone_modifier: &'static str,
    /// Lead opened an earlier message but never answered.
    pub opened_no_reply: bool,
    pub urgency: Urgency,
}

fn tone_modifier(level: EngagementLevel) -> &'static str {
    match level {
        EngagementLevel::Booked => {
            "A meeting is already booked. Be warm, confirm value, and do not sell further."
        }
        EngagementLevel::High => "They have replied before. Be conversational and build on that exchange.",
        EngagementLevel::Medium => "They are reading. Be specific and give them a reason to respond.",
        EngagementLevel::Low => "They have not engaged yet. Lead with a sharper hook and keep it short.",
    }
}

/// Urgency from engagement and elapsed time.
///
/// High urgency is reserved for leads that replied and were touched within
/// the last week. Opened leads within two weeks are moderate. Anything past
/// thirty days is a final attempt. Unknown elapsed time is low.
pub fn urgency(level: EngagementLevel, interaction: &Interaction) -> Urgency {
    let days = interaction.days_since_sent;
    if days < 0 {
        return Urgency::Low;
    }

    let replied = matches!(level, EngagementLevel::High | EngagementLevel::Booked);
    if days > 30 {
        Urgency::FinalAttempt
    } else if days < 7 && interaction.opened && replied {
        Urgency::High
    } else if days < 14 && interaction.opened {
        Urgency::Moderate
    } else {
        Urgency::Low
    }
}

/// Combine a base strategy with the lead's engagement.
pub fn adjust(
    strategy: &'static Strategy,
    level: EngagementLevel,
    interaction: &Interaction,
) -> Directive {
    Directive {
        strategy,
        engagement: level,
        tone_modifier: tone_modifier(level),
        opened_no_reply: interaction.opened && !interaction.replied,
        urgency: urgency(level, interaction),
    }
}
