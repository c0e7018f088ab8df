//! Reminder stage: the persisted, forward-only position of a lead in its
//! reminder sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of reminders a campaign may configure.
pub const MAX_REMINDERS: u8 = 7;

/// A lead's position in the reminder sequence.
///
/// `Initial` means only the original outbound message has gone out. Each
/// successful sweep pass moves a lead exactly one step forward. `Completed`
/// is reached after the reminder sent from `R6` and is never swept again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Stage {
    Initial = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    Completed = 7,
}

impl Stage {
    /// All stages from which a reminder can be sent, in ascending order.
    pub const SENDING: [Stage; 7] = [
        Stage::Initial,
        Stage::R1,
        Stage::R2,
        Stage::R3,
        Stage::R4,
        Stage::R5,
        Stage::R6,
    ];

    /// Numeric position (0 for `Initial`, 7 for `Completed`).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Stage for a stored ordinal, if in range.
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(Stage::Initial),
            1 => Some(Stage::R1),
            2 => Some(Stage::R2),
            3 => Some(Stage::R3),
            4 => Some(Stage::R4),
            5 => Some(Stage::R5),
            6 => Some(Stage::R6),
            7 => Some(Stage::Completed),
            _ => None,
        }
    }

    /// The stage a successful advancement moves to. `None` for `Completed`.
    pub fn next(self) -> Option<Self> {
        Self::from_ordinal(i64::from(self.ordinal()) + 1)
    }

    /// Whether no further reminders can be sent from this stage.
    pub fn is_terminal(self) -> bool {
        self == Stage::Completed
    }

    /// Stages a campaign with `reminder_count` reminders sweeps, ascending.
    ///
    /// The count is clamped to `0..=7`; a count of 3 yields
    /// `Initial, R1, R2`.
    pub fn sending_stages(reminder_count: i64) -> impl Iterator<Item = Stage> {
        let count = reminder_count.clamp(0, i64::from(MAX_REMINDERS)) as usize;
        Self::SENDING.into_iter().take(count)
    }

    /// Short lowercase label used in logs and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Initial => "initial",
            Stage::R1 => "r1",
            Stage::R2 => "r2",
            Stage::R3 => "r3",
            Stage::R4 => "r4",
            Stage::R5 => "r5",
            Stage::R6 => "r6",
            Stage::Completed => "completed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_strictly_increasing() {
        let mut stage = Stage::Initial;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            assert_eq!(next.ordinal(), stage.ordinal() + 1);
            stage = next;
            seen.push(stage);
        }
        assert_eq!(stage, Stage::Completed);
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_sending_stages_clamped() {
        let three: Vec<_> = Stage::sending_stages(3).collect();
        assert_eq!(three, vec![Stage::Initial, Stage::R1, Stage::R2]);

        assert_eq!(Stage::sending_stages(0).count(), 0);
        assert_eq!(Stage::sending_stages(-4).count(), 0);
        assert_eq!(Stage::sending_stages(12).count(), 7);
        assert_eq!(Stage::sending_stages(12).last(), Some(Stage::R6));
    }

    #[test]
    fn test_from_ordinal_out_of_range() {
        assert_eq!(Stage::from_ordinal(8), None);
        assert_eq!(Stage::from_ordinal(-1), None);
        assert_eq!(Stage::from_ordinal(4), Some(Stage::R4));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Stage::Initial.to_string(), "initial");
        assert_eq!(Stage::R6.label(), "r6");
        assert!(Stage::Completed.is_terminal());
        assert!(!Stage::R6.is_terminal());
    }
}
