use crate::roster::{PlayerId, Position};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Violation {
    TooFewSits {
        player: PlayerId,
        sits: usize,
        min: usize,
    },
    TooManySits {
        player: PlayerId,
        sits: usize,
        max: usize,
    },
    ConsecutiveSits {
        player: PlayerId,
        first_period: u32,
    },
    NarrowPositions {
        player: PlayerId,
        categories: usize,
        required: usize,
    },
    MissingJerseyPrep {
        keeper: PlayerId,
        block_start: u32,
    },
    SittingQuota {
        period: u32,
        sitting: usize,
        quota: usize,
    },
    UnfilledPosition {
        period: u32,
        position: Position,
    },
}

impl Violation {
    /// Subset reported by the quick lineup check.
    pub fn is_quality_issue(&self) -> bool {
        matches!(
            self,
            Violation::TooFewSits { .. }
                | Violation::TooManySits { .. }
                | Violation::SittingQuota { .. }
                | Violation::UnfilledPosition { .. }
        )
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Violation::TooFewSits { player, sits, min } => {
                write!(f, "{} sits {} period(s), at least {} required", player, sits, min)
            }
            Violation::TooManySits { player, sits, max } => {
                write!(f, "{} sits {} period(s), at most {} allowed", player, sits, max)
            }
            Violation::ConsecutiveSits {
                player,
                first_period,
            } => write!(
                f,
                "{} sits in consecutive periods {} and {}",
                player,
                first_period,
                first_period + 1
            ),
            Violation::NarrowPositions {
                player,
                categories,
                required,
            } => write!(
                f,
                "{} played {} position categor{}, {} expected",
                player,
                categories,
                if *categories == 1 { "y" } else { "ies" },
                required
            ),
            Violation::MissingJerseyPrep { keeper, block_start } => write!(
                f,
                "{} keeps goal from period {} without jersey prep in period {}",
                keeper,
                block_start,
                block_start - 1
            ),
            Violation::SittingQuota {
                period,
                sitting,
                quota,
            } => write!(
                f,
                "period {}: {} players sitting, {} expected",
                period, sitting, quota
            ),
            Violation::UnfilledPosition { period, position } => {
                write!(f, "period {}: {} is unfilled", period, position)
            }
        }
    }
}
