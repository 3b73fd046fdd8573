use crate::roster::{Player, PlayerId, Roster};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Late,
    Injured,
    Absent,
}

impl AvailabilityStatus {
    /// Available and late players take part in the rotation, everybody else is benched.
    pub fn is_schedulable(self) -> bool {
        matches!(self, AvailabilityStatus::Available | AvailabilityStatus::Late)
    }
}

impl FromStr for AvailabilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" | "" => Ok(AvailabilityStatus::Available),
            "late" => Ok(AvailabilityStatus::Late),
            "injured" => Ok(AvailabilityStatus::Injured),
            "absent" => Ok(AvailabilityStatus::Absent),
            other => Err(format!("unknown availability status: {}", other)),
        }
    }
}

pub trait AvailabilityProvider {
    fn availability(&self, player: &PlayerId) -> AvailabilityStatus;
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityBook {
    statuses: HashMap<PlayerId, AvailabilityStatus>,
}

impl AvailabilityBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, player: impl Into<PlayerId>, status: AvailabilityStatus) {
        self.statuses.insert(player.into(), status);
    }

    pub fn with(mut self, player: impl Into<PlayerId>, status: AvailabilityStatus) -> Self {
        self.set(player, status);
        self
    }
}

impl AvailabilityProvider for AvailabilityBook {
    fn availability(&self, player: &PlayerId) -> AvailabilityStatus {
        self.statuses.get(player).copied().unwrap_or_default()
    }
}

/// Splits the roster into schedulable players and players forced to the bench,
/// both in roster order.
pub fn split_by_availability<'r, A: AvailabilityProvider + ?Sized>(
    roster: &'r Roster,
    availability: &A,
) -> (Vec<&'r Player>, Vec<&'r Player>) {
    roster
        .players()
        .iter()
        .partition(|p| availability.availability(&p.id).is_schedulable())
}
