use crate::error::{RotationError, RotationResult};
use crate::roster::{Formation, SquadSize};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PERIODS: u32 = 8;
pub const DEFAULT_SITTING_QUOTA: usize = 3;
pub const DEFAULT_GOALKEEPER_ROTATION: usize = 3;
pub const DEFAULT_PERIOD_MINUTES: f32 = 7.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub periods: u32,
    pub sitting_quota: usize,
    pub goalkeeper_rotation: usize,
    pub period_minutes: f32,
    pub min_sits: usize,
    pub max_sits: usize,
    pub min_position_categories: usize,
    pub squad_size: SquadSize,
}

impl Default for RotationConfig {
    fn default() -> Self {
        RotationConfig {
            periods: DEFAULT_PERIODS,
            sitting_quota: DEFAULT_SITTING_QUOTA,
            goalkeeper_rotation: DEFAULT_GOALKEEPER_ROTATION,
            period_minutes: DEFAULT_PERIOD_MINUTES,
            min_sits: 1,
            max_sits: 2,
            min_position_categories: 2,
            squad_size: SquadSize::NineVNine,
        }
    }
}

impl RotationConfig {
    pub fn formation(&self) -> Formation {
        Formation::for_squad(self.squad_size)
    }

    pub fn with_periods(mut self, periods: u32) -> Self {
        self.periods = periods;
        self
    }

    pub fn with_sitting_quota(mut self, sitting_quota: usize) -> Self {
        self.sitting_quota = sitting_quota;
        self
    }

    pub fn validate(&self) -> RotationResult<()> {
        if self.periods == 0 {
            return Err(RotationError::InvalidConfig(
                "at least one period is required".to_string(),
            ));
        }

        if self.goalkeeper_rotation == 0 {
            return Err(RotationError::InvalidConfig(
                "goalkeeper rotation needs at least one keeper".to_string(),
            ));
        }

        if self.min_sits > self.max_sits {
            return Err(RotationError::InvalidConfig(format!(
                "min_sits ({}) exceeds max_sits ({})",
                self.min_sits, self.max_sits
            )));
        }

        if !self.period_minutes.is_finite() || self.period_minutes < 0.0 {
            return Err(RotationError::InvalidConfig(format!(
                "period length must be a non-negative number of minutes, got {}",
                self.period_minutes
            )));
        }

        Ok(())
    }
}
