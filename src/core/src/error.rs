use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq)]
pub enum RotationError {
    EmptyRoster,
    InvalidConfig(String),
    NotEnoughPlayers { available: usize, required: usize },
    GridMismatch { expected_periods: u32, actual_periods: u32 },
    BenchSelectionFailed { period: u32, target: usize, selected: usize },
    InvalidSnapshot(String),
}

impl RotationError {
    /// Precondition failures are raised before the grid is touched.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, RotationError::BenchSelectionFailed { .. })
    }
}

impl Display for RotationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RotationError::EmptyRoster => write!(f, "no active roster selected"),
            RotationError::InvalidConfig(msg) => write!(f, "invalid rotation config: {}", msg),
            RotationError::NotEnoughPlayers {
                available,
                required,
            } => write!(
                f,
                "not enough available players: {} available, {} needed to fill the field",
                available, required
            ),
            RotationError::GridMismatch {
                expected_periods,
                actual_periods,
            } => write!(
                f,
                "lineup grid has {} periods but the rotation is configured for {}",
                actual_periods, expected_periods
            ),
            RotationError::BenchSelectionFailed {
                period,
                target,
                selected,
            } => write!(
                f,
                "critical algorithm failure: period {} needs {} sitting players, only {} could be seated",
                period, target, selected
            ),
            RotationError::InvalidSnapshot(msg) => write!(f, "invalid lineup snapshot: {}", msg),
        }
    }
}

impl std::error::Error for RotationError {}

impl From<serde_json::Error> for RotationError {
    fn from(err: serde_json::Error) -> Self {
        RotationError::InvalidSnapshot(format!("JSON error: {}", err))
    }
}

pub type RotationResult<T> = Result<T, RotationError>;
