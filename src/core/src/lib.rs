pub mod error;
pub mod lineup;
pub mod roster;
pub mod rotation;
pub mod service;
pub mod utils;
pub mod validation;

pub use error::*;
pub use lineup::{
    player_stats, EditHistory, GridEvent, GridObserver, LineupGrid, LineupSnapshot,
    PeriodAssignment, PlayerStats, Slot,
};
pub use roster::{
    AvailabilityBook, AvailabilityProvider, AvailabilityStatus, Categories, Formation, Player,
    PlayerId, Position, PositionCategory, Roster, RosterProvider, SquadSize,
};
pub use rotation::{BuildReport, LineupBuilder, RotationConfig};
pub use service::*;
pub use validation::{validate_lineup_quality, RuleValidator, ValidationReport, Violation};
