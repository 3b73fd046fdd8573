use crate::error::{RotationError, RotationResult};
use crate::lineup::{player_stats, LineupGrid, PlayerStats};
use crate::roster::{AvailabilityBook, AvailabilityStatus, PlayerId, Position, Roster};
use crate::rotation::{BuildReport, LineupBuilder, RotationConfig};
use crate::validation::{validate_lineup_quality, RuleValidator, ValidationReport};
use log::{error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Notification {
            level,
            message: message.into(),
        }
    }
}

/// Sink for user-facing messages produced by the service.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl<T: Notifier> Notifier for Rc<RefCell<T>> {
    fn notify(&mut self, notification: Notification) {
        self.borrow_mut().notify(notification);
    }
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => info!("{}", notification.message),
            NotificationLevel::Warning => warn!("{}", notification.message),
            NotificationLevel::Error => error!("{}", notification.message),
        }
    }
}

#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notifications: Vec<Notification>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

/// Owns one team's roster, availability and lineup, and is the only place
/// where build failures are turned into notifications.
pub struct LineupService {
    roster: Roster,
    availability: AvailabilityBook,
    config: RotationConfig,
    grid: LineupGrid,
    notifier: Box<dyn Notifier>,
}

impl LineupService {
    pub fn new(roster: Roster, availability: AvailabilityBook, config: RotationConfig) -> Self {
        let grid = LineupGrid::new(config.formation(), config.periods);

        LineupService {
            roster,
            availability,
            config,
            grid,
            notifier: Box::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn availability(&self) -> &AvailabilityBook {
        &self.availability
    }

    pub fn set_availability(&mut self, player: impl Into<PlayerId>, status: AvailabilityStatus) {
        self.availability.set(player, status);
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Replaces the config; the grid is recreated empty when its shape changes.
    pub fn set_config(&mut self, config: RotationConfig) {
        if config.periods != self.grid.period_count() || &config.formation() != self.grid.formation() {
            self.grid = LineupGrid::new(config.formation(), config.periods);
        }

        self.config = config;
    }

    pub fn grid(&self) -> &LineupGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut LineupGrid {
        &mut self.grid
    }

    pub fn auto_fill_all(&mut self) -> RotationResult<BuildReport> {
        let result = LineupBuilder::build(&mut self.grid, &self.roster, &self.availability, &self.config);

        match &result {
            Ok(report) => {
                let summary = if report.validation.is_valid() {
                    "Lineup auto-filled, all rules satisfied".to_string()
                } else {
                    format!(
                        "Lineup auto-filled with {} rule violation(s)",
                        report.validation.violations.len()
                    )
                };
                self.notifier
                    .notify(Notification::new(NotificationLevel::Success, summary));

                for relaxation in &report.relaxations {
                    self.notifier.notify(Notification::new(
                        NotificationLevel::Warning,
                        relaxation.to_string(),
                    ));
                }
            }
            Err(err) => {
                let message = match err {
                    RotationError::BenchSelectionFailed { .. } => {
                        format!("Auto-fill failed, the lineup is incomplete: {}", err)
                    }
                    _ => format!("Auto-fill failed: {}", err),
                };
                self.notifier
                    .notify(Notification::new(NotificationLevel::Error, message));
            }
        }

        result
    }

    pub fn validate(&self) -> ValidationReport {
        RuleValidator::validate(&self.grid, &self.roster, &self.availability, &self.config)
    }

    pub fn validate_lineup_quality(&self) -> Vec<String> {
        validate_lineup_quality(&self.grid, &self.roster, &self.availability, &self.config)
    }

    pub fn player_stats(&self) -> Vec<PlayerStats> {
        player_stats(&self.grid, &self.roster, self.config.period_minutes)
    }

    pub fn assign_to_position(&mut self, period: u32, player: &PlayerId, position: Position) -> bool {
        self.grid.assign_to_position(period, player, position, &self.roster)
    }

    pub fn add_to_bench(&mut self, period: u32, player: &PlayerId) -> bool {
        self.grid.add_to_bench(period, player)
    }

    pub fn add_to_jersey(&mut self, period: u32, player: &PlayerId) -> bool {
        self.grid.add_to_jersey(period, player)
    }

    pub fn unassign(&mut self, period: u32, player: &PlayerId) -> bool {
        self.grid.unassign(period, player)
    }

    pub fn clear_all_periods(&mut self) {
        self.grid.clear_all_periods();
    }

    pub fn export_json(&self) -> RotationResult<String> {
        self.grid.to_json()
    }

    /// Replaces the grid with a stored lineup. Subscribed observers are dropped.
    pub fn import_json(&mut self, json: &str) -> RotationResult<()> {
        let grid = LineupGrid::from_json(self.config.formation(), json)?;

        if grid.period_count() != self.config.periods {
            return Err(RotationError::GridMismatch {
                expected_periods: self.config.periods,
                actual_periods: grid.period_count(),
            });
        }

        self.grid = grid;
        Ok(())
    }
}
