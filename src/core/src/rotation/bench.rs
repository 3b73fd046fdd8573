use crate::error::{RotationError, RotationResult};
use crate::roster::PlayerId;
use crate::rotation::{PlayerTracking, RotationConfig, TrackingBook};
use itertools::Itertools;
use log::{debug, error, warn};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

const NEVER_SAT_BONUS: f32 = 100.0;
const SAT_ONCE_BONUS: f32 = 50.0;
const AT_CAP_PENALTY: f32 = -100.0;
const CONSECUTIVE_PENALTY: f32 = -200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelaxedRule {
    ConsecutiveSit,
    SitCap,
}

/// A fairness rule broken on purpose to seat the quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relaxation {
    pub period: u32,
    pub player: PlayerId,
    pub rule: RelaxedRule,
}

impl Display for Relaxation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.rule {
            RelaxedRule::ConsecutiveSit => write!(
                f,
                "period {}: {} sits in consecutive periods",
                self.period, self.player
            ),
            RelaxedRule::SitCap => write!(
                f,
                "period {}: {} sits more than the allowed number of periods",
                self.period, self.player
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BenchSelection {
    pub bench: Vec<PlayerId>,
    pub relaxations: Vec<Relaxation>,
}

#[derive(Clone, Copy, PartialEq)]
enum Pass {
    Strict,
    AllowConsecutive,
    AllowOverCap,
}

pub struct BenchSelector;

impl BenchSelector {
    /// Number of pool players that sit this period: the quota left after
    /// jersey duty and forced-bench players. When the rest of the pool cannot
    /// cover the outfield slots the target drops so the field fills first.
    /// A pool larger than the outfield keeps the quota; the extra players
    /// end up unplaced.
    pub fn bench_target(
        period: u32,
        quota: usize,
        jersey: usize,
        forced: usize,
        pool: usize,
        outfield_slots: usize,
    ) -> usize {
        let target = quota.saturating_sub(jersey + forced);
        let players_left = pool.saturating_sub(target);

        if players_left < outfield_slots && target > 0 {
            let lowered = pool.saturating_sub(outfield_slots).min(target);
            warn!(
                "period {}: short-handed, seating {} instead of {} to fill the field",
                period, lowered, target
            );
            lowered
        } else {
            if players_left > outfield_slots {
                debug!(
                    "period {}: {} players for {} outfield slots, {} will rest off the grid",
                    period,
                    players_left,
                    outfield_slots,
                    players_left - outfield_slots
                );
            }
            target
        }
    }

    /// Sit priority; higher sits first.
    pub fn priority(record: &PlayerTracking, period: u32, max_sits: usize) -> f32 {
        let sits = record.total_sits();

        let mut priority = if sits == 0 {
            NEVER_SAT_BONUS
        } else if sits >= max_sits {
            AT_CAP_PENALTY
        } else {
            SAT_ONCE_BONUS
        };

        if record.adjacent_to_sit(period) {
            priority += CONSECUTIVE_PENALTY;
        }

        // Players with more minutes are owed a rest first.
        priority + record.playing_time
    }

    /// Reorders field players so the ones owed a rest come last. The position
    /// assigner fills slots in this order, so a surplus leaves them unplaced.
    pub fn rest_last(
        period: u32,
        players: Vec<PlayerId>,
        tracking: &TrackingBook,
        max_sits: usize,
    ) -> Vec<PlayerId> {
        let empty = PlayerTracking::default();

        players
            .into_iter()
            .map(|p| {
                let priority = Self::priority(tracking.get(&p).unwrap_or(&empty), period, max_sits);
                (p, priority)
            })
            .sorted_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(p, _)| p)
            .collect()
    }

    pub fn select(
        period: u32,
        pool: &[PlayerId],
        reserved: &[PlayerId],
        target: usize,
        tracking: &TrackingBook,
        config: &RotationConfig,
    ) -> RotationResult<BenchSelection> {
        let mut selection = BenchSelection::default();

        for player in pool.iter().filter(|p| reserved.contains(p)) {
            if selection.bench.len() >= target {
                warn!(
                    "period {}: planned sit for {} dropped, bench target is {}",
                    period, player, target
                );
                continue;
            }

            debug!("period {}: {} sits as planned", period, player);
            selection.bench.push(player.clone());
        }

        let empty = PlayerTracking::default();
        let ranked: Vec<(&PlayerId, &PlayerTracking)> = pool
            .iter()
            .filter(|p| !selection.bench.contains(p))
            .map(|p| (p, tracking.get(p).unwrap_or(&empty)))
            .map(|(p, record)| (p, record, Self::priority(record, period, config.max_sits)))
            .sorted_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(p, record, _)| (p, record))
            .collect();

        for pass in [Pass::Strict, Pass::AllowConsecutive, Pass::AllowOverCap] {
            if selection.bench.len() >= target {
                break;
            }

            for (player, record) in &ranked {
                if selection.bench.len() >= target {
                    break;
                }

                if selection.bench.contains(player) {
                    continue;
                }

                let within_cap = record.total_sits() < config.max_sits;
                let adjacent = record.adjacent_to_sit(period);

                let relaxed: &[RelaxedRule] = match pass {
                    Pass::Strict if within_cap && !adjacent => &[],
                    Pass::Strict => continue,
                    Pass::AllowConsecutive if within_cap => &[RelaxedRule::ConsecutiveSit],
                    Pass::AllowConsecutive => continue,
                    Pass::AllowOverCap if adjacent => {
                        &[RelaxedRule::ConsecutiveSit, RelaxedRule::SitCap]
                    }
                    Pass::AllowOverCap => &[RelaxedRule::SitCap],
                };

                for rule in relaxed {
                    let relaxation = Relaxation {
                        period,
                        player: (*player).clone(),
                        rule: *rule,
                    };

                    match rule {
                        RelaxedRule::ConsecutiveSit => warn!("relaxing rest rule: {}", relaxation),
                        RelaxedRule::SitCap => error!("relaxing sit cap: {}", relaxation),
                    }

                    selection.relaxations.push(relaxation);
                }

                selection.bench.push((*player).clone());
            }
        }

        if selection.bench.len() < target {
            error!(
                "period {}: bench target {} unreachable, {} seated",
                period,
                target,
                selection.bench.len()
            );

            return Err(RotationError::BenchSelectionFailed {
                period,
                target,
                selected: selection.bench.len(),
            });
        }

        debug!(
            "period {}: bench {}",
            period,
            selection.bench.iter().join(", ")
        );

        Ok(selection)
    }
}
