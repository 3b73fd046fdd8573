use crate::roster::{Player, PlayerId};
use crate::rotation::RotationConfig;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalkeeperBlock {
    pub keeper: PlayerId,
    pub first_period: u32,
    pub last_period: u32,
    /// False when the keeper was drafted in without goalkeeper eligibility.
    pub eligible: bool,
}

impl GoalkeeperBlock {
    pub fn periods(&self) -> RangeInclusive<u32> {
        self.first_period..=self.last_period
    }

    pub fn contains(&self, period: u32) -> bool {
        self.periods().contains(&period)
    }

    /// Period in which the keeper prepares the jersey, if the block does not open the game.
    pub fn jersey_period(&self) -> Option<u32> {
        (self.first_period > 1).then(|| self.first_period - 1)
    }
}

/// Keeper rotation plus every sit fixed before bench selection starts.
#[derive(Debug, Clone, Default)]
pub struct GoalkeeperPlan {
    pub blocks: Vec<GoalkeeperBlock>,
    pub sit_target: usize,
    jersey: BTreeMap<u32, Vec<PlayerId>>,
    reserved: BTreeMap<u32, Vec<PlayerId>>,
}

impl GoalkeeperPlan {
    pub fn block_for(&self, period: u32) -> Option<&GoalkeeperBlock> {
        self.blocks.iter().find(|b| b.contains(period))
    }

    pub fn keeper_for(&self, period: u32) -> Option<&PlayerId> {
        self.block_for(period).map(|b| &b.keeper)
    }

    pub fn jersey_for(&self, period: u32) -> &[PlayerId] {
        self.jersey.get(&period).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn reserved_for(&self, period: u32) -> &[PlayerId] {
        self.reserved.get(&period).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Jersey and reserved bench periods planned for `player`.
    pub fn planned_sits(&self, player: &PlayerId) -> BTreeSet<u32> {
        self.jersey
            .iter()
            .chain(self.reserved.iter())
            .filter(|(_, players)| players.contains(player))
            .map(|(period, _)| *period)
            .collect()
    }

    fn load(&self, period: u32) -> usize {
        self.jersey_for(period).len() + self.reserved_for(period).len()
    }
}

pub struct GoalkeeperPlanner;

impl GoalkeeperPlanner {
    pub fn plan(schedulable: &[&Player], forced_count: usize, config: &RotationConfig) -> GoalkeeperPlan {
        let keeper_count = config
            .goalkeeper_rotation
            .min(config.periods as usize)
            .min(schedulable.len());

        let keepers = Self::select_keepers(schedulable, keeper_count);
        let ranges = Self::partition(config.periods, keepers.len());

        let mut plan = GoalkeeperPlan {
            sit_target: Self::sit_target(schedulable.len(), forced_count, config),
            ..Default::default()
        };

        for ((keeper, eligible), (first_period, last_period)) in keepers.into_iter().zip(ranges) {
            let block = GoalkeeperBlock {
                keeper,
                first_period,
                last_period,
                eligible,
            };

            if let Some(period) = block.jersey_period() {
                plan.jersey.entry(period).or_default().push(block.keeper.clone());
            }

            debug!(
                "goalkeeper block: {} periods {}-{}",
                block.keeper, block.first_period, block.last_period
            );

            plan.blocks.push(block);
        }

        let spare = schedulable.len().saturating_sub(config.formation().len());
        Self::reserve_bench_periods(&mut plan, spare, forced_count, config);

        plan
    }

    /// Goalkeeper-eligible players in roster order, padded with the first
    /// remaining players when there are not enough of them.
    fn select_keepers(schedulable: &[&Player], count: usize) -> Vec<(PlayerId, bool)> {
        let mut keepers: Vec<(PlayerId, bool)> = schedulable
            .iter()
            .filter(|p| p.is_goalkeeper())
            .take(count)
            .map(|p| (p.id.clone(), true))
            .collect();

        if keepers.len() < count {
            warn!(
                "only {} goalkeeper-eligible players available, filling the rotation from the roster",
                keepers.len()
            );

            let fillers: Vec<(PlayerId, bool)> = schedulable
                .iter()
                .filter(|p| !keepers.iter().any(|(id, _)| id == &p.id))
                .take(count - keepers.len())
                .map(|p| (p.id.clone(), false))
                .collect();

            keepers.extend(fillers);
        }

        keepers
    }

    /// Contiguous cover of `1..=periods`; earlier blocks take the remainder.
    pub fn partition(periods: u32, keeper_count: usize) -> Vec<(u32, u32)> {
        if keeper_count == 0 {
            return Vec::new();
        }

        let keeper_count = keeper_count as u32;
        let base = periods / keeper_count;
        let remainder = periods % keeper_count;

        let mut start = 1;
        (0..keeper_count)
            .map(|idx| {
                let size = base + u32::from(idx < remainder);
                let range = (start, start + size - 1);
                start += size;
                range
            })
            .collect()
    }

    /// Sits every schedulable player should end up with, given the sit slots
    /// left after forced-bench players take theirs.
    fn sit_target(schedulable: usize, forced_count: usize, config: &RotationConfig) -> usize {
        if schedulable == 0 {
            return config.min_sits;
        }

        let periods = config.periods as usize;
        let sit_slots = (periods * config.sitting_quota).saturating_sub(periods * forced_count);

        sit_slots
            .div_ceil(schedulable)
            .clamp(config.min_sits, config.max_sits)
    }

    /// Books the keepers' remaining sits. `spare` is how many schedulable
    /// players a period can take off the field and still fill every slot.
    fn reserve_bench_periods(
        plan: &mut GoalkeeperPlan,
        spare: usize,
        forced_count: usize,
        config: &RotationConfig,
    ) {
        let blocks = plan.blocks.clone();

        for block in &blocks {
            let mut planned = plan.planned_sits(&block.keeper);
            let needed = plan.sit_target.saturating_sub(planned.len());

            for _ in 0..needed {
                let candidate = (1..=config.periods)
                    .filter(|period| !block.contains(*period))
                    .filter(|period| {
                        !planned.contains(period)
                            && !planned.contains(&(period + 1))
                            && !(*period > 1 && planned.contains(&(period - 1)))
                    })
                    .filter(|period| plan.load(*period) + forced_count < config.sitting_quota)
                    .filter(|period| plan.load(*period) < spare)
                    .min_by_key(|period| (plan.load(*period), *period));

                let Some(period) = candidate else {
                    warn!(
                        "no bench period left to reserve for goalkeeper {}",
                        block.keeper
                    );
                    break;
                };

                plan.reserved.entry(period).or_default().push(block.keeper.clone());
                planned.insert(period);

                debug!("reserved bench period {} for goalkeeper {}", period, block.keeper);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Categories;

    fn create_test_players(keepers: usize, total: usize) -> Vec<Player> {
        (0..total)
            .map(|idx| {
                let categories = if idx < keepers {
                    Categories::GOALKEEPER | Categories::DEFENSE
                } else {
                    Categories::OUTFIELD
                };

                Player::builder()
                    .id(format!("P{:02}", idx + 1))
                    .categories(categories)
                    .build()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_partition_covers_all_periods() {
        assert_eq!(GoalkeeperPlanner::partition(8, 3), vec![(1, 3), (4, 6), (7, 8)]);
        assert_eq!(GoalkeeperPlanner::partition(6, 3), vec![(1, 2), (3, 4), (5, 6)]);
        assert_eq!(GoalkeeperPlanner::partition(7, 3), vec![(1, 3), (4, 5), (6, 7)]);
        assert_eq!(GoalkeeperPlanner::partition(4, 1), vec![(1, 4)]);
        assert!(GoalkeeperPlanner::partition(4, 0).is_empty());
    }

    #[test]
    fn test_default_rotation_with_jersey_prep() {
        let players = create_test_players(3, 12);
        let refs: Vec<&Player> = players.iter().collect();

        let plan = GoalkeeperPlanner::plan(&refs, 0, &RotationConfig::default());

        assert_eq!(plan.keeper_for(1).map(PlayerId::as_str), Some("P01"));
        assert_eq!(plan.keeper_for(4).map(PlayerId::as_str), Some("P02"));
        assert_eq!(plan.keeper_for(8).map(PlayerId::as_str), Some("P03"));

        assert!(plan.jersey_for(1).is_empty());
        assert_eq!(plan.jersey_for(3), &[PlayerId::from("P02")]);
        assert_eq!(plan.jersey_for(6), &[PlayerId::from("P03")]);
        assert!(plan.blocks.iter().all(|b| b.eligible));
    }

    #[test]
    fn test_reserved_sits_keep_keepers_within_bounds() {
        let players = create_test_players(3, 12);
        let refs: Vec<&Player> = players.iter().collect();

        let plan = GoalkeeperPlanner::plan(&refs, 0, &RotationConfig::default());

        assert_eq!(plan.sit_target, 2);
        assert_eq!(plan.planned_sits(&"P01".into()), BTreeSet::from([4, 7]));
        assert_eq!(plan.planned_sits(&"P02".into()), BTreeSet::from([1, 3]));
        assert_eq!(plan.planned_sits(&"P03".into()), BTreeSet::from([2, 6]));

        for block in &plan.blocks {
            let sits: Vec<u32> = plan.planned_sits(&block.keeper).into_iter().collect();
            assert!(sits.iter().all(|p| !block.contains(*p)));
            assert!(sits.windows(2).all(|w| w[1] - w[0] > 1));
        }
    }

    #[test]
    fn test_missing_keepers_are_drafted_from_roster() {
        let players = create_test_players(1, 10);
        let refs: Vec<&Player> = players.iter().collect();

        let plan = GoalkeeperPlanner::plan(&refs, 0, &RotationConfig::default());

        let keepers: Vec<(&str, bool)> = plan
            .blocks
            .iter()
            .map(|b| (b.keeper.as_str(), b.eligible))
            .collect();
        assert_eq!(keepers, vec![("P01", true), ("P02", false), ("P03", false)]);
    }

    #[test]
    fn test_forced_bench_players_shrink_sit_target() {
        let players = create_test_players(3, 10);
        let refs: Vec<&Player> = players.iter().collect();

        let plan = GoalkeeperPlanner::plan(&refs, 2, &RotationConfig::default());

        assert_eq!(plan.sit_target, 1);
        assert_eq!(plan.planned_sits(&"P01".into()), BTreeSet::from([4]));
        assert_eq!(plan.planned_sits(&"P02".into()), BTreeSet::from([3]));
    }

    #[test]
    fn test_no_sits_reserved_when_field_needs_everyone() {
        let players = create_test_players(3, 9);
        let refs: Vec<&Player> = players.iter().collect();

        let plan = GoalkeeperPlanner::plan(&refs, 0, &RotationConfig::default());

        assert!((1..=8).all(|period| plan.reserved_for(period).is_empty()));
        assert_eq!(plan.planned_sits(&"P02".into()), BTreeSet::from([3]));
        assert_eq!(plan.planned_sits(&"P03".into()), BTreeSet::from([6]));
    }

    #[test]
    fn test_one_spare_player_limits_each_period_to_one_sit() {
        let players = create_test_players(3, 10);
        let refs: Vec<&Player> = players.iter().collect();

        let plan = GoalkeeperPlanner::plan(&refs, 0, &RotationConfig::default());

        for period in 1..=8 {
            assert!(plan.jersey_for(period).len() + plan.reserved_for(period).len() <= 1);
        }
    }
}
