use crate::loaders::RosterEntity;
use lineup_core::{
    AvailabilityBook, AvailabilityStatus, Categories, Formation, Player, Position, PositionCategory,
    Roster,
};
use log::debug;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const OUTFIELD_CATEGORIES: [PositionCategory; 5] = [
    PositionCategory::Striker,
    PositionCategory::Wing,
    PositionCategory::Midfield,
    PositionCategory::Back,
    PositionCategory::Defense,
];

const RANDOM_KEEPERS: usize = 3;

pub struct RosterGenerator;

impl RosterGenerator {
    pub fn generate(entity: &RosterEntity) -> Result<(Roster, AvailabilityBook), String> {
        let mut availability = AvailabilityBook::new();

        let players = entity
            .players
            .iter()
            .map(|p| {
                let preferred = p
                    .preferred
                    .iter()
                    .map(|tag| tag.parse::<Position>())
                    .collect::<Result<Vec<Position>, String>>()
                    .map_err(|e| format!("{}: {}", p.name, e))?;

                let categories =
                    Categories::from_tags(&p.categories).map_err(|e| format!("{}: {}", p.name, e))?;

                availability.set(p.name.as_str(), p.status);

                Player::builder()
                    .id(p.name.as_str())
                    .categories(categories)
                    .preferred_positions(preferred)
                    .build()
            })
            .collect::<Result<Vec<Player>, String>>()?;

        let roster = Roster::new(players)?;

        debug!("roster {}: {} players", entity.name, roster.len());

        Ok((roster, availability))
    }

    /// Seeded random squad. The first three players can keep goal and every
    /// player prefers one or two positions they are cleared for.
    pub fn random(seed: u64, size: usize) -> Result<(Roster, AvailabilityBook), String> {
        let mut rng = StdRng::seed_from_u64(seed);
        let formation = Formation::default();
        let mut availability = AvailabilityBook::new();

        let players: Vec<Player> = (0..size)
            .map(|idx| {
                let id = format!("Player {:02}", idx + 1);

                let wanted = rng.random_range(1..=3usize);
                let mut categories = Categories::empty();
                while categories.count() < wanted {
                    let pick = OUTFIELD_CATEGORIES[rng.random_range(0..OUTFIELD_CATEGORIES.len())];
                    categories |= pick.flag();
                }
                if idx < RANDOM_KEEPERS {
                    categories |= Categories::GOALKEEPER;
                }

                let eligible: Vec<Position> = formation
                    .outfield()
                    .filter(|p| categories.allows(p.category()))
                    .collect();

                let mut preferred = Vec::new();
                for _ in 0..rng.random_range(1..=2) {
                    if eligible.is_empty() {
                        break;
                    }
                    let pick = eligible[rng.random_range(0..eligible.len())];
                    if !preferred.contains(&pick) {
                        preferred.push(pick);
                    }
                }

                if rng.random_range(0..10) == 0 {
                    availability.set(id.as_str(), AvailabilityStatus::Late);
                }

                Player {
                    id: id.into(),
                    categories,
                    preferred_positions: preferred,
                }
            })
            .collect();

        let roster = Roster::new(players)?;

        debug!("random roster {}: {} players", seed, roster.len());

        Ok((roster, availability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::RosterLoader;
    use lineup_core::{AvailabilityProvider, PlayerId, RosterProvider};

    #[test]
    fn test_generate_bundled_demo() {
        let rosters = RosterLoader::load().unwrap();
        let demo = RosterLoader::find(&rosters, "demo").unwrap();

        let (roster, _) = RosterGenerator::generate(demo).unwrap();

        assert_eq!(roster.len(), 12);
        assert!(roster.can_play_position(&"Ava".into(), Position::Goalkeeper));
        assert!(!roster.can_play_position(&"Dana".into(), Position::Goalkeeper));
        assert!(roster.can_play_position(&"Lea".into(), Position::Goalkeeper));
        assert_eq!(
            roster.preferred_positions(&"Eli".into()),
            vec![Position::RightBack, Position::CenterBack]
        );
    }

    #[test]
    fn test_generate_keeps_statuses() {
        let rosters = RosterLoader::load().unwrap();
        let entity = RosterLoader::find(&rosters, "injuries").unwrap();

        let (_, availability) = RosterGenerator::generate(entity).unwrap();

        assert_eq!(availability.availability(&"Dana".into()), AvailabilityStatus::Injured);
        assert_eq!(availability.availability(&"Hugo".into()), AvailabilityStatus::Late);
        assert_eq!(availability.availability(&"Ava".into()), AvailabilityStatus::Available);
    }

    #[test]
    fn test_unknown_tags_are_rejected() {
        let rosters = RosterLoader::load_from_str(
            r#"[{ "name": "bad", "players": [{ "name": "Ava", "categories": ["Libero"] }] }]"#,
        )
        .unwrap();

        let err = RosterGenerator::generate(&rosters[0]).unwrap_err();
        assert!(err.starts_with("Ava:"));

        let rosters = RosterLoader::load_from_str(
            r#"[{ "name": "bad", "players": [{ "name": "Ava", "categories": ["All"], "preferred": ["sweeper"] }] }]"#,
        )
        .unwrap();

        assert!(RosterGenerator::generate(&rosters[0]).is_err());
    }

    #[test]
    fn test_random_is_reproducible() {
        let (first, _) = RosterGenerator::random(42, 14).unwrap();
        let (second, _) = RosterGenerator::random(42, 14).unwrap();

        assert_eq!(first.players(), second.players());
        assert_eq!(first.len(), 14);
        assert!(first.players()[..3].iter().all(|p| p.is_goalkeeper()));
        assert!(first
            .players()
            .iter()
            .all(|p| p.preferred_positions.iter().all(|pos| p.can_play(*pos))));
        assert_eq!(first.players()[0].id, PlayerId::from("Player 01"));
    }
}
