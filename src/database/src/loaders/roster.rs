use lineup_core::AvailabilityStatus;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const STATIC_ROSTERS_JSON: &str = include_str!("../data/rosters.json");

#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntity {
    pub name: String,
    pub players: Vec<PlayerEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEntity {
    pub name: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub preferred: Vec<String>,
    #[serde(default)]
    pub status: AvailabilityStatus,
}

pub struct RosterLoader;

impl RosterLoader {
    /// Rosters bundled with the binary.
    pub fn load() -> Result<Vec<RosterEntity>, String> {
        Self::load_from_str(STATIC_ROSTERS_JSON)
    }

    pub fn load_from_str(json: &str) -> Result<Vec<RosterEntity>, String> {
        let rosters: Vec<RosterEntity> =
            serde_json::from_str(json).map_err(|e| format!("invalid roster data: {}", e))?;

        debug!("loaded {} roster(s)", rosters.len());

        Ok(rosters)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<RosterEntity>, String> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

        Self::load_from_str(&json)
    }

    pub fn find<'a>(rosters: &'a [RosterEntity], name: &str) -> Option<&'a RosterEntity> {
        rosters.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_rosters_load() {
        let rosters = RosterLoader::load().unwrap();

        let demo = RosterLoader::find(&rosters, "demo").unwrap();
        assert_eq!(demo.players.len(), 12);
        assert_eq!(demo.players[0].name, "Ava");
        assert!(demo
            .players
            .iter()
            .all(|p| p.status == AvailabilityStatus::Available));

        let injuries = RosterLoader::find(&rosters, "Injuries").unwrap();
        assert_eq!(
            injuries
                .players
                .iter()
                .filter(|p| p.status == AvailabilityStatus::Injured)
                .count(),
            2
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let rosters = RosterLoader::load_from_str(
            r#"[{ "name": "tiny", "players": [{ "name": "Ava", "categories": ["All"] }] }]"#,
        )
        .unwrap();

        let player = &rosters[0].players[0];
        assert!(player.preferred.is_empty());
        assert_eq!(player.status, AvailabilityStatus::Available);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(RosterLoader::load_from_str("{ not json").is_err());
    }
}
