use crate::roster::{Categories, Position, PositionCategory};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        PlayerId(value.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        PlayerId(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub categories: Categories,
    pub preferred_positions: Vec<Position>,
}

impl Player {
    pub fn builder() -> PlayerBuilder {
        PlayerBuilder::new()
    }

    pub fn can_play(&self, position: Position) -> bool {
        self.categories.allows(position.category())
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.categories.allows(PositionCategory::Goalkeeper)
    }
}

// Builder for Player
#[derive(Default)]
pub struct PlayerBuilder {
    id: Option<PlayerId>,
    categories: Option<Categories>,
    preferred_positions: Option<Vec<Position>>,
}

impl PlayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<PlayerId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn categories(mut self, categories: Categories) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn preferred_positions(mut self, preferred_positions: Vec<Position>) -> Self {
        self.preferred_positions = Some(preferred_positions);
        self
    }

    pub fn build(self) -> Result<Player, String> {
        let id = self.id.ok_or("id is required")?;
        if id.as_str().trim().is_empty() {
            return Err("id must not be blank".to_string());
        }

        Ok(Player {
            id,
            categories: self.categories.unwrap_or(Categories::OUTFIELD),
            preferred_positions: self.preferred_positions.unwrap_or_default(),
        })
    }
}

/// Read-only view of the squad the scheduler works from.
pub trait RosterProvider {
    fn player_names(&self) -> Vec<PlayerId>;

    fn can_play_position(&self, player: &PlayerId, position: Position) -> bool;

    fn preferred_positions(&self, player: &PlayerId) -> Vec<Position>;

    fn categories(&self, player: &PlayerId) -> Categories;
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Result<Self, String> {
        for (idx, player) in players.iter().enumerate() {
            if players[..idx].iter().any(|p| p.id == player.id) {
                return Err(format!("duplicate player id: {}", player.id));
            }
        }

        Ok(Roster { players })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl RosterProvider for Roster {
    fn player_names(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    fn can_play_position(&self, player: &PlayerId, position: Position) -> bool {
        self.get(player).is_some_and(|p| p.can_play(position))
    }

    fn preferred_positions(&self, player: &PlayerId) -> Vec<Position> {
        self.get(player)
            .map(|p| p.preferred_positions.clone())
            .unwrap_or_default()
    }

    fn categories(&self, player: &PlayerId) -> Categories {
        self.get(player)
            .map(|p| p.categories)
            .unwrap_or_else(Categories::empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_player(id: &str, categories: Categories) -> Player {
        Player::builder()
            .id(id)
            .categories(categories)
            .preferred_positions(vec![Position::LeftWing])
            .build()
            .expect("Failed to build test player")
    }

    #[test]
    fn test_builder_requires_id() {
        assert!(PlayerBuilder::new().build().is_err());
        assert!(Player::builder().id("  ").build().is_err());
    }

    #[test]
    fn test_builder_defaults_to_outfield() {
        let player = Player::builder().id("Ava").build().unwrap();

        assert_eq!(player.categories, Categories::OUTFIELD);
        assert!(player.preferred_positions.is_empty());
        assert!(!player.is_goalkeeper());
    }

    #[test]
    fn test_can_play_position_follows_categories() {
        let roster = Roster::new(vec![
            create_test_player("Wing", Categories::WING),
            create_test_player("Any", Categories::ANY),
        ])
        .unwrap();

        assert!(roster.can_play_position(&"Wing".into(), Position::LeftWing));
        assert!(!roster.can_play_position(&"Wing".into(), Position::Goalkeeper));
        assert!(roster.can_play_position(&"Any".into(), Position::Goalkeeper));
        assert!(!roster.can_play_position(&"Nobody".into(), Position::LeftWing));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = Roster::new(vec![
            create_test_player("Ava", Categories::WING),
            create_test_player("Ava", Categories::BACK),
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_roster_order() {
        let roster = Roster::new(vec![
            create_test_player("Ava", Categories::WING),
            create_test_player("Ben", Categories::BACK),
        ])
        .unwrap();

        assert!(roster.get(&"Zed".into()).is_none());
        assert_eq!(roster.player_names(), vec![PlayerId::from("Ava"), PlayerId::from("Ben")]);
    }
}
