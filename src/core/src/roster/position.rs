use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PositionCategory {
    Striker,
    Wing,
    Midfield,
    Back,
    Defense,
    Goalkeeper,
}

impl PositionCategory {
    pub const ALL: [PositionCategory; 6] = [
        PositionCategory::Striker,
        PositionCategory::Wing,
        PositionCategory::Midfield,
        PositionCategory::Back,
        PositionCategory::Defense,
        PositionCategory::Goalkeeper,
    ];

    pub fn flag(self) -> Categories {
        match self {
            PositionCategory::Striker => Categories::STRIKER,
            PositionCategory::Wing => Categories::WING,
            PositionCategory::Midfield => Categories::MIDFIELD,
            PositionCategory::Back => Categories::BACK,
            PositionCategory::Defense => Categories::DEFENSE,
            PositionCategory::Goalkeeper => Categories::GOALKEEPER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PositionCategory::Striker => "Striker",
            PositionCategory::Wing => "Wing",
            PositionCategory::Midfield => "Midfield",
            PositionCategory::Back => "Back",
            PositionCategory::Defense => "Defense",
            PositionCategory::Goalkeeper => "Goalkeeper",
        }
    }
}

impl Display for PositionCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for PositionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();

        PositionCategory::ALL
            .iter()
            .find(|category| category.name().eq_ignore_ascii_case(tag))
            .copied()
            .or_else(|| match tag.to_ascii_lowercase().as_str() {
                "gk" | "keeper" => Some(PositionCategory::Goalkeeper),
                "forward" => Some(PositionCategory::Striker),
                "defender" => Some(PositionCategory::Defense),
                _ => None,
            })
            .ok_or_else(|| format!("unknown position category: {}", tag))
    }
}

bitflags! {
    /// Set of position categories a player is cleared to play.
    ///
    /// `ANY` and `OUTFIELD` stand in for the "All" and "All except GK" roster tags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Categories: u8 {
        const STRIKER = 1 << 0;
        const WING = 1 << 1;
        const MIDFIELD = 1 << 2;
        const BACK = 1 << 3;
        const DEFENSE = 1 << 4;
        const GOALKEEPER = 1 << 5;

        const OUTFIELD = Self::STRIKER.bits()
            | Self::WING.bits()
            | Self::MIDFIELD.bits()
            | Self::BACK.bits()
            | Self::DEFENSE.bits();
        const ANY = Self::OUTFIELD.bits() | Self::GOALKEEPER.bits();
    }
}

impl Categories {
    /// Parses roster tags such as `["Wing", "Striker"]` or `["All except GK"]`.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Result<Categories, String> {
        let mut categories = Categories::empty();

        for tag in tags {
            let tag = tag.as_ref().trim();
            let normalized = tag.to_ascii_lowercase();

            categories |= match normalized.as_str() {
                "all" | "any" => Categories::ANY,
                "all except gk" | "all-except-gk" | "outfield" => Categories::OUTFIELD,
                _ => tag.parse::<PositionCategory>()?.flag(),
            };
        }

        Ok(categories)
    }

    pub fn allows(&self, category: PositionCategory) -> bool {
        self.contains(category.flag())
    }

    pub fn count(&self) -> usize {
        self.bits().count_ones() as usize
    }

    pub fn categories(&self) -> impl Iterator<Item = PositionCategory> + '_ {
        PositionCategory::ALL
            .iter()
            .copied()
            .filter(|category| self.allows(*category))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Goalkeeper,
    LeftBack,
    LeftCenterBack,
    CenterBack,
    RightCenterBack,
    RightBack,
    LeftWing,
    LeftCenterMidfield,
    CenterMidfield,
    RightCenterMidfield,
    RightWing,
    LeftStriker,
    Striker,
    RightStriker,
}

impl Position {
    pub const ALL: [Position; 14] = [
        Position::Goalkeeper,
        Position::LeftBack,
        Position::LeftCenterBack,
        Position::CenterBack,
        Position::RightCenterBack,
        Position::RightBack,
        Position::LeftWing,
        Position::LeftCenterMidfield,
        Position::CenterMidfield,
        Position::RightCenterMidfield,
        Position::RightWing,
        Position::LeftStriker,
        Position::Striker,
        Position::RightStriker,
    ];

    pub fn category(self) -> PositionCategory {
        match self {
            Position::Goalkeeper => PositionCategory::Goalkeeper,
            Position::LeftBack | Position::RightBack => PositionCategory::Back,
            Position::LeftCenterBack | Position::CenterBack | Position::RightCenterBack => {
                PositionCategory::Defense
            }
            Position::LeftWing | Position::RightWing => PositionCategory::Wing,
            Position::LeftCenterMidfield
            | Position::CenterMidfield
            | Position::RightCenterMidfield => PositionCategory::Midfield,
            Position::LeftStriker | Position::Striker | Position::RightStriker => {
                PositionCategory::Striker
            }
        }
    }

    pub fn is_goalkeeper(self) -> bool {
        self == Position::Goalkeeper
    }

    pub fn name(self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeeper",
            Position::LeftBack => "left-back",
            Position::LeftCenterBack => "left-center-back",
            Position::CenterBack => "center-back",
            Position::RightCenterBack => "right-center-back",
            Position::RightBack => "right-back",
            Position::LeftWing => "left-wing",
            Position::LeftCenterMidfield => "left-center-midfield",
            Position::CenterMidfield => "center-midfield",
            Position::RightCenterMidfield => "right-center-midfield",
            Position::RightWing => "right-wing",
            Position::LeftStriker => "left-striker",
            Position::Striker => "striker",
            Position::RightStriker => "right-striker",
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Position::ALL
            .iter()
            .find(|position| position.name().eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| format!("unknown position: {}", name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SquadSize {
    FourVFour,
    SevenVSeven,
    #[default]
    NineVNine,
    ElevenVEleven,
}

const FOUR_V_FOUR: &[Position] = &[
    Position::Goalkeeper,
    Position::CenterBack,
    Position::CenterMidfield,
    Position::Striker,
];

const SEVEN_V_SEVEN: &[Position] = &[
    Position::Goalkeeper,
    Position::LeftBack,
    Position::RightBack,
    Position::LeftWing,
    Position::CenterMidfield,
    Position::RightWing,
    Position::Striker,
];

const NINE_V_NINE: &[Position] = &[
    Position::Goalkeeper,
    Position::LeftBack,
    Position::CenterBack,
    Position::RightBack,
    Position::LeftWing,
    Position::CenterMidfield,
    Position::RightWing,
    Position::LeftStriker,
    Position::RightStriker,
];

const ELEVEN_V_ELEVEN: &[Position] = &[
    Position::Goalkeeper,
    Position::LeftBack,
    Position::LeftCenterBack,
    Position::RightCenterBack,
    Position::RightBack,
    Position::LeftWing,
    Position::LeftCenterMidfield,
    Position::RightCenterMidfield,
    Position::RightWing,
    Position::LeftStriker,
    Position::RightStriker,
];

/// Ordered set of slots filled every period, exactly one of them the goalkeeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formation {
    positions: Vec<Position>,
}

impl Formation {
    pub fn new(positions: Vec<Position>) -> Result<Self, String> {
        let keepers = positions.iter().filter(|p| p.is_goalkeeper()).count();
        if keepers != 1 {
            return Err(format!(
                "formation needs exactly one goalkeeper slot, found {}",
                keepers
            ));
        }

        for (idx, position) in positions.iter().enumerate() {
            if positions[..idx].contains(position) {
                return Err(format!("formation lists {} twice", position));
            }
        }

        Ok(Formation { positions })
    }

    pub fn for_squad(size: SquadSize) -> Self {
        let positions = match size {
            SquadSize::FourVFour => FOUR_V_FOUR,
            SquadSize::SevenVSeven => SEVEN_V_SEVEN,
            SquadSize::NineVNine => NINE_V_NINE,
            SquadSize::ElevenVEleven => ELEVEN_V_ELEVEN,
        };

        Formation {
            positions: positions.to_vec(),
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn outfield(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied().filter(|p| !p.is_goalkeeper())
    }

    pub fn outfield_count(&self) -> usize {
        self.positions.len() - 1
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }
}

impl Default for Formation {
    fn default() -> Self {
        Formation::for_squad(SquadSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_tags_map_to_flag_sets() {
        assert_eq!(Categories::from_tags(&["All"]).unwrap(), Categories::ANY);
        assert_eq!(
            Categories::from_tags(&["All except GK"]).unwrap(),
            Categories::OUTFIELD
        );
        assert!(!Categories::OUTFIELD.allows(PositionCategory::Goalkeeper));
        assert_eq!(Categories::ANY.count(), 6);
    }

    #[test]
    fn test_tags_are_combined() {
        let categories = Categories::from_tags(&["Wing", "striker"]).unwrap();

        assert!(categories.allows(PositionCategory::Wing));
        assert!(categories.allows(PositionCategory::Striker));
        assert!(!categories.allows(PositionCategory::Back));
        assert_eq!(categories.count(), 2);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!(Categories::from_tags(&["Sweeper"]).is_err());
    }

    #[test]
    fn test_position_names_parse_back() {
        for position in Position::ALL {
            assert_eq!(position.name().parse::<Position>(), Ok(position));
        }
    }

    #[test]
    fn test_squad_presets_have_one_goalkeeper() {
        for size in [
            SquadSize::FourVFour,
            SquadSize::SevenVSeven,
            SquadSize::NineVNine,
            SquadSize::ElevenVEleven,
        ] {
            let formation = Formation::for_squad(size);
            assert!(Formation::new(formation.positions().to_vec()).is_ok());
        }

        assert_eq!(Formation::default().len(), 9);
        assert_eq!(Formation::default().outfield_count(), 8);
    }

    #[test]
    fn test_formation_without_goalkeeper_is_rejected() {
        assert!(Formation::new(vec![Position::Striker, Position::CenterBack]).is_err());
        assert!(
            Formation::new(vec![
                Position::Goalkeeper,
                Position::Striker,
                Position::Striker
            ])
            .is_err()
        );
    }
}
