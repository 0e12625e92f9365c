pub mod engine;

use crate::error::HubError;
use crate::theme::AccentTag;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

pub type GameId = String;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GameDescriptor
{
    pub id: GameId,
    pub name: String,
    pub category: String,
    pub player_range: String,
    pub description: String,
    pub thumbnail_ref: String,
    #[serde(default)]
    pub accent: AccentTag,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
}

/// Immutable, ordered set of games. Ids are unique.
#[derive(Clone, Debug, Default)]
pub struct Catalog
{
    games: Vec<GameDescriptor>,
}

impl Catalog
{
    pub fn new(games: Vec<GameDescriptor>) -> Result<Self, HubError>
    {
        let mut seen = HashSet::new();
        for game in &games {
            if game.id.is_empty() {
                return Err(HubError::Catalog(format!("game '{}' has an empty id", game.name)));
            }
            if !seen.insert(game.id.as_str()) {
                return Err(HubError::Catalog(format!("duplicate game id '{}'", game.id)));
            }
        }
        Ok(Self { games })
    }

    pub fn from_json(data: &str) -> Result<Self, HubError>
    {
        let games: Vec<GameDescriptor> = serde_json::from_str(data)
            .map_err(|err| HubError::Catalog(format!("invalid catalog JSON: {err}")))?;
        Self::new(games)
    }

    pub fn load(path: &Path) -> Result<Self, HubError>
    {
        let data = std::fs::read_to_string(path)
            .map_err(|err| HubError::Catalog(format!("failed to read {}: {err}", path.display())))?;
        Self::from_json(&data)
    }

    pub fn builtin() -> Self
    {
        Self {
            games: builtin_games(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&GameDescriptor>
    {
        self.games.iter().find(|game| game.id == id)
    }

    pub fn list(&self) -> &[GameDescriptor]
    {
        &self.games
    }

    pub fn position(&self, id: &str) -> Option<usize>
    {
        self.games.iter().position(|game| game.id == id)
    }

    pub fn contains(&self, id: &str) -> bool
    {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize
    {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.games.is_empty()
    }
}

fn game(
    id: &str,
    name: &str,
    category: &str,
    player_range: &str,
    description: &str,
    thumbnail_ref: &str,
    accent: AccentTag,
    rules: [&str; 4],
    objectives: [&str; 4],
) -> GameDescriptor
{
    GameDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        player_range: player_range.to_string(),
        description: description.to_string(),
        thumbnail_ref: thumbnail_ref.to_string(),
        accent,
        rules: rules.iter().map(|rule| rule.to_string()).collect(),
        objectives: objectives.iter().map(|goal| goal.to_string()).collect(),
    }
}

fn builtin_games() -> Vec<GameDescriptor>
{
    vec![
        game(
            "escape-lava",
            "Escape The Lava",
            "Solo/Team",
            "1-8 Players",
            "Race against time as the ground beneath you turns to molten rock",
            "https://github.com/ritesht04/ArcadeNexus/blob/main/attached_assets/escapeTheLava.jpg?raw=true",
            AccentTag::Primary,
            [
                "Stay on safe platforms - avoid the lava!",
                "Platforms disappear after 3 seconds",
                "Work together in team mode",
                "Last player standing wins",
            ],
            [
                "Survive as long as possible",
                "Reach the highest platform",
                "Help teammates in team mode",
                "Collect power-ups for advantages",
            ],
        ),
        game(
            "find-color",
            "Find The Color",
            "Competition",
            "2-12 Players",
            "Test your visual perception in this fast-paced color matching challenge",
            "https://github.com/ritesht04/ArcadeNexus/blob/main/attached_assets/findTheColor.jpg?raw=true",
            AccentTag::Secondary,
            [
                "Match the displayed color quickly",
                "Wrong answers eliminate you",
                "Speed increases each round",
                "Most accurate player wins",
            ],
            [
                "Identify colors correctly",
                "React as fast as possible",
                "Survive elimination rounds",
                "Achieve highest accuracy score",
            ],
        ),
        game(
            "red-light-green",
            "Red Light Green Light",
            "Team",
            "3-20 Players",
            "Classic childhood game reimagined with futuristic twists and challenges",
            "https://github.com/ritesht04/ArcadeNexus/blob/main/attached_assets/redLightGreenLight.jpg?raw=true",
            AccentTag::Accent,
            [
                "Move only on 'Green Light'",
                "Stop immediately on 'Red Light'",
                "Caught moving = eliminated",
                "First to finish line wins",
            ],
            [
                "Reach the finish line first",
                "Avoid being caught moving",
                "Work with your team",
                "Master the timing",
            ],
        ),
        game(
            "sharp-shooter",
            "Sharp Shooter",
            "Solo/Competition",
            "1-6 Players",
            "Precision targeting game that tests your accuracy and reflexes",
            "https://github.com/ritesht04/ArcadeNexus/blob/main/attached_assets/sharpShooter.jpg?raw=true",
            AccentTag::Primary,
            [
                "Hit targets with precision",
                "Different targets have different points",
                "Time limit for each round",
                "Highest score wins",
            ],
            [
                "Hit all targets accurately",
                "Score maximum points",
                "Complete rounds quickly",
                "Master different weapon types",
            ],
        ),
    ]
}
