use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Supported mini-games
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Phonics,
    Numbers,
    Shapes,
    Colors,
    Handwriting,
}

impl GameType {
    /// All games in tab order
    pub const ALL: [GameType; 5] = [
        GameType::Phonics,
        GameType::Numbers,
        GameType::Shapes,
        GameType::Colors,
        GameType::Handwriting,
    ];

    /// Position in `ALL`
    pub fn index(self) -> usize {
        match self {
            GameType::Phonics => 0,
            GameType::Numbers => 1,
            GameType::Shapes => 2,
            GameType::Colors => 3,
            GameType::Handwriting => 4,
        }
    }

    /// Number of options presented per round
    pub fn option_width(self) -> usize {
        match self {
            GameType::Numbers => 4,
            GameType::Handwriting => 1,
            GameType::Phonics | GameType::Shapes | GameType::Colors => 3,
        }
    }

    /// Whether the game is answered by picking one of several options
    pub fn is_choice(self) -> bool {
        self != GameType::Handwriting
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::Phonics => write!(f, "phonics"),
            GameType::Numbers => write!(f, "numbers"),
            GameType::Shapes => write!(f, "shapes"),
            GameType::Colors => write!(f, "colors"),
            GameType::Handwriting => write!(f, "handwriting"),
        }
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phonics" => Ok(GameType::Phonics),
            "numbers" => Ok(GameType::Numbers),
            "shapes" => Ok(GameType::Shapes),
            "colors" | "colours" => Ok(GameType::Colors),
            "handwriting" | "trace" => Ok(GameType::Handwriting),
            other => Err(format!("unknown game '{}'", other)),
        }
    }
}

/// Game-specific data carried by a catalog entry (discriminated union)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryDetail {
    Phonics { sound: String, example: String },
    Number { value: u32 },
    Shape { color: String },
    Color { value: String },
    Glyph,
}

/// Immutable catalog record. `id` is the identity key used for
/// deduplication and answer matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub detail: EntryDetail,
}

impl CatalogEntry {
    pub fn phonics(letter: &str, sound: &str, example: &str) -> Self {
        Self {
            id: letter.to_string(),
            label: letter.to_string(),
            detail: EntryDetail::Phonics {
                sound: sound.to_string(),
                example: example.to_string(),
            },
        }
    }

    pub fn number(value: u32) -> Self {
        Self {
            id: value.to_string(),
            label: value.to_string(),
            detail: EntryDetail::Number { value },
        }
    }

    pub fn shape(id: &str, label: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            detail: EntryDetail::Shape {
                color: color.to_string(),
            },
        }
    }

    pub fn color(name: &str, value: &str) -> Self {
        Self {
            id: name.to_string(),
            label: name.to_string(),
            detail: EntryDetail::Color {
                value: value.to_string(),
            },
        }
    }

    pub fn glyph(glyph: &str) -> Self {
        Self {
            id: glyph.to_string(),
            label: glyph.to_string(),
            detail: EntryDetail::Glyph,
        }
    }
}

/// One challenge awaiting a correct answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub round_id: Uuid,
    pub game: GameType,
    pub target: CatalogEntry,
    pub options: Vec<CatalogEntry>,
    pub wrong_attempts: u32,
    pub locked: bool,
    pub awarded: bool,
    pub started_at: DateTime<Utc>,
}

impl Round {
    /// Fresh, unlocked round
    pub fn new(game: GameType, target: CatalogEntry, options: Vec<CatalogEntry>) -> Self {
        Self {
            round_id: Uuid::new_v4(),
            game,
            target,
            options,
            wrong_attempts: 0,
            locked: false,
            awarded: false,
            started_at: Utc::now(),
        }
    }

    /// Find an option by identity key or display label (case-insensitive)
    pub fn find_option(&self, choice: &str) -> Option<&CatalogEntry> {
        let choice = choice.trim();
        self.options.iter().find(|entry| {
            entry.id.eq_ignore_ascii_case(choice) || entry.label.eq_ignore_ascii_case(choice)
        })
    }
}

/// Result of a single answer attempt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Outcome {
    Correct { first_time: bool },
    Incorrect { attempt_number: u32, reveal_hint: bool },
    /// Round was already locked; nothing changed
    Ignored,
}

impl Outcome {
    /// True only for the event that earns the round's point
    pub fn earns_point(&self) -> bool {
        matches!(self, Outcome::Correct { first_time: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_type_round_trips_through_str() {
        for game in GameType::ALL {
            assert_eq!(game.to_string().parse::<GameType>(), Ok(game));
        }
        assert_eq!("Colours".parse::<GameType>(), Ok(GameType::Colors));
        assert!("chess".parse::<GameType>().is_err());

        for (i, game) in GameType::ALL.iter().enumerate() {
            assert_eq!(game.index(), i);
        }
    }

    #[test]
    fn test_option_widths() {
        assert_eq!(GameType::Phonics.option_width(), 3);
        assert_eq!(GameType::Numbers.option_width(), 4);
        assert_eq!(GameType::Shapes.option_width(), 3);
        assert_eq!(GameType::Colors.option_width(), 3);
        assert!(!GameType::Handwriting.is_choice());
    }

    #[test]
    fn test_find_option_matches_id_or_label() {
        let round = Round::new(
            GameType::Shapes,
            CatalogEntry::shape("circle", "Circle", "#ffd166"),
            vec![
                CatalogEntry::shape("circle", "Circle", "#ffd166"),
                CatalogEntry::shape("star", "Star", "#ff5fa6"),
            ],
        );

        assert_eq!(round.find_option("STAR").map(|e| e.id.as_str()), Some("star"));
        assert_eq!(round.find_option(" Circle ").map(|e| e.id.as_str()), Some("circle"));
        assert!(round.find_option("oval").is_none());
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_value(Outcome::Incorrect {
            attempt_number: 2,
            reveal_hint: true,
        })
        .unwrap();

        assert_eq!(json["result"], "incorrect");
        assert_eq!(json["attempt_number"], 2);
        assert_eq!(json["reveal_hint"], true);
    }
}
