//! Fixed catalogs of round targets, one per mini-game.

use crate::games::types::{CatalogEntry, GameType};

/// Highest number the counting game asks for
pub const MAX_NUMBER: u32 = 10;

const PHONICS: [(&str, &str, &str); 8] = [
    ("S", "sss", "sun"),
    ("A", "a", "apple"),
    ("T", "t", "tiger"),
    ("P", "p", "pig"),
    ("I", "i", "igloo"),
    ("N", "n", "nest"),
    ("C", "k", "cat"),
    ("E", "e", "egg"),
];

const SHAPES: [(&str, &str, &str); 6] = [
    ("circle", "Circle", "#ffd166"),
    ("square", "Square", "#5ad8ff"),
    ("triangle", "Triangle", "#ff7a1a"),
    ("star", "Star", "#ff5fa6"),
    ("rectangle", "Rectangle", "#5ee6b8"),
    ("oval", "Oval", "#c9f2ff"),
];

const COLORS: [(&str, &str); 7] = [
    ("Red", "#ff5a5f"),
    ("Blue", "#4dabff"),
    ("Green", "#55e3a1"),
    ("Yellow", "#ffd166"),
    ("Orange", "#ff8a3d"),
    ("Pink", "#ff5fa6"),
    ("Purple", "#9f8bff"),
];

const TRACE_GLYPHS: [&str; 11] = ["A", "B", "C", "S", "T", "P", "1", "2", "3", "4", "5"];

/// List of possible targets for a mini-game
#[derive(Debug, Clone)]
pub struct Catalog {
    game: GameType,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from arbitrary entries
    pub fn new(game: GameType, entries: Vec<CatalogEntry>) -> Self {
        Self { game, entries }
    }

    /// Built-in catalog for a game
    pub fn for_game(game: GameType) -> Self {
        match game {
            GameType::Phonics => Self::phonics(),
            GameType::Numbers => Self::numbers(MAX_NUMBER),
            GameType::Shapes => Self::shapes(),
            GameType::Colors => Self::colors(),
            GameType::Handwriting => Self::handwriting(),
        }
    }

    pub fn phonics() -> Self {
        let entries = PHONICS
            .iter()
            .map(|(letter, sound, example)| CatalogEntry::phonics(letter, sound, example))
            .collect();
        Self::new(GameType::Phonics, entries)
    }

    /// Integers 1..=max
    pub fn numbers(max: u32) -> Self {
        Self::new(GameType::Numbers, (1..=max).map(CatalogEntry::number).collect())
    }

    pub fn shapes() -> Self {
        let entries = SHAPES
            .iter()
            .map(|(id, label, color)| CatalogEntry::shape(id, label, color))
            .collect();
        Self::new(GameType::Shapes, entries)
    }

    pub fn colors() -> Self {
        let entries = COLORS
            .iter()
            .map(|(name, value)| CatalogEntry::color(name, value))
            .collect();
        Self::new(GameType::Colors, entries)
    }

    pub fn handwriting() -> Self {
        Self::new(
            GameType::Handwriting,
            TRACE_GLYPHS.iter().map(|g| CatalogEntry::glyph(g)).collect(),
        )
    }

    pub fn game(&self) -> GameType {
        self.game
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_sizes() {
        assert_eq!(Catalog::phonics().len(), 8);
        assert_eq!(Catalog::numbers(MAX_NUMBER).len(), 10);
        assert_eq!(Catalog::shapes().len(), 6);
        assert_eq!(Catalog::colors().len(), 7);
        assert_eq!(Catalog::handwriting().len(), 11);
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        for game in GameType::ALL {
            let catalog = Catalog::for_game(game);
            let ids: HashSet<_> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids.len(), catalog.len(), "duplicate ids in {game}");
            assert_eq!(catalog.game(), game);
        }
    }
}
