//! Spoken prompts and feedback lines for each game.

use crate::games::types::{EntryDetail, GameType, Outcome, Round};

/// Instruction spoken when a round starts or the child asks to hear it again
pub fn prompt(round: &Round) -> String {
    let target = &round.target;
    match (&round.game, &target.detail) {
        (GameType::Phonics, EntryDetail::Phonics { sound, .. }) => {
            format!("Find the letter that makes the {} sound.", sound)
        }
        (GameType::Numbers, _) => "Count the train cars. How many?".to_string(),
        (GameType::Shapes, _) => format!("Find the {}.", target.label),
        (GameType::Colors, _) => format!("Find the color {}.", target.label),
        _ => format!("Trace the {}.", target.label),
    }
}

/// Line spoken after an answer, or `None` when nothing should be said
pub fn feedback(round: &Round, outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Correct { .. } => Some(praise(round)),
        Outcome::Incorrect { reveal_hint: true, .. } => {
            Some(format!("Here is a clue: it is {}.", round.target.label))
        }
        Outcome::Incorrect { .. } => Some(retry(round.game).to_string()),
        Outcome::Ignored => None,
    }
}

fn praise(round: &Round) -> String {
    let target = &round.target;
    match (&round.game, &target.detail) {
        (GameType::Phonics, EntryDetail::Phonics { example, .. }) => {
            format!("Great job! {} is for {}.", target.label, example)
        }
        (GameType::Numbers, _) => format!("Yes! There are {}.", target.label),
        (GameType::Shapes, _) => format!("You found the {}.", target.label),
        (GameType::Colors, _) => format!("Yes! That's {}.", target.label),
        _ => format!("Lovely tracing! That's {}.", target.label),
    }
}

fn retry(game: GameType) -> &'static str {
    match game {
        GameType::Phonics => "Try again.",
        GameType::Numbers => "Not quite. Count again.",
        GameType::Shapes => "Try a different shape.",
        GameType::Colors => "Try another color.",
        GameType::Handwriting => "Trace slowly and stay on the guide!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::types::CatalogEntry;

    fn single(game: GameType, target: CatalogEntry) -> Round {
        Round::new(game, target.clone(), vec![target])
    }

    #[test]
    fn test_prompts() {
        let phonics = single(GameType::Phonics, CatalogEntry::phonics("S", "sss", "sun"));
        assert_eq!(prompt(&phonics), "Find the letter that makes the sss sound.");

        let numbers = single(GameType::Numbers, CatalogEntry::number(4));
        assert_eq!(prompt(&numbers), "Count the train cars. How many?");

        let shapes = single(GameType::Shapes, CatalogEntry::shape("star", "Star", "#ff5fa6"));
        assert_eq!(prompt(&shapes), "Find the Star.");

        let colors = single(GameType::Colors, CatalogEntry::color("Red", "#ff5a5f"));
        assert_eq!(prompt(&colors), "Find the color Red.");

        let trace = single(GameType::Handwriting, CatalogEntry::glyph("B"));
        assert_eq!(prompt(&trace), "Trace the B.");
    }

    #[test]
    fn test_feedback_lines() {
        let phonics = single(GameType::Phonics, CatalogEntry::phonics("C", "k", "cat"));
        let correct = Outcome::Correct { first_time: true };
        assert_eq!(feedback(&phonics, &correct).as_deref(), Some("Great job! C is for cat."));

        let numbers = single(GameType::Numbers, CatalogEntry::number(7));
        let wrong = Outcome::Incorrect { attempt_number: 1, reveal_hint: false };
        assert_eq!(feedback(&numbers, &wrong).as_deref(), Some("Not quite. Count again."));

        let hinted = Outcome::Incorrect { attempt_number: 2, reveal_hint: true };
        assert_eq!(feedback(&numbers, &hinted).as_deref(), Some("Here is a clue: it is 7."));

        assert_eq!(feedback(&numbers, &Outcome::Ignored), None);
    }
}
