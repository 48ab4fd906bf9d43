//! Round generation and answer judging shared by the choice games.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::errors::RoundError;
use crate::games::catalog::Catalog;
use crate::games::numbers;
use crate::games::types::{CatalogEntry, EntryDetail, GameType, Outcome, Round};

/// Wrong attempts after which the outcome reveals the target
pub const HINT_AFTER_WRONG_ATTEMPTS: u32 = 2;

/// Start a new round for the catalog's game.
///
/// The target is drawn uniformly from the catalog. Choice games get
/// `option_width` distinct options with the target included exactly once, in
/// random order. Handwriting rounds carry only the target.
pub fn start_round<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Result<Round, RoundError> {
    let game = catalog.game();

    let round = match game {
        GameType::Numbers => {
            let max = catalog
                .entries()
                .iter()
                .filter_map(|entry| match entry.detail {
                    EntryDetail::Number { value } => Some(value),
                    _ => None,
                })
                .max()
                .ok_or(RoundError::EmptyCatalog { game })?;
            numbers::start_round(max, rng)?
        }
        GameType::Handwriting => {
            let target = catalog
                .entries()
                .choose(rng)
                .cloned()
                .ok_or(RoundError::EmptyCatalog { game })?;
            Round::new(game, target.clone(), vec![target])
        }
        GameType::Phonics | GameType::Shapes | GameType::Colors => {
            let target = catalog
                .entries()
                .choose(rng)
                .cloned()
                .ok_or(RoundError::EmptyCatalog { game })?;
            let options = choice_options(catalog, &target, game.option_width(), rng)?;
            Round::new(game, target, options)
        }
    };

    tracing::debug!(
        round_id = %round.round_id,
        game = %game,
        target = %round.target.id,
        options = round.options.len(),
        "Started round"
    );

    Ok(round)
}

/// Target first, then `width - 1` random draws, deduplicated by id, padded with
/// fresh draws until `width` options exist, then shuffled.
fn choice_options<R: Rng + ?Sized>(
    catalog: &Catalog,
    target: &CatalogEntry,
    width: usize,
    rng: &mut R,
) -> Result<Vec<CatalogEntry>, RoundError> {
    let entries = catalog.entries();
    let distinct: HashSet<&str> = entries.iter().map(|entry| entry.id.as_str()).collect();
    if distinct.len() < width {
        return Err(RoundError::CatalogTooSmall {
            game: catalog.game(),
            len: distinct.len(),
            width,
        });
    }

    let mut options: Vec<CatalogEntry> = Vec::with_capacity(width);
    push_unique(&mut options, target);
    for _ in 1..width {
        if let Some(candidate) = entries.choose(rng) {
            push_unique(&mut options, candidate);
        }
    }

    while options.len() < width {
        if let Some(extra) = entries.choose(rng) {
            push_unique(&mut options, extra);
        }
    }

    options.shuffle(rng);
    Ok(options)
}

fn push_unique(options: &mut Vec<CatalogEntry>, candidate: &CatalogEntry) {
    if !options.iter().any(|existing| existing.id == candidate.id) {
        options.push(candidate.clone());
    }
}

/// Judge an answer against the round.
///
/// A locked round ignores every further attempt. `choice` is matched by id or
/// label; anything that is not one of the round's options is rejected without
/// counting as a wrong attempt.
pub fn submit_answer(round: &mut Round, choice: &str) -> Result<Outcome, RoundError> {
    if round.locked {
        return Ok(Outcome::Ignored);
    }
    if !round.game.is_choice() {
        return Err(RoundError::NotAChoiceGame(round.game));
    }

    let picked = round
        .find_option(choice)
        .map(|entry| entry.id.clone())
        .ok_or_else(|| RoundError::UnknownOption {
            game: round.game,
            choice: choice.to_string(),
        })?;

    let outcome = if picked == round.target.id {
        settle_correct(round)
    } else {
        round.wrong_attempts += 1;
        Outcome::Incorrect {
            attempt_number: round.wrong_attempts,
            reveal_hint: round.wrong_attempts >= HINT_AFTER_WRONG_ATTEMPTS,
        }
    };

    tracing::info!(
        round_id = %round.round_id,
        game = %round.game,
        choice = %picked,
        outcome = ?outcome,
        "Answer judged"
    );

    Ok(outcome)
}

/// Mark the round won and lock it
pub(crate) fn settle_correct(round: &mut Round) -> Outcome {
    let first_time = !round.awarded;
    round.awarded = true;
    round.locked = true;
    Outcome::Correct { first_time }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wrong_choice(round: &Round) -> String {
        round
            .options
            .iter()
            .find(|entry| entry.id != round.target.id)
            .map(|entry| entry.id.clone())
            .unwrap()
    }

    #[test]
    fn test_options_contain_target_once_with_fixed_width() {
        for game in [GameType::Phonics, GameType::Numbers, GameType::Shapes, GameType::Colors] {
            let catalog = Catalog::for_game(game);
            for seed in 0..200 {
                let mut rng = StdRng::seed_from_u64(seed);
                let round = start_round(&catalog, &mut rng).unwrap();

                assert_eq!(round.options.len(), game.option_width(), "{game} seed {seed}");
                let hits = round.options.iter().filter(|o| o.id == round.target.id).count();
                assert_eq!(hits, 1, "{game} seed {seed}");

                let ids: HashSet<_> = round.options.iter().map(|o| o.id.as_str()).collect();
                assert_eq!(ids.len(), round.options.len(), "{game} seed {seed}");
            }
        }
    }

    #[test]
    fn test_new_round_starts_unlocked() {
        let mut rng = StdRng::seed_from_u64(7);
        let round = start_round(&Catalog::colors(), &mut rng).unwrap();

        assert_eq!(round.wrong_attempts, 0);
        assert!(!round.locked);
        assert!(!round.awarded);
    }

    #[test]
    fn test_target_is_eventually_every_entry() {
        let catalog = Catalog::shapes();
        let mut rng = StdRng::seed_from_u64(11);
        let seen: HashSet<String> = (0..300)
            .map(|_| start_round(&catalog, &mut rng).unwrap().target.id)
            .collect();
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn test_correct_answer_locks_and_awards_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut round = start_round(&Catalog::phonics(), &mut rng).unwrap();
        let target = round.target.id.clone();

        assert_eq!(
            submit_answer(&mut round, &target),
            Ok(Outcome::Correct { first_time: true })
        );
        assert!(round.locked);
        assert!(round.awarded);

        for _ in 0..5 {
            assert_eq!(submit_answer(&mut round, &target), Ok(Outcome::Ignored));
        }
        assert!(round.awarded);
    }

    #[test]
    fn test_locked_round_ignores_wrong_answers() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut round = start_round(&Catalog::shapes(), &mut rng).unwrap();
        let target = round.target.id.clone();
        let wrong = wrong_choice(&round);

        submit_answer(&mut round, &target).unwrap();
        assert_eq!(submit_answer(&mut round, &wrong), Ok(Outcome::Ignored));
        assert_eq!(round.wrong_attempts, 0);
    }

    #[test]
    fn test_hint_after_second_wrong_attempt() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut round = start_round(&Catalog::colors(), &mut rng).unwrap();
        let wrong = wrong_choice(&round);

        assert_eq!(
            submit_answer(&mut round, &wrong),
            Ok(Outcome::Incorrect { attempt_number: 1, reveal_hint: false })
        );
        assert_eq!(
            submit_answer(&mut round, &wrong),
            Ok(Outcome::Incorrect { attempt_number: 2, reveal_hint: true })
        );
        assert_eq!(
            submit_answer(&mut round, &wrong),
            Ok(Outcome::Incorrect { attempt_number: 3, reveal_hint: true })
        );
        assert!(!round.locked);

        let target = round.target.label.clone();
        assert_eq!(
            submit_answer(&mut round, &target),
            Ok(Outcome::Correct { first_time: true })
        );
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut round = start_round(&Catalog::colors(), &mut rng).unwrap();

        let err = submit_answer(&mut round, "Turquoise").unwrap_err();
        assert!(matches!(err, RoundError::UnknownOption { .. }));
        assert_eq!(round.wrong_attempts, 0);
    }

    #[test]
    fn test_handwriting_round_rejects_choices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut round = start_round(&Catalog::handwriting(), &mut rng).unwrap();

        assert_eq!(round.options, vec![round.target.clone()]);
        assert_eq!(
            submit_answer(&mut round, "A"),
            Err(RoundError::NotAChoiceGame(GameType::Handwriting))
        );
    }

    #[test]
    fn test_small_catalog_is_rejected() {
        let catalog = Catalog::new(
            GameType::Colors,
            vec![CatalogEntry::color("Red", "#f00"), CatalogEntry::color("Red", "#f00")],
        );
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            start_round(&catalog, &mut rng).unwrap_err(),
            RoundError::CatalogTooSmall { game: GameType::Colors, len: 1, width: 3 }
        );
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let catalog = Catalog::new(GameType::Phonics, Vec::new());
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            start_round(&catalog, &mut rng).unwrap_err(),
            RoundError::EmptyCatalog { game: GameType::Phonics }
        );
    }
}
