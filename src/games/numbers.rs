//! Counting game: the target is a number of train cars, the options are the
//! target, its neighbours and one random number.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::RoundError;
use crate::games::types::{CatalogEntry, GameType, Round};

const WIDTH: usize = 4;

/// Start a counting round with a target in `1..=max`
pub fn start_round<R: Rng + ?Sized>(max: u32, rng: &mut R) -> Result<Round, RoundError> {
    if max < WIDTH as u32 {
        return Err(RoundError::NumberRangeTooSmall {
            game: GameType::Numbers,
            max,
        });
    }

    let target = rng.gen_range(1..=max);
    let options = number_options(target, max, rng)
        .into_iter()
        .map(CatalogEntry::number)
        .collect();

    Ok(Round::new(GameType::Numbers, CatalogEntry::number(target), options))
}

/// Target, target-1 and target+1 clamped to `1..=max`, plus one random draw.
/// Clamping can collapse neighbours onto each other, so the list is
/// deduplicated and refilled with random numbers until it holds exactly four.
/// Callers guarantee `max >= 4`.
fn number_options<R: Rng + ?Sized>(target: u32, max: u32, rng: &mut R) -> Vec<u32> {
    let candidates = [
        target,
        target.saturating_sub(1).max(1),
        target.saturating_add(1).min(max),
        rng.gen_range(1..=max),
    ];

    let mut options: Vec<u32> = Vec::with_capacity(WIDTH);
    for value in candidates {
        if !options.contains(&value) {
            options.push(value);
        }
    }

    while options.len() < WIDTH {
        let extra = rng.gen_range(1..=max);
        if !options.contains(&extra) {
            options.push(extra);
        }
    }

    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::catalog::MAX_NUMBER;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lower_bound_is_clamped_to_one() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = number_options(1, MAX_NUMBER, &mut rng);

            assert_eq!(options.len(), 4);
            assert!(options.contains(&1));
            assert!(options.contains(&2));
            assert!(!options.contains(&0));
        }
    }

    #[test]
    fn test_upper_bound_is_clamped_to_max() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = number_options(MAX_NUMBER, MAX_NUMBER, &mut rng);

            assert_eq!(options.len(), 4);
            assert!(options.contains(&MAX_NUMBER));
            assert!(options.contains(&(MAX_NUMBER - 1)));
            assert!(options.iter().all(|&v| (1..=MAX_NUMBER).contains(&v)));
        }
    }

    #[test]
    fn test_largest_number_does_not_overflow() {
        let mut rng = StdRng::seed_from_u64(13);
        let options = number_options(u32::MAX, u32::MAX, &mut rng);

        assert_eq!(options.len(), 4);
        assert!(options.contains(&u32::MAX));
        assert!(options.contains(&(u32::MAX - 1)));
    }

    #[test]
    fn test_middle_target_includes_neighbours() {
        let mut rng = StdRng::seed_from_u64(42);
        let options = number_options(5, MAX_NUMBER, &mut rng);

        for expected in [4, 5, 6] {
            assert!(options.contains(&expected));
        }
        let mut sorted = options.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn test_round_targets_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..500 {
            let round = start_round(MAX_NUMBER, &mut rng).unwrap();
            let target: u32 = round.target.id.parse().unwrap();
            assert!((1..=MAX_NUMBER).contains(&target));
            assert_eq!(round.options.iter().filter(|o| o.id == round.target.id).count(), 1);
        }
    }

    #[test]
    fn test_tiny_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            start_round(3, &mut rng).unwrap_err(),
            RoundError::NumberRangeTooSmall { game: GameType::Numbers, max: 3 }
        );
    }
}
