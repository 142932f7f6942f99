//! Divisibility challenge: choose the multiples whose digit sums hit a target.
//!
//! The winning picks are drawn first and the target is computed from them, so
//! a valid selection of the requested size always exists. Decoy multiples are
//! added whose digit sums can never complete the target, so spotting the
//! multiples alone does not solve the puzzle.

use super::{digit_sum, join_numbers, parse_positions, AnswerError, Difficulty, Puzzle};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisibilityPuzzle {
    pub divisor: i64,
    pub numbers: Vec<i64>,
    /// How many numbers the player must choose
    pub pick: usize,
    /// Required total of the digit sums of the chosen numbers
    pub target_sum: i64,
    winning: Vec<usize>,
}

struct Tier {
    divisors: &'static [i64],
    count: usize,
    pick: usize,
    decoys: usize,
    low: i64,
    high: i64,
}

fn tier(difficulty: Difficulty) -> Tier {
    match difficulty {
        Difficulty::Easy => Tier {
            divisors: &[2, 5, 10],
            count: 6,
            pick: 2,
            decoys: 2,
            low: 10,
            high: 99,
        },
        Difficulty::Medium => Tier {
            divisors: &[3, 4, 9],
            count: 8,
            pick: 3,
            decoys: 2,
            low: 100,
            high: 999,
        },
        Difficulty::Hard => Tier {
            divisors: &[6, 8, 11],
            count: 10,
            pick: 3,
            decoys: 3,
            low: 1000,
            high: 9999,
        },
    }
}

/// Whether some `count` distinct entries of `sums` total exactly `target`
fn has_subset_sum(sums: &[i64], count: usize, target: i64) -> bool {
    if count == 0 {
        return target == 0;
    }
    sums.iter()
        .enumerate()
        .any(|(i, &s)| has_subset_sum(&sums[i + 1..], count - 1, target - s))
}

impl DivisibilityPuzzle {
    /// Whether `positions` (0-based) form a winning selection
    fn is_valid_selection(&self, positions: &[usize]) -> bool {
        let distinct: HashSet<usize> = positions.iter().copied().collect();
        if positions.len() != self.pick || distinct.len() != positions.len() {
            return false;
        }

        let mut total = 0;
        for &p in positions {
            let Some(&n) = self.numbers.get(p) else {
                return false;
            };
            if n % self.divisor != 0 {
                return false;
            }
            total += digit_sum(n);
        }
        total == self.target_sum
    }
}

impl Puzzle for DivisibilityPuzzle {
    type Answer = Vec<usize>;

    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let tier = tier(difficulty);
        let divisor = *tier.divisors.choose(rng).unwrap_or(&tier.divisors[0]);

        let first_multiple = (tier.low + divisor - 1) / divisor;
        let last_multiple = tier.high / divisor;
        let wanted = tier.pick + tier.decoys;

        let mut seen = HashSet::new();
        let mut numbers = Vec::with_capacity(tier.count);
        let mut target_sum = 0;

        // Some winning draws leave no room for decoys (multiples of 9 only
        // have digit sums 9, 18 and 27), so redraw the winners a few times
        for _ in 0..50 {
            seen.clear();
            numbers.clear();
            while numbers.len() < tier.pick {
                let n = divisor * rng.gen_range(first_multiple..=last_multiple);
                if seen.insert(n) {
                    numbers.push(n);
                }
            }
            let mut sums: Vec<i64> = numbers.iter().map(|&n| digit_sum(n)).collect();
            target_sum = sums.iter().sum();

            // A decoy is only kept if no selection containing it can hit the target
            for _ in 0..200 {
                if numbers.len() == wanted {
                    break;
                }
                let n = divisor * rng.gen_range(first_multiple..=last_multiple);
                let s = digit_sum(n);
                if seen.contains(&n) || has_subset_sum(&sums, tier.pick - 1, target_sum - s) {
                    continue;
                }
                seen.insert(n);
                numbers.push(n);
                sums.push(s);
            }
            if numbers.len() == wanted {
                break;
            }
        }
        if numbers.len() < wanted {
            tracing::debug!(
                "Placed {} of {} decoys for divisor {}",
                numbers.len() - tier.pick,
                tier.decoys,
                divisor
            );
        }

        while numbers.len() < tier.count {
            let n = rng.gen_range(tier.low..=tier.high);
            if n % divisor != 0 && seen.insert(n) {
                numbers.push(n);
            }
        }

        let mut order: Vec<usize> = (0..numbers.len()).collect();
        order.shuffle(rng);
        let shuffled: Vec<i64> = order.iter().map(|&i| numbers[i]).collect();
        let mut winning: Vec<usize> = order
            .iter()
            .enumerate()
            .filter(|(_, original)| **original < tier.pick)
            .map(|(pos, _)| pos)
            .collect();
        winning.sort_unstable();

        Self {
            divisor,
            numbers: shuffled,
            pick: tier.pick,
            target_sum,
            winning,
        }
    }

    fn parse_answer(&self, input: &str) -> Result<Vec<usize>, AnswerError> {
        let positions = parse_positions(input, self.numbers.len())?;
        if positions.len() != self.pick {
            return Err(AnswerError::WrongCount {
                expected: self.pick,
                got: positions.len(),
            });
        }
        Ok(positions)
    }

    fn check(&self, answer: &Vec<usize>) -> bool {
        self.is_valid_selection(answer)
    }

    fn prompt(&self) -> String {
        format!(
            "Choose {} numbers divisible by {} whose digits add up to {} in total. \
             Type their positions (1-{}).",
            self.pick,
            self.divisor,
            self.target_sum,
            self.numbers.len()
        )
    }

    fn solution(&self) -> String {
        let positions: Vec<usize> = self.winning.iter().map(|p| p + 1).collect();
        join_numbers(&positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Exhaustive search for every subset of size `pick` meeting the rules
    fn valid_selections(puzzle: &DivisibilityPuzzle) -> Vec<Vec<usize>> {
        fn search(
            p: &DivisibilityPuzzle,
            start: usize,
            chosen: &mut Vec<usize>,
            found: &mut Vec<Vec<usize>>,
        ) {
            if chosen.len() == p.pick {
                if p.is_valid_selection(chosen) {
                    found.push(chosen.clone());
                }
                return;
            }
            for i in start..p.numbers.len() {
                chosen.push(i);
                search(p, i + 1, chosen, found);
                chosen.pop();
            }
        }
        let mut found = Vec::new();
        search(puzzle, 0, &mut Vec::new(), &mut found);
        found
    }

    fn reachable(puzzle: &DivisibilityPuzzle) -> bool {
        !valid_selections(puzzle).is_empty()
    }

    fn fixed() -> DivisibilityPuzzle {
        DivisibilityPuzzle {
            divisor: 3,
            numbers: vec![123, 100, 999, 301, 111],
            pick: 2,
            target_sum: 9,
            winning: vec![0, 4],
        }
    }

    #[test]
    fn test_check_rules() {
        let puzzle = fixed();
        assert!(puzzle.check(&vec![0, 4]));
        // digit sums 6 + 27
        assert!(!puzzle.check(&vec![0, 2]));
        // 100 is not a multiple of 3
        assert!(!puzzle.check(&vec![1, 4]));
        // same position twice
        assert!(!puzzle.check(&vec![4, 4]));
    }

    #[test]
    fn test_parse_positions_are_one_based() {
        let puzzle = fixed();
        assert_eq!(puzzle.parse_answer("1 5"), Ok(vec![0, 4]));
        assert_eq!(puzzle.parse_answer("6 1"), Err(AnswerError::OutOfRange(6)));
        assert_eq!(
            puzzle.parse_answer("1"),
            Err(AnswerError::WrongCount { expected: 2, got: 1 })
        );
    }

    #[test]
    fn test_easy_target_always_reachable() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let puzzle = DivisibilityPuzzle::generate(Difficulty::Easy, &mut rng);
            assert!(reachable(&puzzle), "seed {} produced an unsolvable puzzle", seed);
        }
    }

    #[test]
    fn test_decoy_multiples_never_complete_the_target() {
        for seed in 0..200 {
            for difficulty in Difficulty::ALL {
                let mut rng = StdRng::seed_from_u64(seed);
                let puzzle = DivisibilityPuzzle::generate(difficulty, &mut rng);
                let multiples = puzzle
                    .numbers
                    .iter()
                    .filter(|&&n| n % puzzle.divisor == 0)
                    .count();
                assert!(
                    multiples > puzzle.pick,
                    "seed {} {}: only the winners are multiples",
                    seed,
                    difficulty
                );
                assert!(reachable(&puzzle));
                assert_eq!(valid_selections(&puzzle), vec![puzzle.winning.clone()]);
            }
        }
    }

    #[test]
    fn test_subset_sum_search() {
        assert!(has_subset_sum(&[3, 5, 9], 2, 12));
        assert!(!has_subset_sum(&[3, 5, 9], 2, 13));
        assert!(has_subset_sum(&[4], 0, 0));
        assert!(!has_subset_sum(&[4], 2, 8));
    }

    proptest! {
        #[test]
        fn generated_puzzles_are_solvable(seed in any::<u64>(), hard in any::<bool>()) {
            let difficulty = if hard { Difficulty::Hard } else { Difficulty::Medium };
            let mut rng = StdRng::seed_from_u64(seed);
            let puzzle = DivisibilityPuzzle::generate(difficulty, &mut rng);

            prop_assert_eq!(puzzle.winning.len(), puzzle.pick);
            prop_assert!(puzzle.check(&puzzle.winning));
            let distinct: HashSet<i64> = puzzle.numbers.iter().copied().collect();
            prop_assert_eq!(distinct.len(), puzzle.numbers.len());
        }
    }
}
