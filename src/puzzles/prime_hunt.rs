//! Prime hunt: find every prime on a numbered board.

use super::{join_numbers, parse_integers, AnswerError, Difficulty, Puzzle};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const ROW_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimeHuntPuzzle {
    /// The board shows every number from 1 to `max_number`
    pub max_number: u32,
    sieve: Vec<bool>,
}

/// Sieve of Eratosthenes; `result[n]` is true when `n` is prime
pub fn sieve(max: u32) -> Vec<bool> {
    let max = max as usize;
    let mut is_prime = vec![true; max + 1];
    is_prime[0] = false;
    if max >= 1 {
        is_prime[1] = false;
    }
    let mut i = 2;
    while i * i <= max {
        if is_prime[i] {
            let mut j = i * i;
            while j <= max {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }
    is_prime
}

impl PrimeHuntPuzzle {
    pub fn is_prime(&self, n: u32) -> bool {
        self.sieve.get(n as usize).copied().unwrap_or(false)
    }

    pub fn primes(&self) -> Vec<u32> {
        (1..=self.max_number).filter(|&n| self.is_prime(n)).collect()
    }

    /// Board rows of up to [`ROW_LENGTH`] numbers
    pub fn rows(&self) -> Vec<Vec<u32>> {
        (1..=self.max_number)
            .collect::<Vec<_>>()
            .chunks(ROW_LENGTH)
            .map(|c| c.to_vec())
            .collect()
    }
}

impl Puzzle for PrimeHuntPuzzle {
    type Answer = BTreeSet<u32>;

    // The board is fixed per tier; nothing here is random
    fn generate<R: Rng>(difficulty: Difficulty, _rng: &mut R) -> Self {
        let max_number = match difficulty {
            Difficulty::Easy => 30,
            Difficulty::Medium => 60,
            Difficulty::Hard => 100,
        };
        Self {
            max_number,
            sieve: sieve(max_number),
        }
    }

    fn parse_answer(&self, input: &str) -> Result<BTreeSet<u32>, AnswerError> {
        parse_integers(input)?
            .into_iter()
            .map(|v| {
                if v < 1 || v > self.max_number as i64 {
                    Err(AnswerError::OutOfRange(v))
                } else {
                    Ok(v as u32)
                }
            })
            .collect()
    }

    fn check(&self, answer: &BTreeSet<u32>) -> bool {
        answer.iter().copied().eq(self.primes())
    }

    fn prompt(&self) -> String {
        format!(
            "Find every prime number from 1 to {}. Type them all, in any order.",
            self.max_number
        )
    }

    fn solution(&self) -> String {
        join_numbers(&self.primes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn trial_division(n: u32) -> bool {
        if n < 2 {
            return false;
        }
        let mut d = 2;
        while d * d <= n {
            if n % d == 0 {
                return false;
            }
            d += 1;
        }
        true
    }

    #[test]
    fn test_small_sieve() {
        let primes: Vec<usize> = sieve(20)
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(n, _)| n)
            .collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19]);
        assert_eq!(sieve(0), vec![false]);
    }

    #[test]
    fn test_check_requires_exact_set() {
        let mut rng = StdRng::seed_from_u64(0);
        let puzzle = PrimeHuntPuzzle::generate(Difficulty::Easy, &mut rng);
        assert_eq!(puzzle.max_number, 30);

        let all = puzzle.parse_answer("2 3 5 7 11 13 17 19 23 29").unwrap();
        assert!(puzzle.check(&all));

        let duplicates = puzzle.parse_answer("29 23 19 17 13 11 7 5 3 2 2").unwrap();
        assert!(puzzle.check(&duplicates));

        let missing = puzzle.parse_answer("2 3 5 7 11 13 17 19 23").unwrap();
        assert!(!puzzle.check(&missing));

        let extra = puzzle.parse_answer("1 2 3 5 7 11 13 17 19 23 29").unwrap();
        assert!(!puzzle.check(&extra));

        assert_eq!(puzzle.parse_answer("31"), Err(AnswerError::OutOfRange(31)));
    }

    #[test]
    fn test_board_size_per_tier() {
        for seed in 0..50 {
            for (difficulty, max, primes) in [
                (Difficulty::Easy, 30, 10),
                (Difficulty::Medium, 60, 17),
                (Difficulty::Hard, 100, 25),
            ] {
                let puzzle = PrimeHuntPuzzle::generate(difficulty, &mut StdRng::seed_from_u64(seed));
                assert_eq!(puzzle.max_number, max);
                assert_eq!(puzzle.primes().len(), primes);
            }
        }
    }

    #[test]
    fn test_rows_wrap_at_ten() {
        let mut rng = StdRng::seed_from_u64(0);
        let puzzle = PrimeHuntPuzzle::generate(Difficulty::Easy, &mut rng);
        let rows = puzzle.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][9], 30);
    }

    proptest! {
        #[test]
        fn sieve_agrees_with_trial_division(seed in any::<u64>()) {
            for difficulty in Difficulty::ALL {
                let mut rng = StdRng::seed_from_u64(seed);
                let puzzle = PrimeHuntPuzzle::generate(difficulty, &mut rng);
                for n in 1..=puzzle.max_number {
                    prop_assert_eq!(puzzle.is_prime(n), trial_division(n), "n = {}", n);
                }
            }
        }
    }
}
