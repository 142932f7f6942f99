//! Greatest common divisor and least common multiple of a few numbers.

use super::{gcd, lcm, parse_integers, AnswerError, Difficulty, Puzzle};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcdLcmPuzzle {
    pub numbers: Vec<i64>,
}

impl GcdLcmPuzzle {
    pub fn gcd(&self) -> i64 {
        self.numbers.iter().fold(0, |acc, &n| gcd(acc, n))
    }

    pub fn lcm(&self) -> i64 {
        self.numbers.iter().fold(1, |acc, &n| lcm(acc, n))
    }
}

impl Puzzle for GcdLcmPuzzle {
    /// `(gcd, lcm)`
    type Answer = (i64, i64);

    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let (count, low, high) = match difficulty {
            Difficulty::Easy => (2, 2, 30),
            Difficulty::Medium => (2, 10, 120),
            Difficulty::Hard => (3, 6, 90),
        };

        // Share a factor so the GCD is usually interesting
        let factor = rng.gen_range(2..=6);
        let numbers = (0..count)
            .map(|_| {
                let lo = (low + factor - 1) / factor;
                let hi = (high / factor).max(lo);
                factor * rng.gen_range(lo..=hi)
            })
            .collect();

        Self { numbers }
    }

    fn parse_answer(&self, input: &str) -> Result<(i64, i64), AnswerError> {
        let values = parse_integers(input)?;
        match values.as_slice() {
            [g, l] => Ok((*g, *l)),
            _ => Err(AnswerError::WrongCount {
                expected: 2,
                got: values.len(),
            }),
        }
    }

    fn check(&self, answer: &(i64, i64)) -> bool {
        *answer == (self.gcd(), self.lcm())
    }

    fn prompt(&self) -> String {
        let numbers = self
            .numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Find the GCD and the LCM of {}. Type the GCD, then the LCM.",
            numbers
        )
    }

    fn solution(&self) -> String {
        format!("{} {}", self.gcd(), self.lcm())
    }
}
