//! Solve a one-variable linear equation with an integer solution.

use super::{parse_single, AnswerError, Difficulty, Puzzle};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// `a·x + b = c·x + d`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearEquationPuzzle {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
    solution: i64,
}

/// Render `k·x + m`, dropping zero parts and unit coefficients
fn side(k: i64, m: i64) -> String {
    let x_part = match k {
        0 => String::new(),
        1 => "x".to_string(),
        -1 => "-x".to_string(),
        k => format!("{}x", k),
    };
    match (x_part.is_empty(), m) {
        (true, m) => m.to_string(),
        (false, 0) => x_part,
        (false, m) if m < 0 => format!("{} - {}", x_part, -m),
        (false, m) => format!("{} + {}", x_part, m),
    }
}

fn non_zero<R: Rng>(low: i64, high: i64, rng: &mut R) -> i64 {
    loop {
        let v = rng.gen_range(low..=high);
        if v != 0 {
            return v;
        }
    }
}

impl LinearEquationPuzzle {
    pub fn equation(&self) -> String {
        format!("{} = {}", side(self.a, self.b), side(self.c, self.d))
    }

    /// Whether `x` balances both sides
    pub fn satisfies(&self, x: i64) -> bool {
        let x = x as i128;
        self.a as i128 * x + self.b as i128 == self.c as i128 * x + self.d as i128
    }
}

impl Puzzle for LinearEquationPuzzle {
    type Answer = i64;

    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let (a, b, c, x) = match difficulty {
            Difficulty::Easy => (rng.gen_range(1..=9), rng.gen_range(0..=20), 0, rng.gen_range(0..=10)),
            Difficulty::Medium => (
                non_zero(-9, 9, rng),
                rng.gen_range(-20..=20),
                0,
                rng.gen_range(-10..=10),
            ),
            Difficulty::Hard => {
                let a = non_zero(-9, 9, rng);
                let mut c = non_zero(-9, 9, rng);
                if c == a {
                    c = if a == 9 { -9 } else { a + 1 };
                }
                (a, rng.gen_range(-20..=20), c, rng.gen_range(-12..=12))
            }
        };
        // Pick the right-hand constant so that x is the solution
        let d = a * x + b - c * x;
        Self { a, b, c, d, solution: x }
    }

    fn parse_answer(&self, input: &str) -> Result<i64, AnswerError> {
        let trimmed = input.trim();
        let value = trimmed
            .strip_prefix("x")
            .map(|rest| rest.trim_start().trim_start_matches('=').trim())
            .unwrap_or(trimmed);
        parse_single(value)
    }

    fn check(&self, answer: &i64) -> bool {
        self.satisfies(*answer)
    }

    fn prompt(&self) -> String {
        format!("Solve for x:  {}", self.equation())
    }

    fn solution(&self) -> String {
        self.solution.to_string()
    }
}
