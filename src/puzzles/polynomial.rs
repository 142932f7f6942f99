//! Polynomial ordering: rearrange shuffled terms into standard form.

use super::{join_numbers, parse_positions, AnswerError, Difficulty, Puzzle};
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub coefficient: i64,
    pub exponent: u32,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.coefficient, self.exponent) {
            (c, 0) => write!(f, "{}", c),
            (1, 1) => write!(f, "x"),
            (-1, 1) => write!(f, "-x"),
            (c, 1) => write!(f, "{}x", c),
            (1, e) => write!(f, "x^{}", e),
            (-1, e) => write!(f, "-x^{}", e),
            (c, e) => write!(f, "{}x^{}", c, e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialPuzzle {
    pub terms: Vec<Term>,
}

impl PolynomialPuzzle {
    /// 0-based term indices that put the exponents in descending order
    pub fn correct_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.terms.len()).collect();
        order.sort_by(|&a, &b| self.terms[b].exponent.cmp(&self.terms[a].exponent));
        order
    }

    /// Render the terms in the given order as a single expression
    pub fn expression(&self, order: &[usize]) -> String {
        let mut out = String::new();
        for (i, &idx) in order.iter().enumerate() {
            let term = self.terms[idx];
            let text = term.to_string();
            if i == 0 {
                out.push_str(&text);
            } else if let Some(rest) = text.strip_prefix('-') {
                out.push_str(" - ");
                out.push_str(rest);
            } else {
                out.push_str(" + ");
                out.push_str(&text);
            }
        }
        out
    }
}

impl Puzzle for PolynomialPuzzle {
    type Answer = Vec<usize>;

    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let (count, max_exponent, max_coefficient, signed) = match difficulty {
            Difficulty::Easy => (3, 4, 9, false),
            Difficulty::Medium => (4, 6, 9, true),
            Difficulty::Hard => (6, 9, 12, true),
        };

        let mut terms: Vec<Term> = index::sample(rng, max_exponent as usize + 1, count)
            .into_iter()
            .map(|e| {
                let magnitude = rng.gen_range(1..=max_coefficient);
                let coefficient = if signed && rng.gen_bool(0.4) {
                    -magnitude
                } else {
                    magnitude
                };
                Term {
                    coefficient,
                    exponent: e as u32,
                }
            })
            .collect();

        // Never hand out a puzzle that is already solved
        terms.shuffle(rng);
        let mut puzzle = Self { terms };
        if puzzle.correct_order() == (0..count).collect::<Vec<_>>() {
            puzzle.terms.reverse();
        }
        puzzle
    }

    fn parse_answer(&self, input: &str) -> Result<Vec<usize>, AnswerError> {
        let order = parse_positions(input, self.terms.len())?;
        if order.len() != self.terms.len() {
            return Err(AnswerError::WrongCount {
                expected: self.terms.len(),
                got: order.len(),
            });
        }
        if order.iter().collect::<HashSet<_>>().len() != order.len() {
            return Err(AnswerError::Malformed("use every term exactly once".to_string()));
        }
        Ok(order)
    }

    fn check(&self, answer: &Vec<usize>) -> bool {
        if answer.len() != self.terms.len() || answer.iter().any(|&i| i >= self.terms.len()) {
            return false;
        }
        answer
            .windows(2)
            .all(|w| self.terms[w[0]].exponent >= self.terms[w[1]].exponent)
    }

    fn prompt(&self) -> String {
        format!(
            "Write the polynomial in standard form (highest power first). \
             Type the term numbers 1-{} in order.",
            self.terms.len()
        )
    }

    fn solution(&self) -> String {
        let order: Vec<usize> = self.correct_order().iter().map(|i| i + 1).collect();
        join_numbers(&order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> PolynomialPuzzle {
        PolynomialPuzzle {
            terms: vec![
                Term { coefficient: 4, exponent: 1 },
                Term { coefficient: -1, exponent: 3 },
                Term { coefficient: 7, exponent: 0 },
            ],
        }
    }

    #[test]
    fn test_term_display() {
        assert_eq!(Term { coefficient: 3, exponent: 2 }.to_string(), "3x^2");
        assert_eq!(Term { coefficient: -1, exponent: 1 }.to_string(), "-x");
        assert_eq!(Term { coefficient: 5, exponent: 0 }.to_string(), "5");
        assert_eq!(Term { coefficient: 1, exponent: 4 }.to_string(), "x^4");
    }

    #[test]
    fn test_expression_and_order() {
        let puzzle = sample();
        assert_eq!(puzzle.correct_order(), vec![1, 0, 2]);
        assert_eq!(puzzle.expression(&puzzle.correct_order()), "-x^3 + 4x + 7");
        assert_eq!(puzzle.solution(), "2 1 3");
    }

    #[test]
    fn test_rejects_repeats_and_bad_orders() {
        let puzzle = sample();
        assert!(matches!(puzzle.parse_answer("2 2 3"), Err(AnswerError::Malformed(_))));
        assert!(!puzzle.check(&vec![0, 1, 2]));
        assert!(puzzle.check(&vec![1, 0, 2]));
    }

    proptest! {
        #[test]
        fn correct_order_is_non_increasing(seed in any::<u64>()) {
            for difficulty in Difficulty::ALL {
                let mut rng = StdRng::seed_from_u64(seed);
                let puzzle = PolynomialPuzzle::generate(difficulty, &mut rng);
                let order = puzzle.correct_order();
                let exponents: Vec<u32> = order.iter().map(|&i| puzzle.terms[i].exponent).collect();
                prop_assert!(exponents.windows(2).all(|w| w[0] >= w[1]));
                prop_assert!(puzzle.check(&order));
            }
        }
    }
}
