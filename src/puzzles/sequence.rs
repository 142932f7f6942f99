//! Number sequences: spot the rule, give the next term.

use super::{parse_single, AnswerError, Difficulty, Puzzle};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SHOWN_TERMS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceRule {
    /// Constant difference between terms
    Arithmetic { step: i64 },
    /// Constant ratio between terms
    Geometric { ratio: i64 },
    /// Differences grow by a constant amount
    Quadratic { second_difference: i64 },
    /// Each term is the sum of the previous two
    Fibonacci,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencePuzzle {
    pub shown: Vec<i64>,
    pub rule: SequenceRule,
    next: i64,
}

fn build(first: i64, second: i64, rule: SequenceRule, count: usize) -> Vec<i64> {
    let mut terms = vec![first];
    match rule {
        SequenceRule::Arithmetic { step } => {
            while terms.len() < count {
                terms.push(terms[terms.len() - 1] + step);
            }
        }
        SequenceRule::Geometric { ratio } => {
            while terms.len() < count {
                terms.push(terms[terms.len() - 1] * ratio);
            }
        }
        SequenceRule::Quadratic { second_difference } => {
            let mut diff = second - first;
            while terms.len() < count {
                terms.push(terms[terms.len() - 1] + diff);
                diff += second_difference;
            }
        }
        SequenceRule::Fibonacci => {
            terms.push(second);
            while terms.len() < count {
                let n = terms.len();
                terms.push(terms[n - 1] + terms[n - 2]);
            }
        }
    }
    terms
}

impl SequencePuzzle {
    pub fn rule_name(&self) -> &'static str {
        match self.rule {
            SequenceRule::Arithmetic { .. } => "add the same amount each time",
            SequenceRule::Geometric { .. } => "multiply by the same number each time",
            SequenceRule::Quadratic { .. } => "the gaps grow steadily",
            SequenceRule::Fibonacci => "add the two previous numbers",
        }
    }
}

impl Puzzle for SequencePuzzle {
    type Answer = i64;

    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let (first, second, rule) = match difficulty {
            Difficulty::Easy => {
                let step = rng.gen_range(2..=9);
                (rng.gen_range(1..=20), 0, SequenceRule::Arithmetic { step })
            }
            Difficulty::Medium => {
                let ratio = rng.gen_range(2..=4);
                (rng.gen_range(1..=5), 0, SequenceRule::Geometric { ratio })
            }
            Difficulty::Hard => {
                let first = rng.gen_range(1..=10);
                let second = first + rng.gen_range(1..=6);
                if rng.gen_bool(0.5) {
                    let second_difference = rng.gen_range(1..=4);
                    (first, second, SequenceRule::Quadratic { second_difference })
                } else {
                    (first, second, SequenceRule::Fibonacci)
                }
            }
        };

        let mut terms = build(first, second, rule, SHOWN_TERMS + 1);
        let next = terms.pop().unwrap_or_default();
        Self {
            shown: terms,
            rule,
            next,
        }
    }

    fn parse_answer(&self, input: &str) -> Result<i64, AnswerError> {
        parse_single(input)
    }

    fn check(&self, answer: &i64) -> bool {
        *answer == self.next
    }

    fn prompt(&self) -> String {
        let shown = self
            .shown
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("What comes next?  {}, ?", shown)
    }

    fn solution(&self) -> String {
        self.next.to_string()
    }
}
