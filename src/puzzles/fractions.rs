//! Fraction arithmetic: combine two fractions with one operator.

use super::{gcd, parse_bounded, AnswerError, Difficulty, Puzzle};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// A numerator/denominator pair
///
/// Values built with [`Fraction::new`] are reduced with a positive
/// denominator. Parsed answers keep exactly what the player typed so the
/// lowest-terms rule can be enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub num: i64,
    pub den: i64,
}

impl Fraction {
    /// Reduced fraction; `den` must be non-zero
    pub fn new(num: i64, den: i64) -> Self {
        let sign = if den < 0 { -1 } else { 1 };
        let g = gcd(num, den).max(1);
        Self {
            num: sign * num / g,
            den: sign * den / g,
        }
    }

    /// `a/b == c/d` iff `a*d == c*b`, computed in `i128` so any pair fits
    pub fn equivalent(&self, other: &Fraction) -> bool {
        self.num as i128 * other.den as i128 == other.num as i128 * self.den as i128
    }

    pub fn is_lowest_terms(&self) -> bool {
        self.den > 0 && gcd(self.num, self.den) == 1
    }

    fn cmp_value(&self, other: &Fraction) -> Ordering {
        // Both denominators positive after `new`
        (self.num * other.den).cmp(&(other.num * self.den))
    }

    /// Parse `p/q` or a bare integer
    pub fn parse(input: &str) -> Result<Self, AnswerError> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| {
            Regex::new(r"^\s*(-?\d+)\s*(?:/\s*(-?\d+))?\s*$").expect("fraction pattern is valid")
        });

        if input.trim().is_empty() {
            return Err(AnswerError::Empty);
        }
        let caps = re.captures(input).ok_or_else(|| {
            AnswerError::Malformed("write the answer like 3/4 or 2".to_string())
        })?;

        let num = parse_bounded(&caps[1])?;
        let den = match caps.get(2) {
            Some(m) => parse_bounded(m.as_str())?,
            None => 1,
        };
        if den == 0 {
            return Err(AnswerError::Malformed("the bottom number can't be zero".to_string()));
        }
        Ok(Self { num, den })
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '−',
            Operation::Multiply => '×',
            Operation::Divide => '÷',
        }
    }

    pub fn apply(&self, a: Fraction, b: Fraction) -> Fraction {
        match self {
            Operation::Add => Fraction::new(a.num * b.den + b.num * a.den, a.den * b.den),
            Operation::Subtract => Fraction::new(a.num * b.den - b.num * a.den, a.den * b.den),
            Operation::Multiply => Fraction::new(a.num * b.num, a.den * b.den),
            Operation::Divide => Fraction::new(a.num * b.den, a.den * b.num),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionPuzzle {
    pub left: Fraction,
    pub right: Fraction,
    pub operation: Operation,
    pub require_lowest_terms: bool,
    answer: Fraction,
}

impl FractionPuzzle {
    pub fn expected(&self) -> Fraction {
        self.answer
    }
}

fn random_fraction<R: Rng>(max_den: i64, signed: bool, rng: &mut R) -> Fraction {
    let den = rng.gen_range(2..=max_den);
    let num = if signed {
        let n = rng.gen_range(1..=max_den);
        if rng.gen_bool(0.3) {
            -n
        } else {
            n
        }
    } else {
        rng.gen_range(1..den)
    };
    Fraction::new(num, den)
}

impl Puzzle for FractionPuzzle {
    type Answer = Fraction;

    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        const ALL_OPS: [Operation; 4] = [
            Operation::Add,
            Operation::Subtract,
            Operation::Multiply,
            Operation::Divide,
        ];
        let (max_den, ops, signed): (i64, &[Operation], bool) = match difficulty {
            Difficulty::Easy => (6, &ALL_OPS[..2], false),
            Difficulty::Medium => (10, &ALL_OPS, false),
            Difficulty::Hard => (12, &ALL_OPS, true),
        };

        let operation = ops[rng.gen_range(0..ops.len())];
        let mut left = random_fraction(max_den, signed, rng);
        let mut right = random_fraction(max_den, signed, rng);

        // Keep unsigned subtraction results non-negative
        if !signed && operation == Operation::Subtract && left.cmp_value(&right) == Ordering::Less {
            std::mem::swap(&mut left, &mut right);
        }

        Self {
            left,
            right,
            operation,
            require_lowest_terms: difficulty == Difficulty::Hard,
            answer: operation.apply(left, right),
        }
    }

    fn parse_answer(&self, input: &str) -> Result<Fraction, AnswerError> {
        Fraction::parse(input)
    }

    fn check(&self, answer: &Fraction) -> bool {
        if answer.den == 0 || !answer.equivalent(&self.answer) {
            return false;
        }
        !self.require_lowest_terms || answer.is_lowest_terms()
    }

    fn prompt(&self) -> String {
        let mut text = format!(
            "Work out {} {} {}.",
            self.left,
            self.operation.symbol(),
            self.right
        );
        if self.require_lowest_terms {
            text.push_str(" Give your answer in lowest terms.");
        }
        text
    }

    fn solution(&self) -> String {
        self.answer.to_string()
    }
}
