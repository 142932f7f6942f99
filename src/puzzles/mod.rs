//! Puzzle generators and checkers
//!
//! Every puzzle kind lives in its own module and implements [`Puzzle`]:
//! a pure generator seeded by any `rand::Rng`, an answer parser, and a pure
//! checker. [`PuzzleInstance`] wraps all kinds in one tagged enum so the
//! session and the frontends can match on it exhaustively.
//!
//! NO imports from frontend/ or rendering code.

pub mod divisibility;
pub mod fractions;
pub mod gcd_lcm;
pub mod linear_equation;
pub mod magic_square;
pub mod matrix;
pub mod polynomial;
pub mod prime_hunt;
pub mod sequence;
pub mod vector_path;

pub use divisibility::DivisibilityPuzzle;
pub use fractions::FractionPuzzle;
pub use gcd_lcm::GcdLcmPuzzle;
pub use linear_equation::LinearEquationPuzzle;
pub use magic_square::MagicSquarePuzzle;
pub use matrix::MatrixPuzzle;
pub use polynomial::PolynomialPuzzle;
pub use prime_hunt::PrimeHuntPuzzle;
pub use sequence::SequencePuzzle;
pub use vector_path::VectorPathPuzzle;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Difficulty tier controlling sizes, number ranges and the time limit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Next tier, wrapping from hard back to easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}' (easy, medium, hard)", other)),
        }
    }
}

/// Every puzzle the arcade offers, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PuzzleKind {
    MagicSquare,
    Divisibility,
    PolynomialOrder,
    VectorPath,
    Fractions,
    PrimeHunt,
    MatrixProduct,
    LinearEquation,
    Sequence,
    GcdLcm,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 10] = [
        PuzzleKind::MagicSquare,
        PuzzleKind::Divisibility,
        PuzzleKind::PolynomialOrder,
        PuzzleKind::VectorPath,
        PuzzleKind::Fractions,
        PuzzleKind::PrimeHunt,
        PuzzleKind::MatrixProduct,
        PuzzleKind::LinearEquation,
        PuzzleKind::Sequence,
        PuzzleKind::GcdLcm,
    ];

    /// Stable identifier used in routes, config overrides and the CLI
    pub fn slug(&self) -> &'static str {
        match self {
            PuzzleKind::MagicSquare => "magic-square",
            PuzzleKind::Divisibility => "divisibility",
            PuzzleKind::PolynomialOrder => "polynomial-order",
            PuzzleKind::VectorPath => "vector-path",
            PuzzleKind::Fractions => "fractions",
            PuzzleKind::PrimeHunt => "prime-hunt",
            PuzzleKind::MatrixProduct => "matrix-product",
            PuzzleKind::LinearEquation => "linear-equation",
            PuzzleKind::Sequence => "sequence",
            PuzzleKind::GcdLcm => "gcd-lcm",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PuzzleKind::MagicSquare => "Magic Square",
            PuzzleKind::Divisibility => "Divisibility Challenge",
            PuzzleKind::PolynomialOrder => "Polynomial Order",
            PuzzleKind::VectorPath => "Vector Path",
            PuzzleKind::Fractions => "Fraction Arithmetic",
            PuzzleKind::PrimeHunt => "Prime Hunt",
            PuzzleKind::MatrixProduct => "Matrix Product",
            PuzzleKind::LinearEquation => "Solve for x",
            PuzzleKind::Sequence => "What Comes Next?",
            PuzzleKind::GcdLcm => "GCD & LCM",
        }
    }

    /// Short description for the puzzle list
    pub fn blurb(&self) -> &'static str {
        match self {
            PuzzleKind::MagicSquare => "Fill the grid so every line adds up to the same total",
            PuzzleKind::Divisibility => "Pick the multiples whose digits add up to the target",
            PuzzleKind::PolynomialOrder => "Put the terms in standard form",
            PuzzleKind::VectorPath => "Reach the target using only the given moves",
            PuzzleKind::Fractions => "Add, subtract, multiply and divide fractions",
            PuzzleKind::PrimeHunt => "Find every prime in the grid",
            PuzzleKind::MatrixProduct => "Multiply two small matrices",
            PuzzleKind::LinearEquation => "Find the value that balances the equation",
            PuzzleKind::Sequence => "Spot the pattern and continue it",
            PuzzleKind::GcdLcm => "Greatest common divisor and least common multiple",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.slug() == slug)
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Why a typed-in answer could not be understood
///
/// A malformed answer is not a wrong answer: the round keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("type an answer first")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("expected {expected} values, got {got}")]
    WrongCount { expected: usize, got: usize },
    #[error("{0} is out of range")]
    OutOfRange(i64),
    #[error("{0}")]
    Malformed(String),
}

/// Contract shared by every puzzle kind
pub trait Puzzle: Sized {
    /// Parsed form of the player's answer
    type Answer;

    /// Build a fresh random instance for `difficulty`
    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self;

    /// Turn the raw text from the answer box into a typed answer
    fn parse_answer(&self, input: &str) -> Result<Self::Answer, AnswerError>;

    /// Pure check of a parsed answer against this instance
    fn check(&self, answer: &Self::Answer) -> bool;

    /// One-line instructions shown above the puzzle
    fn prompt(&self) -> String;

    /// Human-readable expected answer, revealed when the round ends
    fn solution(&self) -> String;
}

/// One generated puzzle of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PuzzleInstance {
    MagicSquare(MagicSquarePuzzle),
    Divisibility(DivisibilityPuzzle),
    PolynomialOrder(PolynomialPuzzle),
    VectorPath(VectorPathPuzzle),
    Fractions(FractionPuzzle),
    PrimeHunt(PrimeHuntPuzzle),
    MatrixProduct(MatrixPuzzle),
    LinearEquation(LinearEquationPuzzle),
    Sequence(SequencePuzzle),
    GcdLcm(GcdLcmPuzzle),
}

impl PuzzleInstance {
    pub fn generate<R: Rng>(kind: PuzzleKind, difficulty: Difficulty, rng: &mut R) -> Self {
        match kind {
            PuzzleKind::MagicSquare => Self::MagicSquare(MagicSquarePuzzle::generate(difficulty, rng)),
            PuzzleKind::Divisibility => Self::Divisibility(DivisibilityPuzzle::generate(difficulty, rng)),
            PuzzleKind::PolynomialOrder => {
                Self::PolynomialOrder(PolynomialPuzzle::generate(difficulty, rng))
            }
            PuzzleKind::VectorPath => Self::VectorPath(VectorPathPuzzle::generate(difficulty, rng)),
            PuzzleKind::Fractions => Self::Fractions(FractionPuzzle::generate(difficulty, rng)),
            PuzzleKind::PrimeHunt => Self::PrimeHunt(PrimeHuntPuzzle::generate(difficulty, rng)),
            PuzzleKind::MatrixProduct => Self::MatrixProduct(MatrixPuzzle::generate(difficulty, rng)),
            PuzzleKind::LinearEquation => {
                Self::LinearEquation(LinearEquationPuzzle::generate(difficulty, rng))
            }
            PuzzleKind::Sequence => Self::Sequence(SequencePuzzle::generate(difficulty, rng)),
            PuzzleKind::GcdLcm => Self::GcdLcm(GcdLcmPuzzle::generate(difficulty, rng)),
        }
    }

    pub fn kind(&self) -> PuzzleKind {
        match self {
            Self::MagicSquare(_) => PuzzleKind::MagicSquare,
            Self::Divisibility(_) => PuzzleKind::Divisibility,
            Self::PolynomialOrder(_) => PuzzleKind::PolynomialOrder,
            Self::VectorPath(_) => PuzzleKind::VectorPath,
            Self::Fractions(_) => PuzzleKind::Fractions,
            Self::PrimeHunt(_) => PuzzleKind::PrimeHunt,
            Self::MatrixProduct(_) => PuzzleKind::MatrixProduct,
            Self::LinearEquation(_) => PuzzleKind::LinearEquation,
            Self::Sequence(_) => PuzzleKind::Sequence,
            Self::GcdLcm(_) => PuzzleKind::GcdLcm,
        }
    }

    /// Parse and check raw input in one step
    ///
    /// `Ok(true)` is a correct answer, `Ok(false)` a wrong one, and `Err` an
    /// answer that could not be read at all.
    pub fn submit(&self, input: &str) -> Result<bool, AnswerError> {
        match self {
            Self::MagicSquare(p) => submit_to(p, input),
            Self::Divisibility(p) => submit_to(p, input),
            Self::PolynomialOrder(p) => submit_to(p, input),
            Self::VectorPath(p) => submit_to(p, input),
            Self::Fractions(p) => submit_to(p, input),
            Self::PrimeHunt(p) => submit_to(p, input),
            Self::MatrixProduct(p) => submit_to(p, input),
            Self::LinearEquation(p) => submit_to(p, input),
            Self::Sequence(p) => submit_to(p, input),
            Self::GcdLcm(p) => submit_to(p, input),
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Self::MagicSquare(p) => p.prompt(),
            Self::Divisibility(p) => p.prompt(),
            Self::PolynomialOrder(p) => p.prompt(),
            Self::VectorPath(p) => p.prompt(),
            Self::Fractions(p) => p.prompt(),
            Self::PrimeHunt(p) => p.prompt(),
            Self::MatrixProduct(p) => p.prompt(),
            Self::LinearEquation(p) => p.prompt(),
            Self::Sequence(p) => p.prompt(),
            Self::GcdLcm(p) => p.prompt(),
        }
    }

    pub fn solution(&self) -> String {
        match self {
            Self::MagicSquare(p) => p.solution(),
            Self::Divisibility(p) => p.solution(),
            Self::PolynomialOrder(p) => p.solution(),
            Self::VectorPath(p) => p.solution(),
            Self::Fractions(p) => p.solution(),
            Self::PrimeHunt(p) => p.solution(),
            Self::MatrixProduct(p) => p.solution(),
            Self::LinearEquation(p) => p.solution(),
            Self::Sequence(p) => p.solution(),
            Self::GcdLcm(p) => p.solution(),
        }
    }
}

fn submit_to<P: Puzzle>(puzzle: &P, input: &str) -> Result<bool, AnswerError> {
    let answer = puzzle.parse_answer(input)?;
    Ok(puzzle.check(&answer))
}

/// Largest magnitude accepted in a typed answer
///
/// Every expected answer is far below this, and two bounded values multiply
/// without leaving `i64`.
pub const MAX_ANSWER: i64 = 1_000_000_000;

/// Parse one integer token, rejecting magnitudes above [`MAX_ANSWER`]
pub fn parse_bounded(token: &str) -> Result<i64, AnswerError> {
    let value: i64 = token
        .parse()
        .map_err(|_| AnswerError::NotANumber(token.to_string()))?;
    if value.unsigned_abs() > MAX_ANSWER.unsigned_abs() {
        return Err(AnswerError::OutOfRange(value));
    }
    Ok(value)
}

/// Split an answer on whitespace and commas and parse every token as an integer
pub fn parse_integers(input: &str) -> Result<Vec<i64>, AnswerError> {
    let tokens: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(AnswerError::Empty);
    }

    tokens
        .into_iter()
        .map(parse_bounded)
        .collect()
}

/// Parse exactly one integer
pub fn parse_single(input: &str) -> Result<i64, AnswerError> {
    let values = parse_integers(input)?;
    if values.len() != 1 {
        return Err(AnswerError::WrongCount {
            expected: 1,
            got: values.len(),
        });
    }
    Ok(values[0])
}

/// Parse 1-based positions into 0-based indices, rejecting anything outside `1..=len`
pub fn parse_positions(input: &str, len: usize) -> Result<Vec<usize>, AnswerError> {
    parse_integers(input)?
        .into_iter()
        .map(|v| {
            if v < 1 || v as usize > len {
                Err(AnswerError::OutOfRange(v))
            } else {
                Ok(v as usize - 1)
            }
        })
        .collect()
}

pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

pub(crate) fn digit_sum(n: i64) -> i64 {
    let mut n = n.abs();
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Format a list of numbers the way answers are typed
pub(crate) fn join_numbers<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" m ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }

    #[test]
    fn test_slugs_round_trip() {
        for kind in PuzzleKind::ALL {
            assert_eq!(PuzzleKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(PuzzleKind::from_slug("sudoku"), None);
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_integers("1, 2  3;-4"), Ok(vec![1, 2, 3, -4]));
        assert_eq!(parse_integers("   "), Err(AnswerError::Empty));
        assert_eq!(
            parse_integers("1 x"),
            Err(AnswerError::NotANumber("x".to_string()))
        );
        assert_eq!(
            parse_single("4 5"),
            Err(AnswerError::WrongCount { expected: 1, got: 2 })
        );
        assert_eq!(parse_positions("1 3", 3), Ok(vec![0, 2]));
        assert_eq!(parse_positions("0", 3), Err(AnswerError::OutOfRange(0)));
    }

    #[test]
    fn test_huge_values_rejected() {
        assert_eq!(parse_integers("1000000000 -1000000000"), Ok(vec![MAX_ANSWER, -MAX_ANSWER]));
        assert_eq!(
            parse_integers("9223372036854775807"),
            Err(AnswerError::OutOfRange(i64::MAX))
        );
        assert_eq!(
            parse_single("-9223372036854775808"),
            Err(AnswerError::OutOfRange(i64::MIN))
        );
        assert_eq!(
            parse_integers("99999999999999999999"),
            Err(AnswerError::NotANumber("99999999999999999999".to_string()))
        );
    }

    #[test]
    fn test_huge_answers_never_panic() {
        let inputs = [
            "9223372036854775807/3",
            "-9223372036854775807/2",
            "x = 4611686018427387904",
            "9223372036854775807 9223372036854775807 1",
            "-9223372036854775808",
        ];
        for kind in PuzzleKind::ALL {
            for difficulty in Difficulty::ALL {
                let instance =
                    PuzzleInstance::generate(kind, difficulty, &mut StdRng::seed_from_u64(5));
                for input in inputs {
                    assert!(
                        !matches!(instance.submit(input), Ok(true)),
                        "{} {} accepted {}",
                        kind,
                        difficulty,
                        input
                    );
                }
            }
        }
    }

    #[test]
    fn test_gcd_lcm_helpers() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(0, 6), 0);
        assert_eq!(digit_sum(9045), 18);
    }

    #[test]
    fn test_every_kind_generates_and_accepts_its_solution() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in PuzzleKind::ALL {
            for difficulty in Difficulty::ALL {
                let instance = PuzzleInstance::generate(kind, difficulty, &mut rng);
                assert_eq!(instance.kind(), kind);
                assert!(!instance.prompt().is_empty());
                assert_eq!(
                    instance.submit(&instance.solution()),
                    Ok(true),
                    "{} {} rejected its own solution",
                    kind,
                    difficulty
                );
            }
        }
    }

    #[test]
    fn test_instance_json_is_tagged() {
        let mut rng = StdRng::seed_from_u64(1);
        let instance = PuzzleInstance::generate(PuzzleKind::Sequence, Difficulty::Easy, &mut rng);
        let json = serde_json::to_value(&instance).unwrap();
        assert_eq!(json["kind"], "sequence");
        let back: PuzzleInstance = serde_json::from_value(json).unwrap();
        assert_eq!(back, instance);
    }
}
