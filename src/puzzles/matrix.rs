//! Matrix product of two small integer matrices.

use super::{join_numbers, parse_integers, AnswerError, Difficulty, Puzzle};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub type Matrix = Vec<Vec<i64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixPuzzle {
    pub left: Matrix,
    pub right: Matrix,
}

pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    let inner = b.len();
    let cols = b.first().map(|r| r.len()).unwrap_or(0);
    a.iter()
        .map(|row| {
            (0..cols)
                .map(|c| (0..inner).map(|k| row[k] * b[k][c]).sum())
                .collect()
        })
        .collect()
}

fn random_matrix<R: Rng>(rows: usize, cols: usize, low: i64, high: i64, rng: &mut R) -> Matrix {
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(low..=high)).collect())
        .collect()
}

impl MatrixPuzzle {
    pub fn product(&self) -> Matrix {
        multiply(&self.left, &self.right)
    }

    pub fn result_shape(&self) -> (usize, usize) {
        let cols = self.right.first().map(|r| r.len()).unwrap_or(0);
        (self.left.len(), cols)
    }
}

impl Puzzle for MatrixPuzzle {
    type Answer = Matrix;

    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let ((m, k, n), low, high) = match difficulty {
            Difficulty::Easy => ((2, 2, 2), 0, 5),
            Difficulty::Medium => ((2, 3, 2), -5, 9),
            Difficulty::Hard => ((3, 3, 3), -9, 9),
        };
        Self {
            left: random_matrix(m, k, low, high, rng),
            right: random_matrix(k, n, low, high, rng),
        }
    }

    fn parse_answer(&self, input: &str) -> Result<Matrix, AnswerError> {
        let values = parse_integers(input)?;
        let (rows, cols) = self.result_shape();
        if values.len() != rows * cols {
            return Err(AnswerError::WrongCount {
                expected: rows * cols,
                got: values.len(),
            });
        }
        Ok(values.chunks(cols).map(|c| c.to_vec()).collect())
    }

    fn check(&self, answer: &Matrix) -> bool {
        *answer == self.product()
    }

    fn prompt(&self) -> String {
        let (rows, cols) = self.result_shape();
        format!(
            "Multiply the matrices. Type the {}×{} result row by row.",
            rows, cols
        )
    }

    fn solution(&self) -> String {
        let flat: Vec<i64> = self.product().into_iter().flatten().collect();
        join_numbers(&flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_multiply() {
        let a = vec![vec![1, 2], vec![3, 4]];
        let b = vec![vec![5, 6], vec![7, 8]];
        assert_eq!(multiply(&a, &b), vec![vec![19, 22], vec![43, 50]]);

        let row = vec![vec![1, 2, 3]];
        let col = vec![vec![4], vec![5], vec![6]];
        assert_eq!(multiply(&row, &col), vec![vec![32]]);
    }

    #[test]
    fn test_shapes_by_difficulty() {
        let mut rng = StdRng::seed_from_u64(5);
        let medium = MatrixPuzzle::generate(Difficulty::Medium, &mut rng);
        assert_eq!(medium.left.len(), 2);
        assert_eq!(medium.left[0].len(), 3);
        assert_eq!(medium.result_shape(), (2, 2));

        let hard = MatrixPuzzle::generate(Difficulty::Hard, &mut rng);
        assert_eq!(hard.result_shape(), (3, 3));
    }

    #[test]
    fn test_parse_and_check() {
        let puzzle = MatrixPuzzle {
            left: vec![vec![1, 2], vec![3, 4]],
            right: vec![vec![5, 6], vec![7, 8]],
        };
        let answer = puzzle.parse_answer("19 22, 43 50").unwrap();
        assert!(puzzle.check(&answer));
        let wrong = puzzle.parse_answer("19 22 50 43").unwrap();
        assert!(!puzzle.check(&wrong));
        assert_eq!(
            puzzle.parse_answer("19 22 43"),
            Err(AnswerError::WrongCount { expected: 4, got: 3 })
        );
    }
}
