//! Magic square: fill the blanks so every line sums to the magic constant.
//!
//! Squares are built deterministically (Siamese method for odd sizes, the
//! diagonal-complement method for multiples of four) and then scrambled with
//! one of the eight symmetries of the square, so every instance is well
//! formed by construction.

use super::{join_numbers, parse_integers, AnswerError, Difficulty, Puzzle};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicSquarePuzzle {
    pub size: usize,
    pub target: i64,
    /// Cells shown to the player, `None` where a number must be filled in
    pub grid: Vec<Vec<Option<i64>>>,
    solution: Vec<Vec<i64>>,
}

impl MagicSquarePuzzle {
    /// Number of blank cells the player has to fill
    pub fn hidden_count(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.is_none()).count()
    }

    /// The fully solved square this instance was cut from
    pub fn solved_grid(&self) -> &[Vec<i64>] {
        &self.solution
    }

    /// Grid with the blanks replaced by `values` in reading order
    fn fill(&self, values: &[i64]) -> Vec<Vec<i64>> {
        let mut values = values.iter();
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(v) => *v,
                        None => values.next().copied().unwrap_or(0),
                    })
                    .collect()
            })
            .collect()
    }
}

/// Magic constant for an `n × n` square holding `1..=n²`
pub fn magic_constant(n: usize) -> i64 {
    let n = n as i64;
    n * (n * n + 1) / 2
}

/// Build the canonical magic square of size `n`
///
/// Supports odd `n` and multiples of four. Sizes with `n % 4 == 2` are never
/// requested by the generator.
pub fn construct(n: usize) -> Vec<Vec<i64>> {
    if n % 2 == 1 {
        siamese(n)
    } else {
        doubly_even(n)
    }
}

fn siamese(n: usize) -> Vec<Vec<i64>> {
    let mut grid = vec![vec![0i64; n]; n];
    let (mut row, mut col) = (0usize, n / 2);
    for value in 1..=(n * n) as i64 {
        grid[row][col] = value;
        let next_row = (row + n - 1) % n;
        let next_col = (col + 1) % n;
        if grid[next_row][next_col] != 0 {
            row = (row + 1) % n;
        } else {
            row = next_row;
            col = next_col;
        }
    }
    grid
}

fn doubly_even(n: usize) -> Vec<Vec<i64>> {
    let max = (n * n) as i64;
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let value = (i * n + j + 1) as i64;
                    let (a, b) = (i % 4, j % 4);
                    if a == b || a + b == 3 {
                        max + 1 - value
                    } else {
                        value
                    }
                })
                .collect()
        })
        .collect()
}

/// Apply symmetry `t` (0..8): `t % 4` quarter turns, mirrored when `t >= 4`
fn transform(grid: &[Vec<i64>], t: u8) -> Vec<Vec<i64>> {
    let n = grid.len();
    let mut out = grid.to_vec();
    for _ in 0..(t % 4) {
        let rotated: Vec<Vec<i64>> = (0..n)
            .map(|r| (0..n).map(|c| out[n - 1 - c][r]).collect())
            .collect();
        out = rotated;
    }
    if t >= 4 {
        for row in &mut out {
            row.reverse();
        }
    }
    out
}

/// Every row, column and both diagonals sum to `target`, and no value repeats
// Widened so no typed value can overflow a line
fn line_sum(cells: impl Iterator<Item = i64>) -> i128 {
    cells.map(i128::from).sum()
}

pub fn is_magic(grid: &[Vec<i64>], target: i64) -> bool {
    let n = grid.len();
    if n == 0 || grid.iter().any(|row| row.len() != n) {
        return false;
    }

    let target = i128::from(target);
    let rows_ok = grid.iter().all(|row| line_sum(row.iter().copied()) == target);
    let cols_ok = (0..n).all(|c| line_sum(grid.iter().map(|row| row[c])) == target);
    let diag_ok = line_sum((0..n).map(|i| grid[i][i])) == target;
    let anti_ok = line_sum((0..n).map(|i| grid[i][n - 1 - i])) == target;

    let distinct = grid.iter().flatten().collect::<HashSet<_>>().len() == n * n;

    rows_ok && cols_ok && diag_ok && anti_ok && distinct
}

impl Puzzle for MagicSquarePuzzle {
    type Answer = Vec<i64>;

    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let (size, hidden) = match difficulty {
            Difficulty::Easy => (3, 3),
            Difficulty::Medium => (4, 6),
            Difficulty::Hard => (5, 10),
        };

        let solution = transform(&construct(size), rng.gen_range(0..8));
        let blanks: HashSet<usize> = index::sample(rng, size * size, hidden).into_iter().collect();

        let grid = solution
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, v)| if blanks.contains(&(r * size + c)) { None } else { Some(*v) })
                    .collect()
            })
            .collect();

        Self {
            size,
            target: magic_constant(size),
            grid,
            solution,
        }
    }

    fn parse_answer(&self, input: &str) -> Result<Vec<i64>, AnswerError> {
        let values = parse_integers(input)?;
        let expected = self.hidden_count();
        if values.len() != expected {
            return Err(AnswerError::WrongCount {
                expected,
                got: values.len(),
            });
        }
        Ok(values)
    }

    fn check(&self, answer: &Vec<i64>) -> bool {
        answer.len() == self.hidden_count() && is_magic(&self.fill(answer), self.target)
    }

    fn prompt(&self) -> String {
        format!(
            "Fill the {} blank cells so every row, column and diagonal adds up to {}. \
             Type the missing numbers left to right, top to bottom.",
            self.hidden_count(),
            self.target
        )
    }

    fn solution(&self) -> String {
        let hidden: Vec<i64> = self
            .grid
            .iter()
            .zip(&self.solution)
            .flat_map(|(shown, solved)| {
                shown
                    .iter()
                    .zip(solved)
                    .filter(|(cell, _)| cell.is_none())
                    .map(|(_, v)| *v)
                    .collect::<Vec<_>>()
            })
            .collect();
        join_numbers(&hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
        prop_oneof![
            Just(Difficulty::Easy),
            Just(Difficulty::Medium),
            Just(Difficulty::Hard)
        ]
    }

    #[test]
    fn test_canonical_squares_are_magic() {
        for n in [3, 4, 5, 7, 8] {
            let grid = construct(n);
            assert!(is_magic(&grid, magic_constant(n)), "size {} is not magic", n);
        }
        assert_eq!(construct(3), vec![vec![8, 1, 6], vec![3, 5, 7], vec![4, 9, 2]]);
    }

    #[test]
    fn test_symmetries_stay_magic() {
        let base = construct(4);
        for t in 0..8 {
            assert!(is_magic(&transform(&base, t), 34));
        }
        assert_ne!(transform(&base, 1), base);
    }

    #[test]
    fn test_rejects_repeated_values() {
        let grid = vec![vec![5, 5, 5], vec![5, 5, 5], vec![5, 5, 5]];
        assert!(!is_magic(&grid, 15));
    }

    #[test]
    fn test_huge_values_do_not_overflow_lines() {
        let grid = vec![
            vec![i64::MAX, i64::MAX, 1],
            vec![3, 5, 7],
            vec![4, 9, 2],
        ];
        assert!(!is_magic(&grid, 15));

        let mut rng = StdRng::seed_from_u64(3);
        let puzzle = MagicSquarePuzzle::generate(Difficulty::Easy, &mut rng);
        assert_eq!(
            puzzle.parse_answer("9223372036854775807 9223372036854775807 1"),
            Err(AnswerError::OutOfRange(i64::MAX))
        );
        assert!(!puzzle.check(&vec![i64::MAX, i64::MAX, 1]));
    }

    #[test]
    fn test_wrong_count_is_a_parse_error() {
        let mut rng = StdRng::seed_from_u64(3);
        let puzzle = MagicSquarePuzzle::generate(Difficulty::Easy, &mut rng);
        assert_eq!(
            puzzle.parse_answer("1 2"),
            Err(AnswerError::WrongCount { expected: 3, got: 2 })
        );
    }

    #[test]
    fn test_wrong_values_fail_check() {
        let mut rng = StdRng::seed_from_u64(11);
        let puzzle = MagicSquarePuzzle::generate(Difficulty::Medium, &mut rng);
        let wrong = vec![0; puzzle.hidden_count()];
        assert!(!puzzle.check(&wrong));
    }

    proptest! {
        #[test]
        fn generated_solutions_are_magic(seed in any::<u64>(), difficulty in difficulty_strategy()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let puzzle = MagicSquarePuzzle::generate(difficulty, &mut rng);
            prop_assert!(is_magic(puzzle.solved_grid(), puzzle.target));

            let distinct: HashSet<i64> = puzzle.solved_grid().iter().flatten().copied().collect();
            prop_assert_eq!(distinct.len(), puzzle.size * puzzle.size);

            let answer = puzzle.parse_answer(&puzzle.solution()).unwrap();
            prop_assert!(puzzle.check(&answer));
        }
    }
}
