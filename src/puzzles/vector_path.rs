//! Vector path: reach a target cell by chaining the allowed step vectors.
//!
//! Coordinates are `(x, y)` with `y` growing upwards, matching how the grid
//! is drawn on graph paper. The target is the end of a random in-bounds walk,
//! so every instance is solvable within its step budget.

use super::{AnswerError, Difficulty, Puzzle};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepVector {
    pub label: char,
    pub dx: i32,
    pub dy: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorPathPuzzle {
    pub width: i32,
    pub height: i32,
    pub start: (i32, i32),
    pub target: (i32, i32),
    pub vectors: Vec<StepVector>,
    pub max_steps: usize,
    walk: Vec<usize>,
}

const MAX_ATTEMPTS: usize = 200;

impl VectorPathPuzzle {
    /// Index of the vector a typed letter names, case-insensitive
    pub fn label_index(&self, c: char) -> Option<usize> {
        let label = c.to_ascii_lowercase();
        self.vectors.iter().position(|v| v.label == label)
    }

    pub fn in_bounds(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Positions visited by following `moves` from the start, stopping at the
    /// first step that leaves the grid
    pub fn trace(&self, moves: &[usize]) -> Vec<(i32, i32)> {
        let mut pos = self.start;
        let mut visited = vec![pos];
        for &m in moves {
            let Some(v) = self.vectors.get(m) else {
                break;
            };
            pos = (pos.0 + v.dx, pos.1 + v.dy);
            if !self.in_bounds(pos) {
                break;
            }
            visited.push(pos);
        }
        visited
    }

    /// Breadth-first search for the fewest moves reaching the target
    pub fn shortest_path(&self) -> Option<Vec<usize>> {
        let mut previous: HashMap<(i32, i32), ((i32, i32), usize)> = HashMap::new();
        let mut queue = VecDeque::from([(self.start, 0usize)]);

        while let Some((pos, depth)) = queue.pop_front() {
            if pos == self.target {
                let mut moves = Vec::with_capacity(depth);
                let mut cursor = pos;
                while cursor != self.start {
                    let (from, m) = previous[&cursor];
                    moves.push(m);
                    cursor = from;
                }
                moves.reverse();
                return Some(moves);
            }
            if depth == self.max_steps {
                continue;
            }
            for (i, v) in self.vectors.iter().enumerate() {
                let next = (pos.0 + v.dx, pos.1 + v.dy);
                if self.in_bounds(next) && next != self.start && !previous.contains_key(&next) {
                    previous.insert(next, (pos, i));
                    queue.push_back((next, depth + 1));
                }
            }
        }
        None
    }

    fn labels(&self, moves: &[usize]) -> String {
        moves
            .iter()
            .filter_map(|&m| self.vectors.get(m))
            .map(|v| v.label.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn random_vectors<R: Rng>(count: usize, reach: i32, rng: &mut R) -> Vec<StepVector> {
        let mut vectors: Vec<StepVector> = Vec::with_capacity(count);
        while vectors.len() < count {
            let dx = rng.gen_range(-reach..=reach);
            let dy = rng.gen_range(-reach..=reach);
            let duplicate = vectors.iter().any(|v| v.dx == dx && v.dy == dy);
            if (dx, dy) != (0, 0) && !duplicate {
                let label = (b'a' + vectors.len() as u8) as char;
                vectors.push(StepVector { label, dx, dy });
            }
        }
        vectors
    }
}

impl Puzzle for VectorPathPuzzle {
    type Answer = Vec<usize>;

    fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let (size, count, steps, reach) = match difficulty {
            Difficulty::Easy => (6, 2, 3, 2),
            Difficulty::Medium => (8, 3, 4, 3),
            Difficulty::Hard => (10, 4, 6, 3),
        };

        for _ in 0..MAX_ATTEMPTS {
            let vectors = Self::random_vectors(count, reach, rng);
            let start = (rng.gen_range(0..size), rng.gen_range(0..size));

            let mut pos = start;
            let mut walk = Vec::with_capacity(steps);
            for _ in 0..steps {
                let options: Vec<usize> = (0..vectors.len())
                    .filter(|&i| {
                        let (x, y) = (pos.0 + vectors[i].dx, pos.1 + vectors[i].dy);
                        x >= 0 && y >= 0 && x < size && y < size
                    })
                    .collect();
                if options.is_empty() {
                    break;
                }
                let pick = options[rng.gen_range(0..options.len())];
                pos = (pos.0 + vectors[pick].dx, pos.1 + vectors[pick].dy);
                walk.push(pick);
            }

            if walk.len() == steps && pos != start {
                return Self {
                    width: size,
                    height: size,
                    start,
                    target: pos,
                    vectors,
                    max_steps: steps,
                    walk,
                };
            }
        }

        tracing::warn!("Vector path generation fell back to a straight line");
        Self {
            width: size,
            height: size,
            start: (0, 0),
            target: (steps as i32, 0),
            vectors: vec![
                StepVector { label: 'a', dx: 1, dy: 0 },
                StepVector { label: 'b', dx: 0, dy: 1 },
            ],
            max_steps: steps,
            walk: vec![0; steps],
        }
    }

    fn parse_answer(&self, input: &str) -> Result<Vec<usize>, AnswerError> {
        let mut moves = Vec::new();
        for c in input.chars() {
            if c.is_whitespace() || c == ',' {
                continue;
            }
            match self.label_index(c) {
                Some(i) => moves.push(i),
                None => {
                    return Err(AnswerError::Malformed(format!(
                        "there is no move called '{}'",
                        c
                    )))
                }
            }
        }
        if moves.is_empty() {
            return Err(AnswerError::Empty);
        }
        Ok(moves)
    }

    fn check(&self, answer: &Vec<usize>) -> bool {
        if answer.is_empty() || answer.len() > self.max_steps {
            return false;
        }
        let visited = self.trace(answer);
        visited.len() == answer.len() + 1 && visited.last() == Some(&self.target)
    }

    fn prompt(&self) -> String {
        format!(
            "Get from S {:?} to T {:?} in at most {} moves without leaving the grid. \
             Type the move letters in order.",
            self.start, self.target, self.max_steps
        )
    }

    fn solution(&self) -> String {
        match self.shortest_path() {
            Some(path) => self.labels(&path),
            None => self.labels(&self.walk),
        }
    }
}
