//! One mounted puzzle: the instance, its countdown, the answer being typed,
//! and how the round ended.

use super::CountdownState;
use crate::puzzles::{AnswerError, Difficulty, PuzzleInstance, PuzzleKind};
use rand::Rng;

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    WrongAnswer,
    TimeExpired,
    GaveUp,
}

impl FailReason {
    pub fn message(&self) -> &'static str {
        match self {
            FailReason::WrongAnswer => "Not quite!",
            FailReason::TimeExpired => "Time's up!",
            FailReason::GaveUp => "Maybe next time.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Solved { seconds: u32 },
    Failed(FailReason),
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Playing)
    }
}

/// What happened to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    Correct { seconds: u32 },
    Incorrect,
    /// The text could not be read as an answer; the round continues
    Invalid(AnswerError),
    /// Nothing to check, the round already ended
    RoundOver,
}

pub struct PuzzleSession {
    pub kind: PuzzleKind,
    pub difficulty: Difficulty,
    pub instance: PuzzleInstance,
    pub countdown: CountdownState,
    pub outcome: Outcome,
    /// Text in the answer box
    pub answer: String,
    /// Cursor position in `answer`, counted in characters
    pub cursor: usize,
    /// Rounds played in this session, including the current one
    pub round: u32,
    time_limit: u32,
}

impl PuzzleSession {
    pub fn new<R: Rng>(kind: PuzzleKind, difficulty: Difficulty, time_limit: u32, rng: &mut R) -> Self {
        let mut countdown = CountdownState::new();
        countdown.start(time_limit);
        Self {
            kind,
            difficulty,
            instance: PuzzleInstance::generate(kind, difficulty, rng),
            countdown,
            outcome: Outcome::Playing,
            answer: String::new(),
            cursor: 0,
            round: 1,
            time_limit,
        }
    }

    /// Fresh instance, fresh clock, empty answer box
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) {
        self.instance = PuzzleInstance::generate(self.kind, self.difficulty, rng);
        self.countdown.start(self.time_limit);
        self.outcome = Outcome::Playing;
        self.answer.clear();
        self.cursor = 0;
        self.round += 1;
        tracing::debug!(
            "Regenerated {} ({}) round {}",
            self.kind,
            self.difficulty,
            self.round
        );
    }

    /// Switch tier and start a new round with the matching time limit
    pub fn set_difficulty<R: Rng>(&mut self, difficulty: Difficulty, time_limit: u32, rng: &mut R) {
        self.difficulty = difficulty;
        self.time_limit = time_limit;
        self.regenerate(rng);
    }

    /// Check `input` against the instance
    pub fn submit(&mut self, input: &str) -> SubmitResult {
        if self.outcome.is_over() {
            return SubmitResult::RoundOver;
        }

        match self.instance.submit(input) {
            Ok(true) => {
                let seconds = self.countdown.elapsed_seconds();
                self.outcome = Outcome::Solved { seconds };
                self.countdown.clear();
                tracing::info!("Solved {} ({}) in {}s", self.kind, self.difficulty, seconds);
                SubmitResult::Correct { seconds }
            }
            Ok(false) => {
                self.outcome = Outcome::Failed(FailReason::WrongAnswer);
                self.countdown.clear();
                tracing::info!("Wrong answer for {} ({}): {:?}", self.kind, self.difficulty, input);
                SubmitResult::Incorrect
            }
            Err(e) => SubmitResult::Invalid(e),
        }
    }

    /// Submit whatever is in the answer box
    pub fn submit_answer(&mut self) -> SubmitResult {
        let input = self.answer.clone();
        self.submit(&input)
    }

    /// One wall-clock second passed
    ///
    /// Returns true on the tick that runs the clock out while still playing.
    pub fn tick(&mut self) -> bool {
        if self.outcome.is_over() {
            return false;
        }
        if self.countdown.tick() {
            self.outcome = Outcome::Failed(FailReason::TimeExpired);
            tracing::info!("Time expired on {} ({})", self.kind, self.difficulty);
            return true;
        }
        false
    }

    pub fn give_up(&mut self) {
        if !self.outcome.is_over() {
            self.outcome = Outcome::Failed(FailReason::GaveUp);
            self.countdown.clear();
        }
    }

    /// The expected answer, only once the round has ended
    pub fn solution(&self) -> Option<String> {
        self.outcome.is_over().then(|| self.instance.solution())
    }

    pub fn insert_char(&mut self, c: char) {
        let byte = self.byte_offset(self.cursor);
        self.answer.insert(byte, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte = self.byte_offset(self.cursor);
        self.answer.remove(byte);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.answer.chars().count() {
            let byte = self.byte_offset(self.cursor);
            self.answer.remove(byte);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.answer.chars().count());
    }

    pub fn clear_answer(&mut self) {
        self.answer.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.answer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.answer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(kind: PuzzleKind) -> (PuzzleSession, StdRng) {
        let mut rng = StdRng::seed_from_u64(42);
        let s = PuzzleSession::new(kind, Difficulty::Easy, 5, &mut rng);
        (s, rng)
    }

    #[test]
    fn test_correct_answer_solves() {
        let (mut s, _) = session(PuzzleKind::Sequence);
        let answer = s.instance.solution();
        s.countdown.tick();
        s.countdown.tick();
        assert_eq!(s.submit(&answer), SubmitResult::Correct { seconds: 2 });
        assert_eq!(s.outcome, Outcome::Solved { seconds: 2 });
        assert_eq!(s.submit(&answer), SubmitResult::RoundOver);
    }

    #[test]
    fn test_wrong_answer_fails_round() {
        let (mut s, _) = session(PuzzleKind::LinearEquation);
        let wrong = (s.instance.solution().parse::<i64>().unwrap() + 1).to_string();
        assert_eq!(s.submit(&wrong), SubmitResult::Incorrect);
        assert_eq!(s.outcome, Outcome::Failed(FailReason::WrongAnswer));
        assert!(s.solution().is_some());
    }

    #[test]
    fn test_invalid_input_keeps_playing() {
        let (mut s, _) = session(PuzzleKind::Fractions);
        assert!(matches!(s.submit("banana"), SubmitResult::Invalid(_)));
        assert_eq!(s.outcome, Outcome::Playing);
        assert!(s.solution().is_none());
    }

    #[test]
    fn test_timer_expiry_forces_failure() {
        let (mut s, _) = session(PuzzleKind::PrimeHunt);
        for _ in 0..4 {
            assert!(!s.tick());
        }
        assert!(s.tick());
        assert_eq!(s.outcome, Outcome::Failed(FailReason::TimeExpired));
        assert!(!s.tick());
        assert_eq!(s.submit("2 3 5"), SubmitResult::RoundOver);
    }

    #[test]
    fn test_regenerate_resets_round() {
        let (mut s, mut rng) = session(PuzzleKind::MagicSquare);
        s.give_up();
        assert_eq!(s.outcome, Outcome::Failed(FailReason::GaveUp));
        s.insert_str("1 2");
        s.regenerate(&mut rng);
        assert_eq!(s.outcome, Outcome::Playing);
        assert_eq!(s.countdown.remaining_seconds(), 5);
        assert!(s.answer.is_empty());
        assert_eq!(s.round, 2);
    }

    #[test]
    fn test_answer_editing() {
        let (mut s, _) = session(PuzzleKind::GcdLcm);
        s.insert_str("1×3");
        s.move_cursor_left();
        s.insert_char('2');
        assert_eq!(s.answer, "1×23");
        s.backspace();
        s.move_cursor_left();
        s.delete();
        assert_eq!(s.answer, "13");
        s.move_cursor_right();
        s.move_cursor_right();
        s.move_cursor_right();
        assert_eq!(s.cursor, 2);
    }
}
