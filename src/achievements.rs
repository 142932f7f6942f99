//! Badges unlocked by playing
//!
//! The rules read a [`Profile`](crate::profile::Profile) after each result is
//! recorded; unlocking itself (and the timestamp) happens in the profile.

use crate::profile::Profile;
use crate::puzzles::{Difficulty, PuzzleKind};
use crate::widgets::Outcome;
use serde::{Deserialize, Serialize};

/// Solves under this many seconds earn [`Achievement::SpeedDemon`]
pub const SPEED_DEMON_SECONDS: u32 = 10;

/// Consecutive solves of one puzzle for [`Achievement::HatTrick`]
pub const HAT_TRICK_STREAK: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    FirstSolve,
    TenSolved,
    FiftySolved,
    HatTrick,
    SpeedDemon,
    HardMode,
    AllRounder,
}

impl Achievement {
    pub const ALL: [Achievement; 7] = [
        Achievement::FirstSolve,
        Achievement::TenSolved,
        Achievement::FiftySolved,
        Achievement::HatTrick,
        Achievement::SpeedDemon,
        Achievement::HardMode,
        Achievement::AllRounder,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstSolve => "First Steps",
            Achievement::TenSolved => "Getting Warm",
            Achievement::FiftySolved => "Number Cruncher",
            Achievement::HatTrick => "Hat Trick",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::HardMode => "Hard Mode",
            Achievement::AllRounder => "All-Rounder",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstSolve => "Solve your first puzzle",
            Achievement::TenSolved => "Solve 10 puzzles",
            Achievement::FiftySolved => "Solve 50 puzzles",
            Achievement::HatTrick => "Solve the same puzzle 3 times in a row",
            Achievement::SpeedDemon => "Solve a puzzle in under 10 seconds",
            Achievement::HardMode => "Solve a puzzle on hard",
            Achievement::AllRounder => "Solve every kind of puzzle at least once",
        }
    }

    /// Whether the rule holds after `outcome` on `kind` was recorded into `profile`
    pub fn is_earned(
        &self,
        profile: &Profile,
        kind: PuzzleKind,
        difficulty: Difficulty,
        outcome: Outcome,
    ) -> bool {
        let solved_seconds = match outcome {
            Outcome::Solved { seconds } => Some(seconds),
            _ => None,
        };

        match self {
            Achievement::FirstSolve => profile.total_solved() >= 1,
            Achievement::TenSolved => profile.total_solved() >= 10,
            Achievement::FiftySolved => profile.total_solved() >= 50,
            Achievement::HatTrick => profile.stats_for(kind).current_streak >= HAT_TRICK_STREAK,
            Achievement::SpeedDemon => solved_seconds.is_some_and(|s| s < SPEED_DEMON_SECONDS),
            Achievement::HardMode => solved_seconds.is_some() && difficulty == Difficulty::Hard,
            Achievement::AllRounder => PuzzleKind::ALL
                .iter()
                .all(|k| profile.stats_for(*k).solved > 0),
        }
    }
}
