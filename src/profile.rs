//! Per-user play statistics and unlocked achievements
//!
//! Stored as TOML at `<data dir>/<user>/profile.toml`. A missing file is a new
//! player, not an error.

use crate::achievements::Achievement;
use crate::puzzles::{Difficulty, PuzzleKind};
use crate::widgets::Outcome;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Profile name used when nobody is signed in
pub const GUEST: &str = "guest";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleStats {
    pub played: u32,
    pub solved: u32,
    pub failed: u32,
    pub best_seconds: Option<u32>,
    pub current_streak: u32,
    pub best_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub achievement: Achievement,
    /// RFC 3339
    pub unlocked_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub user: String,
    /// Key: puzzle slug
    #[serde(default)]
    pub stats: BTreeMap<String, PuzzleStats>,
    #[serde(default)]
    pub achievements: Vec<UnlockedAchievement>,
    pub last_played: Option<String>,
}

impl Profile {
    pub fn new(user: &str) -> Self {
        Self {
            user: user.to_string(),
            ..Default::default()
        }
    }

    /// `<dir>/<user>/profile.toml`, with path separators in the name replaced
    pub fn path_in(dir: &Path, user: &str) -> PathBuf {
        let folder: String = user
            .chars()
            .map(|c| if c == '/' || c == '\\' || c == ':' { '_' } else { c })
            .collect();
        dir.join(folder).join("profile.toml")
    }

    /// Load the profile for `user`, starting fresh if none was saved
    pub fn load(dir: &Path, user: &str) -> Result<Self> {
        let path = Self::path_in(dir, user);
        if !path.exists() {
            tracing::debug!("No profile at {:?}, starting fresh", path);
            return Ok(Self::new(user));
        }

        let content =
            fs::read_to_string(&path).context(format!("Failed to read profile {:?}", path))?;
        let mut profile: Profile =
            toml::from_str(&content).context(format!("Failed to parse profile {:?}", path))?;
        profile.user = user.to_string();

        tracing::info!("Profile loaded from {:?}", path);
        Ok(profile)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::path_in(dir, &self.user);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create profile directory {:?}", parent))?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize profile")?;
        fs::write(&path, toml_string).context(format!("Failed to write profile {:?}", path))?;

        tracing::debug!("Profile saved to {:?}", path);
        Ok(())
    }

    pub fn stats_for(&self, kind: PuzzleKind) -> PuzzleStats {
        self.stats.get(kind.slug()).cloned().unwrap_or_default()
    }

    pub fn total_solved(&self) -> u32 {
        self.stats.values().map(|s| s.solved).sum()
    }

    pub fn total_played(&self) -> u32 {
        self.stats.values().map(|s| s.played).sum()
    }

    pub fn has(&self, achievement: Achievement) -> bool {
        self.achievements.iter().any(|u| u.achievement == achievement)
    }

    /// Fold one finished round into the stats
    ///
    /// Returns the achievements this result unlocked, in [`Achievement::ALL`]
    /// order. A round still in progress changes nothing.
    pub fn record_result(
        &mut self,
        kind: PuzzleKind,
        difficulty: Difficulty,
        outcome: Outcome,
    ) -> Vec<Achievement> {
        if !outcome.is_over() {
            return Vec::new();
        }

        let now = Utc::now().to_rfc3339();
        let stats = self.stats.entry(kind.slug().to_string()).or_default();
        stats.played += 1;
        match outcome {
            Outcome::Solved { seconds } => {
                stats.solved += 1;
                stats.current_streak += 1;
                stats.best_streak = stats.best_streak.max(stats.current_streak);
                stats.best_seconds = Some(stats.best_seconds.map_or(seconds, |b| b.min(seconds)));
            }
            Outcome::Failed(_) => {
                stats.failed += 1;
                stats.current_streak = 0;
            }
            Outcome::Playing => {}
        }
        self.last_played = Some(now.clone());

        let unlocked: Vec<Achievement> = Achievement::ALL
            .into_iter()
            .filter(|a| !self.has(*a) && a.is_earned(self, kind, difficulty, outcome))
            .collect();
        for achievement in &unlocked {
            tracing::info!("{} unlocked {:?}", self.user, achievement);
            self.achievements.push(UnlockedAchievement {
                achievement: *achievement,
                unlocked_at: now.clone(),
            });
        }
        unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::session::FailReason;

    const SOLVED_SLOW: Outcome = Outcome::Solved { seconds: 42 };

    #[test]
    fn test_first_solve_and_streaks() {
        let mut p = Profile::new("kid@example.com");
        let got = p.record_result(PuzzleKind::Fractions, Difficulty::Easy, SOLVED_SLOW);
        assert_eq!(got, vec![Achievement::FirstSolve]);

        p.record_result(PuzzleKind::Fractions, Difficulty::Easy, Outcome::Solved { seconds: 30 });
        let got = p.record_result(PuzzleKind::Fractions, Difficulty::Easy, SOLVED_SLOW);
        assert_eq!(got, vec![Achievement::HatTrick]);

        p.record_result(
            PuzzleKind::Fractions,
            Difficulty::Easy,
            Outcome::Failed(FailReason::TimeExpired),
        );
        let stats = p.stats_for(PuzzleKind::Fractions);
        assert_eq!(stats.played, 4);
        assert_eq!(stats.solved, 3);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 3);
        assert_eq!(stats.best_seconds, Some(30));
    }

    #[test]
    fn test_playing_is_ignored() {
        let mut p = Profile::new(GUEST);
        assert!(p.record_result(PuzzleKind::Sequence, Difficulty::Hard, Outcome::Playing).is_empty());
        assert_eq!(p.total_played(), 0);
        assert!(p.last_played.is_none());
    }

    #[test]
    fn test_speed_and_hard_mode() {
        let mut p = Profile::new(GUEST);
        let got = p.record_result(
            PuzzleKind::GcdLcm,
            Difficulty::Hard,
            Outcome::Solved { seconds: 9 },
        );
        assert_eq!(
            got,
            vec![Achievement::FirstSolve, Achievement::SpeedDemon, Achievement::HardMode]
        );
        // Already unlocked, not reported twice
        let got = p.record_result(PuzzleKind::GcdLcm, Difficulty::Hard, Outcome::Solved { seconds: 3 });
        assert!(got.is_empty());
    }

    #[test]
    fn test_failure_earns_nothing() {
        let mut p = Profile::new(GUEST);
        let got = p.record_result(
            PuzzleKind::MagicSquare,
            Difficulty::Hard,
            Outcome::Failed(FailReason::WrongAnswer),
        );
        assert!(got.is_empty());
    }

    #[test]
    fn test_all_rounder_and_totals() {
        let mut p = Profile::new(GUEST);
        let mut last = Vec::new();
        for kind in PuzzleKind::ALL {
            last = p.record_result(kind, Difficulty::Medium, SOLVED_SLOW);
        }
        assert!(last.contains(&Achievement::AllRounder));
        assert!(last.contains(&Achievement::TenSolved));
        assert_eq!(p.total_solved(), 10);
        assert!(!p.has(Achievement::FiftySolved));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = Profile::new("kid@example.com");
        p.record_result(PuzzleKind::PrimeHunt, Difficulty::Easy, SOLVED_SLOW);
        p.save(dir.path()).unwrap();

        assert!(dir.path().join("kid@example.com").join("profile.toml").exists());
        let loaded = Profile::load(dir.path(), "kid@example.com").unwrap();
        assert_eq!(loaded.stats_for(PuzzleKind::PrimeHunt).solved, 1);
        assert!(loaded.has(Achievement::FirstSolve));
        assert!(chrono::DateTime::parse_from_rfc3339(&loaded.achievements[0].unlocked_at).is_ok());
    }

    #[test]
    fn test_missing_profile_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let p = Profile::load(dir.path(), "nobody").unwrap();
        assert_eq!(p.user, "nobody");
        assert_eq!(p.total_played(), 0);
    }

    #[test]
    fn test_path_sanitizes_separators() {
        let path = Profile::path_in(Path::new("/data"), "a/b");
        assert_eq!(path, Path::new("/data/a_b/profile.toml"));
    }
}
