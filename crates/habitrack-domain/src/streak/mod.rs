//! Streak statistics derived from the completion log.
//!
//! The completion records are the only source of truth here. The cached
//! `Habit::streak_count` is never consulted.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::completion::HabitCompletion;
use crate::shared::HabitId;


/// Largest gap between two completions that still continues a run (1.5 days, inclusive).
pub const CONSECUTIVE_GAP_MS: i64 = 36 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakData {
    /// Run length ending at the most recent completion
    pub streak: u32,
    /// Longest run ever observed
    pub best_streak: u32,
    /// Number of completions recorded for the habit
    pub total_completed: u32,
}

impl StreakData {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Compute streak statistics for one habit.
///
/// `completions` may hold the whole, unsorted log of the user; only the
/// records of `habit_id` are considered.
pub fn compute_streak(habit_id: &HabitId, completions: &[HabitCompletion]) -> StreakData {
    let mut own: Vec<&HabitCompletion> = completions
        .iter()
        .filter(|c| c.habit_id() == habit_id)
        .collect();

    if own.is_empty() {
        return StreakData::empty();
    }

    // stable: equal timestamps keep input order
    own.sort_by_key(|c| c.completed_at());

    let max_gap = Duration::milliseconds(CONSECUTIVE_GAP_MS);
    let mut run = 1u32;
    let mut best = 1u32;

    for pair in own.windows(2) {
        let gap = pair[1].completed_at() - pair[0].completed_at();
        run = if gap <= max_gap { run + 1 } else { 1 };
        best = best.max(run);
    }

    StreakData {
        streak: run,
        best_streak: best,
        total_completed: own.len() as u32,
    }
}

/// Sort by best streak, highest first. Ties keep their relative order.
pub fn rank_by_best_streak<T, F>(items: &mut [T], streak_of: F)
where
    F: Fn(&T) -> &StreakData,
{
    items.sort_by(|a, b| streak_of(b).best_streak.cmp(&streak_of(a).best_streak));
}
