//! Plain-text rendering of command results for stdout

use std::fmt::Write;

use crate::application::commands::habit_commands::CompleteHabitResult;
use crate::application::dtos::{CompletionDto, HabitDto, HabitStreakDto};
use habitrack_domain::session::User;

pub fn render_user(user: &User) -> String {
    if user.name.is_empty() {
        format!("{} ({})", user.email, user.id)
    } else {
        format!("{} <{}> ({})", user.name, user.email, user.id)
    }
}

/// One line per habit, `[x]` when it has a completion today
pub fn render_board(habits: &[HabitDto], today: &[CompletionDto]) -> String {
    if habits.is_empty() {
        return "No habits yet. Add one with `habitrack add`.\n".to_string();
    }

    let mut out = String::new();
    for habit in habits {
        let done = today.iter().any(|c| c.habit_id == habit.id);
        let _ = writeln!(
            out,
            "[{}] {}  {} ({}, cached streak {})  {}",
            if done { "x" } else { " " },
            habit.id,
            habit.title,
            habit.frequency,
            habit.streak_count,
            habit.description
        );
    }

    let done = habits
        .iter()
        .filter(|h| today.iter().any(|c| c.habit_id == h.id))
        .count();
    let _ = writeln!(out, "{}/{} done today", done, habits.len());
    out
}

pub fn render_streaks(streaks: &[HabitStreakDto]) -> String {
    if streaks.is_empty() {
        return "No habits yet.\n".to_string();
    }

    let width = streaks.iter().map(|s| s.title.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (rank, s) in streaks.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<width$}  current {:>3}  best {:>3}  total {:>4}",
            rank + 1,
            s.title,
            s.streak,
            s.best_streak,
            s.total_completed,
            width = width
        );
    }
    out
}

pub fn render_completion(result: &CompleteHabitResult) -> String {
    let mut out = format!("Completed {} at {}\n", result.title, result.completed_at);
    if !result.streak_cache_updated {
        out.push_str(
            "warning: the completion was saved but the habit's streak counter could not be updated\n",
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitrack_domain::shared::UserId;

    fn habit(id: &str, title: &str) -> HabitDto {
        HabitDto {
            id: id.to_string(),
            title: title.to_string(),
            description: "every day".to_string(),
            frequency: "daily".to_string(),
            streak_count: 2,
            created_at: "2026-04-01T07:30:00+00:00".to_string(),
            last_completed: "2026-04-02T07:30:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_render_board_marks_done_habits() {
        let habits = vec![habit("h1", "Read"), habit("h2", "Run")];
        let today = vec![CompletionDto {
            id: "c1".to_string(),
            habit_id: "h2".to_string(),
            completed_at: "2026-04-03T07:30:00+00:00".to_string(),
        }];

        let out = render_board(&habits, &today);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("[ ] h1  Read"));
        assert!(lines[1].starts_with("[x] h2  Run"));
        assert_eq!(lines[2], "1/2 done today");
    }

    #[test]
    fn test_render_empty_board() {
        assert!(render_board(&[], &[]).contains("habitrack add"));
    }

    #[test]
    fn test_render_streaks_in_given_order() {
        let streaks = vec![
            HabitStreakDto {
                habit_id: "h1".to_string(),
                title: "Read".to_string(),
                frequency: "daily".to_string(),
                streak: 1,
                best_streak: 3,
                total_completed: 4,
            },
            HabitStreakDto {
                habit_id: "h2".to_string(),
                title: "Stretch".to_string(),
                frequency: "weekly".to_string(),
                streak: 0,
                best_streak: 0,
                total_completed: 0,
            },
        ];

        let out = render_streaks(&streaks);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " 1. Read     current   1  best   3  total    4");
        assert!(lines[1].starts_with(" 2. Stretch"));
    }

    #[test]
    fn test_render_completion_warns_on_stale_cache() {
        let result = CompleteHabitResult {
            completion_id: "c1".to_string(),
            habit_id: "h1".to_string(),
            title: "Read".to_string(),
            completed_at: "2026-04-03T07:30:00+00:00".to_string(),
            streak_count: 0,
            streak_cache_updated: false,
        };

        let out = render_completion(&result);
        assert!(out.starts_with("Completed Read at 2026-04-03T07:30:00+00:00"));
        assert!(out.contains("warning"));
    }

    #[test]
    fn test_render_user_without_name() {
        let user = User {
            id: UserId::from_string("u1"),
            email: "ada@example.com".to_string(),
            name: String::new(),
        };
        assert_eq!(render_user(&user), "ada@example.com (u1)");
    }
}
