use std::any::type_name;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use crate::application::commands::handlers::*;
use crate::application::test_support::*;
use habitrack_domain::completion::HabitCompletion;
use habitrack_domain::events::habit_events::{HabitCompleted, HabitCreated, HabitDeleted};
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::{DomainError, HabitId, UserId};

fn ada() -> UserId {
    UserId::from_string("ada")
}

fn complete_at(habit_id: &HabitId, day: i64) -> CompleteHabitCommand {
    let completed_at = at_day(day);
    CompleteHabitCommand {
        user_id: ada(),
        habit_id: habit_id.to_string(),
        completed_at,
        day_start: completed_at.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc(),
    }
}

#[tokio::test]
async fn test_create_habit_command_handler() {
    let repo = Arc::new(MockHabitRepository::new());
    let event_bus = Arc::new(MockEventBus::new());
    let handler = CreateHabitCommandHandler::new(repo.clone(), event_bus.clone());

    let result = handler
        .handle(CreateHabitCommand {
            user_id: ada(),
            title: "  Read  ".to_string(),
            description: "20 pages".to_string(),
            frequency: "weekly".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.habit.title, "Read");
    assert_eq!(result.habit.frequency, "weekly");
    assert_eq!(result.habit.streak_count, 0);

    // Verify habit was saved
    let saved = repo
        .find_by_id(&HabitId::from_string(&result.habit.id))
        .await
        .unwrap()
        .unwrap();
    assert!(saved.is_owned_by(&ada()));

    assert_eq!(event_bus.published().await, vec![type_name::<HabitCreated>()]);
}

#[tokio::test]
async fn test_create_habit_with_empty_title_fails() {
    let repo = Arc::new(MockHabitRepository::new());
    let event_bus = Arc::new(MockEventBus::new());
    let handler = CreateHabitCommandHandler::new(repo.clone(), event_bus.clone());

    let result = handler
        .handle(CreateHabitCommand {
            user_id: ada(),
            title: "   ".to_string(),
            description: "20 pages".to_string(),
            frequency: "daily".to_string(),
        })
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(repo.len().await, 0);
    assert!(event_bus.published().await.is_empty());
}

#[tokio::test]
async fn test_create_habit_with_unknown_frequency_fails() {
    let repo = Arc::new(MockHabitRepository::new());
    let handler = CreateHabitCommandHandler::new(repo.clone(), Arc::new(MockEventBus::new()));

    let result = handler
        .handle(CreateHabitCommand {
            user_id: ada(),
            title: "Read".to_string(),
            description: "20 pages".to_string(),
            frequency: "hourly".to_string(),
        })
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(repo.len().await, 0);
}

#[tokio::test]
async fn test_delete_habit_command_handler() {
    let repo = Arc::new(MockHabitRepository::new());
    let event_bus = Arc::new(MockEventBus::new());
    let existing = habit(&ada(), "Run");
    let habit_id = existing.id().clone();
    repo.insert(existing).await;

    let handler = DeleteHabitCommandHandler::new(repo.clone(), event_bus.clone());
    handler
        .handle(DeleteHabitCommand {
            user_id: ada(),
            habit_id: habit_id.to_string(),
        })
        .await
        .unwrap();

    assert!(repo.find_by_id(&habit_id).await.unwrap().is_none());
    assert_eq!(event_bus.published().await, vec![type_name::<HabitDeleted>()]);
}

#[tokio::test]
async fn test_delete_habit_of_another_user_is_not_found() {
    let repo = Arc::new(MockHabitRepository::new());
    let event_bus = Arc::new(MockEventBus::new());
    let existing = habit(&UserId::from_string("grace"), "Run");
    let habit_id = existing.id().clone();
    repo.insert(existing).await;

    let handler = DeleteHabitCommandHandler::new(repo.clone(), event_bus.clone());
    let result = handler
        .handle(DeleteHabitCommand {
            user_id: ada(),
            habit_id: habit_id.to_string(),
        })
        .await;

    assert!(matches!(result, Err(DomainError::HabitNotFound(_))));
    assert_eq!(repo.len().await, 1);
    assert!(event_bus.published().await.is_empty());
}

#[tokio::test]
async fn test_complete_habit_command_handler() {
    let habit_repo = Arc::new(MockHabitRepository::new());
    let completion_repo = Arc::new(MockCompletionRepository::new());
    let event_bus = Arc::new(MockEventBus::new());
    let existing = habit(&ada(), "Meditate");
    let habit_id = existing.id().clone();
    habit_repo.insert(existing).await;

    let handler = CompleteHabitCommandHandler::new(
        habit_repo.clone(),
        completion_repo.clone(),
        event_bus.clone(),
    );
    let result = handler.handle(complete_at(&habit_id, 0)).await.unwrap();

    assert_eq!(result.habit_id, habit_id.to_string());
    assert_eq!(result.streak_count, 1);
    assert!(result.streak_cache_updated);

    let completions = completion_repo.all().await;
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].id().to_string(), result.completion_id);
    assert_eq!(completions[0].completed_at(), at_day(0));

    let updated = habit_repo.find_by_id(&habit_id).await.unwrap().unwrap();
    assert_eq!(updated.streak_count(), 1);
    assert_eq!(updated.last_completed(), at_day(0));

    assert_eq!(event_bus.published().await, vec![type_name::<HabitCompleted>()]);
}

#[tokio::test]
async fn test_complete_habit_twice_on_the_same_day_fails() {
    let habit_repo = Arc::new(MockHabitRepository::new());
    let completion_repo = Arc::new(MockCompletionRepository::new());
    let existing = habit(&ada(), "Meditate");
    let habit_id = existing.id().clone();
    habit_repo.insert(existing).await;

    let handler = CompleteHabitCommandHandler::new(
        habit_repo.clone(),
        completion_repo.clone(),
        Arc::new(MockEventBus::new()),
    );
    handler.handle(complete_at(&habit_id, 0)).await.unwrap();

    let mut again = complete_at(&habit_id, 0);
    again.completed_at = again.completed_at + chrono::Duration::hours(3);
    let result = handler.handle(again).await;

    match result {
        Err(DomainError::AlreadyCompletedToday(title)) => assert_eq!(title, "Meditate"),
        other => panic!("Expected AlreadyCompletedToday, got {:?}", other),
    }
    assert_eq!(completion_repo.all().await.len(), 1);

    // the next day is fine again
    let next = handler.handle(complete_at(&habit_id, 1)).await.unwrap();
    assert_eq!(next.streak_count, 2);
}

#[tokio::test]
async fn test_completion_of_another_habit_today_does_not_block() {
    let habit_repo = Arc::new(MockHabitRepository::new());
    let completion_repo = Arc::new(MockCompletionRepository::new());
    let existing = habit(&ada(), "Meditate");
    let habit_id = existing.id().clone();
    habit_repo.insert(existing).await;
    completion_repo
        .insert(HabitCompletion::new(
            HabitId::from_string("other"),
            ada(),
            at_day(0),
        ))
        .await;

    let handler = CompleteHabitCommandHandler::new(
        habit_repo,
        completion_repo.clone(),
        Arc::new(MockEventBus::new()),
    );

    assert!(handler.handle(complete_at(&habit_id, 0)).await.is_ok());
    assert_eq!(completion_repo.all().await.len(), 2);
}

#[tokio::test]
async fn test_completion_is_kept_when_cache_update_fails() {
    let habit_repo = Arc::new(MockHabitRepository::new());
    let completion_repo = Arc::new(MockCompletionRepository::new());
    let event_bus = Arc::new(MockEventBus::new());
    let existing = habit(&ada(), "Meditate");
    let habit_id = existing.id().clone();
    habit_repo.insert(existing).await;
    habit_repo.fail_updates();

    let handler = CompleteHabitCommandHandler::new(
        habit_repo.clone(),
        completion_repo.clone(),
        event_bus.clone(),
    );
    let result = handler.handle(complete_at(&habit_id, 0)).await.unwrap();

    assert!(!result.streak_cache_updated);
    assert_eq!(result.streak_count, 0);
    assert_eq!(completion_repo.all().await.len(), 1);

    let stored = habit_repo.find_by_id(&habit_id).await.unwrap().unwrap();
    assert_eq!(stored.streak_count(), 0);
    assert_eq!(event_bus.published().await.len(), 1);
}

#[tokio::test]
async fn test_complete_missing_habit_fails() {
    let handler = CompleteHabitCommandHandler::new(
        Arc::new(MockHabitRepository::new()),
        Arc::new(MockCompletionRepository::new()),
        Arc::new(MockEventBus::new()),
    );

    let result = handler
        .handle(complete_at(&HabitId::from_string("gone"), 0))
        .await;
    assert!(matches!(result, Err(DomainError::HabitNotFound(_))));
}
