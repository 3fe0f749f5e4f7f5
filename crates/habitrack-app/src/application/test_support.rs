//! In-memory repositories and a recording event bus shared by the unit tests

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use habitrack_domain::completion::{CompletionRepository, HabitCompletion};
use habitrack_domain::events::{DomainEvent, EventBus};
use habitrack_domain::habit::{Frequency, Habit, HabitRepository};
use habitrack_domain::shared::{DomainError, HabitId, UserId};

pub fn day0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 7, 30, 0).unwrap()
}

pub fn at_day(offset: i64) -> DateTime<Utc> {
    day0() + Duration::days(offset)
}

pub fn habit(user: &UserId, title: &str) -> Habit {
    Habit::new(
        user.clone(),
        title.to_string(),
        format!("{} every day", title),
        Frequency::Daily,
    )
    .unwrap()
}

pub struct MockHabitRepository {
    habits: tokio::sync::RwLock<HashMap<String, Habit>>,
    fail_updates: AtomicBool,
    fail_reads: AtomicBool,
}

impl MockHabitRepository {
    pub fn new() -> Self {
        Self {
            habits: tokio::sync::RwLock::new(HashMap::new()),
            fail_updates: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub async fn insert(&self, habit: Habit) {
        self.habits
            .write()
            .await
            .insert(habit.id().as_str().to_string(), habit);
    }

    pub async fn len(&self) -> usize {
        self.habits.read().await.len()
    }

    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl HabitRepository for MockHabitRepository {
    async fn create(&self, habit: &Habit) -> Result<(), DomainError> {
        self.insert(habit.clone()).await;
        Ok(())
    }

    async fn update(&self, habit: &Habit) -> Result<(), DomainError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::Remote("503 Service Unavailable".to_string()));
        }
        self.insert(habit.clone()).await;
        Ok(())
    }

    async fn delete(&self, id: &HabitId) -> Result<(), DomainError> {
        match self.habits.write().await.remove(id.as_str()) {
            Some(_) => Ok(()),
            None => Err(DomainError::HabitNotFound(id.to_string())),
        }
    }

    async fn find_by_id(&self, id: &HabitId) -> Result<Option<Habit>, DomainError> {
        self.check_reads()?;
        Ok(self.habits.read().await.get(id.as_str()).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Habit>, DomainError> {
        self.check_reads()?;
        let mut habits: Vec<Habit> = self
            .habits
            .read()
            .await
            .values()
            .filter(|h| h.is_owned_by(user_id))
            .cloned()
            .collect();
        habits.sort_by_key(|h| h.created_at());
        Ok(habits)
    }
}

pub struct MockCompletionRepository {
    completions: tokio::sync::RwLock<Vec<HabitCompletion>>,
}

impl MockCompletionRepository {
    pub fn new() -> Self {
        Self {
            completions: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    pub async fn insert(&self, completion: HabitCompletion) {
        self.completions.write().await.push(completion);
    }

    pub async fn all(&self) -> Vec<HabitCompletion> {
        self.completions.read().await.clone()
    }
}

#[async_trait]
impl CompletionRepository for MockCompletionRepository {
    async fn create(&self, completion: &HabitCompletion) -> Result<(), DomainError> {
        self.insert(completion.clone()).await;
        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<HabitCompletion>, DomainError> {
        Ok(self
            .completions
            .read()
            .await
            .iter()
            .filter(|c| c.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_user_since(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<HabitCompletion>, DomainError> {
        Ok(self
            .list_by_user(user_id)
            .await?
            .into_iter()
            .filter(|c| c.is_since(since))
            .collect())
    }
}

/// Keeps the type names of published events
pub struct MockEventBus {
    published: tokio::sync::RwLock<Vec<&'static str>>,
}

impl MockEventBus {
    pub fn new() -> Self {
        Self {
            published: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    pub async fn published(&self) -> Vec<&'static str> {
        self.published.read().await.clone()
    }
}

#[async_trait]
impl EventBus for MockEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        self.published.write().await.push(event.event_type_name());
        Ok(())
    }
}
