use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, instrument, warn};

use crate::application::dtos::{CompletionDto, HabitDto};
use crate::application::queries::HabitQueries;
use crate::application::utils::today_start;
use habitrack_domain::shared::{DomainError, UserId};

/// Reaction to remote changes: reload one of the board lists
#[async_trait]
pub trait ListRefresher: Send + Sync {
    async fn refetch_habits(&self);

    async fn refetch_today_completions(&self);
}

type DayStart = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Default)]
struct BoardState {
    habits: Vec<HabitDto>,
    today_completions: Vec<CompletionDto>,
}

/// Home screen state: the user's habits and today's completions.
///
/// Each refetch replaces a whole list. Concurrent refetches are not
/// sequenced, the last one to finish wins. A failed refetch keeps the
/// previous list.
pub struct HabitBoard {
    user_id: UserId,
    queries: Arc<HabitQueries>,
    day_start: DayStart,
    state: RwLock<BoardState>,
    changes: watch::Sender<u64>,
}

impl HabitBoard {
    pub fn new(user_id: UserId, queries: Arc<HabitQueries>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            user_id,
            queries,
            day_start: Box::new(today_start),
            state: RwLock::new(BoardState::default()),
            changes,
        }
    }

    /// Replace the local-midnight day boundary
    pub fn with_day_start(
        mut self,
        day_start: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        self.day_start = Box::new(day_start);
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Initial load of both lists. Unlike the refetches, errors are returned.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn load(&self) -> Result<(), DomainError> {
        let habits = self.queries.list_habits(&self.user_id).await?;
        let today = self
            .queries
            .list_today_completions(&self.user_id, (self.day_start)())
            .await?;

        {
            let mut state = self.state.write().await;
            state.habits = habits;
            state.today_completions = today;
        }
        self.bump();
        Ok(())
    }

    pub async fn habits(&self) -> Vec<HabitDto> {
        self.state.read().await.habits.clone()
    }

    pub async fn today_completions(&self) -> Vec<CompletionDto> {
        self.state.read().await.today_completions.clone()
    }

    /// Answered from the fetched list, no network call
    pub async fn completed_today(&self, habit_id: &str) -> bool {
        self.state
            .read()
            .await
            .today_completions
            .iter()
            .any(|c| c.habit_id == habit_id)
    }

    /// Change counter, bumped after every successful load or refetch
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn bump(&self) {
        self.changes.send_modify(|version| *version += 1);
    }
}

#[async_trait]
impl ListRefresher for HabitBoard {
    async fn refetch_habits(&self) {
        match self.queries.list_habits(&self.user_id).await {
            Ok(habits) => {
                debug!("Board habits refreshed: {}", habits.len());
                self.state.write().await.habits = habits;
                self.bump();
            }
            Err(e) => warn!("Failed to refresh habits, keeping previous list: {}", e),
        }
    }

    async fn refetch_today_completions(&self) {
        let day_start = (self.day_start)();
        match self
            .queries
            .list_today_completions(&self.user_id, day_start)
            .await
        {
            Ok(today) => {
                debug!("Board completions refreshed: {}", today.len());
                self.state.write().await.today_completions = today;
                self.bump();
            }
            Err(e) => warn!(
                "Failed to refresh today's completions, keeping previous list: {}",
                e
            ),
        }
    }
}
