use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use crate::application::services::ListRefresher;
use habitrack_domain::events::habit_events::*;
use habitrack_domain::events::EventHandler;
use habitrack_domain::shared::{DomainError, UserId};

/// Refreshes an open board after local commands, without waiting for the
/// realtime echo of the same change
#[derive(Clone)]
pub struct BoardRefreshEventHandler {
    user_id: UserId,
    refresher: Arc<dyn ListRefresher>,
}

impl BoardRefreshEventHandler {
    pub fn new(user_id: UserId, refresher: Arc<dyn ListRefresher>) -> Self {
        Self { user_id, refresher }
    }

    fn concerns(&self, user_id: &UserId) -> bool {
        if &self.user_id != user_id {
            debug!("Ignoring event of another user: {}", user_id);
            return false;
        }
        true
    }
}

#[async_trait]
impl EventHandler<HabitCreated> for BoardRefreshEventHandler {
    async fn handle(&self, event: &HabitCreated) -> Result<(), DomainError> {
        info!(
            "Handling HabitCreated event for habit: {} ({})",
            event.title, event.habit_id
        );

        if self.concerns(&event.user_id) {
            self.refresher.refetch_habits().await;
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler<HabitDeleted> for BoardRefreshEventHandler {
    async fn handle(&self, event: &HabitDeleted) -> Result<(), DomainError> {
        info!("Handling HabitDeleted event for habit: {}", event.habit_id);

        if self.concerns(&event.user_id) {
            self.refresher.refetch_habits().await;
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler<HabitCompleted> for BoardRefreshEventHandler {
    async fn handle(&self, event: &HabitCompleted) -> Result<(), DomainError> {
        info!(
            "Handling HabitCompleted event for habit: {} (cache updated: {})",
            event.habit_id, event.streak_cache_updated
        );

        if self.concerns(&event.user_id) {
            self.refresher.refetch_today_completions().await;
            // the cached counter shows on the habit list
            if event.streak_cache_updated {
                self.refresher.refetch_habits().await;
            }
        }
        Ok(())
    }
}
