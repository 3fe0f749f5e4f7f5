use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::habit_board::ListRefresher;
use habitrack_domain::realtime::{
    Channel, DocumentChange, RealtimeEvent, RealtimeFeed, RealtimeHandler, Subscription,
};
use habitrack_domain::shared::DomainError;

/// Any habit document change reloads the habit list
struct HabitsChannelHandler {
    refresher: Arc<dyn ListRefresher>,
}

#[async_trait]
impl RealtimeHandler for HabitsChannelHandler {
    async fn on_event(&self, event: RealtimeEvent) {
        if event.changes().is_empty() {
            debug!("Ignoring non-document habit event: {:?}", event.events);
            return;
        }
        self.refresher.refetch_habits().await;
    }

    async fn on_reconnect(&self) {
        self.refresher.refetch_habits().await;
    }
}

/// Only new completions matter for today's list
struct CompletionsChannelHandler {
    refresher: Arc<dyn ListRefresher>,
}

#[async_trait]
impl RealtimeHandler for CompletionsChannelHandler {
    async fn on_event(&self, event: RealtimeEvent) {
        if event.has_change(DocumentChange::Create) {
            self.refresher.refetch_today_completions().await;
        }
    }

    async fn on_reconnect(&self) {
        self.refresher.refetch_today_completions().await;
    }
}

/// Keeps the board lists in step with the backend by refetching on every
/// relevant realtime notification. Event payloads are never merged locally.
pub struct RealtimeListSync {
    feed: Arc<dyn RealtimeFeed>,
    refresher: Arc<dyn ListRefresher>,
    habits_channel: Channel,
    completions_channel: Channel,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl RealtimeListSync {
    pub fn new(
        feed: Arc<dyn RealtimeFeed>,
        refresher: Arc<dyn ListRefresher>,
        habits_channel: Channel,
        completions_channel: Channel,
    ) -> Self {
        Self {
            feed,
            refresher,
            habits_channel,
            completions_channel,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe both channels. Calling it while running is a no-op.
    /// If the second subscription fails the first one is dropped again.
    pub async fn start(&self) -> Result<(), DomainError> {
        let mut subscriptions = self.subscriptions.lock().await;
        if !subscriptions.is_empty() {
            return Ok(());
        }

        let habits = self
            .feed
            .subscribe(
                self.habits_channel.clone(),
                Arc::new(HabitsChannelHandler {
                    refresher: self.refresher.clone(),
                }),
            )
            .await?;

        let completions = self
            .feed
            .subscribe(
                self.completions_channel.clone(),
                Arc::new(CompletionsChannelHandler {
                    refresher: self.refresher.clone(),
                }),
            )
            .await?;

        subscriptions.push(habits);
        subscriptions.push(completions);

        info!(
            "Realtime sync started on {} and {}",
            self.habits_channel, self.completions_channel
        );
        Ok(())
    }

    /// Cancel both subscriptions. In-flight refetches still complete.
    pub async fn stop(&self) {
        let subscriptions: Vec<Subscription> = self.subscriptions.lock().await.drain(..).collect();
        if subscriptions.is_empty() {
            return;
        }

        for subscription in subscriptions {
            subscription.unsubscribe();
        }
        info!("Realtime sync stopped");
    }

    pub async fn is_running(&self) -> bool {
        !self.subscriptions.lock().await.is_empty()
    }
}
