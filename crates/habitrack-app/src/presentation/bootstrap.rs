use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::queries::{HabitQueries, StreakQueries};
use crate::application::services::AuthSession;
use crate::presentation::state::{
    AppState, CommandHandlers, Queries, Repositories, Runtime, Services,
};
use habitrack_domain::completion::CompletionRepository;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::realtime::{Channel, RealtimeFeed};
use habitrack_domain::session::AuthGateway;
use habitrack_infrastructure::config::{BackendConfig, RealtimeConfig};
use habitrack_infrastructure::events::InMemoryEventBus;
use habitrack_infrastructure::http::AppwriteClient;
use habitrack_infrastructure::persistence::repositories::{
    AppwriteCompletionRepository, AppwriteHabitRepository,
};
use habitrack_infrastructure::persistence::SessionFileStore;
use habitrack_infrastructure::realtime::AppwriteRealtime;

/// Wire the application together and restore the stored session
pub async fn build_app_state(
    backend: BackendConfig,
    realtime: RealtimeConfig,
    session_store: SessionFileStore,
) -> anyhow::Result<AppState> {
    let startup_started_at = Instant::now();

    let backend = Arc::new(backend);
    let client = Arc::new(
        AppwriteClient::new(backend.clone()).context("Failed to create backend client")?,
    );

    if let Some(cookies) = session_store.load() {
        info!("Stored session found at {}", session_store.path().display());
        client.set_fallback_cookies(Some(cookies));
    }

    let event_bus = Arc::new(InMemoryEventBus::new());
    let dyn_event_bus = event_bus.clone() as Arc<dyn EventBus>;

    let habit_repo = Arc::new(AppwriteHabitRepository::new(client.clone())) as Arc<dyn HabitRepository>;
    let completion_repo = Arc::new(AppwriteCompletionRepository::new(client.clone()))
        as Arc<dyn CompletionRepository>;

    let auth = Arc::new(AuthSession::new(client.clone() as Arc<dyn AuthGateway>));
    auth.initialize().await;

    let command_handlers = CommandHandlers {
        create_habit: Arc::new(CreateHabitCommandHandler::new(
            habit_repo.clone(),
            dyn_event_bus.clone(),
        )),
        delete_habit: Arc::new(DeleteHabitCommandHandler::new(
            habit_repo.clone(),
            dyn_event_bus.clone(),
        )),
        complete_habit: Arc::new(CompleteHabitCommandHandler::new(
            habit_repo.clone(),
            completion_repo.clone(),
            dyn_event_bus,
        )),
    };

    let queries = Queries {
        habit: Arc::new(HabitQueries::new(habit_repo.clone(), completion_repo.clone())),
        streak: Arc::new(StreakQueries::new(habit_repo.clone(), completion_repo.clone())),
    };

    let runtime = Runtime {
        realtime: Arc::new(AppwriteRealtime::new(client.clone(), &realtime)) as Arc<dyn RealtimeFeed>,
        habits_channel: Channel::documents(&backend.database_id, &backend.habits_collection_id),
        completions_channel: Channel::documents(
            &backend.database_id,
            &backend.completions_collection_id,
        ),
        client,
        event_bus,
        session_store,
    };

    info!(
        "✓ Application state ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime,
        repositories: Repositories {
            habit: habit_repo,
            completion: completion_repo,
        },
        services: Services { auth },
        queries,
        command_handlers,
    })
}
