use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::event_handlers::BoardRefreshEventHandler;
use crate::application::queries::{HabitQueries, StreakQueries};
use crate::application::services::{AuthSession, HabitBoard, ListRefresher, RealtimeListSync};
use habitrack_domain::completion::CompletionRepository;
use habitrack_domain::events::habit_events::*;
use habitrack_domain::events::typed_handler;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::realtime::{Channel, RealtimeFeed};
use habitrack_domain::session::User;
use habitrack_domain::shared::DomainError;
use habitrack_infrastructure::events::InMemoryEventBus;
use habitrack_infrastructure::http::AppwriteClient;
use habitrack_infrastructure::persistence::SessionFileStore;

/// Command handlers container
pub struct CommandHandlers {
    pub create_habit: Arc<CreateHabitCommandHandler>,
    pub delete_habit: Arc<DeleteHabitCommandHandler>,
    pub complete_habit: Arc<CompleteHabitCommandHandler>,
}

pub struct Runtime {
    pub client: Arc<AppwriteClient>,
    pub event_bus: Arc<InMemoryEventBus>,
    pub session_store: SessionFileStore,
    pub realtime: Arc<dyn RealtimeFeed>,
    pub habits_channel: Channel,
    pub completions_channel: Channel,
}

pub struct Repositories {
    pub habit: Arc<dyn HabitRepository>,
    pub completion: Arc<dyn CompletionRepository>,
}

pub struct Services {
    pub auth: Arc<AuthSession>,
}

pub struct Queries {
    pub habit: Arc<HabitQueries>,
    pub streak: Arc<StreakQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

impl AppState {
    /// Load the board of `user` and keep it fresh after local commands
    pub async fn open_board(&self, user: &User) -> Result<Arc<HabitBoard>, DomainError> {
        let board = Arc::new(HabitBoard::new(
            user.id.clone(),
            self.queries.habit.clone(),
        ));
        board.load().await?;

        let handler =
            BoardRefreshEventHandler::new(user.id.clone(), board.clone() as Arc<dyn ListRefresher>);
        let bus = &self.runtime.event_bus;
        bus.subscribe::<HabitCreated>(typed_handler::<HabitCreated, _>(handler.clone()))
            .await?;
        bus.subscribe::<HabitDeleted>(typed_handler::<HabitDeleted, _>(handler.clone()))
            .await?;
        bus.subscribe::<HabitCompleted>(typed_handler::<HabitCompleted, _>(handler))
            .await?;

        Ok(board)
    }

    /// Realtime sync feeding `board`; not started yet
    pub fn realtime_sync(&self, board: Arc<HabitBoard>) -> RealtimeListSync {
        RealtimeListSync::new(
            self.runtime.realtime.clone(),
            board,
            self.runtime.habits_channel.clone(),
            self.runtime.completions_channel.clone(),
        )
    }

    /// Write the client's current session to disk, or remove the file when
    /// there is none
    pub fn persist_session(&self) -> Result<(), DomainError> {
        match self.runtime.client.fallback_cookies() {
            Some(cookies) => self.runtime.session_store.save(&cookies),
            None => self.runtime.session_store.clear(),
        }
    }
}
