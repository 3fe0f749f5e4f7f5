use log::{info, warn};

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use crate::presentation::cli::Commands;
use crate::presentation::error::CommandError;
use crate::presentation::output;
use crate::presentation::state::AppState;
use habitrack_domain::shared::HabitId;

/// Run one CLI subcommand against the wired application
pub async fn dispatch(state: &AppState, command: Commands) -> Result<(), CommandError> {
    match command {
        Commands::SignUp { email, password } => sign_up(state, &email, &password).await,
        Commands::SignIn { email, password } => sign_in(state, &email, &password).await,
        Commands::SignOut => sign_out(state).await,
        Commands::Whoami => whoami(state).await,
        Commands::Add {
            title,
            description,
            frequency,
        } => add_habit(state, title, description, frequency).await,
        Commands::List => list(state).await,
        Commands::Complete { habit_id } => complete(state, habit_id).await,
        Commands::Delete { habit_id } => delete(state, habit_id).await,
        Commands::Streaks { habit } => streaks(state, habit).await,
        Commands::Watch => watch(state).await,
    }
}

pub async fn sign_up(state: &AppState, email: &str, password: &str) -> Result<(), CommandError> {
    let user = state.services.auth.sign_up(email, password).await?;
    state.persist_session()?;
    println!("Account created, signed in as {}", output::render_user(&user));
    Ok(())
}

pub async fn sign_in(state: &AppState, email: &str, password: &str) -> Result<(), CommandError> {
    let user = state.services.auth.sign_in(email, password).await?;
    state.persist_session()?;
    println!("Signed in as {}", output::render_user(&user));
    Ok(())
}

pub async fn sign_out(state: &AppState) -> Result<(), CommandError> {
    state.services.auth.sign_out().await;
    // the client drops its session even when the backend call failed
    state.persist_session()?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(state: &AppState) -> Result<(), CommandError> {
    match state.services.auth.current_user().await {
        Some(user) => println!("{}", output::render_user(&user)),
        None => println!("Not signed in"),
    }
    Ok(())
}

pub async fn add_habit(
    state: &AppState,
    title: String,
    description: String,
    frequency: String,
) -> Result<(), CommandError> {
    let user = state.services.auth.require_user().await?;

    let result = state
        .command_handlers
        .create_habit
        .handle(CreateHabitCommand {
            user_id: user.id,
            title,
            description,
            frequency,
        })
        .await?;

    println!("Added {} ({})", result.habit.title, result.habit.id);
    Ok(())
}

pub async fn list(state: &AppState) -> Result<(), CommandError> {
    let user = state.services.auth.require_user().await?;
    let board = state.open_board(&user).await?;

    print!(
        "{}",
        output::render_board(&board.habits().await, &board.today_completions().await)
    );
    Ok(())
}

pub async fn complete(state: &AppState, habit_id: String) -> Result<(), CommandError> {
    let user = state.services.auth.require_user().await?;
    let habit_id = non_empty_id(habit_id)?;

    let result = state
        .command_handlers
        .complete_habit
        .handle(CompleteHabitCommand::now(user.id, habit_id))
        .await?;

    if !result.streak_cache_updated {
        warn!(
            "Completion {} stored with a stale streak counter on habit {}",
            result.completion_id, result.habit_id
        );
    }
    print!("{}", output::render_completion(&result));
    Ok(())
}

pub async fn delete(state: &AppState, habit_id: String) -> Result<(), CommandError> {
    let user = state.services.auth.require_user().await?;
    let habit_id = non_empty_id(habit_id)?;

    state
        .command_handlers
        .delete_habit
        .handle(DeleteHabitCommand {
            user_id: user.id,
            habit_id: habit_id.clone(),
        })
        .await?;

    println!("Deleted {}", habit_id);
    Ok(())
}

pub async fn streaks(state: &AppState, habit: Option<String>) -> Result<(), CommandError> {
    let user = state.services.auth.require_user().await?;

    let streaks = match habit {
        Some(habit_id) => {
            let habit_id = HabitId::from_string(&non_empty_id(habit_id)?);
            vec![state.queries.streak.get_streak(&user.id, &habit_id).await?]
        }
        None => state.queries.streak.get_ranked_streaks(&user.id).await?,
    };

    print!("{}", output::render_streaks(&streaks));
    Ok(())
}

/// Print the board, then again after every refresh, until Ctrl-C
pub async fn watch(state: &AppState) -> Result<(), CommandError> {
    let user = state.services.auth.require_user().await?;
    let board = state.open_board(&user).await?;
    let mut changes = board.subscribe();

    let sync = state.realtime_sync(board.clone());
    sync.start().await?;
    info!("Watching board of {}", user.id);

    print!(
        "{}",
        output::render_board(&board.habits().await, &board.today_completions().await)
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                println!();
                print!(
                    "{}",
                    output::render_board(&board.habits().await, &board.today_completions().await)
                );
            }
        }
    }

    sync.stop().await;
    Ok(())
}

fn non_empty_id(id: String) -> Result<String, CommandError> {
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(CommandError::validation("Habit id cannot be empty"));
    }
    Ok(id)
}
