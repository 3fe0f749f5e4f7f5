use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "habitrack", version, about = "Track habits and streaks")]
pub struct Cli {
    /// Also print log records to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    SignUp {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with an existing account
    SignIn {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session
    SignOut,
    /// Show the signed-in account
    Whoami,
    /// Add a habit
    Add {
        title: String,
        #[arg(short, long)]
        description: String,
        /// daily, weekly or monthly
        #[arg(short, long, default_value = "daily")]
        frequency: String,
    },
    /// List habits and today's progress
    List,
    /// Mark a habit as done for today
    Complete { habit_id: String },
    /// Delete a habit
    Delete { habit_id: String },
    /// Show streaks, best first
    Streaks {
        /// Only this habit
        #[arg(long)]
        habit: Option<String>,
    },
    /// Keep the board on screen, refreshed on remote changes
    Watch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_defaults() {
        let cli = Cli::try_parse_from(["habitrack", "add", "Read", "-d", "20 pages"]).unwrap();
        match cli.command {
            Commands::Add {
                title,
                description,
                frequency,
            } => {
                assert_eq!(title, "Read");
                assert_eq!(description, "20 pages");
                assert_eq!(frequency, "daily");
            }
            other => panic!("Unexpected command {:?}", other),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_sign_in_requires_password() {
        assert!(Cli::try_parse_from(["habitrack", "sign-in", "ada@example.com"]).is_err());

        let cli = Cli::try_parse_from([
            "habitrack",
            "sign-in",
            "ada@example.com",
            "--password",
            "password123",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::SignIn { .. }));
    }

    #[test]
    fn test_parse_streaks_for_one_habit() {
        let cli = Cli::try_parse_from(["habitrack", "streaks", "--habit", "h1"]).unwrap();
        match cli.command {
            Commands::Streaks { habit } => assert_eq!(habit.as_deref(), Some("h1")),
            other => panic!("Unexpected command {:?}", other),
        }
    }
}
