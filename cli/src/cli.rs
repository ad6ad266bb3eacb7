use std::ffi::OsString;

use clap::{Args, Parser, Subcommand, ValueEnum};
use minesweeper_client::{CellAction, Credentials, DEV_API_URL, GameConfig, PROD_API_URL};

const HELP_EPILOG: &str = r#"Examples:
  minesweeper-cli user -u alice -p secret -a new
  minesweeper-cli game new -u alice -p secret -he 20 -w 20 -m 30
  minesweeper-cli game play -u alice -p secret -i 42 -x 5 -y 3 -a add-red-flag
  minesweeper-cli game draw -u alice -p secret -i 42 --debug
"#;

#[derive(Debug, Parser)]
#[command(
    name = "minesweeper-cli",
    version,
    about = "Minesweeper game",
    long_about = None,
    after_long_help = HELP_EPILOG,
)]
pub struct Cli {
    /// Base URL of the game API
    #[arg(long, env = "MINESWEEPER_API_URL", default_value = PROD_API_URL, global = true)]
    pub api_url: String,
    /// Use the local development server instead of --api-url
    #[arg(long, global = true)]
    pub dev: bool,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn api_url(&self) -> &str {
        if self.dev { DEV_API_URL } else { self.api_url.as_str() }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// User management
    User(UserArgs),
    /// Play a game
    Game {
        #[command(subcommand)]
        command: GameCommand,
    },
}

impl Command {
    pub fn credentials(&self) -> &CredentialArgs {
        match self {
            Command::User(args) => &args.credentials,
            Command::Game { command } => command.credentials(),
        }
    }
}

#[derive(Debug, Args)]
pub struct CredentialArgs {
    /// Username
    #[arg(long, short)]
    pub user: String,
    /// Password
    #[arg(long, short)]
    pub password: String,
}

impl From<&CredentialArgs> for Credentials {
    fn from(args: &CredentialArgs) -> Self {
        Credentials::new(&args.user, &args.password)
    }
}

#[derive(Debug, Args)]
pub struct UserArgs {
    /// Action
    #[arg(long, short, value_enum, default_value_t = UserAction::Details)]
    pub action: UserAction,
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UserAction {
    New,
    Details,
    Delete,
}

#[derive(Debug, Subcommand)]
pub enum GameCommand {
    /// New game
    New(NewGameArgs),
    /// Play game
    Play {
        /// Game ID
        #[arg(long, short)]
        id: u64,
        /// X position
        #[arg(short, allow_negative_numbers = true)]
        x: i64,
        /// Y position
        #[arg(short, allow_negative_numbers = true)]
        y: i64,
        /// Show mines in the board
        #[arg(long)]
        debug: bool,
        /// Action
        #[arg(long, short, value_enum, default_value_t = PlayAction::Reveal)]
        action: PlayAction,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Pause the game
    Pause {
        /// Game ID
        #[arg(long, short)]
        id: u64,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Resume the game
    Resume {
        /// Game ID
        #[arg(long, short)]
        id: u64,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Draw the game
    Draw {
        /// Game ID
        #[arg(long, short)]
        id: u64,
        /// Show mines in the board
        #[arg(long)]
        debug: bool,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

impl GameCommand {
    pub fn credentials(&self) -> &CredentialArgs {
        match self {
            GameCommand::New(args) => &args.credentials,
            GameCommand::Play { credentials, .. }
            | GameCommand::Pause { credentials, .. }
            | GameCommand::Resume { credentials, .. }
            | GameCommand::Draw { credentials, .. } => credentials,
        }
    }
}

#[derive(Debug, Args)]
pub struct NewGameArgs {
    /// Height
    #[arg(long, short = 'H', default_value_t = 10)]
    pub height: u32,
    /// Width
    #[arg(long, short, default_value_t = 10)]
    pub width: u32,
    /// Number of mines
    #[arg(long, short, default_value_t = 10)]
    pub mines: u32,
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

impl From<&NewGameArgs> for GameConfig {
    fn from(args: &NewGameArgs) -> Self {
        GameConfig {
            height: args.height,
            width: args.width,
            mines: args.mines,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayAction {
    Reveal,
    AddRedFlag,
    AddQuestionFlag,
    Clean,
}

impl From<PlayAction> for CellAction {
    fn from(action: PlayAction) -> Self {
        match action {
            PlayAction::Reveal => CellAction::Reveal,
            PlayAction::AddRedFlag => CellAction::SetRedFlag,
            PlayAction::AddQuestionFlag => CellAction::SetQuestionFlag,
            PlayAction::Clean => CellAction::ClearFlag,
        }
    }
}

/// Rewrites the two-letter `-he` height flag to `--height`.
///
/// `-h` is taken by help, so clap would read `-he` as `-h -e`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if after_separator {
                return arg;
            }
            let rewritten = match arg.to_str() {
                Some("--") => {
                    after_separator = true;
                    None
                }
                Some(flag) => flag.strip_prefix("-he").map(|value| {
                    match value.trim_start_matches('=') {
                        "" => OsString::from("--height"),
                        value => OsString::from(format!("--height={value}")),
                    }
                }),
                None => None,
            };
            rewritten.unwrap_or(arg)
        })
        .collect()
}
