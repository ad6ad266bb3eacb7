//! Runs one parsed command against the API and prints its result.
//!
//! Game commands that change the board redraw it afterwards; a finished game
//! is redrawn with the mines shown.

use std::io::Write;

use anyhow::{Context, Error};
use minesweeper_client::{GameConfig, GameState, MinesweeperClient, Position, StateIntent};
use tracing::info;

use crate::cli::{Command, GameCommand, UserAction, UserArgs};

/// Printed after a successful `user --action delete`
pub const DELETED_MARKER: &str = "No-Content";

/// Runs a single command against the API and prints its result
pub async fn execute<W: Write>(
    client: &MinesweeperClient,
    command: Command,
    out: &mut W,
) -> Result<(), Error> {
    match command {
        Command::User(args) => run_user_cmd(client, args, out).await,
        Command::Game { command } => run_game_cmd(client, command, out).await,
    }
}

async fn run_user_cmd<W: Write>(
    client: &MinesweeperClient,
    args: UserArgs,
    out: &mut W,
) -> Result<(), Error> {
    match args.action {
        UserAction::New => {
            let creds = &args.credentials;
            let player = client.create_player(&creds.user, &creds.password).await?;
            info!("Created player {}", creds.user);
            writeln!(out, "{player}")?;
        }
        UserAction::Details => {
            let player = client.get_player_details().await?;
            writeln!(out, "{player}")?;
        }
        UserAction::Delete => {
            client.delete_player().await?;
            info!("Deleted player {}", args.credentials.user);
            writeln!(out, "{DELETED_MARKER}")?;
        }
    }
    Ok(())
}

async fn run_game_cmd<W: Write>(
    client: &MinesweeperClient,
    command: GameCommand,
    out: &mut W,
) -> Result<(), Error> {
    match command {
        GameCommand::New(args) => {
            let config = GameConfig::from(&args);
            let game = client.create_game(config).await?;
            let id = game.id.context("server answered without a game id")?;
            info!(
                "Created game {}: {}x{} with {} mines",
                id, config.height, config.width, config.mines
            );
            writeln!(out, "{game}")?;
            writeln!(out, "{}", client.render_board(id, false).await?)?;
        }
        GameCommand::Play {
            id,
            x,
            y,
            debug,
            action,
            ..
        } => {
            let game = client
                .apply_cell_action(id, Position { x, y }, action.into())
                .await?;
            let board = match game.state {
                Some(GameState::Lost) => {
                    writeln!(out, "Lost the game :(\n")?;
                    client.render_board(id, true).await?
                }
                Some(GameState::Won) => {
                    writeln!(out, "Won the game :D\n")?;
                    client.render_board(id, true).await?
                }
                _ => client.render_board(id, debug).await?,
            };
            writeln!(out, "{board}")?;
        }
        GameCommand::Pause { id, .. } => {
            client.set_game_state(id, StateIntent::Pause).await?;
            writeln!(out, "{}", client.render_board(id, false).await?)?;
        }
        GameCommand::Resume { id, .. } => {
            client.set_game_state(id, StateIntent::Resume).await?;
            writeln!(out, "{}", client.render_board(id, false).await?)?;
        }
        GameCommand::Draw { id, debug, .. } => {
            writeln!(out, "{}", client.render_board(id, debug).await?)?;
        }
    }
    Ok(())
}
