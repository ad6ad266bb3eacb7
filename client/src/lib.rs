//! Minesweeper Client Library
//!
//! This library provides a Rust client for the minesweeper game API. The
//! server owns every game rule; the client only turns each API operation into
//! an authenticated HTTP call and hands back what the server answered.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use minesweeper_client::{Credentials, GameConfig, MinesweeperClient, Position};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), minesweeper_client::ApiError> {
//!     let client = MinesweeperClient::new(
//!         "http://localhost:9000",
//!         Credentials::new("alice", "secret"),
//!     )?;
//!
//!     let game = client.create_game(GameConfig::default()).await?;
//!     let id = game.id.expect("server assigns an id");
//!
//!     let game = client.reveal(id, Position { x: 0, y: 0 }).await?;
//!     println!("{}", client.render_board(id, game.is_over()).await?);
//!     Ok(())
//! }
//! ```
//!
//! Any answer with a status code of 300 or above is returned as
//! [`ApiError::UnexpectedApiResponse`] with the status and the raw body.

mod client;
pub mod error;

pub use client::{DEV_API_URL, MinesweeperClient, PROD_API_URL};
pub use error::ApiError;

// Re-export common types for convenience
pub use minesweeper_common::{models::*, protocol::*};

pub type Result<T> = std::result::Result<T, ApiError>;
