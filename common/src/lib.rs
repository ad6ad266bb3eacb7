//! Wire types shared by the minesweeper API client and CLI.

pub mod models;
pub mod protocol;
