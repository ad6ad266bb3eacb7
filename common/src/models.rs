use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Basic-auth credentials of a player
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub height: u32,
    pub width: u32,
    pub mines: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 10,
            width: 10,
            mines: 10,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellAction {
    #[serde(rename = "reveal")]
    Reveal,
    #[serde(rename = "set-red-flag")]
    SetRedFlag,
    #[serde(rename = "set-question-flag")]
    SetQuestionFlag,
    #[serde(rename = "clean-flag")]
    ClearFlag,
}

impl CellAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellAction::Reveal => "reveal",
            CellAction::SetRedFlag => "set-red-flag",
            CellAction::SetQuestionFlag => "set-question-flag",
            CellAction::ClearFlag => "clean-flag",
        }
    }
}

/// Requested change of a game's running state
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateIntent {
    #[serde(rename = "pause")]
    Pause,
    #[serde(rename = "resume")]
    Resume,
}

/// Game state as reported by the server.
///
/// The server owns the set of states; unknown values are kept verbatim.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum GameState {
    Playing,
    Won,
    Lost,
    Paused,
    Other(String),
}

impl GameState {
    /// Whether the game has finished, either won or lost
    pub fn is_over(&self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

impl From<String> for GameState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Playing" => GameState::Playing,
            "Won" => GameState::Won,
            "Lost" => GameState::Lost,
            "Paused" => GameState::Paused,
            _ => GameState::Other(value),
        }
    }
}

impl From<GameState> for String {
    fn from(value: GameState) -> Self {
        match value {
            GameState::Playing => "Playing".to_string(),
            GameState::Won => "Won".to_string(),
            GameState::Lost => "Lost".to_string(),
            GameState::Paused => "Paused".to_string(),
            GameState::Other(state) => state,
        }
    }
}

/// Snapshot of a game returned by the server.
///
/// Only `id` and `state` are interpreted; every other field is carried
/// through untouched so the view can be printed as the server sent it.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct GameView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<GameState>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameView {
    pub fn is_over(&self) -> bool {
        self.state.as_ref().is_some_and(GameState::is_over)
    }
}

impl fmt::Display for GameView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_json(f, self)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct PlayerView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Display for PlayerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_json(f, self)
    }
}

fn write_json<T: Serialize>(f: &mut fmt::Formatter<'_>, value: &T) -> fmt::Result {
    let json = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
    f.write_str(&json)
}
