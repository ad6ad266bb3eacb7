use serde::{Deserialize, Serialize};

use crate::models::{CellAction, Position, StateIntent};

/// Body of `POST /player`
#[derive(Debug, Deserialize, Serialize)]
pub struct NewPlayerRequest {
    pub username: String,
    pub password: String,
}

/// Body of `PATCH /games/{id}`
#[derive(Debug, Deserialize, Serialize)]
pub struct CellActionRequest {
    pub action: CellAction,
    pub position: Position,
}

/// Body of `POST /games/{id}/state`
#[derive(Debug, Deserialize, Serialize)]
pub struct StateChangeRequest {
    pub action: StateIntent,
}
