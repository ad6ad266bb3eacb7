use minesweeper_common::models::{
    CellAction, Credentials, GameConfig, GameView, PlayerView, Position, StateIntent,
};
use minesweeper_common::protocol::{CellActionRequest, NewPlayerRequest, StateChangeRequest};
use reqwest::{Client, RequestBuilder, Response, redirect};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{ApiError, Result};

/// Local development server
pub const DEV_API_URL: &str = "http://localhost:9000";
/// Hosted game service
pub const PROD_API_URL: &str = "https://cspinetta-minesweeper-api.herokuapp.com";

/// HTTP client for the minesweeper game API
///
/// Every call except [`create_player`](Self::create_player) is authenticated
/// with the credentials given at construction.
pub struct MinesweeperClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl MinesweeperClient {
    /// Create a new client for the server at `base_url`
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Relative joins would otherwise replace the last path segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        // 3xx answers are errors for this API, not hops to follow
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Base URL, always ending in `/`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Credentials sent with authenticated calls
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Register a new player
    pub async fn create_player(&self, username: &str, password: &str) -> Result<PlayerView> {
        let body = NewPlayerRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.client.post(self.endpoint("player")?).json(&body);
        self.send_json(request).await
    }

    /// Details of the authenticated player
    pub async fn get_player_details(&self) -> Result<PlayerView> {
        let request = self.authed(self.client.get(self.endpoint("player")?));
        self.send_json(request).await
    }

    /// Delete the authenticated player
    pub async fn delete_player(&self) -> Result<()> {
        let request = self.authed(self.client.delete(self.endpoint("player")?));
        self.send(request).await?;
        Ok(())
    }

    /// Create a new game with the specified parameters
    pub async fn create_game(&self, config: GameConfig) -> Result<GameView> {
        let request = self
            .authed(self.client.post(self.endpoint("games")?))
            .json(&config);
        self.send_json(request).await
    }

    /// Apply `action` to the cell at `position`
    pub async fn apply_cell_action(
        &self,
        game_id: u64,
        position: Position,
        action: CellAction,
    ) -> Result<GameView> {
        debug!(
            "Applying {} at ({}, {}) in game {}",
            action.as_str(),
            position.x,
            position.y,
            game_id
        );
        let body = CellActionRequest { action, position };
        let request = self
            .authed(self.client.patch(self.endpoint(&format!("games/{game_id}"))?))
            .json(&body);
        self.send_json(request).await
    }

    /// Reveal the cell at `position`
    pub async fn reveal(&self, game_id: u64, position: Position) -> Result<GameView> {
        self.apply_cell_action(game_id, position, CellAction::Reveal).await
    }

    /// Mark the cell at `position` as a mine
    pub async fn add_red_flag(&self, game_id: u64, position: Position) -> Result<GameView> {
        self.apply_cell_action(game_id, position, CellAction::SetRedFlag).await
    }

    /// Mark the cell at `position` as uncertain
    pub async fn add_question_flag(&self, game_id: u64, position: Position) -> Result<GameView> {
        self.apply_cell_action(game_id, position, CellAction::SetQuestionFlag).await
    }

    /// Remove any flag from the cell at `position`
    pub async fn clean_flag(&self, game_id: u64, position: Position) -> Result<GameView> {
        self.apply_cell_action(game_id, position, CellAction::ClearFlag).await
    }

    /// Pause or resume a game. Returns the server's plain text answer.
    pub async fn set_game_state(&self, game_id: u64, intent: StateIntent) -> Result<String> {
        let body = StateChangeRequest { action: intent };
        let request = self
            .authed(self.client.post(self.endpoint(&format!("games/{game_id}/state"))?))
            .json(&body);
        self.send_text(request).await
    }

    /// Shorthand for [`set_game_state`](Self::set_game_state) with [`StateIntent::Pause`]
    pub async fn pause(&self, game_id: u64) -> Result<String> {
        self.set_game_state(game_id, StateIntent::Pause).await
    }

    /// Shorthand for [`set_game_state`](Self::set_game_state) with [`StateIntent::Resume`]
    pub async fn resume(&self, game_id: u64) -> Result<String> {
        self.set_game_state(game_id, StateIntent::Resume).await
    }

    /// ASCII rendering of the board. With `debug` the mines are shown.
    pub async fn render_board(&self, game_id: u64, debug: bool) -> Result<String> {
        let request = self
            .authed(self.client.get(self.endpoint(&format!("games/{game_id}/ascii"))?))
            .query(&[("debug", debug)]);
        self.send_text(request).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        debug!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.as_u16() >= 300 {
            debug!("API answered with status {}", status);
            // An unreadable error body is a transport failure, not an empty body
            let body = response.text().await?;
            return Err(ApiError::UnexpectedApiResponse {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_text(&self, request: RequestBuilder) -> Result<String> {
        Ok(self.send(request).await?.text().await?)
    }
}
