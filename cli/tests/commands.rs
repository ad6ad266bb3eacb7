//! CLI dispatch tests against a fake game server

use axum::http::Method;
use clap::Parser;
use minesweeper_cli::{Cli, normalize_args, run_with_output};
use minesweeper_client::ApiError;
use minesweeper_test_support::{BASIC_AUTH, FakeApi, Reply};
use serde_json::json;

const BOARD: &str = "  0 1 2\n0 - - -\n1 - 1 -\n2 - - -";
const DEBUG_BOARD: &str = "  0 1 2\n0 - - *\n1 - 1 -\n2 - - -";

async fn run(api: &FakeApi, args: &[&str]) -> (Result<(), anyhow::Error>, String) {
    let args = ["minesweeper-cli", "--api-url", api.base.as_str()]
        .into_iter()
        .chain(args.iter().copied());
    let cli = Cli::try_parse_from(normalize_args(args)).unwrap();

    let mut out = Vec::new();
    let result = run_with_output(cli, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn new_game_creates_then_draws() {
    let api = FakeApi::spawn(vec![
        Reply::json(
            201,
            json!({"id": 42, "state": "Playing", "height": 10, "width": 10, "mines": 10}),
        ),
        Reply::text(200, BOARD),
    ])
    .await;

    let (result, out) = run(&api, &["game", "new", "-u", "alice", "-p", "secret"]).await;
    result.unwrap();

    let requests = api.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "/games");
    assert_eq!(
        requests[0].json(),
        json!({"height": 10, "width": 10, "mines": 10})
    );
    assert_eq!(requests[1].method, Method::GET);
    assert_eq!(requests[1].path, "/games/42/ascii");
    assert_eq!(requests[1].query.as_deref(), Some("debug=false"));
    for request in &requests {
        assert_eq!(request.authorization.as_deref(), Some(BASIC_AUTH));
    }

    assert!(out.contains("\"id\": 42"), "output: {out}");
    assert!(out.ends_with(&format!("{BOARD}\n")), "output: {out}");
}

#[tokio::test]
async fn new_game_with_custom_size() {
    let api = FakeApi::spawn(vec![
        Reply::json(201, json!({"id": 7})),
        Reply::text(200, BOARD),
    ])
    .await;

    let (result, _) = run(
        &api,
        &[
            "game", "new", "-u", "alice", "-p", "secret", "-he", "20", "-w", "25", "-m", "30",
        ],
    )
    .await;
    result.unwrap();

    assert_eq!(
        api.requests()[0].json(),
        json!({"height": 20, "width": 25, "mines": 30})
    );
}

#[tokio::test]
async fn new_game_without_id_fails() {
    let api = FakeApi::spawn(vec![Reply::json(201, json!({"state": "Playing"}))]).await;

    let (result, out) = run(&api, &["game", "new", "-u", "alice", "-p", "secret"]).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("without a game id"), "{err}");
    assert!(out.is_empty());
    assert_eq!(api.requests().len(), 1);
}

#[tokio::test]
async fn lost_game_shows_mines() {
    let api = FakeApi::spawn(vec![
        Reply::json(200, json!({"id": 42, "state": "Lost"})),
        Reply::text(200, DEBUG_BOARD),
    ])
    .await;

    let (result, out) = run(
        &api,
        &[
            "game", "play", "-u", "alice", "-p", "secret", "--id", "42", "-x", "3", "-y", "4",
            "-a", "reveal",
        ],
    )
    .await;
    result.unwrap();

    let requests = api.requests();
    assert_eq!(requests[0].method, Method::PATCH);
    assert_eq!(requests[0].path, "/games/42");
    assert_eq!(
        requests[0].json(),
        json!({"action": "reveal", "position": {"x": 3, "y": 4}})
    );
    assert_eq!(requests[1].path, "/games/42/ascii");
    assert_eq!(requests[1].query.as_deref(), Some("debug=true"));

    assert_eq!(out, format!("Lost the game :(\n\n{DEBUG_BOARD}\n"));
}

#[tokio::test]
async fn won_game_shows_mines() {
    let api = FakeApi::spawn(vec![
        Reply::json(200, json!({"state": "Won"})),
        Reply::text(200, DEBUG_BOARD),
    ])
    .await;

    let (result, out) = run(
        &api,
        &[
            "game", "play", "-u", "alice", "-p", "secret", "-i", "8", "-x", "0", "-y", "2", "-a",
            "add-red-flag",
        ],
    )
    .await;
    result.unwrap();

    let requests = api.requests();
    assert_eq!(requests[0].json()["action"], json!("set-red-flag"));
    assert_eq!(requests[1].query.as_deref(), Some("debug=true"));
    assert_eq!(out, format!("Won the game :D\n\n{DEBUG_BOARD}\n"));
}

#[tokio::test]
async fn ongoing_game_follows_debug_flag() {
    for (debug, query) in [(false, "debug=false"), (true, "debug=true")] {
        let api = FakeApi::spawn(vec![
            Reply::json(200, json!({"id": 5, "state": "Playing"})),
            Reply::text(200, BOARD),
        ])
        .await;

        let mut args = vec![
            "game",
            "play",
            "-u",
            "alice",
            "-p",
            "secret",
            "-i",
            "5",
            "-x",
            "1",
            "-y",
            "1",
            "-a",
            "clean",
        ];
        if debug {
            args.push("--debug");
        }
        let (result, out) = run(&api, &args).await;
        result.unwrap();

        let requests = api.requests();
        assert_eq!(requests[0].json()["action"], json!("clean-flag"));
        assert_eq!(requests[1].query.as_deref(), Some(query));
        assert_eq!(out, format!("{BOARD}\n"));
    }
}

#[tokio::test]
async fn pause_and_resume_redraw_the_board() {
    for (command, action) in [("pause", "pause"), ("resume", "resume")] {
        let api = FakeApi::spawn(vec![Reply::text(200, "ok"), Reply::text(200, BOARD)]).await;

        let (result, out) = run(
            &api,
            &["game", command, "-u", "alice", "-p", "secret", "-i", "3"],
        )
        .await;
        result.unwrap();

        let requests = api.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/games/3/state");
        assert_eq!(requests[0].json(), json!({"action": action}));
        assert_eq!(requests[1].path, "/games/3/ascii");
        assert_eq!(requests[1].query.as_deref(), Some("debug=false"));
        assert_eq!(out, format!("{BOARD}\n"));
    }
}

#[tokio::test]
async fn draw_with_debug() {
    let api = FakeApi::spawn(vec![Reply::text(200, DEBUG_BOARD)]).await;

    let (result, out) = run(
        &api,
        &["game", "draw", "-u", "alice", "-p", "secret", "-i", "11", "--debug"],
    )
    .await;
    result.unwrap();

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/games/11/ascii");
    assert_eq!(requests[0].query.as_deref(), Some("debug=true"));
    assert_eq!(out, format!("{DEBUG_BOARD}\n"));
}

#[tokio::test]
async fn user_new_registers_player() {
    let api = FakeApi::spawn(vec![Reply::json(201, json!({"username": "alice"}))]).await;

    let (result, out) = run(&api, &["user", "-u", "alice", "-p", "secret", "-a", "new"]).await;
    result.unwrap();

    let request = &api.requests()[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/player");
    assert_eq!(
        request.json(),
        json!({"username": "alice", "password": "secret"})
    );
    assert!(out.contains("\"username\": \"alice\""), "output: {out}");
}

#[tokio::test]
async fn user_details_is_the_default() {
    let api = FakeApi::spawn(vec![Reply::json(
        200,
        json!({"username": "alice", "games": 3}),
    )])
    .await;

    let (result, out) = run(&api, &["user", "-u", "alice", "-p", "secret"]).await;
    result.unwrap();

    let request = &api.requests()[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/player");
    assert!(out.contains("\"games\": 3"), "output: {out}");
}

#[tokio::test]
async fn user_delete_prints_marker() {
    let api = FakeApi::spawn(vec![Reply::text(204, "")]).await;

    let (result, out) = run(&api, &["user", "-u", "alice", "-p", "secret", "-a", "delete"]).await;
    result.unwrap();

    assert_eq!(api.requests()[0].method, Method::DELETE);
    assert_eq!(out, "No-Content\n");
}

#[tokio::test]
async fn api_error_reaches_the_caller() {
    let api = FakeApi::spawn(vec![Reply::text(404, "not found")]).await;

    let (result, out) = run(
        &api,
        &["game", "draw", "-u", "alice", "-p", "secret", "-i", "99"],
    )
    .await;

    let err = result.unwrap_err();
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::UnexpectedApiResponse { status, body }) => {
            assert_eq!(*status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(out.is_empty());
}

#[tokio::test]
async fn failed_action_skips_render() {
    let api = FakeApi::spawn(vec![Reply::text(409, "game is paused")]).await;

    let (result, _) = run(
        &api,
        &[
            "game", "play", "-u", "alice", "-p", "secret", "-i", "4", "-x", "0", "-y", "0",
        ],
    )
    .await;

    assert!(result.is_err());
    assert_eq!(api.requests().len(), 1);
}
