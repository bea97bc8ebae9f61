use super::*;
use crate::lobby::{CANCELLED_ANNOUNCEMENT, CREATED_ANNOUNCEMENT, FULL_ANNOUNCEMENT, Rejection};
use crate::slack::{Message, ResponseType};
use crate::state::test_helpers::{Posted, test_app_state};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

const RESPONSE_URL: &str = "https://hooks.example.test/actions/T1/B1/xyz";
const MESSAGE_TS: &str = "1700000000.000100";

async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app(state)).await.unwrap() });
    format!("http://{addr}")
}

async fn slash(base: &str, command: &str, user: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/slash"))
        .form(&[("command", command), ("user_id", user), ("channel_id", "C1"), ("text", "")])
        .send()
        .await
        .unwrap()
}

async fn click(base: &str, user: &str, action: &str, lobby: &Message) -> reqwest::Response {
    let payload = json!({
        "type": "interactive_message",
        "callback_id": "kicker",
        "actions": [{ "name": action, "type": "button", "value": "" }],
        "user": { "id": user, "name": user.to_lowercase() },
        "original_message": lobby,
        "response_url": RESPONSE_URL,
        "message_ts": MESSAGE_TS,
    });
    reqwest::Client::new()
        .post(format!("{base}/interactive"))
        .form(&[("payload", payload.to_string())])
        .send()
        .await
        .unwrap()
}

async fn open_lobby(base: &str, user: &str) -> Message {
    let response = slash(base, "/kicker", user).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    response.json().await.unwrap()
}

async fn click_ok(base: &str, user: &str, action: &str, lobby: &Message) -> Message {
    let response = click(base, user, action, lobby).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    response.json().await.unwrap()
}

async fn assert_no_broadcast(rx: &mut mpsc::UnboundedReceiver<Posted>) {
    assert!(timeout(Duration::from_millis(80), rx.recv()).await.is_err(), "expected no broadcast");
}

// =============================================================================
// /slash
// =============================================================================

#[tokio::test]
async fn slash_opens_public_lobby() {
    let (state, _rx) = test_app_state();
    let base = spawn_app(state).await;

    let lobby = open_lobby(&base, "U1").await;
    assert_eq!(lobby.text, CREATED_ANNOUNCEMENT);
    assert_eq!(lobby.response_type, Some(ResponseType::InChannel));
    let names: Vec<&str> = lobby.attachments.iter().map(|a| a.actions[0].name.as_str()).collect();
    assert_eq!(names, vec!["button-leave-0", "button-join-1", "button-join-2", "button-join-3"]);
    assert_eq!(lobby.attachments[0].actions[0].value, "U1");
}

#[tokio::test]
async fn slash_unknown_command_is_server_error() {
    let (state, _rx) = test_app_state();
    let base = spawn_app(state).await;

    let response = slash(&base, "/pingpong", "U1").await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn slash_malformed_form_is_server_error() {
    let (state, _rx) = test_app_state();
    let base = spawn_app(state).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/slash"))
        .form(&[("text", "missing command")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// /interactive
// =============================================================================

#[tokio::test]
async fn join_replaces_lobby_message() {
    let (state, mut rx) = test_app_state();
    let base = spawn_app(state).await;
    let lobby = open_lobby(&base, "U1").await;

    let next = click_ok(&base, "U2", "button-join-1", &lobby).await;
    assert!(next.replace_original);
    assert_eq!(next.response_type, Some(ResponseType::InChannel));
    assert_eq!(next.attachments[1].title, "<@U2> joined!");
    assert_eq!(next.attachments[1].actions[0].name, "button-leave-1");
    assert_eq!(next.attachments[1].actions[0].value, "U2");
    assert_eq!(next.attachments[0], lobby.attachments[0]);
    assert_no_broadcast(&mut rx).await;
}

#[tokio::test]
async fn duplicate_join_gets_private_rejection() {
    let (state, mut rx) = test_app_state();
    let base = spawn_app(state).await;
    let lobby = open_lobby(&base, "U1").await;

    let reply = click_ok(&base, "U1", "button-join-2", &lobby).await;
    assert_eq!(reply.text, Rejection::AlreadyJoined.message());
    assert_eq!(reply.response_type, Some(ResponseType::Ephemeral));
    assert!(!reply.replace_original);
    assert!(!reply.delete_original);
    assert!(reply.attachments.is_empty());
    assert_no_broadcast(&mut rx).await;
}

#[tokio::test]
async fn leaving_someone_elses_spot_gets_private_rejection() {
    let (state, _rx) = test_app_state();
    let base = spawn_app(state).await;
    let lobby = open_lobby(&base, "U1").await;

    let reply = click_ok(&base, "U2", "button-leave-0", &lobby).await;
    assert_eq!(reply.text, Rejection::NotYourSpot.message());
    assert_eq!(reply.response_type, Some(ResponseType::Ephemeral));
}

#[tokio::test]
async fn unparseable_action_is_server_error() {
    let (state, _rx) = test_app_state();
    let base = spawn_app(state).await;
    let lobby = open_lobby(&base, "U1").await;

    let response = click(&base, "U2", "button-kick-1", &lobby).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn out_of_range_action_is_server_error() {
    let (state, _rx) = test_app_state();
    let base = spawn_app(state).await;
    let lobby = open_lobby(&base, "U1").await;

    let response = click(&base, "U2", "button-join-9", &lobby).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn garbage_payload_is_server_error() {
    let (state, _rx) = test_app_state();
    let base = spawn_app(state).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/interactive"))
        .form(&[("payload", "{not json")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn late_click_on_finished_lobby_is_server_error() {
    let (state, _rx) = test_app_state();
    let base = spawn_app(state).await;
    let lobby = open_lobby(&base, "U1").await;
    let cancelled = click_ok(&base, "U1", "button-leave-0", &lobby).await;

    let response = click(&base, "U2", "button-join-1", &cancelled).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[tokio::test]
async fn four_players_fill_lobby_and_rally_is_broadcast() {
    let (state, mut rx) = test_app_state();
    let base = spawn_app(state).await;

    let mut lobby = open_lobby(&base, "U1").await;
    lobby = click_ok(&base, "U2", "button-join-1", &lobby).await;
    lobby = click_ok(&base, "U3", "button-join-2", &lobby).await;
    let done = click_ok(&base, "U4", "button-join-3", &lobby).await;

    assert_eq!(done.text, FULL_ANNOUNCEMENT);
    assert!(done.attachments.is_empty());
    assert!(done.replace_original);

    let posted = timeout(Duration::from_millis(500), rx.recv()).await.unwrap().unwrap();
    assert_eq!(posted.url, RESPONSE_URL);
    assert_eq!(posted.message.text, "<@U1>, <@U2>, <@U3>, <@U4> GO GO GO!");
    assert_eq!(posted.message.thread_ts.as_deref(), Some(MESSAGE_TS));
    assert_eq!(posted.message.response_type, Some(ResponseType::InChannel));
    assert_no_broadcast(&mut rx).await;
}

#[tokio::test]
async fn creator_leaving_cancels_lobby_without_broadcast() {
    let (state, mut rx) = test_app_state();
    let base = spawn_app(state).await;
    let lobby = open_lobby(&base, "U1").await;

    let done = click_ok(&base, "U1", "button-leave-0", &lobby).await;
    assert_eq!(done.text, CANCELLED_ANNOUNCEMENT);
    assert!(done.attachments.is_empty());
    assert_no_broadcast(&mut rx).await;
}

#[tokio::test]
async fn healthz_is_ok() {
    let (state, _rx) = test_app_state();
    let base = spawn_app(state).await;

    let response = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}
