// Closing a socket issues Disconnect for its participant.

use std::time::Duration;

use bunker_backend::domain::RevealPolicy;
use serde_json::json;

use crate::support::websocket::{start_test_server, state_with_policy, wait_for_connections};
use crate::support::websocket_client::WebSocketClient;

#[actix_web::test]
async fn host_leaving_lobby_hands_over_host() -> Result<(), Box<dyn std::error::Error>> {
    let state = state_with_policy(RevealPolicy::FullRotation);
    let (server_handle, addr, server_join) = start_test_server(state.clone()).await?;
    let ws_url = format!("ws://{addr}/ws");

    let mut alice = WebSocketClient::connect_retry(&ws_url, Duration::from_secs(1)).await?;
    let mut bob = WebSocketClient::connect_retry(&ws_url, Duration::from_secs(1)).await?;

    alice
        .send_json(json!({"type": "create_game", "player_count": 8, "bunker_spots": 2, "name": "Alice"}))
        .await?;
    let game_id = alice.expect_event("joined").await?["game_id"].clone();
    alice.expect_event("roster_updated").await?;
    bob.send_json(json!({"type": "join_game", "game_id": game_id, "name": "Bob"}))
        .await?;
    bob.expect_event("joined").await?;
    bob.expect_event("roster_updated").await?;

    alice.close().await?;

    let roster = bob.expect_event("roster_updated").await?;
    assert_eq!(roster["message"], "Alice left the game");
    let players = roster["players"].as_array().ok_or("players")?;
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["name"], "Bob");
    assert_eq!(players[0]["is_host"], true);

    // Bob now holds the host seat and may start once enough players join.
    bob.send_json(json!({"type": "start_game", "game_id": game_id}))
        .await?;
    assert_eq!(bob.expect_error().await?, "NOT_ENOUGH_PLAYERS");

    bob.close().await?;
    wait_for_connections(&state, 0, Duration::from_secs(2)).await?;
    assert!(state.sessions().registry().is_empty());

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[actix_web::test]
async fn turn_holder_leaving_passes_turn() -> Result<(), Box<dyn std::error::Error>> {
    let state = state_with_policy(RevealPolicy::FullRotation);
    let (server_handle, addr, server_join) = start_test_server(state.clone()).await?;
    let ws_url = format!("ws://{addr}/ws");

    let mut clients = Vec::new();
    for _ in 0..4 {
        clients.push(WebSocketClient::connect_retry(&ws_url, Duration::from_secs(1)).await?);
    }
    let names = ["Alice", "Bob", "Carol", "Dave"];

    clients[0]
        .send_json(json!({"type": "create_game", "player_count": 8, "bunker_spots": 2, "name": "Alice"}))
        .await?;
    let game_id = clients[0].expect_event("joined").await?["game_id"].clone();
    clients[0].expect_event("roster_updated").await?;
    for i in 1..4 {
        clients[i]
            .send_json(json!({"type": "join_game", "game_id": game_id, "name": names[i]}))
            .await?;
        clients[i].expect_event("joined").await?;
        for client in clients.iter_mut().take(i + 1) {
            client.expect_event("roster_updated").await?;
        }
    }

    clients[0]
        .send_json(json!({"type": "start_game", "game_id": game_id}))
        .await?;
    for client in clients.iter_mut() {
        client.expect_event("game_started").await?;
    }

    let mut alice = clients.remove(0);
    alice.close().await?;

    for client in clients.iter_mut() {
        let gone = client.expect_event("player_disconnected").await?;
        assert_eq!(gone["player"]["name"], "Alice");
        let next = client.expect_event("next_turn").await?;
        assert_eq!(next["player"]["name"], "Bob");
        assert_eq!(next["message"], "Alice disconnected");
    }

    for client in clients.iter_mut() {
        client.close().await?;
    }
    wait_for_connections(&state, 0, Duration::from_secs(2)).await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}
