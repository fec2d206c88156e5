
use skirmish_server::game::{MoveError, Player};
use skirmish_server::protocol::ServerMessage;
use std::sync::Arc;
use test_helpers::{connect_player, create_test_server};
use tokio::sync::{mpsc, Barrier};

/// Racing submissions for the same turn: exactly one is applied
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_moves_for_one_turn() {
    let server = create_test_server();
    let attempts = 10usize;
    let barrier = Arc::new(Barrier::new(attempts));

    let mut handles = Vec::new();
    for i in 0..attempts {
        let server_clone = server.clone();
        let barrier_clone = barrier.clone();
        let mv = if i % 2 == 0 { "H1:F" } else { "H2:F" };

        handles.push(tokio::spawn(async move {
            barrier_clone.wait().await;
            server_clone.handle_move(Player::A, mv).await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(MoveError::NotYourTurn(Player::A)) => {}
            Err(other) => panic!("Unexpected rejection: {other}"),
        }
    }

    assert_eq!(accepted, 1, "Only one move may be applied per turn");
    let state = server.get_state().await;
    assert_eq!(state.move_history.len(), 1);
    assert_eq!(state.turn, 1);
}

/// Two players hammering the server still alternate strictly
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_players_alternate() {
    let server = create_test_server();
    let rounds = 5usize;

    let shared = server.clone();
    let spawn_player = move |player: Player, first: &'static str, second: &'static str| {
        let server = shared.clone();
        tokio::spawn(async move {
            let mut made = 0usize;
            while made < rounds {
                let mv = if made % 2 == 0 { first } else { second };
                match server.handle_move(player, mv).await {
                    Ok(_) => made += 1,
                    Err(MoveError::NotYourTurn(_)) => tokio::task::yield_now().await,
                    Err(other) => panic!("{player} move {mv} rejected: {other}"),
                }
            }
        })
    };

    // Each P1 shuffles between its home square and the one in front of it.
    let a = spawn_player(Player::A, "P1:F", "P1:B");
    let b = spawn_player(Player::B, "P1:B", "P1:F");
    a.await.unwrap();
    b.await.unwrap();

    let history = server.get_state().await.move_history;
    assert_eq!(history.len(), rounds * 2);
    for (i, record) in history.iter().enumerate() {
        let expected = if i % 2 == 0 { "A:" } else { "B:" };
        assert!(record.starts_with(expected), "entry {i} was {record}");
    }
}

/// Every recipient observes states in commit order
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_broadcasts_follow_commit_order() {
    let server = create_test_server();
    let (_a_id, mut rx_a) = connect_player(&server, Player::A).await;
    let (_b_id, mut rx_b) = connect_player(&server, Player::B).await;
    // B's join snapshot
    rx_a.try_recv().unwrap();

    let moves = [
        (Player::A, "P1:F"),
        (Player::B, "P1:B"),
        (Player::A, "P1:B"),
        (Player::B, "P1:F"),
    ];
    let mut handles = Vec::new();
    for (player, mv) in moves {
        let server = server.clone();
        handles.push(tokio::spawn(async move {
            // Retry until it's our turn with this exact move.
            loop {
                match server.handle_move(player, mv).await {
                    Ok(_) => break,
                    Err(_) => tokio::task::yield_now().await,
                }
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    for rx in [&mut rx_a, &mut rx_b] {
        let mut last_len = 0;
        while let Ok(message) = rx.try_recv() {
            let ServerMessage::State(state) = message.as_ref() else {
                panic!("Unexpected frame {message:?}");
            };
            assert_eq!(state.move_history.len(), last_len + 1);
            last_len = state.move_history.len();
        }
        assert_eq!(last_len, 4);
    }
}

/// Simultaneous reconnects for one identity leave exactly one live session
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reconnects() {
    let server = create_test_server();
    let attempts = 8usize;
    let barrier = Arc::new(Barrier::new(attempts));

    let mut handles = Vec::new();
    for _ in 0..attempts {
        let server_clone = server.clone();
        let barrier_clone = barrier.clone();
        handles.push(tokio::spawn(async move {
            let (tx, rx) = mpsc::channel(16);
            barrier_clone.wait().await;
            let id = server_clone.connect(Player::A, tx).await;
            (id, rx)
        }));
    }

    let mut connections = Vec::new();
    for handle in handles {
        connections.push(handle.await.unwrap());
    }

    assert_eq!(server.sessions().len(), 1);
    let live = server.sessions().connection_id(Player::A).unwrap();

    let mut open = 0;
    for (id, mut rx) in connections {
        while rx.try_recv().is_ok() {}
        // A queue whose sender was dropped reports disconnection once drained.
        let closed = matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        );
        if !closed {
            open += 1;
            assert_eq!(id, live);
        }
    }
    assert_eq!(open, 1);

    for (player, expected) in [(Player::A, true), (Player::B, false)] {
        assert_eq!(server.sessions().is_registered(player), expected);
    }
}
