use std::sync::Arc;
use std::time::Duration;

use client_api::{CombatActionResponse, MockFailure, MockGameApi};
use client_session::{Feed, PollIntervals, Session, SessionConfig, SessionEvent, SessionError};
use combat_core::{CombatActionKind, CombatState, FighterState};
use tokio::time::Instant;

fn combat(round: u32, hp1: i32, hp2: i32) -> CombatState {
    CombatState::new(
        round,
        FighterState::new("p1", hp1, 100),
        FighterState::new("p2", hp2, 100),
    )
}

fn combat_only() -> SessionConfig {
    SessionConfig {
        polling: PollIntervals {
            world_time: None,
            energy: None,
            ..PollIntervals::default()
        },
        ..SessionConfig::for_challenge("c1", "p1")
    }
}

async fn next_combat(rx: &mut tokio::sync::broadcast::Receiver<SessionEvent>) -> CombatState {
    loop {
        if let SessionEvent::Combat(state) = rx.recv().await.unwrap() {
            return state;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn combat_feed_polls_every_three_seconds() {
    let api = MockGameApi::new();
    api.push_combat(combat(1, 100, 100))
        .push_combat(combat(2, 90, 100));

    let session = Session::start(Arc::new(api.clone()), combat_only());
    assert_eq!(session.feeds(), vec![Feed::Combat]);
    let mut rx = session.handle().subscribe();

    let start = Instant::now();
    assert_eq!(next_combat(&mut rx).await.round, 1);
    assert_eq!(next_combat(&mut rx).await.round, 2);
    assert!(start.elapsed() >= Duration::from_secs(3));
    assert!(start.elapsed() < Duration::from_secs(4));

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn accepted_action_refreshes_combat_immediately() {
    let api = MockGameApi::new();
    api.push_combat(combat(1, 100, 100))
        .push_combat(combat(2, 80, 100));
    api.push_action_response(CombatActionResponse::default());

    let session = Session::start(Arc::new(api.clone()), combat_only());
    let handle = session.handle();
    let mut rx = handle.subscribe();

    assert_eq!(next_combat(&mut rx).await.round, 1);

    let start = Instant::now();
    handle.submit_action(CombatActionKind::Attack).await.unwrap();

    match rx.recv().await.unwrap() {
        SessionEvent::ActionAccepted { action, combat, .. } => {
            assert_eq!(action, CombatActionKind::Attack);
            assert!(combat.is_none());
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(next_combat(&mut rx).await.round, 2);
    assert!(start.elapsed() < Duration::from_secs(3));
    assert_eq!(
        api.submitted_actions(),
        vec![("c1".to_string(), CombatActionKind::Attack)]
    );

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn rejected_action_is_published() {
    let api = MockGameApi::new();
    api.push_combat(combat(1, 100, 100));
    api.push_action_failure(MockFailure::new(409, "You already acted this round"));

    let session = Session::start(Arc::new(api.clone()), combat_only());
    let handle = session.handle();
    let mut rx = handle.subscribe();
    next_combat(&mut rx).await;

    let error = handle
        .submit_action(CombatActionKind::Spell)
        .await
        .unwrap_err();
    assert!(matches!(error, SessionError::Api(_)));

    match rx.recv().await.unwrap() {
        SessionEvent::ActionRejected { action, message } => {
            assert_eq!(action, CombatActionKind::Spell);
            assert_eq!(message, "You already acted this round");
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(api.submitted_actions().is_empty());

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn session_without_challenge_cannot_submit() {
    let api = MockGameApi::new();
    let config = SessionConfig {
        polling: PollIntervals {
            world_time: None,
            energy: None,
            ..PollIntervals::default()
        },
        ..SessionConfig::default()
    };

    let session = Session::start(Arc::new(api.clone()), config);
    assert!(session.feeds().is_empty());

    let handle = session.handle();
    assert!(!handle.refresh(Feed::Combat));
    let error = handle
        .submit_action(CombatActionKind::Defend)
        .await
        .unwrap_err();
    assert!(matches!(error, SessionError::MissingChallenge));
    assert_eq!(api.combat_fetches(), 0);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_polling() {
    let api = MockGameApi::new();
    api.push_combat(combat(1, 100, 100));

    let session = Session::start(Arc::new(api.clone()), combat_only());
    let mut rx = session.handle().subscribe();
    next_combat(&mut rx).await;
    session.shutdown().await;

    let fetches = api.combat_fetches();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(api.combat_fetches(), fetches);
}

#[tokio::test(start_paused = true)]
async fn resolved_state_in_action_response_reaches_subscribers() {
    let api = MockGameApi::new();
    api.push_combat(combat(3, 10, 40));

    let mut finished = combat(3, 10, 0);
    finished.status = combat_core::CombatStatus::Finished;
    finished.winner_id = Some("p1".into());
    api.push_action_response(CombatActionResponse {
        combat: Some(finished),
        message: Some("Victory!".into()),
    });

    let session = Session::start(Arc::new(api.clone()), combat_only());
    let handle = session.handle();
    let mut rx = handle.subscribe();
    next_combat(&mut rx).await;

    handle.dispatch_action(CombatActionKind::Attack).await.unwrap();

    match rx.recv().await.unwrap() {
        SessionEvent::ActionAccepted {
            combat: Some(state),
            message,
            ..
        } => {
            assert!(state.is_finished());
            assert!(state.is_winner("p1"));
            assert_eq!(message.as_deref(), Some("Victory!"));
        }
        other => panic!("unexpected event: {:?}", other),
    }

    session.shutdown().await;
}
