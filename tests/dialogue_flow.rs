//! Integration tests for the dialogue engine.
//!
//! These tests drive whole conversations through the public engine API:
//! 1. Stage progression from introduction to open conversation
//! 2. Bounded session state
//! 3. Completion backend use and fallback
//! 4. Per-session turn serialization

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use practice_partner::adapters::completion::MockCompletionClient;
use practice_partner::adapters::session::InMemorySessionStore;
use practice_partner::application::{DialogueEngine, GeneratorSettings, ResponseGenerator};
use practice_partner::domain::dialogue::{
    templates, CorrectionAdvisor, CorrectionGate, Stage, HISTORY_CAPACITY,
    RECENT_RESPONSES_CAPACITY, TOPIC_CAPACITY,
};
use practice_partner::domain::foundation::SessionKey;
use practice_partner::ports::CompletionError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn key(raw: &str) -> SessionKey {
    SessionKey::new(raw).unwrap()
}

fn template_engine(gate: CorrectionGate) -> DialogueEngine {
    DialogueEngine::new(
        Arc::new(InMemorySessionStore::new()),
        ResponseGenerator::templates_only(),
        CorrectionAdvisor::new(gate),
    )
    .with_rng_seed(7)
}

fn completion_engine(client: MockCompletionClient, timeout: Duration) -> DialogueEngine {
    let generator = ResponseGenerator::new(
        Some(Arc::new(client)),
        GeneratorSettings {
            completion_timeout: timeout,
            ..Default::default()
        },
    );
    DialogueEngine::new(
        Arc::new(InMemorySessionStore::new()),
        generator,
        CorrectionAdvisor::new(CorrectionGate::Never),
    )
    .with_rng_seed(7)
}

/// Walks a session through introduction and warmup.
async fn reach_main(engine: &DialogueEngine, session: &SessionKey) {
    engine.start_session(session).await.unwrap();
    engine.handle_turn(session, "My name is Alex").await.unwrap();
    engine
        .handle_turn(session, "We went to the park and played football")
        .await
        .unwrap();
}

// =============================================================================
// Stage Progression
// =============================================================================

#[tokio::test]
async fn conversation_walks_through_all_stages() {
    let engine = template_engine(CorrectionGate::Never);
    let s1 = key("s1");

    let start = engine.start_session(&s1).await.unwrap();
    assert!(templates::INTRODUCTION.contains(&start.reply));

    let turn = engine.handle_turn(&s1, "My name is Alex").await.unwrap();
    assert!(turn.reply.contains("Alex"));
    let session = engine.session_snapshot(&s1).await.unwrap().unwrap();
    assert_eq!(session.stage(), Stage::Warmup);
    assert_eq!(session.user_name(), "Alex");

    engine
        .handle_turn(&s1, "We went to the park and played football")
        .await
        .unwrap();
    let session = engine.session_snapshot(&s1).await.unwrap().unwrap();
    assert_eq!(session.stage(), Stage::Main);
    assert!(session.topics().contains("park"));
    assert!(session.topics().contains("football"));

    engine.handle_turn(&s1, "We went to the store").await.unwrap();
    let session = engine.session_snapshot(&s1).await.unwrap().unwrap();
    assert_eq!(session.stage(), Stage::Main);
    assert_eq!(session.history().len(), 3);
}

#[tokio::test]
async fn sessions_are_independent() {
    let engine = template_engine(CorrectionGate::Never);
    reach_main(&engine, &key("a")).await;
    engine.start_session(&key("b")).await.unwrap();

    let a = engine.session_snapshot(&key("a")).await.unwrap().unwrap();
    let b = engine.session_snapshot(&key("b")).await.unwrap().unwrap();
    assert_eq!(a.stage(), Stage::Main);
    assert_eq!(b.stage(), Stage::Introduction);
    assert_eq!(b.user_name(), "Friend");
}

// =============================================================================
// Bounded State
// =============================================================================

#[tokio::test]
async fn long_conversation_respects_caps() {
    let engine = template_engine(CorrectionGate::Never);
    let s1 = key("s1");
    reach_main(&engine, &s1).await;

    let lines = [
        "I read a book about history",
        "My sister bought a guitar",
        "We cooked pasta for dinner",
        "The train was late again",
        "I visited the museum downtown",
        "Our coach gave us homework",
    ];
    for line in lines {
        engine.handle_turn(&s1, line).await.unwrap();
        let session = engine.session_snapshot(&s1).await.unwrap().unwrap();
        assert!(session.history().len() <= HISTORY_CAPACITY);
        assert!(session.recent_responses().len() <= RECENT_RESPONSES_CAPACITY);
        assert!(session.topics().len() <= TOPIC_CAPACITY);
    }

    let session = engine.session_snapshot(&s1).await.unwrap().unwrap();
    assert_eq!(session.history().len(), HISTORY_CAPACITY);
    let oldest = session.history().iter().next().unwrap();
    assert_eq!(oldest.user_text, "My sister bought a guitar");
}

#[tokio::test]
async fn main_templates_avoid_recent_replies() {
    let engine = template_engine(CorrectionGate::Never);
    let s1 = key("s1");
    reach_main(&engine, &s1).await;

    for _ in 0..40 {
        let before = engine.session_snapshot(&s1).await.unwrap().unwrap();
        let recent: Vec<String> = before
            .last_responses(templates::DEDUP_WINDOW)
            .into_iter()
            .map(str::to_string)
            .collect();

        engine.handle_turn(&s1, "We went to the store").await.unwrap();

        let after = engine.session_snapshot(&s1).await.unwrap().unwrap();
        let picked = after.last_responses(1)[0].to_string();
        assert!(!recent.contains(&picked), "{picked} repeated {recent:?}");
    }
}

// =============================================================================
// Sentiment and Corrections
// =============================================================================

#[tokio::test]
async fn sentiment_selects_fixed_replies() {
    let engine = template_engine(CorrectionGate::Never);
    let s1 = key("s1");
    reach_main(&engine, &s1).await;

    let happy = engine.handle_turn(&s1, "I had a great day").await.unwrap();
    assert_eq!(happy.reply, templates::ENTHUSIASTIC_REPLY);

    let sad = engine.handle_turn(&s1, "It was a terrible week").await.unwrap();
    assert_eq!(sad.reply, templates::EMPATHETIC_REPLY);

    let neutral = engine.handle_turn(&s1, "We went to the store").await.unwrap();
    let session = engine.session_snapshot(&s1).await.unwrap().unwrap();
    assert!(templates::MAIN.contains(session.last_responses(1)[0]));
    assert!(!neutral.reply.contains("{topic}"));
}

#[tokio::test]
async fn open_gate_corrects_every_stage() {
    let engine = template_engine(CorrectionGate::Always);
    let s1 = key("s1");
    engine.start_session(&s1).await.unwrap();

    let turn = engine.handle_turn(&s1, "I is happy today").await.unwrap();
    assert_eq!(
        turn.correction.as_deref(),
        Some("Note: we usually say 'I am happy today'")
    );

    let turn = engine.handle_turn(&s1, "She go to school").await.unwrap();
    assert_eq!(
        turn.correction.as_deref(),
        Some("Note: we usually say 'She goes to school'")
    );
}

#[tokio::test]
async fn closed_gate_never_corrects() {
    let engine = template_engine(CorrectionGate::Never);
    let s1 = key("s1");
    engine.start_session(&s1).await.unwrap();

    let turn = engine.handle_turn(&s1, "I is happy today").await.unwrap();
    assert!(turn.correction.is_none());
}

#[tokio::test]
async fn empty_input_leaves_session_untouched() {
    let engine = template_engine(CorrectionGate::Always);
    let s1 = key("s1");
    reach_main(&engine, &s1).await;
    let before = engine.session_snapshot(&s1).await.unwrap();

    for blank in ["", "   ", "\n\t"] {
        let turn = engine.handle_turn(&s1, blank).await.unwrap();
        assert_eq!(turn.reply, templates::EMPTY_INPUT_REPLY);
        assert!(turn.correction.is_none());
    }

    assert_eq!(engine.session_snapshot(&s1).await.unwrap(), before);
}

// =============================================================================
// Completion Backend
// =============================================================================

#[tokio::test]
async fn completion_reply_is_used_and_recorded() {
    let client = MockCompletionClient::new()
        .with_response("What did you buy there?");
    let engine = completion_engine(client.clone(), Duration::from_secs(1));
    let s1 = key("s1");
    reach_main(&engine, &s1).await;

    let turn = engine.handle_turn(&s1, "We went to the store").await.unwrap();

    assert_eq!(turn.reply, "What did you buy there?");
    assert_eq!(client.call_count(), 1);
    let prompt = &client.get_calls()[0].prompt;
    assert!(prompt.contains("Alex"));
    assert!(prompt.contains("We went to the store"));

    let session = engine.session_snapshot(&s1).await.unwrap().unwrap();
    let last = session.history().iter().last().unwrap();
    assert_eq!(last.bot_text, "What did you buy there?");
}

#[tokio::test]
async fn completion_failure_falls_back_to_template() {
    let client = MockCompletionClient::new().with_error(CompletionError::Unauthenticated);
    let engine = completion_engine(client.clone(), Duration::from_secs(1));
    let s1 = key("s1");
    reach_main(&engine, &s1).await;

    let turn = engine.handle_turn(&s1, "We went to the store").await;

    assert!(turn.is_ok());
    assert_eq!(client.call_count(), 1);
    let session = engine.session_snapshot(&s1).await.unwrap().unwrap();
    assert!(templates::MAIN.contains(session.last_responses(1)[0]));
}

#[tokio::test(start_paused = true)]
async fn completion_timeout_falls_back_to_template() {
    let client = MockCompletionClient::new()
        .with_response("far too late")
        .with_delay(Duration::from_secs(60));
    let engine = completion_engine(client, Duration::from_secs(12));
    let s1 = key("s1");
    reach_main(&engine, &s1).await;

    let started = tokio::time::Instant::now();
    let turn = engine.handle_turn(&s1, "We went to the store").await.unwrap();

    assert_ne!(turn.reply, "far too late");
    assert!(started.elapsed() < Duration::from_secs(13));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_turns_on_one_session_are_not_lost() {
    let engine = Arc::new(template_engine(CorrectionGate::Never));
    let s1 = key("s1");
    reach_main(&engine, &s1).await;
    let before = engine.session_snapshot(&s1).await.unwrap().unwrap();
    assert_eq!(before.history().len(), 2);

    let turns = (0..3).map(|i| {
        let engine = engine.clone();
        let s1 = s1.clone();
        tokio::spawn(async move {
            engine
                .handle_turn(&s1, &format!("We talked about topic number {i}"))
                .await
        })
    });
    for result in join_all(turns).await {
        result.unwrap().unwrap();
    }

    let after = engine.session_snapshot(&s1).await.unwrap().unwrap();
    assert_eq!(after.history().len(), HISTORY_CAPACITY);
}

#[tokio::test(start_paused = true)]
async fn same_session_turns_wait_for_each_other() {
    let client = MockCompletionClient::new().with_delay(Duration::from_secs(2));
    let engine = completion_engine(client, Duration::from_secs(12));
    let s1 = key("s1");
    reach_main(&engine, &s1).await;

    let started = tokio::time::Instant::now();
    let (a, b) = tokio::join!(
        engine.handle_turn(&s1, "We went to the store"),
        engine.handle_turn(&s1, "We went to the bank"),
    );
    a.unwrap();
    b.unwrap();

    assert!(started.elapsed() >= Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn different_sessions_do_not_block_each_other() {
    let client = MockCompletionClient::new().with_delay(Duration::from_secs(2));
    let engine = completion_engine(client, Duration::from_secs(12));
    let (a, b) = (key("a"), key("b"));
    reach_main(&engine, &a).await;
    reach_main(&engine, &b).await;

    let started = tokio::time::Instant::now();
    let (ra, rb) = tokio::join!(
        engine.handle_turn(&a, "We went to the store"),
        engine.handle_turn(&b, "We went to the bank"),
    );
    ra.unwrap();
    rb.unwrap();

    assert!(started.elapsed() < Duration::from_secs(4));
}
