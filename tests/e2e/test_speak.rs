use std::sync::Arc;

use pretty_assertions::assert_eq;
use voicebox::domain::speech::{AudioSource, PrecacheOutcome, SpeechServiceError};

use super::helpers::{FailingGenerator, TestContext};

#[tokio::test]
async fn it_should_generate_once_and_replay_from_cache() {
    let ctx = TestContext::new();

    let first = ctx
        .speech
        .speak("alice", "Hello, World!", "voice-1")
        .await
        .unwrap();
    assert_eq!(first.source, AudioSource::Generated);

    let second = ctx
        .speech
        .speak("alice", "Hello, World!", "voice-1")
        .await
        .unwrap();
    assert_eq!(second.source, AudioSource::Cache);
    assert_eq!(second.bytes, first.bytes);
    assert_eq!(ctx.generator.call_count(), 1);
}

#[tokio::test]
async fn it_should_store_entries_under_the_derived_key() {
    let ctx = TestContext::new();

    let audio = ctx
        .speech
        .speak("alice", "Hello, World!", "voice-1")
        .await
        .unwrap();
    assert_eq!(audio.key.as_str(), "hello_world");
    assert!(ctx
        .cache
        .root()
        .join("alice")
        .join("hello_world.mp3")
        .is_file());
}

#[tokio::test]
async fn it_should_hit_the_cache_for_equivalent_phrasings() {
    let ctx = TestContext::new();

    ctx.speech.speak("alice", "Hello, World!", "voice-1").await.unwrap();
    let audio = ctx
        .speech
        .speak("alice", "  hello   world  ", "voice-1")
        .await
        .unwrap();
    assert_eq!(audio.source, AudioSource::Cache);
    assert_eq!(ctx.generator.call_count(), 1);
}

#[tokio::test]
async fn it_should_keep_user_namespaces_apart() {
    let ctx = TestContext::new();

    ctx.speech.speak("alice", "hello", "voice-1").await.unwrap();
    let bob = ctx.speech.speak("bob", "hello", "voice-2").await.unwrap();
    assert_eq!(bob.source, AudioSource::Generated);
    assert_eq!(ctx.generator.call_count(), 2);

    assert_eq!(ctx.speech.list_cached("alice").unwrap().len(), 1);
    assert!(ctx
        .speech
        .delete_cached("alice", &bob.key)
        .unwrap());
    assert!(ctx.cache.exists("bob", &bob.key));
}

#[tokio::test]
async fn it_should_propagate_generator_failures_without_caching() {
    let ctx = TestContext::with_generator(Arc::new(FailingGenerator));

    let err = ctx
        .speech
        .speak("alice", "hello", "voice-1")
        .await
        .unwrap_err();
    assert!(matches!(err, SpeechServiceError::Transport(_)));
    assert!(ctx.speech.list_cached("alice").unwrap().is_empty());
}

#[tokio::test]
async fn it_should_precache_and_then_short_circuit() {
    let ctx = TestContext::new();

    let first = ctx
        .speech
        .precache("alice", "good morning", "voice-1")
        .await
        .unwrap();
    assert!(matches!(first, PrecacheOutcome::Generated(_)));

    let second = ctx
        .speech
        .precache("alice", "good morning", "voice-1")
        .await
        .unwrap();
    assert!(matches!(second, PrecacheOutcome::AlreadyCached(_)));
    assert_eq!(ctx.generator.call_count(), 1);

    let spoken = ctx
        .speech
        .speak("alice", "good morning", "voice-1")
        .await
        .unwrap();
    assert_eq!(spoken.source, AudioSource::Cache);
    assert_eq!(ctx.generator.call_count(), 1);
}
