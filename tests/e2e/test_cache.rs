use pretty_assertions::assert_eq;
use voicebox::domain::cache::CacheKey;

use super::helpers::TestContext;

fn key(s: &str) -> CacheKey {
    CacheKey::parse(s).expect("test key should be a valid slug")
}

#[tokio::test]
async fn it_should_roundtrip_raw_audio_bytes() {
    let ctx = TestContext::new();

    ctx.cache.put("alice", &key("hello_world"), b"\x00\x01").unwrap();
    assert!(ctx.cache.exists("alice", &key("hello_world")));
    assert_eq!(
        ctx.cache.get("alice", &key("hello_world")).unwrap(),
        Some(b"\x00\x01".to_vec())
    );
}

#[tokio::test]
async fn it_should_overwrite_wholesale_on_recache() {
    let ctx = TestContext::new();

    ctx.cache.put("alice", &key("greeting"), b"first").unwrap();
    ctx.cache.put("alice", &key("greeting"), b"second").unwrap();
    assert_eq!(
        ctx.cache.get("alice", &key("greeting")).unwrap(),
        Some(b"second".to_vec())
    );
}

#[tokio::test]
async fn it_should_report_deletion_exactly_once() {
    let ctx = TestContext::new();

    ctx.cache.put("alice", &key("greeting"), b"audio").unwrap();
    assert!(ctx.cache.delete("alice", &key("greeting")).unwrap());
    assert!(!ctx.cache.delete("alice", &key("greeting")).unwrap());
}

#[tokio::test]
async fn it_should_list_keys_sorted_per_user() {
    let ctx = TestContext::new();

    ctx.cache.put("alice", &key("good_night"), b"n").unwrap();
    ctx.cache.put("alice", &key("good_morning"), b"m").unwrap();
    ctx.cache.put("bob", &key("unrelated"), b"u").unwrap();

    let names: Vec<String> = ctx
        .cache
        .list("alice")
        .unwrap()
        .into_iter()
        .map(|k| k.to_string())
        .collect();
    assert_eq!(names, vec!["good_morning", "good_night"]);
}

#[tokio::test]
async fn it_should_treat_unknown_users_as_empty_not_errors() {
    let ctx = TestContext::new();

    assert!(ctx.cache.list("nobody").unwrap().is_empty());
    assert_eq!(ctx.cache.get("nobody", &key("anything")).unwrap(), None);
}
