use voicebox::domain::user::UserServiceError;

use super::helpers::TestContext;

#[tokio::test]
async fn it_should_make_the_first_user_current() {
    let ctx = TestContext::new();

    ctx.users.add_user("alice", "voice-1", "Alice").unwrap();
    ctx.users.add_user("bob", "voice-2", "Bob").unwrap();

    let (id, user) = ctx.users.current_user().unwrap().unwrap();
    assert_eq!(id, "alice");
    assert_eq!(user.voice_id, "voice-1");
}

#[tokio::test]
async fn it_should_switch_between_users() {
    let ctx = TestContext::new();

    ctx.users.add_user("alice", "voice-1", "Alice").unwrap();
    ctx.users.add_user("bob", "voice-2", "Bob").unwrap();
    ctx.users.switch_user("bob").unwrap();

    let (id, _) = ctx.users.current_user().unwrap().unwrap();
    assert_eq!(id, "bob");

    let listed = ctx.users.list_users().unwrap();
    assert!(listed.iter().find(|u| u.id == "bob").unwrap().is_current);
}

#[tokio::test]
async fn it_should_reject_duplicate_and_unsafe_ids() {
    let ctx = TestContext::new();

    ctx.users.add_user("alice", "voice-1", "Alice").unwrap();
    assert!(matches!(
        ctx.users.add_user("alice", "voice-2", "Other"),
        Err(UserServiceError::AlreadyExists(_))
    ));
    assert!(matches!(
        ctx.users.add_user("../alice", "voice-2", "Sneaky"),
        Err(UserServiceError::Invalid(_))
    ));
}

#[tokio::test]
async fn it_should_speak_with_the_current_users_voice_namespace() {
    let ctx = TestContext::new();

    ctx.users.add_user("alice", "voice-1", "Alice").unwrap();
    let (id, user) = ctx.users.current_user().unwrap().unwrap();

    ctx.speech.speak(&id, "hello", &user.voice_id).await.unwrap();
    assert_eq!(ctx.speech.list_cached("alice").unwrap().len(), 1);
    assert!(ctx.speech.list_cached("bob").unwrap().is_empty());
}
