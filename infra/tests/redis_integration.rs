//! Redis-backed adapters against a live server
//!
//! Run with a Redis instance listening on `REDIS_URL` (default
//! `redis://localhost:6379`):
//!
//! ```text
//! cargo test -p ea_infra --test redis_integration -- --ignored
//! ```

use ea_core::domain::entities::verification_code::{CodePurpose, VerificationCode};
use ea_core::services::VerificationCodeStore;
use ea_infra::{RedisClient, RedisVerificationCodeStore};
use ea_shared::config::CacheConfig;

async fn store() -> RedisVerificationCodeStore {
    let config = CacheConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        key_prefix: Some(format!("it-{}", uuid::Uuid::new_v4())),
        ..CacheConfig::default()
    };
    let client = RedisClient::new(config).await.expect("redis not reachable");
    RedisVerificationCodeStore::new(client)
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_set_get_delete_round_trip() {
    let store = store().await;
    let code = VerificationCode::new("u-1".into(), "012345".into(), CodePurpose::ResetPassword, 60);

    store.set(&code).await.unwrap();
    let fetched = store.get("u-1").await.unwrap().unwrap();
    assert_eq!(fetched.code, "012345");
    assert_eq!(fetched.purpose, CodePurpose::ResetPassword);

    store.delete("u-1").await.unwrap();
    assert!(store.get("u-1").await.unwrap().is_none());
    // Deleting twice is fine
    store.delete("u-1").await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_newer_code_overwrites_older() {
    let store = store().await;
    let first = VerificationCode::new("u-2".into(), "111111".into(), CodePurpose::EmailVerification, 60);
    let second = VerificationCode::new("u-2".into(), "222222".into(), CodePurpose::ResetPassword, 60);

    store.set(&first).await.unwrap();
    store.set(&second).await.unwrap();

    let fetched = store.get("u-2").await.unwrap().unwrap();
    assert_eq!(fetched.code, "222222");
    assert_eq!(fetched.purpose, CodePurpose::ResetPassword);
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_code_is_evicted_after_ttl() {
    let store = store().await;
    let code = VerificationCode::new("u-3".into(), "333333".into(), CodePurpose::EmailVerification, 1);

    store.set(&code).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    assert!(store.get("u-3").await.unwrap().is_none());
}
