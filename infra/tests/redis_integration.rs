//! Integration tests against a live Redis (`REDIS_URL`).

use std::sync::Arc;

use rc_core::services::{RateLimitDecision, RateLimiter};
use rc_infra::cache::{RedisClient, RedisRateLimiter};
use rc_shared::config::CacheConfig;
use uuid::Uuid;

async fn limiter() -> RedisRateLimiter {
    let client = RedisClient::new(CacheConfig::from_env())
        .await
        .expect("REDIS_URL must point at a reachable Redis");
    assert!(client.health_check().await.unwrap());
    RedisRateLimiter::new(Arc::new(client))
}

#[tokio::test]
#[ignore] // Requires Redis
async fn sliding_window_blocks_after_limit() {
    let limiter = limiter().await;
    let key = format!("otp:identifier:it-{}", Uuid::new_v4().simple());

    assert_eq!(
        limiter.hit(&key, 2, 3600).await.unwrap(),
        RateLimitDecision::Allowed { remaining: 1 }
    );
    assert_eq!(
        limiter.hit(&key, 2, 3600).await.unwrap(),
        RateLimitDecision::Allowed { remaining: 0 }
    );

    match limiter.hit(&key, 2, 3600).await.unwrap() {
        RateLimitDecision::Limited {
            retry_after_seconds,
        } => assert!(retry_after_seconds > 3590 && retry_after_seconds <= 3600),
        other => panic!("expected Limited, got {:?}", other),
    }

    limiter.reset(&key).await.unwrap();
    assert!(limiter.hit(&key, 2, 3600).await.unwrap().is_allowed());
}

#[tokio::test]
#[ignore] // Requires Redis
async fn concurrent_hits_never_exceed_limit() {
    let limiter = Arc::new(limiter().await);
    let key = format!("otp:ip:it-{}", Uuid::new_v4().simple());

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            let key = key.clone();
            tokio::spawn(async move { limiter.hit(&key, 5, 60).await.unwrap() })
        })
        .collect();

    let mut allowed = 0;
    for handle in handles {
        if handle.await.unwrap().is_allowed() {
            allowed += 1;
        }
    }
    assert_eq!(allowed, 5);
}
