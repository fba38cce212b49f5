//! Redis-backed sliding window rate limiter
//!
//! Each key is a sorted set of hit timestamps in milliseconds. Trimming,
//! counting and recording run in one Lua script so concurrent requests from
//! several API instances cannot overshoot the limit.

use async_trait::async_trait;
use chrono::Utc;
use redis::Script;
use std::sync::Arc;
use uuid::Uuid;

use rc_core::services::{RateLimitDecision, RateLimiter};

use super::redis_client::RedisClient;

/// KEYS[1] = bucket; ARGV = now_ms, window_ms, limit, member.
/// Returns {1, remaining} when the hit is recorded, {0, retry_after_ms} otherwise.
const SLIDING_WINDOW_SCRIPT: &str = r#"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local window = tonumber(ARGV[2])
local limit = tonumber(ARGV[3])

redis.call('ZREMRANGEBYSCORE', key, '-inf', now - window)
local count = redis.call('ZCARD', key)

if count >= limit then
    local oldest = redis.call('ZRANGE', key, 0, 0, 'WITHSCORES')
    local retry = window
    if oldest[2] then
        retry = tonumber(oldest[2]) + window - now
    end
    return {0, retry}
end

redis.call('ZADD', key, now, ARGV[4])
redis.call('PEXPIRE', key, window)
return {1, limit - count - 1}
"#;

/// Redis-based implementation of the rate limiter trait
pub struct RedisRateLimiter {
    redis_client: Arc<RedisClient>,
    script: Script,
}

impl RedisRateLimiter {
    pub fn new(redis_client: Arc<RedisClient>) -> Self {
        Self {
            redis_client,
            script: Script::new(SLIDING_WINDOW_SCRIPT),
        }
    }
}

/// Turn the script reply into a decision
fn decision_from_reply(reply: &[i64], window_seconds: u64) -> Result<RateLimitDecision, String> {
    match reply {
        [1, remaining] => Ok(RateLimitDecision::Allowed {
            remaining: (*remaining).max(0) as u32,
        }),
        [0, retry_ms] => {
            let seconds = (retry_ms + 999) / 1000;
            Ok(RateLimitDecision::Limited {
                retry_after_seconds: seconds.clamp(1, window_seconds.max(1) as i64) as u64,
            })
        }
        other => Err(format!("Unexpected rate limit reply: {:?}", other)),
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn hit(
        &self,
        key: &str,
        limit: u32,
        window_seconds: u64,
    ) -> Result<RateLimitDecision, String> {
        let mut conn = self.redis_client.get_connection();
        let now = Utc::now().timestamp_millis();
        let member = format!("{}-{}", now, Uuid::new_v4().simple());

        let reply: Vec<i64> = self
            .script
            .key(self.redis_client.key(key))
            .arg(now)
            .arg(window_seconds as i64 * 1000)
            .arg(limit)
            .arg(member)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Rate limit script failed");
                format!("Failed to update rate limit: {}", e)
            })?;

        decision_from_reply(&reply, window_seconds)
    }

    async fn reset(&self, key: &str) -> Result<(), String> {
        let mut conn = self.redis_client.get_connection();
        redis::cmd("DEL")
            .arg(self.redis_client.key(key))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| format!("Failed to reset rate limit: {}", e))
    }
}
