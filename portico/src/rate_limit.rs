//! Fixed-window request limiter keyed by client identity.

use std::sync::Mutex;
use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::time::Instant;

use crate::http_helpers::ErrorBody;
use crate::mode::RateLimitConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the client's window resets.
    pub reset_after: Duration,
}

struct Window {
    started: Instant,
    count: u32,
}

pub struct RateLimiter {
    config: RateLimitConfig,
    clients: Mutex<FxHashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            clients: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Counts one request for `client_key` and reports whether it is within the limit.
    pub fn check(&self, client_key: &str) -> RateDecision {
        let now = Instant::now();
        let window_len = self.config.window;
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());

        if clients.len() > 10_000 {
            clients.retain(|_, window| now.duration_since(window.started) < window_len);
        }

        let window = clients
            .entry(client_key.to_string())
            .or_insert(Window { started: now, count: 0 });

        if now.duration_since(window.started) >= window_len {
            window.started = now;
            window.count = 0;
        }

        window.count = window.count.saturating_add(1);
        let reset_after = window_len.saturating_sub(now.duration_since(window.started));

        RateDecision {
            allowed: window.count <= self.config.max,
            limit: self.config.max,
            remaining: self.config.max.saturating_sub(window.count),
            reset_after,
        }
    }

    /// 429 payload, e.g. "Rate limit exceeded, retry in 10 minutes".
    pub fn rejection(&self, decision: &RateDecision) -> ErrorBody {
        ErrorBody::too_many_requests(format!(
            "Rate limit exceeded, retry in {}",
            humanize(decision.reset_after)
        ))
    }
}

/// Rounds to the largest whole unit, "1 minute" / "10 minutes".
fn humanize(duration: Duration) -> String {
    const UNITS: [(u128, &str); 4] = [
        (86_400_000, "day"),
        (3_600_000, "hour"),
        (60_000, "minute"),
        (1_000, "second"),
    ];

    let ms = duration.as_millis();
    for (unit_ms, name) in UNITS {
        if ms >= unit_ms {
            let n = (ms + unit_ms / 2) / unit_ms;
            let plural = ms * 2 >= unit_ms * 3;
            return format!("{n} {name}{}", if plural { "s" } else { "" });
        }
    }
    format!("{ms} ms")
}
