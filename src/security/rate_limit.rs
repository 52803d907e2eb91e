//! Fixed-window rate limiting for the submission endpoint.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-client window state.
struct WindowState {
    count: u32,
    window_start: Instant,
}

/// Process-wide owner of the per-client request counters.
///
/// Counters are memory-resident only and reset lazily when a window
/// elapses. The mutex scope covers just the map operation, so a
/// concurrent increment is never lost.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, WindowState>>,
    window: Duration,
    ceiling: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, ceiling: u32) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window,
            ceiling,
        }
    }

    /// Record one request for the client; returns false once the
    /// ceiling is reached within the live window.
    pub fn allow(&self, client: &str) -> bool {
        self.allow_at(client, Instant::now())
    }

    fn allow_at(&self, client: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let state = windows.entry(client.to_string()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now.duration_since(state.window_start) >= self.window {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= self.ceiling {
            false
        } else {
            state.count += 1;
            true
        }
    }
}
