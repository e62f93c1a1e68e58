use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct WindowState {
    window_started_at: Instant,
    suppressed: u64,
}

static LOG_WINDOWS: OnceLock<Mutex<HashMap<String, WindowState>>> = OnceLock::new();

/// Returns `Some(suppressed_count)` when a log for `key` should be emitted,
/// otherwise `None` and the event is counted as suppressed for the active window.
///
/// Used for noisy repeated events: identity cache hits and metadata store
/// failures while the store is down.
pub fn should_emit(key: &str, interval: Duration) -> Option<u64> {
    let windows = LOG_WINDOWS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut map = windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let now = Instant::now();

    let mut first_seen = false;
    let state = map.entry(key.to_string()).or_insert_with(|| {
        first_seen = true;
        WindowState {
            window_started_at: now,
            suppressed: 0,
        }
    });
    if first_seen {
        return Some(0);
    }
    if now.duration_since(state.window_started_at) >= interval {
        let suppressed = state.suppressed;
        state.window_started_at = now;
        state.suppressed = 0;
        Some(suppressed)
    } else {
        state.suppressed += 1;
        None
    }
}
