use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Strictly increasing nonce source for signed requests
///
/// Values track wall-clock milliseconds but never repeat or go backwards,
/// even when several calls land in the same millisecond or run concurrently.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Start above `floor`, e.g. the last nonce a previous process used with the same key
    pub const fn starting_after(floor: u64) -> Self {
        Self {
            last: AtomicU64::new(floor),
        }
    }

    pub fn next_nonce(&self) -> u64 {
        let now = now_millis();
        match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            }) {
            Ok(previous) | Err(previous) => now.max(previous.saturating_add(1)),
        }
    }

    /// Last nonce handed out, 0 if none yet
    pub fn last_nonce(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
