use std::time::{Duration, Instant};
use tracing::info;

/// Emits an `info` event with the elapsed time of `operation` when dropped.
pub struct LogDuration {
    operation: String,
    start: Instant,
}

impl LogDuration {
    pub fn new(operation: impl Into<String>) -> Self { Self { operation: operation.into(), start: Instant::now() } }

    pub fn elapsed(&self) -> Duration { self.start.elapsed() }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!(
            operation = %self.operation,
            took_ms = elapsed.as_millis() as u64,
            took_s = elapsed.as_secs_f64(),
            "operation finished"
        );
    }
}

/// Time the rest of the enclosing block: `log_duration!("dedup");`
#[macro_export]
macro_rules! log_duration {
    ($operation:expr) => {
        let _log_duration_guard = $crate::LogDuration::new($operation);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_elapsed_time() {
        let guard = LogDuration::new("sleep");
        std::thread::sleep(Duration::from_millis(5));
        assert!(guard.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn macro_guard_lives_until_scope_end() {
        log_duration!("scoped");
        let total: u32 = (1..=10).sum();
        assert_eq!(total, 55);
    }
}
