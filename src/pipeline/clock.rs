//! Injected clock seam so analysis identifiers stay deterministic in tests.

/// Source of submission timestamps.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Fixed time for tests.
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Analysis identifier derived from submission time.
pub fn analysis_id(clock: &dyn Clock) -> String {
    format!("analysis_{}", clock.now_millis())
}
