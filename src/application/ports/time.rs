// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Wall-clock source. Publish dates and visibility checks read the time
/// through this port so tests can pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
