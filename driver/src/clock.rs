use time::{OffsetDateTime, PrimitiveDateTime};

use kernel::interface::clock::Clock;

/// Wall clock in the local offset of the host, falling back to UTC when the
/// offset cannot be determined (e.g. multi-threaded processes on some platforms).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> PrimitiveDateTime {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let now = PrimitiveDateTime::new(now.date(), now.time());
        now.replace_nanosecond(0).unwrap_or(now)
    }
}
