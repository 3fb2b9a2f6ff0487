use std::sync::{Arc, Mutex};
use time::{OffsetDateTime, UtcOffset};

/// Source of the insertion instant used by the record stores.
///
/// `now()` is expressed in `offset()`, and calendar days (month/year tags,
/// day ranges) are read in that same offset.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;

    fn offset(&self) -> UtcOffset;
}

/// Wall clock viewed at a fixed offset from UTC.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::with_offset(UtcOffset::UTC)
    }
}

impl SystemClock {
    pub fn with_offset(offset: UtcOffset) -> Self {
        SystemClock { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }

    fn offset(&self) -> UtcOffset {
        self.offset
    }
}

/// A clock that returns whatever instant it was last set to. Clones share the
/// same instant. Its offset is the offset of that instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Arc<Mutex<OffsetDateTime>>,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        ManualClock {
            instant: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, instant: OffsetDateTime) {
        let mut guard = self.instant.lock().unwrap_or_else(|e| e.into_inner());
        *guard = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.instant.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn offset(&self) -> UtcOffset {
        self.now().offset()
    }
}

pub type SharedClock = Arc<dyn Clock>;
