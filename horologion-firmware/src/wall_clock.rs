//! Software wall clock
//!
//! Local civil time, maintained as the last co-processor sync plus the
//! monotonic uptime elapsed since. A refreshed sync simply replaces the
//! base; there is no drift correction beyond resyncing.

use embassy_time::Instant;

use horologion_core::policy::WallTime;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// The current notion of local time.
pub struct WallClock {
    base: Option<Base>,
}

struct Base {
    /// Uptime instant of the sync
    at: Instant,
    /// Seconds past local midnight at the sync
    secs_of_day: u64,
}

impl WallClock {
    pub const fn new() -> Self {
        Self { base: None }
    }

    /// Whether at least one sync has arrived.
    pub fn is_synced(&self) -> bool {
        self.base.is_some()
    }

    /// Accept a sync. Out-of-range fields are rejected.
    pub fn sync(&mut self, hour: u8, minute: u8, second: u8) -> bool {
        if hour > 23 || minute > 59 || second > 59 {
            return false;
        }
        self.base = Some(Base {
            at: Instant::now(),
            secs_of_day: u64::from(hour) * 3600 + u64::from(minute) * 60 + u64::from(second),
        });
        true
    }

    /// The current wall time, once a sync has arrived.
    pub fn now(&self) -> Option<WallTime> {
        let base = self.base.as_ref()?;
        let total = (base.secs_of_day + base.at.elapsed().as_secs()) % SECS_PER_DAY;
        Some(WallTime {
            hour: (total / 3600) as u8,
            minute: (total / 60 % 60) as u8,
        })
    }
}
