//! UTC offsets, DST offsets, and the DST transition search.
//!
//! Every operation takes an explicit instant and has a `*_now` counterpart
//! that reads the system clock first.

use crate::civil::CivilCalendar;
use crate::error::{InspectError, Result};
use crate::zone::{local_zone, ZoneCalendar};
use crate::{Instant, Offset};
use chrono::Utc;

/// How far ahead [`TimeZoneInspector::next_dst_transition`] scans before
/// giving up.
pub const SCAN_HORIZON_DAYS: i64 = 2 * 366;

const SECONDS_PER_MINUTE: i64 = 60;

/// Offset and DST queries against one zone.
#[derive(Debug, Clone)]
pub struct TimeZoneInspector<C = ZoneCalendar> {
    calendar: C,
}

impl TimeZoneInspector<&'static ZoneCalendar> {
    /// Inspector for the process's configured zone.
    pub fn local() -> Self {
        TimeZoneInspector::new(local_zone())
    }
}

impl<C: CivilCalendar> TimeZoneInspector<C> {
    pub fn new(calendar: C) -> Self {
        TimeZoneInspector { calendar }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Whether the zone's ruleset observes DST at all.
    pub fn has_dst(&self) -> bool {
        self.calendar.has_dst()
    }

    /// Total offset from UTC at `instant`, DST included.
    ///
    /// The local wall-clock fields are re-encoded as though they were UTC; the
    /// distance from `instant` to that re-encoding is the offset.
    ///
    /// # Errors
    /// `InvalidInstant` for negative instants, `CalendarConversionFailed` if
    /// no local breakdown exists.
    pub fn utc_offset(&self, instant: Instant) -> Result<Offset> {
        check_instant(instant)?;
        let civil = self.calendar.to_civil(instant)?;
        let wall_clock = civil.as_utc_instant()?;
        Ok(wall_clock - instant)
    }

    pub fn utc_offset_now(&self) -> Result<Offset> {
        self.utc_offset(now()?)
    }

    /// DST component of the offset at `instant`; 0 when DST does not apply.
    ///
    /// Failures are logged and read as "no adjustment".
    pub fn dst_offset(&self, instant: Instant) -> Offset {
        match self.try_dst_offset(instant) {
            Ok(offset) => offset,
            Err(err) => {
                log::warn!("unable to determine DST offset at {}: {}", instant, err);
                0
            }
        }
    }

    pub fn dst_offset_now(&self) -> Offset {
        match now() {
            Ok(instant) => self.dst_offset(instant),
            Err(err) => {
                log::warn!("{}", err);
                0
            }
        }
    }

    fn try_dst_offset(&self, instant: Instant) -> Result<Offset> {
        check_instant(instant)?;
        let civil = self.calendar.to_civil(instant)?;
        let standard_only = self.calendar.from_civil(&civil.with_dst(false))?;
        Ok(standard_only - instant)
    }

    /// Whether DST applies at `instant`.
    pub fn is_dst_in_effect(&self, instant: Instant) -> Result<bool> {
        check_instant(instant)?;
        Ok(self.calendar.to_civil(instant)?.is_dst)
    }

    pub fn is_dst_in_effect_now(&self) -> Result<bool> {
        self.is_dst_in_effect(now()?)
    }

    /// First minute after `instant` whose DST status differs from the status
    /// at the start of `instant`'s minute.
    ///
    /// Scans forward one minute at a time, so the result is the first whole
    /// minute under the new rule: a spring-forward at 02:00 yields the instant
    /// of 03:00 local.
    ///
    /// # Errors
    /// `NoTransition` if the status is unchanged for [`SCAN_HORIZON_DAYS`].
    pub fn next_dst_transition(&self, instant: Instant) -> Result<Instant> {
        check_instant(instant)?;
        let start = instant - instant % SECONDS_PER_MINUTE;
        let dst = self.is_dst_in_effect(start)?;
        let horizon = start + SCAN_HORIZON_DAYS * 86_400;

        let mut clock = start;
        while clock < horizon {
            clock += SECONDS_PER_MINUTE;
            if self.is_dst_in_effect(clock)? != dst {
                return Ok(clock);
            }
        }
        Err(InspectError::NoTransition {
            from: start,
            horizon_days: SCAN_HORIZON_DAYS,
        })
    }

    pub fn next_dst_transition_now(&self) -> Result<Instant> {
        self.next_dst_transition(now()?)
    }

    /// The next `count` transitions after `from`, each search starting at the
    /// previous result.
    pub fn transitions(&self, from: Instant, count: usize) -> Result<Vec<Instant>> {
        let mut found = Vec::with_capacity(count);
        let mut clock = from;
        for _ in 0..count {
            clock = self.next_dst_transition(clock)?;
            found.push(clock);
        }
        Ok(found)
    }
}

fn check_instant(instant: Instant) -> Result<()> {
    if instant < 0 {
        return Err(InspectError::InvalidInstant(instant));
    }
    Ok(())
}

/// Current system time, rejecting clocks set before the epoch.
pub fn now() -> Result<Instant> {
    let now = Utc::now().timestamp();
    if now < 0 {
        return Err(InspectError::ClockUnavailable(format!(
            "system clock reads {} seconds before the epoch",
            -now
        )));
    }
    Ok(now)
}
