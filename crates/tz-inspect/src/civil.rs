//! Civil breakdowns and the conversion primitives the inspector is built on.

use crate::error::{InspectError, Result};
use crate::Instant;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Calendar fields of an instant as seen in some zone, plus whether DST applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilBreakdown {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub is_dst: bool,
}

impl CivilBreakdown {
    pub fn from_naive(naive: NaiveDateTime, is_dst: bool) -> Self {
        CivilBreakdown {
            year: naive.year(),
            month: naive.month(),
            day: naive.day(),
            hour: naive.hour(),
            minute: naive.minute(),
            second: naive.second(),
            is_dst,
        }
    }

    /// The wall-clock fields as a naive datetime, or `None` if they do not
    /// name a real calendar time.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }

    /// Same wall-clock fields with the DST flag replaced.
    pub fn with_dst(self, is_dst: bool) -> Self {
        CivilBreakdown { is_dst, ..self }
    }

    /// Encode the wall-clock fields as if they were already UTC, ignoring the
    /// DST flag.
    pub fn as_utc_instant(&self) -> Result<Instant> {
        self.to_naive()
            .map(|naive| naive.and_utc().timestamp())
            .ok_or_else(|| {
                InspectError::CalendarConversionFailed(format!("invalid calendar time {:?}", self))
            })
    }
}

/// Conversion between instants and civil breakdowns in one zone.
///
/// Both directions reject instants before the epoch.
pub trait CivilCalendar {
    /// Whether the zone's current ruleset observes DST at all.
    ///
    /// [`ZoneCalendar`](crate::ZoneCalendar) answers from the two years
    /// following its reference instant (the current time by default); DST
    /// observed only in earlier history does not count.
    fn has_dst(&self) -> bool;

    /// Break `instant` down into local calendar fields.
    fn to_civil(&self, instant: Instant) -> Result<CivilBreakdown>;

    /// Inverse of [`to_civil`](CivilCalendar::to_civil).
    ///
    /// The DST flag selects the rule used to read the wall time: a flag that
    /// disagrees with the zone's own reading shifts the result by the DST save,
    /// and wall times in a gap resolve against the offsets either side of it.
    fn from_civil(&self, civil: &CivilBreakdown) -> Result<Instant>;
}

impl<C: CivilCalendar + ?Sized> CivilCalendar for &C {
    fn has_dst(&self) -> bool {
        (**self).has_dst()
    }

    fn to_civil(&self, instant: Instant) -> Result<CivilBreakdown> {
        (**self).to_civil(instant)
    }

    fn from_civil(&self, civil: &CivilBreakdown) -> Result<Instant> {
        (**self).from_civil(civil)
    }
}
