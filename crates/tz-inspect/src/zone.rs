//! IANA zone calendars and the process-wide local zone.
//!
//! The local zone is resolved once per process, from `TZ` when it is set and
//! from the OS configuration otherwise. Anything unresolvable degrades to UTC
//! with a warning, so callers always get a usable calendar.

use crate::civil::{CivilBreakdown, CivilCalendar};
use crate::error::{InspectError, Result};
use crate::Instant;
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz, TzOffset, UTC};
use std::env;
use std::sync::OnceLock;

/// Distance between DST probes when deciding whether a zone observes DST.
const PROBE_STEP_SECONDS: i64 = 15 * 86_400;

/// Two years of probes.
const PROBE_COUNT: i64 = 49;

const DEFAULT_DST_SAVE: i64 = 3_600;

static LOCAL_ZONE: OnceLock<ZoneCalendar> = OnceLock::new();

/// A [`CivilCalendar`] backed by a `chrono-tz` zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneCalendar {
    tz: Tz,
    has_dst: bool,
    dst_save: i64,
}

impl ZoneCalendar {
    /// Calendar for `tz`, with DST observance judged from the current time.
    pub fn new(tz: Tz) -> Self {
        Self::with_reference(tz, Utc::now().timestamp().max(0))
    }

    /// Calendar for `tz`, with DST observance judged over the two years that
    /// follow `reference`. Probes past the representable range are skipped, so
    /// an out-of-range reference yields a calendar without DST.
    pub fn with_reference(tz: Tz, reference: Instant) -> Self {
        let save = (0..PROBE_COUNT)
            .filter_map(|i| reference.checked_add(i * PROBE_STEP_SECONDS))
            .filter_map(|probe| DateTime::from_timestamp(probe, 0))
            .map(|utc| {
                tz.offset_from_utc_datetime(&utc.naive_utc())
                    .dst_offset()
                    .num_seconds()
            })
            .find(|save| *save != 0);

        ZoneCalendar {
            tz,
            has_dst: save.is_some(),
            dst_save: save.unwrap_or(DEFAULT_DST_SAVE),
        }
    }

    pub fn utc() -> Self {
        ZoneCalendar {
            tz: UTC,
            has_dst: false,
            dst_save: DEFAULT_DST_SAVE,
        }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Seconds added to standard time while DST applies.
    pub fn dst_save(&self) -> i64 {
        self.dst_save
    }

    /// Offsets that could apply to a wall time: one normally, both readings of
    /// a repeated hour, or the offsets on either side of a skipped one.
    fn candidate_offsets(&self, naive: &NaiveDateTime) -> Vec<TzOffset> {
        match self.tz.offset_from_local_datetime(naive) {
            LocalResult::Single(offset) => vec![offset],
            LocalResult::Ambiguous(earlier, later) => vec![earlier, later],
            LocalResult::None => {
                let before = naive.checked_sub_signed(Duration::days(1)).unwrap_or(*naive);
                let after = naive.checked_add_signed(Duration::days(1)).unwrap_or(*naive);
                vec![
                    self.tz.offset_from_utc_datetime(&before),
                    self.tz.offset_from_utc_datetime(&after),
                ]
            }
        }
    }
}

impl Default for ZoneCalendar {
    fn default() -> Self {
        ZoneCalendar::utc()
    }
}

fn observes_dst(offset: &TzOffset) -> bool {
    offset.dst_offset().num_seconds() != 0
}

impl CivilCalendar for ZoneCalendar {
    fn has_dst(&self) -> bool {
        self.has_dst
    }

    fn to_civil(&self, instant: Instant) -> Result<CivilBreakdown> {
        if instant < 0 {
            return Err(InspectError::InvalidInstant(instant));
        }
        let utc = DateTime::from_timestamp(instant, 0).ok_or_else(|| {
            InspectError::CalendarConversionFailed(format!("instant {} is out of range", instant))
        })?;
        let local = utc.with_timezone(&self.tz);
        Ok(CivilBreakdown::from_naive(
            local.naive_local(),
            observes_dst(local.offset()),
        ))
    }

    fn from_civil(&self, civil: &CivilBreakdown) -> Result<Instant> {
        let naive = civil.to_naive().ok_or_else(|| {
            InspectError::CalendarConversionFailed(format!("invalid calendar time {:?}", civil))
        })?;

        let candidates = self.candidate_offsets(&naive);
        let offset = match candidates.iter().find(|o| observes_dst(o) == civil.is_dst) {
            Some(offset) => i64::from(offset.fix().local_minus_utc()),
            None => {
                // The zone reads this wall time under the other rule.
                let base = candidates[0].base_utc_offset().num_seconds();
                if civil.is_dst {
                    base + self.dst_save
                } else {
                    base
                }
            }
        };

        let instant = naive.and_utc().timestamp() - offset;
        if instant < 0 {
            return Err(InspectError::CalendarConversionFailed(format!(
                "{:?} falls before the epoch",
                civil
            )));
        }
        Ok(instant)
    }
}

/// The calendar for the process's configured zone, loaded on first use.
pub fn local_zone() -> &'static ZoneCalendar {
    LOCAL_ZONE.get_or_init(load_local_zone)
}

fn load_local_zone() -> ZoneCalendar {
    match detect_local_tz() {
        Ok(tz) => {
            log::debug!("using time zone {}", tz.name());
            ZoneCalendar::new(tz)
        }
        Err(err) => {
            log::warn!("{}; falling back to UTC", err);
            ZoneCalendar::utc()
        }
    }
}

/// Resolve the configured zone: `TZ` first, then the OS setting.
pub fn detect_local_tz() -> Result<Tz> {
    match env::var("TZ") {
        Ok(value) => parse_tz_env(&value),
        Err(env::VarError::NotPresent) => {
            let name = iana_time_zone::get_timezone()
                .map_err(|err| InspectError::UnknownZone(err.to_string()))?;
            parse_zone_name(&name)
        }
        Err(env::VarError::NotUnicode(raw)) => {
            Err(InspectError::UnknownZone(raw.to_string_lossy().into_owned()))
        }
    }
}

/// Interpret a `TZ` value.
///
/// - a leading `:` is ignored
/// - an empty value means UTC
/// - a path into a `zoneinfo/` directory names the zone after that directory
pub fn parse_tz_env(value: &str) -> Result<Tz> {
    let value = value.strip_prefix(':').unwrap_or(value).trim();
    if value.is_empty() {
        return Ok(UTC);
    }

    const ZONEINFO: &str = "zoneinfo/";
    let name = match value.find(ZONEINFO) {
        Some(idx) if value.starts_with('/') => &value[idx + ZONEINFO.len()..],
        _ => value,
    };
    parse_zone_name(name)
}

fn parse_zone_name(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| InspectError::UnknownZone(name.to_string()))
}
