//! The lines `dstinfo` prints.

use crate::civil::CivilCalendar;
use crate::error::{InspectError, Result};
use crate::inspector::TimeZoneInspector;
use crate::Instant;

pub const NO_DST_LINE: &str = "Timezone does not have daylight savings";

/// Number of upcoming transitions listed after the current offset.
pub const DEFAULT_TRANSITIONS: usize = 2;

/// `ctime(3)`-style local timestamp without the trailing newline,
/// e.g. `Sun Nov  3 01:00:00 2024`.
pub fn ctime<C: CivilCalendar>(calendar: &C, instant: Instant) -> Result<String> {
    let civil = calendar.to_civil(instant)?;
    let naive = civil.to_naive().ok_or_else(|| {
        InspectError::CalendarConversionFailed(format!("invalid calendar time {:?}", civil))
    })?;
    Ok(naive.format("%a %b %e %H:%M:%S %Y").to_string())
}

/// Offset in hours, printed in shortest form (`-8`, `5.5`, `12.75`).
pub fn format_hours(offset: i64) -> String {
    format!("{}", offset as f64 / 3600.0)
}

/// Stdout lines plus the failures hit while producing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub lines: Vec<String>,
    pub failures: Vec<InspectError>,
}

impl Report {
    /// Report for `now`: the no-DST line alone, or the current offset followed
    /// by `transitions` upcoming transitions.
    ///
    /// A failed offset line is skipped; a failed transition search ends the
    /// listing since there is no instant to continue from.
    pub fn build<C: CivilCalendar>(
        inspector: &TimeZoneInspector<C>,
        now: Instant,
        transitions: usize,
    ) -> Self {
        let mut report = Report::default();

        if !inspector.has_dst() {
            report.lines.push(NO_DST_LINE.to_string());
            return report;
        }

        report.push_offset_line(inspector, now);
        let mut clock = now;
        for _ in 0..transitions {
            match inspector.next_dst_transition(clock) {
                Ok(next) => {
                    clock = next;
                    report.push_offset_line(inspector, clock);
                }
                Err(err) => {
                    report.failures.push(err);
                    break;
                }
            }
        }
        report
    }

    /// `Difference between local time and universal time at <ctime> is <h> hours`
    pub fn offset_line<C: CivilCalendar>(
        inspector: &TimeZoneInspector<C>,
        instant: Instant,
    ) -> Result<String> {
        let offset = inspector.utc_offset(instant)?;
        let timestamp = ctime(inspector.calendar(), instant)?;
        Ok(format!(
            "Difference between local time and universal time at {} is {} hours",
            timestamp,
            format_hours(offset)
        ))
    }

    fn push_offset_line<C: CivilCalendar>(
        &mut self,
        inspector: &TimeZoneInspector<C>,
        instant: Instant,
    ) {
        match Self::offset_line(inspector, instant) {
            Ok(line) => self.lines.push(line),
            Err(err) => self.failures.push(err),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
