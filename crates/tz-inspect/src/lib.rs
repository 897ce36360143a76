//! # tz-inspect
//!
//! Local time zone inspection: the offset from UTC at any instant, the DST
//! component of that offset, and a minute-granularity search for the next
//! DST transition.
//!
//! Offsets are derived the portable way, by round-tripping an instant through
//! its civil breakdown instead of reading an offset field, on top of the
//! `chrono-tz` copy of the IANA database.
//!
//! ## Quick start
//!
//! ```rust
//! use tz_inspect::{TimeZoneInspector, ZoneCalendar};
//!
//! let inspector = TimeZoneInspector::new(ZoneCalendar::new(chrono_tz::Asia::Kolkata));
//! assert_eq!(inspector.utc_offset(0).unwrap(), 19_800);
//! assert_eq!(inspector.dst_offset(0), 0);
//! assert!(!inspector.has_dst());
//! ```
//!
//! ## Modules
//!
//! - [`civil`] — `CivilBreakdown` and the `CivilCalendar` conversion seam
//! - [`zone`] — `ZoneCalendar` over an IANA zone, process-wide local zone
//! - [`inspector`] — offsets, DST predicate, transition search
//! - [`report`] — ctime timestamps and the printed offset lines
//! - [`error`] — Error types

pub mod civil;
pub mod error;
pub mod inspector;
pub mod report;
pub mod zone;

pub use civil::{CivilBreakdown, CivilCalendar};
pub use error::InspectError;
pub use inspector::TimeZoneInspector;
pub use report::Report;
pub use zone::{local_zone, ZoneCalendar};

/// Seconds since the Unix epoch.
pub type Instant = i64;

/// Signed seconds east of UTC.
pub type Offset = i64;
