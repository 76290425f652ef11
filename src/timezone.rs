//! Resolves the viewer's time zone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{OffsetDateTimeExt, Tz};

use crate::Error;

/// The time zone that dates are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerZone {
    /// A named zone. Each instant gets the offset in effect at that instant,
    /// so dates on either side of a daylight saving change land on the
    /// correct local day.
    Named(&'static Tz),
    /// A fixed offset from UTC, used when no zone name is known.
    Fixed(UtcOffset),
}

impl ViewerZone {
    /// Convert `instant` to the viewer's local time.
    pub fn to_local(&self, instant: OffsetDateTime) -> OffsetDateTime {
        match self {
            ViewerZone::Named(tz) => instant.to_timezone(*tz),
            ViewerZone::Fixed(offset) => instant.to_offset(*offset),
        }
    }

    /// The current date in the viewer's zone.
    pub fn today(&self) -> Date {
        self.to_local(OffsetDateTime::now_utc()).date()
    }
}

/// Get the timezone for a canonical timezone name, e.g. "Pacific/Auckland".
pub fn get_timezone(canonical_timezone: &str) -> Option<&'static Tz> {
    time_tz::timezones::get_by_name(canonical_timezone)
}

/// Resolve the zone the dashboard should use for grouping dates.
///
/// A named timezone must be valid. Without one, the system's current local
/// offset is used, falling back to UTC when it cannot be determined.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `timezone` is not a canonical
/// timezone name.
pub fn resolve_zone(timezone: Option<&str>) -> Result<ViewerZone, Error> {
    match timezone {
        Some(name) => get_timezone(name).map(ViewerZone::Named).ok_or_else(|| {
            tracing::error!("could not find the timezone \"{name}\"");
            Error::InvalidTimezoneError(name.to_owned())
        }),
        None => Ok(ViewerZone::Fixed(
            UtcOffset::current_local_offset().unwrap_or_else(|error| {
                tracing::warn!("could not determine the local offset, using UTC: {error}");
                UtcOffset::UTC
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use time::{
        UtcOffset,
        macros::{date, datetime},
    };

    use super::{ViewerZone, get_timezone, resolve_zone};
    use crate::Error;

    #[test]
    fn unknown_timezone_is_not_found() {
        assert_eq!(get_timezone("Mars/Olympus_Mons"), None);
    }

    #[test]
    fn resolve_zone_rejects_unknown_timezone() {
        assert_eq!(
            resolve_zone(Some("Mars/Olympus_Mons")),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }

    #[test]
    fn resolve_zone_without_timezone_is_fixed() {
        assert!(matches!(resolve_zone(None), Ok(ViewerZone::Fixed(_))));
    }

    #[test]
    fn named_zone_uses_offset_in_effect_at_each_instant() {
        let zone = resolve_zone(Some("Pacific/Auckland")).unwrap();

        // NZST (+12) in July, NZDT (+13) in January.
        let winter = zone.to_local(datetime!(2024-07-01 11:30 UTC));
        let summer = zone.to_local(datetime!(2024-01-01 11:30 UTC));

        assert_eq!(winter.offset(), UtcOffset::from_hms(12, 0, 0).unwrap());
        assert_eq!(winter.date(), date!(2024 - 07 - 01));
        assert_eq!(summer.offset(), UtcOffset::from_hms(13, 0, 0).unwrap());
        assert_eq!(summer.date(), date!(2024 - 01 - 02));
    }

    #[test]
    fn fixed_zone_always_uses_the_same_offset() {
        let offset = UtcOffset::from_hms(-8, 0, 0).unwrap();
        let zone = ViewerZone::Fixed(offset);

        assert_eq!(zone.to_local(datetime!(2024-07-01 03:00 UTC)).offset(), offset);
    }
}
