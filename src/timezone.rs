use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the UTC offset of `canonical_timezone` (e.g. "America/El_Salvador")
/// at the instant `at`.
///
/// Returns `None` if the timezone name is not known.
pub fn get_local_offset(canonical_timezone: &str, at: OffsetDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone).map(|tz| tz.get_offset_utc(&at).to_utc())
}
