//! Embargo policy for derived data products.

use chrono::{Duration, NaiveDateTime};

use crate::types::DataLevel;

/// Embargo period applied to preliminary data, in days (about three years).
pub const EMBARGO_PERIOD_DAYS: i64 = 1096;

/// Compute the embargo expiry for a run, if the run is still embargoed.
///
/// Preliminary data (level < 3) is embargoed until [`EMBARGO_PERIOD_DAYS`]
/// after the run ended; the record stays restricted only while that instant
/// is strictly in the future. Final data (level >= 3) is always open
/// regardless of end time.
pub fn embargo_date(
    end_time: NaiveDateTime,
    level: DataLevel,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    if !level.is_preliminary() {
        return None;
    }
    let candidate = end_time + Duration::days(EMBARGO_PERIOD_DAYS);
    (candidate > now).then_some(candidate)
}
