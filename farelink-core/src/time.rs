use chrono::{Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::airports::AirportTimezones;
use crate::itinerary::{Departure, Segment};
use crate::{CoreError, CoreResult};

/// Converts a departure's local wall-clock time into a UTC epoch, using the
/// DST rules of the departure airport on that date.
#[derive(Debug, Clone, Copy)]
pub struct LocalTimeResolver<'a> {
    airports: &'a AirportTimezones,
}

impl<'a> LocalTimeResolver<'a> {
    pub fn new(airports: &'a AirportTimezones) -> Self {
        Self { airports }
    }

    /// Resolve `year-month-day time24` at `airport` to milliseconds since the Unix epoch.
    pub fn resolve(
        &self,
        year: i32,
        month: u32,
        day: u32,
        time24: &str,
        airport: &str,
    ) -> CoreResult<i64> {
        let civil = format!("{}-{:02}-{:02}T{}:00", year, month, day, time24);
        let naive = NaiveDateTime::parse_from_str(&civil, "%Y-%m-%dT%H:%M:%S")
            .map_err(|e| CoreError::InvalidDateTime(format!("{}: {}", civil, e)))?;
        let tz = self.airports.lookup(airport)?;

        Ok(local_to_epoch_millis(&tz, naive))
    }

    pub fn resolve_departure(&self, departure: &Departure, airport: &str) -> CoreResult<i64> {
        self.resolve(
            departure.year,
            departure.month,
            departure.day,
            &departure.time24,
            airport,
        )
    }

    /// Departure epoch of a segment, in its own origin's timezone.
    pub fn resolve_segment(&self, segment: &Segment) -> CoreResult<i64> {
        self.resolve_departure(&segment.departure, &segment.origin)
    }
}

fn local_to_epoch_millis(tz: &Tz, naive: NaiveDateTime) -> i64 {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        // Autumn fold: the wall clock repeats, take the first occurrence.
        LocalResult::Ambiguous(a, b) => a.timestamp_millis().min(b.timestamp_millis()),
        // Spring gap: read the wall clock with the offset in force before the jump.
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&(naive - Duration::days(1))).fix();
            let utc = naive - Duration::seconds(i64::from(before.local_minus_utc()));
            utc.and_utc().timestamp_millis()
        }
    }
}
