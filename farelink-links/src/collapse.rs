use std::ops::RangeInclusive;

use farelink_core::{CoreResult, ItinerarySegment, LocalTimeResolver, Segment};

/// Layovers this long or longer are stopovers and always split a flight number.
pub const MAX_LAYOVER_MINUTES: u32 = 1440;

/// Group a leg's segments into runs flown under one marketed flight number.
///
/// A run keeps growing while the next segment carries the same flight number and
/// the ground time before it is under 24h. Runs are returned in flight order and
/// together cover every segment exactly once.
pub fn segment_runs(segments: &[Segment]) -> Vec<RangeInclusive<usize>> {
    let mut runs = Vec::new();
    let mut j = 0;

    while j < segments.len() {
        let mut k = 0;
        while j + k + 1 < segments.len() {
            let current = &segments[j + k];
            let next = &segments[j + k + 1];
            if current.flight_number != next.flight_number
                || current.layover_minutes >= MAX_LAYOVER_MINUTES
            {
                break;
            }
            k += 1;
        }
        runs.push(j..=j + k);
        j += k + 1;
    }

    runs
}

/// Collapse one leg's segments into itinerary segments tagged with `leg_index`.
pub fn collapse(
    resolver: &LocalTimeResolver<'_>,
    leg_index: usize,
    segments: &[Segment],
) -> CoreResult<Vec<ItinerarySegment>> {
    segment_runs(segments)
        .into_iter()
        .map(|run| {
            let first = &segments[*run.start()];
            let last = &segments[*run.end()];
            if run.start() != run.end() {
                tracing::debug!(
                    flight = %first.flight_number,
                    from = %first.origin,
                    to = %last.destination,
                    absorbed = run.end() - run.start(),
                    "Collapsed through-flight segments"
                );
            }

            Ok(ItinerarySegment {
                carrier: first.carrier.clone(),
                flight_number: first.flight_number.clone(),
                booking_class: first.booking_class.clone(),
                origin: first.origin.clone(),
                destination: last.destination.clone(),
                departure_epoch_ms: resolver.resolve_segment(first)?,
                leg_index,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use farelink_core::{AirportTimezones, Departure};

    fn seg(fnr: &str, orig: &str, dest: &str, time24: &str, layover: u32) -> Segment {
        Segment {
            carrier: "AA".to_string(),
            flight_number: fnr.to_string(),
            booking_class: "Y".to_string(),
            origin: orig.to_string(),
            destination: dest.to_string(),
            departure: Departure {
                year: 2025,
                month: 3,
                day: 15,
                time24: time24.to_string(),
            },
            layover_minutes: layover,
        }
    }

    fn airports() -> AirportTimezones {
        AirportTimezones::from_entries([
            ("LAX", "America/Los_Angeles"),
            ("DFW", "America/Chicago"),
            ("ORD", "America/Chicago"),
            ("MIA", "America/New_York"),
            ("JFK", "America/New_York"),
        ])
        .unwrap()
    }

    #[test]
    fn test_same_flight_short_layover_merges() {
        let segments = vec![
            seg("100", "LAX", "DFW", "06:00", 45),
            seg("100", "DFW", "MIA", "12:15", 0),
            seg("200", "MIA", "JFK", "16:00", 0),
        ];
        let table = airports();
        let resolver = LocalTimeResolver::new(&table);

        let collapsed = collapse(&resolver, 0, &segments).unwrap();
        assert_eq!(collapsed.len(), 2);

        assert_eq!(collapsed[0].flight_number, "100");
        assert_eq!(collapsed[0].origin, "LAX");
        assert_eq!(collapsed[0].destination, "MIA");
        assert_eq!(
            collapsed[0].departure_epoch_ms,
            resolver.resolve(2025, 3, 15, "06:00", "LAX").unwrap()
        );

        assert_eq!(collapsed[1].flight_number, "200");
        assert_eq!(collapsed[1].origin, "MIA");
        assert_eq!(collapsed[1].destination, "JFK");
    }

    #[test]
    fn test_whole_leg_under_one_flight_number() {
        let segments = vec![
            seg("7", "LAX", "DFW", "06:00", 60),
            seg("7", "DFW", "ORD", "12:00", 1439),
            seg("7", "ORD", "JFK", "09:00", 0),
        ];
        assert_eq!(segment_runs(&segments), vec![0..=2]);

        let table = airports();
        let resolver = LocalTimeResolver::new(&table);
        let collapsed = collapse(&resolver, 3, &segments).unwrap();
        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed[0].origin, "LAX");
        assert_eq!(collapsed[0].destination, "JFK");
        assert_eq!(collapsed[0].leg_index, 3);
    }

    #[test]
    fn test_long_layover_splits() {
        let segments = vec![
            seg("7", "LAX", "DFW", "06:00", 1440),
            seg("7", "DFW", "ORD", "12:00", 0),
        ];
        assert_eq!(segment_runs(&segments), vec![0..=0, 1..=1]);
    }

    #[test]
    fn test_flight_number_change_splits() {
        let segments = vec![
            seg("1", "LAX", "DFW", "06:00", 30),
            seg("2", "DFW", "ORD", "12:00", 30),
            seg("2", "ORD", "JFK", "15:00", 0),
            seg("1", "JFK", "MIA", "19:00", 0),
        ];
        assert_eq!(segment_runs(&segments), vec![0..=0, 1..=2, 3..=3]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(segment_runs(&[]).is_empty());
        assert_eq!(segment_runs(&[seg("9", "LAX", "JFK", "06:00", 0)]), vec![0..=0]);
    }

    #[test]
    fn test_unknown_airport_propagates() {
        let segments = vec![seg("9", "XXX", "JFK", "06:00", 0)];
        let table = airports();
        let resolver = LocalTimeResolver::new(&table);
        assert!(collapse(&resolver, 0, &segments).is_err());
    }
}
