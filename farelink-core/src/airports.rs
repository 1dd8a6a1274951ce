use std::collections::HashMap;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::{CoreError, CoreResult};

/// Keyed airport record, as found in the OpenFlights-derived timezone data.
/// Only the zone name matters here; the remaining columns are ignored.
#[derive(Debug, Deserialize)]
struct AirportRecord {
    #[serde(rename = "Timezone")]
    timezone: String,
}

/// Read-only IATA code -> IANA timezone lookup.
///
/// Zone names are parsed once when the table is built, so a lookup can only
/// fail on a missing code, never on bad data.
#[derive(Debug, Clone, Default)]
pub struct AirportTimezones {
    zones: HashMap<String, Tz>,
}

impl AirportTimezones {
    /// Parse a table in the `{"LAX": {"Timezone": "America/Los_Angeles", ...}}` format.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let records: HashMap<String, AirportRecord> =
            serde_json::from_str(json).map_err(|e| CoreError::TableLoad(e.to_string()))?;

        Self::from_entries(records.into_iter().map(|(code, rec)| (code, rec.timezone)))
    }

    pub fn from_entries<I, K, V>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut zones = HashMap::new();
        for (code, zone) in entries {
            let code = code.as_ref().trim().to_ascii_uppercase();
            let tz: Tz = zone.as_ref().parse().map_err(|_| CoreError::InvalidTimezone {
                airport: code.clone(),
                zone: zone.as_ref().to_string(),
            })?;
            zones.insert(code, tz);
        }
        tracing::debug!("Loaded timezones for {} airports", zones.len());
        Ok(Self { zones })
    }

    /// Like `from_entries`, but rows whose zone does not parse are dropped
    /// instead of failing the whole table. Returns the table and the number
    /// of rows dropped.
    pub fn from_valid_entries<I, K, V>(entries: I) -> (Self, usize)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut zones = HashMap::new();
        let mut skipped = 0;
        for (code, zone) in entries {
            match zone.as_ref().parse::<Tz>() {
                Ok(tz) => {
                    zones.insert(code.as_ref().trim().to_ascii_uppercase(), tz);
                }
                Err(_) => skipped += 1,
            }
        }
        tracing::debug!("Loaded timezones for {} airports, skipped {}", zones.len(), skipped);
        (Self { zones }, skipped)
    }

    pub fn lookup(&self, code: &str) -> CoreResult<Tz> {
        self.zones
            .get(&code.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| CoreError::UnknownAirport(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.zones.contains_key(&code.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keyed_format() {
        let json = r#"
            {
                "LAX": { "City": "Los Angeles", "Country": "United States", "Timezone": "America/Los_Angeles" },
                "LHR": { "City": "London", "Country": "United Kingdom", "Timezone": "Europe/London" }
            }
        "#;
        let table = AirportTimezones::from_json(json).expect("Failed to load table");
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("LAX").unwrap(), chrono_tz::America::Los_Angeles);
        assert_eq!(table.lookup("lhr").unwrap(), chrono_tz::Europe::London);
    }

    #[test]
    fn test_unknown_airport_is_typed_error() {
        let table = AirportTimezones::from_entries([("JFK", "America/New_York")]).unwrap();
        match table.lookup("XXX") {
            Err(CoreError::UnknownAirport(code)) => assert_eq!(code, "XXX"),
            other => panic!("expected UnknownAirport, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_zone_rejected_at_load() {
        let result = AirportTimezones::from_entries([("ABC", "Mars/Olympus_Mons")]);
        assert!(matches!(result, Err(CoreError::InvalidTimezone { .. })));
    }

    #[test]
    fn test_valid_entries_skip_bad_zones() {
        let (table, skipped) = AirportTimezones::from_valid_entries([
            ("pit", "America/New_York"),
            ("XXX", "\\N"),
            ("BOI", "America/Boise"),
        ]);
        assert_eq!(skipped, 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("PIT").unwrap(), chrono_tz::America::New_York);
        assert!(!table.contains("XXX"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            AirportTimezones::from_json("[1, 2, 3]"),
            Err(CoreError::TableLoad(_))
        ));
    }
}
