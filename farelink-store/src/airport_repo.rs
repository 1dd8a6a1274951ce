use std::io::Read;
use std::path::Path;

use farelink_core::AirportTimezones;

use crate::app_config::AirportsConfig;
use crate::{StoreError, StoreResult};

/// Airport timezone data shipped with the crate (OpenFlights-derived, keyed by IATA code).
pub const EMBEDDED_TIMEZONES: &str = include_str!("../data/timezones.json");

// Column positions in OpenFlights `airports.dat`.
const COL_IATA: usize = 4;
const COL_TZ_DATABASE: usize = 11;

pub fn load_embedded() -> StoreResult<AirportTimezones> {
    Ok(AirportTimezones::from_json(EMBEDDED_TIMEZONES)?)
}

/// Load a table file. `.dat` and `.csv` files are read as raw OpenFlights
/// `airports.dat`; anything else as the keyed JSON format.
pub fn load_file(path: &Path) -> StoreResult<AirportTimezones> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("dat") | Some("csv") => load_openflights(path),
        _ => {
            let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Ok(AirportTimezones::from_json(&json)?)
        }
    }
}

/// Load OpenFlights `airports.dat`, keeping every row with an IATA code and
/// a known tz database zone.
pub fn load_openflights(path: &Path) -> StoreResult<AirportTimezones> {
    let file = std::fs::File::open(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_openflights(file).map_err(|source| StoreError::Csv {
        path: path.display().to_string(),
        source,
    })
}

fn parse_openflights<R: Read>(reader: R) -> Result<AirportTimezones, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .escape(Some(b'\\'))
        .from_reader(reader);

    let mut entries = Vec::new();
    let mut rows = 0usize;
    for record in rdr.records() {
        let record = record?;
        rows += 1;
        let (Some(iata), Some(zone)) = (record.get(COL_IATA), record.get(COL_TZ_DATABASE)) else {
            continue;
        };
        let iata = iata.trim();
        if iata.len() == 3 && iata.chars().all(|c| c.is_ascii_alphanumeric()) {
            entries.push((iata.to_string(), zone.trim().to_string()));
        }
    }

    let (table, skipped) = AirportTimezones::from_valid_entries(entries);
    tracing::debug!(rows, skipped, airports = table.len(), "Parsed OpenFlights airport data");
    Ok(table)
}

/// The configured table file, or the embedded data when none is configured.
pub fn load_airports(config: &AirportsConfig) -> StoreResult<AirportTimezones> {
    let table = match &config.timezone_file {
        Some(path) => {
            tracing::info!("Loading airport timezones from {}", path.display());
            load_file(path)?
        }
        None => load_embedded()?,
    };
    tracing::info!("Airport timezone table ready with {} airports", table.len());
    Ok(table)
}
