pub mod itinerary;
pub mod airports;
pub mod time;
pub mod passengers;
pub mod edition;
pub mod host;

pub use itinerary::{Departure, Itinerary, ItinerarySegment, Leg, Segment};
pub use airports::AirportTimezones;
pub use time::LocalTimeResolver;
pub use passengers::{PassengerCounts, PassengerRequest, PaxRules, StandardPassengerValidator};
pub use edition::{resolve_edition_code, Edition, DEFAULT_EDITION, EDITIONS};
pub use host::{
    CollectingNotifier, Notifier, PassengerValidator, SettingDescriptor, SettingsStore,
    TracingNotifier,
};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Malformed itinerary: {0}")]
    MalformedItinerary(String),
    #[error("Unresolvable timezone for airport code {0}")]
    UnknownAirport(String),
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
    #[error("Invalid timezone {zone} for airport {airport}")]
    InvalidTimezone { airport: String, zone: String },
    #[error("Invalid edition code: {0}")]
    InvalidEdition(String),
    #[error("Failed to load airport table: {0}")]
    TableLoad(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
