use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

// ============================================================================
// Host itinerary model (field names follow the parsed-itinerary JSON)
// ============================================================================

/// A priced trip made of one or more legs, in flight order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(rename = "itin")]
    pub legs: Vec<Leg>,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    #[serde(rename = "orig")]
    pub origin: String,
    #[serde(rename = "dest")]
    pub destination: String,
    #[serde(rename = "seg")]
    pub segments: Vec<Segment>,
}

/// One scheduled flight operation within a leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub carrier: String,
    #[serde(rename = "fnr")]
    pub flight_number: String,
    #[serde(rename = "bookingclass")]
    pub booking_class: String,
    #[serde(rename = "orig")]
    pub origin: String,
    #[serde(rename = "dest")]
    pub destination: String,
    #[serde(rename = "dep")]
    pub departure: Departure,
    /// Minutes on the ground before the next segment. Absent on the last segment of a leg.
    #[serde(rename = "layoverduration", default)]
    pub layover_minutes: u32,
}

/// Civil departure time, local to the segment's origin airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// 24-hour clock, `HH:MM`.
    pub time24: String,
}

/// A run of consecutive segments flown under one marketed flight number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItinerarySegment {
    pub carrier: String,
    pub flight_number: String,
    pub booking_class: String,
    pub origin: String,
    pub destination: String,
    pub departure_epoch_ms: i64,
    pub leg_index: usize,
}

impl Itinerary {
    /// Check the structural invariants the URL encoding relies on.
    ///
    /// Every code that ends up in a delimited URL field must be plain ASCII
    /// alphanumeric, otherwise a `,`, `|` or `#` could shift the positional layout.
    pub fn validate(&self) -> CoreResult<()> {
        if self.legs.is_empty() {
            return Err(CoreError::MalformedItinerary("itinerary has no legs".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::MalformedItinerary(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }

        for (i, leg) in self.legs.iter().enumerate() {
            check_code(&leg.origin, "leg origin", i)?;
            check_code(&leg.destination, "leg destination", i)?;
            if leg.segments.is_empty() {
                return Err(CoreError::MalformedItinerary(format!("leg {} has no segments", i)));
            }
            for seg in &leg.segments {
                check_code(&seg.carrier, "carrier", i)?;
                check_code(&seg.flight_number, "flight number", i)?;
                check_code(&seg.booking_class, "booking class", i)?;
                check_code(&seg.origin, "segment origin", i)?;
                check_code(&seg.destination, "segment destination", i)?;
            }
        }
        Ok(())
    }

    pub fn is_one_way(&self) -> bool {
        self.legs.len() == 1
    }
}

fn check_code(value: &str, what: &str, leg_index: usize) -> CoreResult<()> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::MalformedItinerary(format!(
            "invalid {} {:?} in leg {}",
            what, value, leg_index
        )));
    }
    Ok(())
}
