use farelink_core::{
    resolve_edition_code, AirportTimezones, CoreResult, Edition, Itinerary, LocalTimeResolver,
    PassengerCounts, DEFAULT_EDITION, EDITIONS,
};

use crate::collapse::collapse;
use crate::encode::encode_component;

/// Entry point of the metasearch deep link; the `ITEN` value is positional.
pub const METASEARCH_BASE: &str = "https://www.aa.com/goto/metasearch?ITEN=GOOGLE,0,";

/// Builds metasearch deep links from an itinerary.
pub struct UrlAssembler<'a> {
    resolver: LocalTimeResolver<'a>,
    default_edition: String,
}

impl<'a> UrlAssembler<'a> {
    pub fn new(airports: &'a AirportTimezones) -> Self {
        Self {
            resolver: LocalTimeResolver::new(airports),
            default_edition: DEFAULT_EDITION.to_string(),
        }
    }

    pub fn with_default_edition(mut self, code: impl Into<String>) -> Self {
        self.default_edition = code.into();
        self
    }

    /// Build the deep link for `edition`, or the default edition when none is given.
    ///
    /// Every input is checked and every departure resolved before the URL is
    /// returned, so a failure never leaves a partial link behind.
    pub fn build_url(
        &self,
        itinerary: &Itinerary,
        pax: &PassengerCounts,
        edition: Option<&str>,
    ) -> CoreResult<String> {
        itinerary.validate()?;
        let edition = resolve_edition_code(edition, &self.default_edition)?;
        let legs = &itinerary.legs;

        let mut url = String::from(METASEARCH_BASE);
        url.push_str(&edition);
        url.push_str(if itinerary.is_one_way() { ",oneWay" } else { ",multi" });

        url.push_str(&format!(
            ",4,A{}S0C{}I{}Y0L0,0,",
            pax.adults,
            pax.child_count(),
            pax.infants_in_lap
        ));

        url.push_str(&format!("{},0,{},0", legs[0].origin, legs[0].destination));

        if legs.len() > 1 {
            for _ in legs {
                url.push_str(",0,0");
            }
        } else {
            url.push_str(",0");
        }

        match legs.len() {
            1 => {
                let epoch = self.resolver.resolve_segment(&legs[0].segments[0])?;
                url.push_str(&format!(",{}", epoch));
            }
            2 => url.push_str(",0,0"),
            _ => {}
        }

        url.push_str(&format!(",{},1,", format_price(itinerary.price)));

        if legs.len() > 1 {
            url.push_str(&encode_component(&self.leg_block(itinerary)?));
            url.push(',');
        }

        url.push_str(&encode_component(&self.segment_block(itinerary)?));

        tracing::debug!(edition = %edition, legs = legs.len(), "Built metasearch link");
        Ok(url)
    }

    /// The same link once per regional edition, in edition-list order.
    pub fn build_alternates(
        &self,
        itinerary: &Itinerary,
        pax: &PassengerCounts,
    ) -> CoreResult<Vec<(Edition, String)>> {
        EDITIONS
            .iter()
            .map(|edition| {
                self.build_url(itinerary, pax, Some(edition.code))
                    .map(|url| (*edition, url))
            })
            .collect()
    }

    /// `#orig|dest|0|0|epoch` per leg, timed from the leg's first segment.
    fn leg_block(&self, itinerary: &Itinerary) -> CoreResult<String> {
        let mut block = String::new();
        for leg in &itinerary.legs {
            let epoch = self.resolver.resolve_segment(&leg.segments[0])?;
            block.push_str(&format!("#{}|{}|0|0|{}", leg.origin, leg.destination, epoch));
        }
        Ok(block)
    }

    /// `#carrier|fnr|class|orig|dest|epoch|leg` per collapsed segment.
    fn segment_block(&self, itinerary: &Itinerary) -> CoreResult<String> {
        let mut block = String::new();
        for (leg_index, leg) in itinerary.legs.iter().enumerate() {
            for seg in collapse(&self.resolver, leg_index, &leg.segments)? {
                block.push_str(&format!(
                    "#{}|{}|{}|{}|{}|{}|{}",
                    seg.carrier,
                    seg.flight_number,
                    seg.booking_class,
                    seg.origin,
                    seg.destination,
                    seg.departure_epoch_ms,
                    seg.leg_index
                ));
            }
        }
        Ok(block)
    }
}

/// Shortest decimal form of the price: `250`, `1234.56`.
fn format_price(price: f64) -> String {
    if price == 0.0 {
        // also folds -0.0
        return "0".to_string();
    }
    format!("{}", price)
}
