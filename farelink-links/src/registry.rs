use serde::Serialize;

use farelink_core::{Itinerary, Notifier, PassengerValidator, SettingsStore};

pub const AIRLINES: &str = "airlines";

/// Everything a link producer may read from the host for one itinerary.
pub struct LinkContext<'a> {
    pub itinerary: &'a Itinerary,
    pub passengers: &'a dyn PassengerValidator,
    pub settings: &'a dyn SettingsStore,
    pub notifier: &'a dyn Notifier,
}

/// A printed link, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOutput {
    pub url: String,
    pub title: String,
    pub desc: String,
    /// HTML fragment shown next to the link.
    pub extra: String,
}

/// Produces a link for the current itinerary.
///
/// Returning `None` means the producer has nothing to show; any reason worth
/// telling the user has already gone through the context's notifier.
pub trait LinkProducer: Send + Sync {
    fn produce(&self, ctx: &LinkContext<'_>) -> Option<LinkOutput>;
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredLink {
    pub category: &'static str,
    #[serde(flatten)]
    pub output: LinkOutput,
}

/// Link producers in registration order, grouped by category name.
#[derive(Default)]
pub struct LinkRegistry {
    producers: Vec<(&'static str, Box<dyn LinkProducer>)>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, category: &'static str, producer: Box<dyn LinkProducer>) {
        tracing::debug!(category, "Registered link producer");
        self.producers.push((category, producer));
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    pub fn produce_all(&self, ctx: &LinkContext<'_>) -> Vec<RegisteredLink> {
        self.producers
            .iter()
            .filter_map(|(category, producer)| {
                producer.produce(ctx).map(|output| RegisteredLink {
                    category: *category,
                    output,
                })
            })
            .collect()
    }

    pub fn produce_category(&self, category: &str, ctx: &LinkContext<'_>) -> Vec<LinkOutput> {
        self.producers
            .iter()
            .filter(|(c, _)| *c == category)
            .filter_map(|(_, producer)| producer.produce(ctx))
            .collect()
    }
}
