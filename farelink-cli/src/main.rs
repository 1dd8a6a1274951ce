use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use farelink_core::{CollectingNotifier, Itinerary, PassengerRequest, StandardPassengerValidator};
use farelink_links::american::SETTING_KEY;
use farelink_links::{AmericanLink, LinkContext, LinkRegistry};
use farelink_store::{load_airports, Config, InMemorySettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "farelink", version, about = "Print airline deep links for a parsed itinerary")]
struct Cli {
    /// Itinerary JSON as produced by the itinerary parser
    #[arg(short, long)]
    itinerary: PathBuf,

    #[arg(long, default_value_t = 1)]
    adults: u32,

    #[arg(long, default_value_t = 0)]
    seniors: u32,

    /// Age of a travelling child; repeat once per child
    #[arg(long = "child")]
    children: Vec<u8>,

    #[arg(long, default_value_t = 0)]
    infants_lap: u32,

    #[arg(long, default_value_t = 0)]
    infants_seat: u32,

    /// Regional edition of the primary link, e.g. US or GB
    #[arg(long, env = "FARELINK_EDITION")]
    edition: Option<String>,

    /// Airport timezone table to use instead of the configured one
    #[arg(long)]
    airports: Option<PathBuf>,
}

impl Cli {
    fn passengers(&self) -> PassengerRequest {
        PassengerRequest {
            adults: self.adults,
            seniors: self.seniors,
            children: self.children.clone(),
            infants_in_seat: self.infants_seat,
            infants_in_lap: self.infants_lap,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farelink=info,farelink_core=info,farelink_links=info,farelink_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load config")?;
    if let Some(path) = &cli.airports {
        config.airports.timezone_file = Some(path.clone());
    }
    let airports = Arc::new(
        load_airports(&config.airports).context("Failed to load airport timezone table")?,
    );

    let json = std::fs::read_to_string(&cli.itinerary)
        .with_context(|| format!("Failed to read {}", cli.itinerary.display()))?;
    let itinerary: Itinerary = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse itinerary {}", cli.itinerary.display()))?;
    tracing::info!(
        legs = itinerary.legs.len(),
        price = itinerary.price,
        "Loaded itinerary"
    );

    let settings = InMemorySettings::new();
    let notifier = CollectingNotifier::new();
    let mut registry = LinkRegistry::new();

    AmericanLink::new(airports)
        .with_rules(config.passengers.clone())
        .with_default_edition(config.links.default_edition.clone())
        .register(&mut registry, &settings);

    if let Some(edition) = &cli.edition {
        settings.set(SETTING_KEY, edition.as_str());
    }

    let validator = StandardPassengerValidator::new(cli.passengers());
    let ctx = LinkContext {
        itinerary: &itinerary,
        passengers: &validator,
        settings: &settings,
        notifier: &notifier,
    };

    let links = registry.produce_all(&ctx);
    println!("{}", serde_json::to_string_pretty(&links)?);

    let messages = notifier.messages();
    for message in &messages {
        eprintln!("{}", message);
    }
    if !messages.is_empty() {
        anyhow::bail!("{} link(s) could not be built", messages.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_passenger_flags() {
        let cli = Cli::try_parse_from([
            "farelink",
            "--itinerary",
            "trip.json",
            "--adults",
            "2",
            "--child",
            "7",
            "--child",
            "13",
            "--infants-lap",
            "1",
        ])
        .unwrap();

        let request = cli.passengers();
        assert_eq!(request.adults, 2);
        assert_eq!(request.children, vec![7, 13]);
        assert_eq!(request.infants_in_lap, 1);
        assert_eq!(request.infants_in_seat, 0);
        assert_eq!(cli.itinerary, PathBuf::from("trip.json"));
    }

    #[test]
    fn test_itinerary_is_required() {
        assert!(Cli::try_parse_from(["farelink", "--adults", "1"]).is_err());
    }
}
