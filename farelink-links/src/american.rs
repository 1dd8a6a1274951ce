use std::sync::Arc;

use farelink_core::{
    AirportTimezones, Edition, PaxRules, SettingDescriptor, SettingsStore, DEFAULT_EDITION,
    EDITIONS,
};

use crate::assembler::UrlAssembler;
use crate::registry::{LinkContext, LinkOutput, LinkProducer, LinkRegistry, AIRLINES};

pub const SETTING_KEY: &str = "aaSabreEdition";
pub const SETTING_LABEL: &str = "American (America & UK)";

const TITLE: &str = "American";
const DESCRIPTION: &str = "America & UK";

/// Deep link into American Airlines' metasearch landing page.
pub struct AmericanLink {
    airports: Arc<AirportTimezones>,
    rules: PaxRules,
    default_edition: String,
}

impl AmericanLink {
    pub fn new(airports: Arc<AirportTimezones>) -> Self {
        Self {
            airports,
            rules: PaxRules::default(),
            default_edition: DEFAULT_EDITION.to_string(),
        }
    }

    pub fn with_rules(mut self, rules: PaxRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_default_edition(mut self, code: impl Into<String>) -> Self {
        self.default_edition = code.into();
        self
    }

    /// Declare the edition setting and add the link under the airline category.
    pub fn register(self, registry: &mut LinkRegistry, settings: &dyn SettingsStore) {
        settings.register_setting(SettingDescriptor {
            label: SETTING_LABEL.to_string(),
            key: SETTING_KEY.to_string(),
            values: EDITIONS.to_vec(),
            default: self.default_edition.clone(),
        });
        registry.register(AIRLINES, Box::new(self));
    }
}

impl LinkProducer for AmericanLink {
    fn produce(&self, ctx: &LinkContext<'_>) -> Option<LinkOutput> {
        let pax = match ctx.passengers.validate(&self.rules) {
            Ok(pax) => pax,
            Err(e) => {
                tracing::warn!("American link skipped: {}", e);
                ctx.notifier
                    .notify("Error: Failed to validate Passengers for American");
                return None;
            }
        };

        let assembler =
            UrlAssembler::new(&self.airports).with_default_edition(self.default_edition.as_str());
        let edition = ctx.settings.get(SETTING_KEY);

        let built = assembler
            .build_url(ctx.itinerary, &pax, edition.as_deref())
            .and_then(|url| {
                assembler
                    .build_alternates(ctx.itinerary, &pax)
                    .map(|alternates| (url, alternates))
            });

        let (url, alternates) = match built {
            Ok(built) => built,
            Err(e) => {
                tracing::warn!("American link skipped: {}", e);
                ctx.notifier
                    .notify(&format!("Error: Failed to build American link: {}", e));
                return None;
            }
        };

        Some(LinkOutput {
            url,
            title: TITLE.to_string(),
            desc: DESCRIPTION.to_string(),
            extra: edition_menu(&alternates),
        })
    }
}

/// Hover menu linking the same search on every regional site.
fn edition_menu(alternates: &[(Edition, String)]) -> String {
    let links = alternates
        .iter()
        .map(|(edition, url)| format!("<a href=\"{}\" target=\"_blank\">{}</a>", url, edition.name))
        .collect::<Vec<String>>()
        .join("<br/>");

    format!(
        " <span class=\"pt-hover-container\">[+]<span class=\"pt-hover-menu\">{}</span></span>",
        links
    )
}
