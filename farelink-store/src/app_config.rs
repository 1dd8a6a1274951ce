use farelink_core::{PaxRules, DEFAULT_EDITION};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub links: LinksConfig,
    pub passengers: PaxRules,
    #[serde(default)]
    pub airports: AirportsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LinksConfig {
    pub default_edition: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AirportsConfig {
    /// Replaces the embedded airport table when set.
    pub timezone_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"), environment())
    }

    /// Layer `dir/default`, `dir/{RUN_MODE}` and `dir/local` (all optional) over
    /// built-in defaults, then apply `overrides` on top.
    pub fn load_from(dir: &Path, overrides: config::Environment) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let rules = PaxRules::default();

        let s = config::Config::builder()
            .set_default("links.default_edition", DEFAULT_EDITION)?
            .set_default("passengers.max_paxcount", i64::from(rules.max_paxcount))?
            .set_default("passengers.count_inf", rules.count_inf)?
            .set_default("passengers.child_as_adult", i64::from(rules.child_as_adult))?
            .set_default("passengers.sep_inf_seat", rules.sep_inf_seat)?
            .set_default("passengers.child_min_age", i64::from(rules.child_min_age))?
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            .add_source(overrides)
            .build()?;

        let config: Config = s.try_deserialize()?;
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }
}

/// Settings from the environment, e.g. `FARELINK__LINKS__DEFAULT_EDITION=GB`.
pub fn environment() -> config::Environment {
    config::Environment::with_prefix("FARELINK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> config::Environment {
        environment().source(Some(config::Map::new()))
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path(), no_env()).expect("Failed to load config");

        assert_eq!(config.links.default_edition, "US");
        assert_eq!(config.passengers, PaxRules::default());
        assert!(config.airports.timezone_file.is_none());
    }

    #[test]
    fn test_default_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[links]\ndefault_edition = \"CA\"\n\n[passengers]\nmax_paxcount = 9\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path(), no_env()).unwrap();
        assert_eq!(config.links.default_edition, "CA");
        assert_eq!(config.passengers.max_paxcount, 9);
        assert_eq!(config.passengers.child_as_adult, 12);
    }

    #[test]
    fn test_environment_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let mut vars = config::Map::new();
        vars.insert("FARELINK__LINKS__DEFAULT_EDITION".to_string(), "GB".to_string());
        vars.insert("FARELINK__PASSENGERS__COUNT_INF".to_string(), "false".to_string());
        vars.insert(
            "FARELINK__AIRPORTS__TIMEZONE_FILE".to_string(),
            "/srv/airports.json".to_string(),
        );

        let config = Config::load_from(dir.path(), environment().source(Some(vars))).unwrap();
        assert_eq!(config.links.default_edition, "GB");
        assert!(!config.passengers.count_inf);
        assert_eq!(
            config.airports.timezone_file,
            Some(PathBuf::from("/srv/airports.json"))
        );
    }
}
