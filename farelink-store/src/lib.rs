pub mod app_config;
pub mod airport_repo;
pub mod settings;

pub use app_config::Config;
pub use airport_repo::{load_airports, load_openflights, EMBEDDED_TIMEZONES};
pub use settings::InMemorySettings;

use farelink_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
