//! Core domain for the loofind toilet search assistant.
//!
//! Holds the data model, the prompt builder, the search state machine and the
//! application configuration. Transport lives in `loofind-gemini`; rendering
//! and platform location lookups live in the CLI.

pub mod app_config;
pub mod config;
pub mod error;
pub mod gateway;
pub mod locale;
pub mod location;
pub mod orchestrator;
pub mod query;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, LocationError, SearchError};
pub use gateway::SearchGateway;
pub use locale::Locale;
pub use location::{acquire_once, FixedLocation, LocationProvider};
pub use orchestrator::{PendingSearch, Rejection, SearchOrchestrator};
pub use query::{build_prompt, Prompt};
pub use types::{
    Coordinates, PlaceReference, SearchIntent, SearchOutcome, SearchRequest, SearchResult,
};
