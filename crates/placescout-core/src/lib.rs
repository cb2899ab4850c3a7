//! Shared domain types, geometry, and configuration for placescout.

pub mod app_config;
pub mod config;
pub mod failure;
pub mod geo;
pub mod place;
pub mod profiles;
pub mod request;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use failure::{group_failures, Failure, FailureGroup, FailureStage};
pub use geo::{haversine_miles, miles_to_meters, EARTH_RADIUS_MILES, METERS_PER_MILE};
pub use place::{Coordinate, EmailOrigin, EmailSource, PageKind, Place};
pub use profiles::{load_profiles, ProfilesFile, SearchProfile};
pub use request::{parse_place_types, validate_search_inputs, RequestError, SearchRequest};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profiles file {path}: {source}")]
    ProfilesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profiles file: {0}")]
    ProfilesFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
