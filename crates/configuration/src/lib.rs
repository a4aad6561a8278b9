use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod holidays;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use holidays::{Holiday, HolidayCalendar};
pub use logging::init_tracing;
pub use settings::{Config, DataPaths, GeoSampling, LogFormat, Logging, Server};

/// Prefix for environment overrides, e.g. `SHOPLENS__SERVER__ADDR=127.0.0.1:8080`.
const ENV_PREFIX: &str = "SHOPLENS";

/// Loads the application configuration.
///
/// With `Some(path)` the file must exist. With `None` an optional `shoplens.toml` in the
/// working directory is used. Environment variables are layered on top in both cases,
/// then the result is deserialized into our strongly-typed `Config` and validated.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with_env(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn load_config_with_env(path: Option<&Path>, env: config::Environment) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("shoplens").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
