use crate::error::ConfigError;
use crate::holidays::{Holiday, HolidayCalendar};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty (or absent) config file yields a
/// working setup pointed at the `data/` directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataPaths,
    pub server: Server,
    pub geo: GeoSampling,
    pub logging: Logging,
    /// Overrides the built-in holiday calendar when present.
    pub holidays: Option<Vec<Holiday>>,
}

/// Locations of the four CSV exports.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub orders: PathBuf,
    pub payments: PathBuf,
    pub customers: PathBuf,
    pub geolocation: PathBuf,
}

/// Contains parameters for the JSON API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub addr: SocketAddr,
}

/// Controls the geospatial scatter sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeoSampling {
    /// Number of points drawn. Capped at the number of available points.
    pub sample_size: usize,
    /// Seed for the sampler, so the same points come back on every request.
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// An `EnvFilter` directive, e.g. `info` or `datasource=debug,info`. `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            orders: PathBuf::from("data/orders_dataset.csv"),
            payments: PathBuf::from("data/order_payments_dataset.csv"),
            customers: PathBuf::from("data/customers_dataset.csv"),
            geolocation: PathBuf::from("data/geolocation_dataset.csv"),
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}

impl Default for GeoSampling {
    fn default() -> Self {
        Self {
            sample_size: 10_000,
            seed: 42,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            directory: None,
            file_prefix: "shoplens.log".to_string(),
        }
    }
}

impl Config {
    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geo.sample_size == 0 {
            return Err(ConfigError::ValidationError(
                "geo.sample_size must be greater than zero".to_string(),
            ));
        }
        if self.logging.file_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.file_prefix must not be empty".to_string(),
            ));
        }
        self.holiday_calendar().map(|_| ())
    }

    /// The configured holiday table, or the built-in one when none is configured.
    pub fn holiday_calendar(&self) -> Result<HolidayCalendar, ConfigError> {
        match &self.holidays {
            Some(entries) => HolidayCalendar::from_entries(entries.clone()),
            None => HolidayCalendar::builtin(),
        }
    }
}
