use std::{env, error::Error, fmt, path::PathBuf};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BUCKET: &str = "bank-term-deposit-1";
const DEFAULT_KEY: &str = "models/best_model.bin";
const DEFAULT_CACHE_PATH: &str = "cached_model.bin";

/// Process configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct ServingConfig {
    pub host: String,
    pub port: u16,
    pub store_endpoint: String,
    pub bucket: String,
    pub key: String,
    pub cache_path: PathBuf,
}

impl ServingConfig {
    /// Reads the configuration from environment variables.
    ///
    /// `STORE_ENDPOINT` is required; everything else has a default
    /// mirroring the original deployment.
    ///
    /// # Returns
    /// The parsed configuration, or the first invalid variable.
    pub fn from_env() -> Result<Self, ConfigErr> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigErr::Invalid {
                var: "PORT",
                got: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let store_endpoint =
            env::var("STORE_ENDPOINT").map_err(|_| ConfigErr::Missing("STORE_ENDPOINT"))?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            store_endpoint,
            bucket: env::var("STORE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            key: env::var("MODEL_KEY").unwrap_or_else(|_| DEFAULT_KEY.to_string()),
            cache_path: env::var("MODEL_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_PATH)),
        })
    }
}

/// Invalid startup environment, caught before binding anything.
#[derive(Debug)]
pub enum ConfigErr {
    Missing(&'static str),
    Invalid { var: &'static str, got: String },
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::Missing(var) => write!(f, "missing required env var {var}"),
            ConfigErr::Invalid { var, got } => write!(f, "invalid value for {var}: '{got}'"),
        }
    }
}

impl Error for ConfigErr {}
