use std::{
    env,
    net::{AddrParseError, SocketAddr},
};

use api::EngineLimits;
use pricing::volume::{MAX_MARGIN_SHARE_PERCENT, MIN_MARGIN_SHARE_PERCENT};
use thiserror::Error;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_QUANTITY: u32 = api::state::DEFAULT_MAX_QUANTITY;
const DEFAULT_VOLUME_MARGIN_PCT: f64 = api::state::DEFAULT_VOLUME_MARGIN_PERCENT;
const MAX_QUANTITY_CEILING: u32 = 50;

const ENV_ADDR_KEY: &str = "COSTEO_SERVER_ADDR";
const ENV_MAX_QUANTITY_KEY: &str = "COSTEO_MAX_QUANTITY";
const ENV_VOLUME_MARGIN_KEY: &str = "COSTEO_VOLUME_MARGIN_PCT";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub max_quantity: u32,
    pub volume_margin_pct: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("COSTEO_SERVER_ADDR is not a valid socket address: {0}")]
    InvalidListenAddr(#[source] AddrParseError),
    #[error("COSTEO_MAX_QUANTITY must be a whole number between 1 and 50")]
    InvalidMaxQuantity,
    #[error("COSTEO_VOLUME_MARGIN_PCT must be a finite percentage between 10 and 100")]
    InvalidVolumeMarginPct,
    #[error("COSTEO_SERVER_ADDR contains non-unicode data")]
    NonUnicodeListenAddr,
    #[error("COSTEO_MAX_QUANTITY contains non-unicode data")]
    NonUnicodeMaxQuantity,
    #[error("COSTEO_VOLUME_MARGIN_PCT contains non-unicode data")]
    NonUnicodeVolumeMarginPct,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match read_env(ENV_ADDR_KEY, ConfigError::NonUnicodeListenAddr)? {
            Some(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            None => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(ConfigError::InvalidListenAddr)?,
        };

        let max_quantity =
            match read_env(ENV_MAX_QUANTITY_KEY, ConfigError::NonUnicodeMaxQuantity)? {
                Some(value) => value
                    .parse::<u32>()
                    .ok()
                    .filter(|quantity| (1..=MAX_QUANTITY_CEILING).contains(quantity))
                    .ok_or(ConfigError::InvalidMaxQuantity)?,
                None => DEFAULT_MAX_QUANTITY,
            };

        let volume_margin_pct =
            match read_env(ENV_VOLUME_MARGIN_KEY, ConfigError::NonUnicodeVolumeMarginPct)? {
                Some(value) => value
                    .parse::<f64>()
                    .ok()
                    .filter(|pct| {
                        pct.is_finite()
                            && (MIN_MARGIN_SHARE_PERCENT..=MAX_MARGIN_SHARE_PERCENT).contains(pct)
                    })
                    .ok_or(ConfigError::InvalidVolumeMarginPct)?,
                None => DEFAULT_VOLUME_MARGIN_PCT,
            };

        Ok(Self {
            listen_addr,
            max_quantity,
            volume_margin_pct,
        })
    }

    pub fn engine_limits(&self) -> EngineLimits {
        EngineLimits {
            max_quantity: self.max_quantity,
            default_margin_percent: self.volume_margin_pct,
        }
    }
}

fn read_env(key: &str, non_unicode_error: ConfigError) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(non_unicode_error),
    }
}
