//! Start-up configuration, read once from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ORDER_BOT_ADDR` | `0.0.0.0:8000` | Address the webhook listens on |
//! | `ORDER_BOT_SESSION_TTL_SECS` | `1800` | Idle time before an open order is dropped, `0` keeps orders forever |
//! | `ORDER_BOT_SWEEP_INTERVAL_SECS` | `60` | How often idle orders are looked for |
//! | `ORDER_BOT_CHANNEL_CAPACITY` | `32` | Session actor mailbox size |
//! | `ORDER_BOT_MENU` | built-in menu | JSON file of `{"item": price}` |
//!
//! Log filtering uses `RUST_LOG`, see [`setup_tracing`](super::setup_tracing).

use crate::persistence::{Menu, MenuError};
use session_actor::SessionConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_ADDR: &str = "ORDER_BOT_ADDR";
pub const ENV_SESSION_TTL: &str = "ORDER_BOT_SESSION_TTL_SECS";
pub const ENV_SWEEP_INTERVAL: &str = "ORDER_BOT_SWEEP_INTERVAL_SECS";
pub const ENV_CHANNEL_CAPACITY: &str = "ORDER_BOT_CHANNEL_CAPACITY";
pub const ENV_MENU: &str = "ORDER_BOT_MENU";

const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
const DEFAULT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid value: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },

    #[error(transparent)]
    Menu(#[from] MenuError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub session_ttl: Option<Duration>,
    pub sweep_interval: Duration,
    pub channel_capacity: usize,
    pub menu_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            session_ttl: Some(Duration::from_secs(DEFAULT_SESSION_TTL_SECS)),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            menu_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source. Unset and blank variables take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let addr = parse(ENV_ADDR, get(ENV_ADDR).as_deref().unwrap_or(DEFAULT_ADDR))?;

        let ttl_secs: u64 = match get(ENV_SESSION_TTL) {
            Some(value) => parse(ENV_SESSION_TTL, &value)?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        let session_ttl = (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs));

        let sweep_secs: u64 = match get(ENV_SWEEP_INTERVAL) {
            Some(value) => positive(ENV_SWEEP_INTERVAL, parse(ENV_SWEEP_INTERVAL, &value)?)?,
            None => DEFAULT_SWEEP_INTERVAL_SECS,
        };

        let channel_capacity: usize = match get(ENV_CHANNEL_CAPACITY) {
            Some(value) => positive(ENV_CHANNEL_CAPACITY, parse(ENV_CHANNEL_CAPACITY, &value)?)?,
            None => DEFAULT_CHANNEL_CAPACITY,
        };

        Ok(Self {
            addr,
            session_ttl,
            sweep_interval: Duration::from_secs(sweep_secs),
            channel_capacity,
            menu_path: get(ENV_MENU).map(PathBuf::from),
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            buffer_size: self.channel_capacity,
            idle_ttl: self.session_ttl,
            sweep_interval: self.sweep_interval,
        }
    }

    /// The configured menu file, or the built-in menu.
    pub fn load_menu(&self) -> Result<Menu, ConfigError> {
        match &self.menu_path {
            Some(path) => Ok(Menu::from_json_file(path)?),
            None => Ok(Menu::default()),
        }
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

fn positive<T: PartialEq + Default>(var: &'static str, value: T) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(ConfigError::Zero { var });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]).unwrap(), AppConfig::default());
        assert_eq!(config(&[(ENV_ADDR, "  ")]).unwrap().addr.port(), 8000);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            (ENV_ADDR, "127.0.0.1:9000"),
            (ENV_SESSION_TTL, "120"),
            (ENV_SWEEP_INTERVAL, "5"),
            (ENV_CHANNEL_CAPACITY, "8"),
            (ENV_MENU, "/etc/order-bot/menu.json"),
        ])
        .unwrap();

        assert_eq!(cfg.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.session_ttl, Some(Duration::from_secs(120)));
        assert_eq!(cfg.session_config().sweep_interval, Duration::from_secs(5));
        assert_eq!(cfg.session_config().buffer_size, 8);
        assert_eq!(cfg.menu_path, Some(PathBuf::from("/etc/order-bot/menu.json")));
    }

    #[test]
    fn test_zero_ttl_disables_eviction() {
        assert_eq!(config(&[(ENV_SESSION_TTL, "0")]).unwrap().session_ttl, None);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(matches!(
            config(&[(ENV_ADDR, "localhost")]),
            Err(ConfigError::Invalid { var: ENV_ADDR, .. })
        ));
        assert!(matches!(
            config(&[(ENV_SESSION_TTL, "-5")]),
            Err(ConfigError::Invalid { var: ENV_SESSION_TTL, .. })
        ));
        assert!(matches!(
            config(&[(ENV_CHANNEL_CAPACITY, "0")]),
            Err(ConfigError::Zero { var: ENV_CHANNEL_CAPACITY })
        ));
        assert!(matches!(
            config(&[(ENV_SWEEP_INTERVAL, "0")]),
            Err(ConfigError::Zero { var: ENV_SWEEP_INTERVAL })
        ));
    }

    #[test]
    fn test_menu_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"thali": 11.0}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let menu = config(&[(ENV_MENU, path.as_str())]).unwrap().load_menu().unwrap();

        assert_eq!(menu.price_of("thali"), Some(11.0));
        assert_eq!(menu.len(), 1);
    }
}
