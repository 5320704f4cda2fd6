//! Client configuration, loaded from TOML.
//!
//! ```toml
//! [board]
//! origin_x = 0.0
//! origin_y = 0.0
//! cell_size = 100.0
//!
//! [authority]
//! endpoint = "http://localhost:50061"
//! timeout_ms = 5000
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::board::BoardGeometry;
use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:50061";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub authority: AuthorityConfig,
}

/// Where the board is drawn. Pixel values are CSS pixels relative to the page.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BoardConfig {
    #[serde(default)]
    pub origin_x: f64,
    #[serde(default)]
    pub origin_y: f64,
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
}

fn default_cell_size() -> f64 {
    100.0
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            cell_size: default_cell_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthorityConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout applied by the transport.
    pub timeout_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: None,
            connect_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.board.origin_x, self.board.origin_y, self.board.cell_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.board.cell_size.is_finite() && self.board.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "board.cell_size must be a positive number, got {}",
                self.board.cell_size
            )));
        }
        if !self.board.origin_x.is_finite() || !self.board.origin_y.is_finite() {
            return Err(ConfigError::Invalid("board origin must be finite".into()));
        }
        if self.authority.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("authority.endpoint is empty".into()));
        }
        Ok(())
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ClientConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Try well-known paths, falling back to built-in defaults.
pub fn load_default_config() -> ClientConfig {
    let candidates = [
        "chess_client.toml",
        "../chess_client.toml",
        "/etc/chess-client/chess_client.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_config(p) {
                Ok(config) => {
                    tracing::info!(path = %p.display(), "loaded client config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load client config");
                }
            }
        }
    }
    tracing::info!("no chess_client.toml found, using built-in defaults");
    ClientConfig::default()
}
