use serde::Deserialize;

/// Tunables of the relay stage.
///
/// Every key is optional when loading from TOML:
///
/// ```toml
/// max_relay_depth = 16
/// hop_limit = 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Maximum number of relay-message options unwrapped while looking for
    /// the leaf message.
    pub max_relay_depth: usize,
    /// Hop limit written into the IPv6 header of relay-forward frames.
    pub hop_limit: u8,
}

impl RelayConfig {
    /// Smallest accepted `max_relay_depth`. RFC 8415 lets a message cross
    /// eight relays, each adding one level.
    pub const MIN_RELAY_DEPTH: usize = 8;

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: RelayConfig =
            toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values against their accepted ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_relay_depth < Self::MIN_RELAY_DEPTH {
            return Err(ConfigError::Validation(format!(
                "max_relay_depth must be at least {}, got {}",
                Self::MIN_RELAY_DEPTH,
                self.max_relay_depth
            )));
        }
        if self.hop_limit == 0 {
            return Err(ConfigError::Validation(
                "hop_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_relay_depth: 16,
            hop_limit: 64,
        }
    }
}

/// Errors from loading a [`RelayConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid TOML or has unexpected keys.
    #[error("failed to parse relay config: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("relay config validation error: {0}")]
    Validation(String),
}
