#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse};

/// Admission gate sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    /// Maximum number of in-flight store operations
    pub capacity: usize,
}

impl GateConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Twice the pool size, so a few callers can queue on the pool itself
    /// while the rest wait at the gate.
    pub fn for_pool(max_connections: u32) -> Self {
        Self {
            capacity: (max_connections as usize).saturating_mul(2).max(1),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::for_pool(100)
    }
}

/// Load GateConfig from environment variables
///
/// Environment variables:
/// - `DB_GATE_CAPACITY` (optional, default: 2 x `DB_MAX_CONNECTIONS`)
/// - `DB_MAX_CONNECTIONS` (optional, default: 100)
#[cfg(feature = "config")]
impl FromEnv for GateConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_connections: u32 = env_parse("DB_MAX_CONNECTIONS", "100")?;
        let default_capacity = Self::for_pool(max_connections).capacity.to_string();
        let capacity: usize = env_parse("DB_GATE_CAPACITY", &default_capacity)?;

        if capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DB_GATE_CAPACITY".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self { capacity })
    }
}
