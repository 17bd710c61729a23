// Compiler configuration

use crate::error::ConfigError;
use std::env;

/// Environment variable holding the compiled-schema cache capacity.
pub const CACHE_CAPACITY_VAR: &str = "CONFORM_CACHE_CAPACITY";

/// Settings for [`SchemaCompiler`](crate::SchemaCompiler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Compiled schemas kept in memory; 0 disables caching
    pub cache_capacity: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 128,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Load from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(CACHE_CAPACITY_VAR) {
            config.cache_capacity =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        key: CACHE_CAPACITY_VAR.to_string(),
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }

        Ok(config)
    }
}
