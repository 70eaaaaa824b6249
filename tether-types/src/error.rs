//! Error types for physics operations.

use thiserror::Error;

/// Errors that can occur while configuring or mutating a physics world.
///
/// Everything in the tick pipeline itself is recoverable and degrades to a
/// logged no-op; these errors only surface from setup-time APIs (adding
/// links, validating configuration).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// A body index that does not name a body in the world's arena.
    #[error("invalid body index: {0}")]
    InvalidBodyIndex(usize),

    /// A generator index that does not name a registered force generator.
    #[error("invalid generator index: {0}")]
    InvalidGeneratorIndex(usize),

    /// Invalid timestep.
    #[error("invalid timestep: {0} (must be positive and finite)")]
    InvalidTimestep(f64),

    /// Invalid world configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// Invalid mass properties.
    #[error("invalid mass properties: {reason}")]
    InvalidMassProperties {
        /// Description of what's wrong.
        reason: String,
    },
}

impl PhysicsError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid mass properties error.
    #[must_use]
    pub fn invalid_mass(reason: impl Into<String>) -> Self {
        Self::InvalidMassProperties {
            reason: reason.into(),
        }
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }

    /// Check if this is a dangling-reference error (an index naming nothing).
    #[must_use]
    pub fn is_dangling_reference(&self) -> bool {
        matches!(
            self,
            Self::InvalidBodyIndex(_) | Self::InvalidGeneratorIndex(_)
        )
    }
}
