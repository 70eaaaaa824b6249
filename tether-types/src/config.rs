//! Configuration for a physics world.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`RigidBodyWorld`](https://docs.rs/tether-core).
///
/// The contact buffer is preallocated to `max_contacts` entries and reused
/// every tick, so the buffer size bounds both per-tick work and the number
/// of simultaneously violated constraints that can be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Capacity of the preallocated contact buffer.
    ///
    /// Contact generators that fire after the buffer fills up are skipped
    /// for the rest of the tick (and a warning is recorded).
    pub max_contacts: usize,

    /// Iteration budget for the contact resolver.
    ///
    /// `0` means auto: the world sets the budget to twice the number of
    /// contacts produced each tick, which gives cascading corrections
    /// roughly two passes per constraint.
    pub resolver_iterations: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_contacts: 64,      // plenty for tens of linked bodies
            resolver_iterations: 0, // auto: 2x contacts per tick
        }
    }
}

impl WorldConfig {
    /// Create a configuration with the given contact buffer capacity.
    #[must_use]
    pub fn with_capacity(max_contacts: usize) -> Self {
        Self {
            max_contacts,
            ..Default::default()
        }
    }

    /// Set the contact buffer capacity.
    #[must_use]
    pub fn with_max_contacts(mut self, max_contacts: usize) -> Self {
        self.max_contacts = max_contacts;
        self
    }

    /// Set a fixed resolver iteration budget (`0` restores auto mode).
    #[must_use]
    pub fn with_resolver_iterations(mut self, iterations: u32) -> Self {
        self.resolver_iterations = iterations;
        self
    }

    /// Whether the resolver budget is derived from the per-tick contact count.
    #[must_use]
    pub fn auto_iterations(&self) -> bool {
        self.resolver_iterations == 0
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_contacts == 0 {
            return Err(crate::PhysicsError::invalid_config(
                "max_contacts must be at least 1",
            ));
        }

        Ok(())
    }
}
