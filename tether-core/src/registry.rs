//! Many-to-many pairing of bodies and force generators.
//!
//! The registry stores unique `(body, generator)` pairs and drives the
//! per-tick force accumulation. Entries keep their insertion order for
//! stable iteration, but generators must not depend on accumulation order:
//! they only add to an already-zeroed accumulator.

use hashbrown::HashSet;
use tether_types::{BodyId, GeneratorId};

use crate::body::RigidBody;
use crate::forces::ForceGenerator;
use crate::warning::{Warning, WarningLog};

/// One pairing of a body with a force generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceEntry {
    /// The body receiving the force.
    pub body: BodyId,
    /// The generator computing it.
    pub generator: GeneratorId,
}

/// Set of `(body, generator)` pairs with stable iteration order.
///
/// Duplicate insertions are idempotent: the registry is a set, not a
/// multiset. Neither side is owned; both are indices into arenas owned by
/// the world.
#[derive(Debug, Clone, Default)]
pub struct ForceRegistry {
    entries: Vec<ForceEntry>,
    index: HashSet<(BodyId, GeneratorId)>,
}

impl ForceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair a body with a generator. Returns `false` if the pair was
    /// already registered.
    pub fn add_entry(&mut self, body: BodyId, generator: GeneratorId) -> bool {
        if !self.index.insert((body, generator)) {
            return false;
        }

        self.entries.push(ForceEntry { body, generator });
        true
    }

    /// Remove a pairing. Returns `false` if it was not registered.
    pub fn remove_entry(&mut self, body: BodyId, generator: GeneratorId) -> bool {
        if !self.index.remove(&(body, generator)) {
            return false;
        }

        self.entries
            .retain(|entry| !(entry.body == body && entry.generator == generator));
        true
    }

    /// Remove every pairing.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Whether a pairing is registered.
    #[must_use]
    pub fn contains(&self, body: BodyId, generator: GeneratorId) -> bool {
        self.index.contains(&(body, generator))
    }

    /// Number of registered pairings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registered pairings in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ForceEntry] {
        &self.entries
    }

    /// Run every generator against its paired body.
    ///
    /// Entries whose body or generator index has gone dangling are skipped
    /// and recorded as [`Warning::MissingBody`].
    pub fn update_forces(
        &self,
        bodies: &mut [RigidBody],
        generators: &[ForceGenerator],
        dt: f64,
        warnings: &mut WarningLog,
    ) {
        for entry in &self.entries {
            let Some(generator) = generators.get(entry.generator.index()) else {
                warnings.record(Warning::MissingBody, entry.generator.index() as i64);
                continue;
            };

            let Some(body) = bodies.get_mut(entry.body.index()) else {
                warnings.record(Warning::MissingBody, entry.body.index() as i64);
                continue;
            };

            generator.update_force(body, dt);
        }
    }
}
