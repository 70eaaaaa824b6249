//! Iterative, greedy contact scheduling.
//!
//! The resolver repeatedly picks the most urgent contact in the batch (the
//! one with the most negative separating velocity) and resolves it, then
//! patches the cached penetration of every contact that shares a moved body.
//! Running out of eligible contacts is the normal termination; the iteration
//! budget only bounds the worst case of cascading corrections.
//!
//! Only the penetration caches are propagated after a resolution, not the
//! velocity-dependent quantities. That approximation is deliberate and
//! load-bearing for the simulation's behavior; separating velocities are
//! recomputed from body state at every scan anyway.

use crate::body::RigidBody;
use crate::contact::BodyContact;

/// Iterative scheduler over a per-tick contact batch.
#[derive(Debug, Clone, Default)]
pub struct ContactResolver {
    iterations: u32,
    used_iterations: u32,
}

impl ContactResolver {
    /// Create a resolver with the given iteration budget.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations,
            used_iterations: 0,
        }
    }

    /// Set the iteration budget for the next resolution.
    pub fn set_iterations(&mut self, iterations: u32) {
        self.iterations = iterations;
    }

    /// The configured iteration budget.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Iterations consumed by the most recent resolution.
    #[must_use]
    pub fn used_iterations(&self) -> u32 {
        self.used_iterations
    }

    /// Resolve a batch of contacts against the body arena.
    ///
    /// Returns the number of iterations used. Callers with an auto budget
    /// should set the budget to twice the batch size beforehand; cascading
    /// corrections need roughly two passes per constraint.
    pub fn resolve_contacts(
        &mut self,
        bodies: &mut [RigidBody],
        contacts: &mut [BodyContact],
        dt: f64,
    ) -> u32 {
        self.used_iterations = 0;

        while self.used_iterations < self.iterations {
            // find the contact with the largest closing velocity; ties go to
            // the lowest index
            let mut max_value = f64::MAX;
            let mut max_index = contacts.len();

            for (i, contact) in contacts.iter().enumerate() {
                let separating_velocity = contact.separating_velocity(bodies);
                if separating_velocity < max_value
                    && (separating_velocity < 0.0 || contact.penetration() > 0.0)
                {
                    max_value = separating_velocity;
                    max_index = i;
                }
            }

            // nothing left to resolve: the expected termination
            let Some(resolved) = contacts.get_mut(max_index) else {
                break;
            };

            resolved.resolve(bodies, dt);

            let movements = resolved.body_movements();
            let resolved_first = resolved.first();
            let resolved_second = resolved.second();

            // Patch the cached penetration of every contact touching a body
            // that just moved; the resolved contact patches itself the same
            // way. The sign flips with the slot: movement along the normal
            // shrinks penetration for slot one and grows it for slot two.
            for contact in contacts.iter_mut() {
                let normal = contact.normal();

                if contact.first() == resolved_first {
                    contact.set_penetration(contact.penetration() - movements[0].dot(&normal));
                } else if Some(contact.first()) == resolved_second {
                    contact.set_penetration(contact.penetration() - movements[1].dot(&normal));
                }

                if let Some(second) = contact.second() {
                    if second == resolved_first {
                        contact.set_penetration(contact.penetration() + movements[0].dot(&normal));
                    } else if Some(second) == resolved_second {
                        contact.set_penetration(contact.penetration() + movements[1].dot(&normal));
                    }
                }
            }

            self.used_iterations += 1;
        }

        self.used_iterations
    }
}
