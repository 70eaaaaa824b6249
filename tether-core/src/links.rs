//! Structural links between bodies: cables and rods.
//!
//! A link is a declared relationship between two bodies, not a discovered
//! one: there is no geometric collision detection here. Each tick the world
//! asks every link whether its length constraint is currently violated; a
//! violated link fills one slot of the contact pool.

use tether_types::BodyId;

use crate::body::RigidBody;
use crate::contact::BodyContact;

/// Minimum direction length before a link's normal is considered degenerate.
const MIN_NORMAL_LENGTH: f64 = 1e-12;

/// Type-specific parameters of a link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkKind {
    /// Inextensible rope: unconstrained below `max_length`, bounces with the
    /// configured restitution once taut.
    Cable {
        /// Length at which the cable goes taut.
        max_length: f64,
        /// Bounciness when the cable snaps taut, in [0, 1].
        restitution: f64,
    },
    /// Rigid connection held at exactly `length`; never bounces.
    Rod {
        /// The fixed rod length.
        length: f64,
    },
}

/// A cable or rod linking two bodies, acting as a contact generator.
///
/// Parameters are immutable after construction; the bodies are set once at
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLink {
    first: BodyId,
    second: BodyId,
    kind: LinkKind,
}

impl BodyLink {
    /// Create a cable between two bodies.
    #[must_use]
    pub fn cable(first: BodyId, second: BodyId, max_length: f64, restitution: f64) -> Self {
        Self {
            first,
            second,
            kind: LinkKind::Cable {
                max_length,
                restitution,
            },
        }
    }

    /// Create a rod between two bodies.
    #[must_use]
    pub fn rod(first: BodyId, second: BodyId, length: f64) -> Self {
        Self {
            first,
            second,
            kind: LinkKind::Rod { length },
        }
    }

    /// The linked bodies.
    #[must_use]
    pub fn bodies(&self) -> (BodyId, BodyId) {
        (self.first, self.second)
    }

    /// The link's type-specific parameters.
    #[must_use]
    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// Current distance between the linked bodies, or `None` when either id
    /// is dangling.
    #[must_use]
    pub fn current_length(&self, bodies: &[RigidBody]) -> Option<f64> {
        let first = bodies.get(self.first.index())?;
        let second = bodies.get(self.second.index())?;
        Some((first.position() - second.position()).norm())
    }

    /// Fill `contact` if this link's constraint is violated.
    ///
    /// Returns whether the slot was used. A dangling body id or a degenerate
    /// direction (both bodies at the same point) produces no contact.
    pub fn fill_contact(&self, bodies: &[RigidBody], contact: &mut BodyContact) -> bool {
        let (Some(first), Some(second)) = (
            bodies.get(self.first.index()),
            bodies.get(self.second.index()),
        ) else {
            tracing::warn!(
                first = self.first.index(),
                second = self.second.index(),
                "link references a missing body"
            );
            return false;
        };

        let delta = second.position() - first.position();
        let length = delta.norm();

        match self.kind {
            LinkKind::Cable {
                max_length,
                restitution,
            } => {
                // slack cable, nothing to do
                if length < max_length {
                    return false;
                }

                let Some(normal) = delta.try_normalize(MIN_NORMAL_LENGTH) else {
                    return false;
                };

                contact.reset();
                contact.set_bodies(self.first, Some(self.second));
                contact.set_normal(normal);
                // amount to bounce back
                contact.set_penetration(length - max_length);
                contact.set_restitution(restitution);
                true
            }

            LinkKind::Rod { length: rod_length } => {
                if length == rod_length {
                    return false;
                }

                let Some(normal) = delta.try_normalize(MIN_NORMAL_LENGTH) else {
                    return false;
                };

                contact.reset();
                contact.set_bodies(self.first, Some(self.second));

                // stretched: pull together along first->second; compressed:
                // push apart the other way
                if length > rod_length {
                    contact.set_normal(normal);
                    contact.set_penetration(length - rod_length);
                } else {
                    contact.set_normal(-normal);
                    contact.set_penetration(rod_length - length);
                }

                // a rod never bounces
                contact.set_restitution(0.0);
                true
            }
        }
    }
}
