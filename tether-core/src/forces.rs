//! Force generators.
//!
//! A [`ForceGenerator`] is a stateless-per-tick policy that accumulates a
//! force (and possibly a torque) onto one body. Generators live in the
//! world's arena and are paired with bodies through the
//! [`ForceRegistry`](crate::registry::ForceRegistry); the same generator may
//! drive any number of bodies.
//!
//! Every variant is a no-op for immovable bodies, and any computed force
//! containing NaN (a zero-length direction vector is the usual source) is
//! discarded without touching the body.

use nalgebra::{Point3, Vector3};

use crate::body::RigidBody;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Body-space offset at which the wind's torque-producing share attacks,
/// below the body center.
const WIND_ATTACK_OFFSET: f64 = -0.5;

/// A force policy applied to bodies through the force registry.
///
/// Closed set of variants dispatched by match; each variant carries only its
/// own parameters and no mutable state besides the wind toggle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ForceGenerator {
    /// Constant gravitational acceleration: `f = g * m`.
    Gravity {
        /// Gravitational acceleration vector (m/s²).
        acceleration: Vector3<f64>,
    },

    /// Velocity-dependent drag: `f = -v̂ * (k1·|v| + k2·|v|²) * m`.
    Drag {
        /// Linear drag coefficient.
        k1: f64,
        /// Quadratic drag coefficient.
        k2: f64,
    },

    /// Hookean spring anchored at a fixed world-space point; pushes and
    /// pulls toward its rest length.
    AnchoredSpring {
        /// Fixed anchor point in world space.
        anchor: Point3<f64>,
        /// Spring constant (N/m).
        spring_constant: f64,
        /// Length at which the spring applies no force.
        rest_length: f64,
    },

    /// Elastic cord anchored at a fixed world-space point; identical to the
    /// spring but slack (zero force) at or below its rest length.
    AnchoredBungee {
        /// Fixed anchor point in world space.
        anchor: Point3<f64>,
        /// Spring constant (N/m).
        spring_constant: f64,
        /// Length below which the cord goes slack.
        rest_length: f64,
    },

    /// Height-based buoyancy approximation against a horizontal water plane.
    Buoyancy {
        /// Submersion depth at which the force saturates.
        max_submersion_depth: f64,
        /// Displaced volume of the body (m³).
        volume: f64,
        /// Y height of the water surface.
        water_height: f64,
        /// Density of the liquid (kg/m³); water is 1000.
        liquid_density: f64,
    },

    /// Constant wind, toggleable at runtime. Applies a uniform push plus the
    /// same vector at an offset below the body center for a non-uniform
    /// torque.
    Wind {
        /// Wind force vector.
        force: Vector3<f64>,
        /// Whether the wind currently blows. Starts disabled.
        enabled: bool,
    },
}

impl ForceGenerator {
    /// Gravity with the given acceleration vector.
    #[must_use]
    pub fn gravity(acceleration: Vector3<f64>) -> Self {
        Self::Gravity { acceleration }
    }

    /// Drag with linear and quadratic coefficients.
    #[must_use]
    pub fn drag(k1: f64, k2: f64) -> Self {
        Self::Drag { k1, k2 }
    }

    /// Anchored Hookean spring.
    #[must_use]
    pub fn anchored_spring(anchor: Point3<f64>, spring_constant: f64, rest_length: f64) -> Self {
        Self::AnchoredSpring {
            anchor,
            spring_constant,
            rest_length,
        }
    }

    /// Anchored bungee cord.
    #[must_use]
    pub fn anchored_bungee(anchor: Point3<f64>, spring_constant: f64, rest_length: f64) -> Self {
        Self::AnchoredBungee {
            anchor,
            spring_constant,
            rest_length,
        }
    }

    /// Buoyancy in a liquid of the given density.
    #[must_use]
    pub fn buoyancy(
        max_submersion_depth: f64,
        volume: f64,
        water_height: f64,
        liquid_density: f64,
    ) -> Self {
        Self::Buoyancy {
            max_submersion_depth,
            volume,
            water_height,
            liquid_density,
        }
    }

    /// Buoyancy in water (1000 kg/m³).
    #[must_use]
    pub fn buoyancy_in_water(max_submersion_depth: f64, volume: f64, water_height: f64) -> Self {
        Self::buoyancy(max_submersion_depth, volume, water_height, 1000.0)
    }

    /// Wind with the given force vector, initially disabled.
    #[must_use]
    pub fn wind(force: Vector3<f64>) -> Self {
        Self::Wind {
            force,
            enabled: false,
        }
    }

    /// Toggle a gated generator. Returns `false` for variants without a
    /// toggle (currently everything but wind).
    pub fn set_enabled(&mut self, value: bool) -> bool {
        match self {
            Self::Wind { enabled, .. } => {
                *enabled = value;
                true
            }
            _ => false,
        }
    }

    /// Whether a gated generator currently applies its force. Ungated
    /// variants are always active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Wind { enabled, .. } => *enabled,
            _ => true,
        }
    }

    /// Compute and accumulate this generator's force onto `body`.
    ///
    /// The delta time is part of the generator contract but unused by the
    /// current variants; all of them are purely state-dependent.
    pub fn update_force(&self, body: &mut RigidBody, _dt: f64) {
        if body.has_infinite_mass() {
            return;
        }

        match *self {
            Self::Gravity { acceleration } => {
                body.add_force(acceleration * body.mass());
            }

            Self::Drag { k1, k2 } => {
                let velocity = body.velocity();
                let speed = velocity.norm();
                if speed == 0.0 {
                    // normalizing a zero vector would be NaN
                    return;
                }

                let drag = k1 * speed + k2 * speed * speed;
                let force = velocity.normalize() * -drag;
                if force.iter().any(|c| c.is_nan()) {
                    return;
                }

                body.add_force(force * body.mass());
            }

            Self::AnchoredSpring {
                anchor,
                spring_constant,
                rest_length,
            } => {
                if let Some(force) = spring_force(body, anchor, spring_constant, rest_length) {
                    body.add_force(force * body.mass());
                }
            }

            Self::AnchoredBungee {
                anchor,
                spring_constant,
                rest_length,
            } => {
                // rubber band: slack at or below rest length
                let length = (body.position() - anchor).norm();
                if length <= rest_length {
                    return;
                }

                if let Some(force) = spring_force(body, anchor, spring_constant, rest_length) {
                    body.add_force(force * body.mass());
                }
            }

            Self::Buoyancy {
                max_submersion_depth,
                volume,
                water_height,
                liquid_density,
            } => {
                let depth = body.position().y;

                // fully above the surface band
                if depth >= water_height + max_submersion_depth {
                    return;
                }

                let mut force = Vector3::zeros();
                if depth <= water_height - max_submersion_depth {
                    // completely under water, max force
                    force.y = liquid_density * volume;
                } else {
                    force.y = liquid_density * volume * (water_height + max_submersion_depth - depth)
                        / (2.0 * max_submersion_depth);
                }

                body.add_force(force * body.mass());
            }

            Self::Wind { force, enabled } => {
                if !enabled {
                    return;
                }

                body.add_force(force * body.mass());
                body.add_force_at_body_point(force, Point3::new(0.0, WIND_ATTACK_OFFSET, 0.0));
            }
        }
    }
}

/// Restoring force of an anchored spring, or `None` when the direction
/// degenerates (body sitting exactly on the anchor).
fn spring_force(
    body: &RigidBody,
    anchor: Point3<f64>,
    spring_constant: f64,
    rest_length: f64,
) -> Option<Vector3<f64>> {
    let spring = body.position() - anchor;
    let length = spring.norm();

    let magnitude = (rest_length - length) * spring_constant;
    let force = spring.normalize() * magnitude;
    if force.iter().any(|c| c.is_nan()) {
        return None;
    }

    Some(force)
}
