//! A resolvable constraint violation between bodies.
//!
//! A [`BodyContact`] couples one or two bodies through a contact normal: the
//! velocity response applies an impulse along the normal, split by inverse
//! mass, and the positional response moves the bodies apart by the stored
//! penetration depth. Contacts are value objects living in the world's
//! preallocated pool; generators overwrite them each tick and the resolver
//! consumes them within the same tick.

use nalgebra::{Point3, Vector3};
use tether_types::BodyId;

use crate::body::RigidBody;

/// A contact between a body and either a second body or the fixed world.
///
/// The second slot being `None` means "fixed to world": the missing side
/// contributes zero velocity and zero inverse mass to the resolution.
#[derive(Debug, Clone)]
pub struct BodyContact {
    first: BodyId,
    second: Option<BodyId>,

    /// Unit contact direction in world space.
    normal: Vector3<f64>,
    /// Point of contact in world space. Informational only; resolution works
    /// purely along the normal.
    point: Point3<f64>,
    /// Overlap along the normal; positive means the constraint is violated.
    penetration: f64,
    /// Bounciness in [0, 1].
    restitution: f64,

    /// Positional corrections applied by the last resolution, per slot.
    /// Consumed by the resolver to patch penetration estimates of other
    /// contacts sharing a body.
    movement: [Vector3<f64>; 2],
}

impl Default for BodyContact {
    fn default() -> Self {
        Self {
            // points past any real arena so a stale slot trips the
            // missing-body guard instead of touching body 0
            first: BodyId::new(usize::MAX),
            second: None,
            normal: Vector3::zeros(),
            point: Point3::origin(),
            penetration: 0.0,
            restitution: 0.0,
            movement: [Vector3::zeros(); 2],
        }
    }
}

impl BodyContact {
    /// Restore pool defaults before a generator fills this slot.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Set the involved bodies; `None` in the second slot means fixed to
    /// world.
    pub fn set_bodies(&mut self, first: BodyId, second: Option<BodyId>) {
        self.first = first;
        self.second = second;
    }

    /// The first body.
    #[must_use]
    pub fn first(&self) -> BodyId {
        self.first
    }

    /// The second body, if any.
    #[must_use]
    pub fn second(&self) -> Option<BodyId> {
        self.second
    }

    /// Set the contact normal (normalized on the way in).
    pub fn set_normal(&mut self, normal: Vector3<f64>) {
        self.normal = normal.normalize();
    }

    /// The unit contact normal.
    #[must_use]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Set the informational contact point.
    pub fn set_point(&mut self, point: Point3<f64>) {
        self.point = point;
    }

    /// The informational contact point.
    #[must_use]
    pub fn point(&self) -> Point3<f64> {
        self.point
    }

    /// Set the penetration depth.
    pub fn set_penetration(&mut self, penetration: f64) {
        self.penetration = penetration;
    }

    /// The penetration depth; positive means violated.
    #[must_use]
    pub fn penetration(&self) -> f64 {
        self.penetration
    }

    /// Set the restitution coefficient.
    pub fn set_restitution(&mut self, restitution: f64) {
        self.restitution = restitution;
    }

    /// The restitution coefficient.
    #[must_use]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Positional corrections applied by the last resolution, per slot.
    #[must_use]
    pub fn body_movements(&self) -> [Vector3<f64>; 2] {
        self.movement
    }

    /// Relative velocity of the two bodies projected onto the normal.
    ///
    /// Negative means closing, positive means separating. A missing second
    /// body contributes zero velocity.
    #[must_use]
    pub fn separating_velocity(&self, bodies: &[RigidBody]) -> f64 {
        let Some(first) = bodies.get(self.first.index()) else {
            tracing::warn!(index = self.first.index(), "contact references no body");
            return 0.0;
        };

        let mut relative = first.velocity();
        if let Some(second) = self.second_body(bodies) {
            relative -= second.velocity();
        }

        relative.dot(&self.normal)
    }

    /// Resolve this contact: velocity response first, then positional
    /// correction.
    pub fn resolve(&mut self, bodies: &mut [RigidBody], dt: f64) {
        self.resolve_velocity(bodies, dt);
        self.resolve_interpenetration(bodies, dt);
    }

    /// Apply the impulse that removes the closing velocity.
    pub fn resolve_velocity(&self, bodies: &mut [RigidBody], dt: f64) {
        let separating_velocity = self.separating_velocity(bodies);

        // stationary or already separating
        if separating_velocity > 0.0 {
            return;
        }

        let mut target_velocity = -separating_velocity * self.restitution;

        // Velocity buildup caused purely by this tick's acceleration along
        // the normal (e.g. gravity on a resting contact) is removed from the
        // bounce target, clamped at zero, so resting contacts don't jitter.
        let relative_acceleration = {
            let Some(first) = bodies.get(self.first.index()) else {
                return;
            };
            let mut acceleration = first.acceleration();
            if let Some(second) = self.second_body(bodies) {
                acceleration -= second.acceleration();
            }
            acceleration
        };

        let accel_separation = relative_acceleration.dot(&self.normal) * dt;
        if accel_separation < 0.0 {
            target_velocity += self.restitution * accel_separation;
            if target_velocity < 0.0 {
                target_velocity = 0.0;
            }
        }

        let delta_velocity = target_velocity - separating_velocity;

        let Some(total_inverse_mass) = self.total_inverse_mass(bodies) else {
            return;
        };

        let impulse = delta_velocity / total_inverse_mass;
        let impulse_per_inverse_mass = self.normal * impulse;

        // velocity change proportional to each body's inverse mass, the
        // second body in the opposite direction
        if let Some(first) = bodies.get_mut(self.first.index()) {
            let velocity = first.velocity() + impulse_per_inverse_mass * first.inverse_mass();
            first.set_velocity(velocity);
        }

        if let Some(id) = self.second {
            if let Some(second) = bodies.get_mut(id.index()) {
                let velocity =
                    second.velocity() - impulse_per_inverse_mass * second.inverse_mass();
                second.set_velocity(velocity);
            }
        }
    }

    /// Move the bodies apart along the normal, split by inverse mass.
    ///
    /// Velocity is untouched; the movement vectors are stored for the
    /// resolver's cross-contact penetration propagation.
    pub fn resolve_interpenetration(&mut self, bodies: &mut [RigidBody], _dt: f64) {
        if self.penetration <= 0.0 {
            return;
        }

        let Some(total_inverse_mass) = self.total_inverse_mass(bodies) else {
            return;
        };

        let move_per_inverse_mass = self.normal * (self.penetration / total_inverse_mass);

        if let Some(first) = bodies.get_mut(self.first.index()) {
            self.movement[0] = move_per_inverse_mass * first.inverse_mass();
            first.set_position(first.position() + self.movement[0]);
        }

        if let Some(id) = self.second {
            if let Some(second) = bodies.get_mut(id.index()) {
                self.movement[1] = -move_per_inverse_mass * second.inverse_mass();
                second.set_position(second.position() + self.movement[1]);
            }
        } else {
            self.movement[1] = Vector3::zeros();
        }
    }

    /// Combined inverse mass of both slots, or `None` when both sides are
    /// immovable (or the first body is missing).
    fn total_inverse_mass(&self, bodies: &[RigidBody]) -> Option<f64> {
        let first = bodies.get(self.first.index())?;

        let mut total = first.inverse_mass();
        if let Some(second) = self.second_body(bodies) {
            total += second.inverse_mass();
        }

        if total <= 0.0 {
            return None;
        }

        Some(total)
    }

    fn second_body<'a>(&self, bodies: &'a [RigidBody]) -> Option<&'a RigidBody> {
        self.second.and_then(|id| bodies.get(id.index()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body_with(mass: f64, velocity: Vector3<f64>) -> RigidBody {
        let mut body = RigidBody::default();
        body.set_mass(mass);
        body.set_velocity(velocity);
        body
    }

    fn head_on_contact() -> BodyContact {
        let mut contact = BodyContact::default();
        contact.set_bodies(BodyId::new(0), Some(BodyId::new(1)));
        contact.set_normal(Vector3::new(1.0, 0.0, 0.0));
        contact
    }

    #[test]
    fn test_separating_velocity_sign() {
        // body 0 moving -X toward body 1, normal +X: closing
        let bodies = vec![
            body_with(1.0, Vector3::new(-1.0, 0.0, 0.0)),
            body_with(1.0, Vector3::zeros()),
        ];
        let contact = head_on_contact();

        assert_relative_eq!(contact.separating_velocity(&bodies), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_separating_bodies_are_left_alone() {
        let mut bodies = vec![
            body_with(1.0, Vector3::new(1.0, 0.0, 0.0)),
            body_with(1.0, Vector3::zeros()),
        ];
        let contact = head_on_contact();

        contact.resolve_velocity(&mut bodies, 0.016);

        assert_relative_eq!(bodies[0].velocity().x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_elastic_impulse_swaps_equal_masses() {
        let mut bodies = vec![
            body_with(1.0, Vector3::new(-1.0, 0.0, 0.0)),
            body_with(1.0, Vector3::zeros()),
        ];
        let mut contact = head_on_contact();
        contact.set_restitution(1.0);

        contact.resolve_velocity(&mut bodies, 0.016);

        // total impulse 2: each unit-inverse-mass body changes by 1
        assert_relative_eq!(bodies[0].velocity().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].velocity().x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(contact.separating_velocity(&bodies), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inelastic_impulse_zeroes_closing_velocity() {
        let mut bodies = vec![
            body_with(1.0, Vector3::new(-2.0, 0.0, 0.0)),
            body_with(1.0, Vector3::zeros()),
        ];
        let contact = head_on_contact();

        contact.resolve_velocity(&mut bodies, 0.016);

        assert_relative_eq!(contact.separating_velocity(&bodies), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_immovable_bodies_do_nothing() {
        let mut bodies = vec![
            body_with(0.0, Vector3::zeros()),
            body_with(0.0, Vector3::zeros()),
        ];
        let mut contact = head_on_contact();
        contact.set_penetration(0.5);

        contact.resolve(&mut bodies, 0.016);

        assert_relative_eq!(bodies[0].position().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].position().x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_penetration_split_by_inverse_mass() {
        // body 0 twice as light as body 1: it takes 2/3 of the correction
        let mut bodies = vec![
            body_with(1.0, Vector3::zeros()),
            body_with(2.0, Vector3::zeros()),
        ];
        let mut contact = head_on_contact();
        contact.set_penetration(0.3);

        contact.resolve_interpenetration(&mut bodies, 0.016);

        assert_relative_eq!(bodies[0].position().x, 0.2, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].position().x, -0.1, epsilon = 1e-12);

        let movement = contact.body_movements();
        assert_relative_eq!(movement[0].x, 0.2, epsilon = 1e-12);
        assert_relative_eq!(movement[1].x, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_world_fixed_contact_moves_only_first_body() {
        let mut bodies = vec![body_with(1.0, Vector3::new(-1.0, 0.0, 0.0))];
        let mut contact = BodyContact::default();
        contact.set_bodies(BodyId::new(0), None);
        contact.set_normal(Vector3::new(1.0, 0.0, 0.0));
        contact.set_penetration(0.25);

        contact.resolve(&mut bodies, 0.016);

        assert_relative_eq!(bodies[0].position().x, 0.25, epsilon = 1e-12);
        assert_relative_eq!(contact.body_movements()[1].norm(), 0.0, epsilon = 1e-12);
        // inelastic by default: closing velocity removed
        assert!(bodies[0].velocity().x >= 0.0);
    }

    #[test]
    fn test_resting_contact_acceleration_is_cancelled() {
        // Body resting against the world along -Y with a gravity baseline:
        // the closing velocity equals one tick of gravity buildup, so the
        // bounce target collapses to zero instead of injecting energy.
        let dt = 0.1;
        let mut body = body_with(1.0, Vector3::new(0.0, -9.81 * dt, 0.0));
        body.set_acceleration(Vector3::new(0.0, -9.81, 0.0));
        let mut bodies = vec![body];

        let mut contact = BodyContact::default();
        contact.set_bodies(BodyId::new(0), None);
        contact.set_normal(Vector3::new(0.0, 1.0, 0.0));
        contact.set_restitution(1.0);

        contact.resolve_velocity(&mut bodies, dt);

        assert_relative_eq!(bodies[0].velocity().y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normal_is_normalized_on_set() {
        let mut contact = BodyContact::default();
        contact.set_normal(Vector3::new(0.0, 5.0, 0.0));
        assert_relative_eq!(contact.normal().norm(), 1.0, epsilon = 1e-12);
    }
}
