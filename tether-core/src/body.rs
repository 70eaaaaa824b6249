//! Rigid body state and semi-implicit Euler integration.
//!
//! A [`RigidBody`] is the mutable physical state of one simulated object.
//! Mass is stored as its reciprocal so that an inverse mass of zero
//! represents an immovable body with no special casing; the inertia tensor
//! is likewise stored inverted, in body space, and transformed into world
//! space once per frame by [`RigidBody::calculate_derived_data`].

use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Quaternion, UnitQuaternion, Vector3};
use tether_types::MassProperties;

/// Mutable physical state of one rigid body.
///
/// Bodies live in the world's arena and are addressed by
/// [`BodyId`](tether_types::BodyId). Forces and torques accumulate over a
/// frame and are cleared by the world at frame start, not by
/// [`integrate`](Self::integrate).
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Reciprocal of mass; 0 means infinite mass (immovable).
    inverse_mass: f64,
    /// Inverse inertia tensor in body space.
    inverse_inertia: Matrix3<f64>,
    /// Per-second velocity retention factor, applied as `damping^dt`.
    linear_damping: f64,
    /// Per-second angular velocity retention factor.
    angular_damping: f64,

    position: Point3<f64>,
    orientation: UnitQuaternion<f64>,
    velocity: Vector3<f64>,
    /// Angular velocity in world space.
    rotation: Vector3<f64>,
    /// Baseline acceleration applied every tick (e.g. a gravity baseline).
    acceleration: Vector3<f64>,

    accumulated_force: Vector3<f64>,
    accumulated_torque: Vector3<f64>,

    /// Derived: inverse inertia tensor in world space.
    inverse_inertia_world: Matrix3<f64>,
    /// Derived: body-to-world transform.
    transform: Isometry3<f64>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            inverse_mass: 0.0,
            inverse_inertia: Matrix3::identity(),
            linear_damping: 1.0,
            angular_damping: 1.0,
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
            velocity: Vector3::zeros(),
            rotation: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            accumulated_force: Vector3::zeros(),
            accumulated_torque: Vector3::zeros(),
            inverse_inertia_world: Matrix3::identity(),
            transform: Isometry3::identity(),
        }
    }
}

impl RigidBody {
    /// Create a body at rest at the origin with infinite mass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mass. Non-positive mass means infinite (immovable) mass.
    pub fn set_mass(&mut self, mass: f64) {
        if mass <= 0.0 {
            self.inverse_mass = 0.0;
            return;
        }

        self.inverse_mass = 1.0 / mass;
    }

    /// Get the mass; [`f64::INFINITY`] for an immovable body.
    #[must_use]
    pub fn mass(&self) -> f64 {
        if self.inverse_mass <= 0.0 {
            f64::INFINITY
        } else {
            1.0 / self.inverse_mass
        }
    }

    /// Get the inverse mass.
    #[must_use]
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    /// Whether this body is immovable.
    #[must_use]
    pub fn has_infinite_mass(&self) -> bool {
        self.inverse_mass <= 0.0
    }

    /// Set the body-space inertia tensor (stored inverted).
    ///
    /// A singular tensor is rejected and leaves the previous value in place.
    pub fn set_inertia_tensor(&mut self, tensor: &Matrix3<f64>) {
        match tensor.try_inverse() {
            Some(inverse) => self.inverse_inertia = inverse,
            None => tracing::warn!("singular inertia tensor ignored"),
        }
    }

    /// Set mass and inertia tensor together from [`MassProperties`].
    pub fn set_mass_properties(&mut self, properties: &MassProperties) {
        if properties.is_static() {
            self.inverse_mass = 0.0;
        } else {
            self.set_mass(properties.mass);
        }
        self.set_inertia_tensor(&properties.inertia);
    }

    /// Set the position.
    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
    }

    /// Get the position.
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Set the orientation.
    pub fn set_orientation(&mut self, orientation: UnitQuaternion<f64>) {
        self.orientation = orientation;
    }

    /// Get the orientation.
    #[must_use]
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        self.orientation
    }

    /// Set the linear velocity.
    pub fn set_velocity(&mut self, velocity: Vector3<f64>) {
        self.velocity = velocity;
    }

    /// Get the linear velocity.
    #[must_use]
    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    /// Set the angular velocity.
    pub fn set_rotation(&mut self, rotation: Vector3<f64>) {
        self.rotation = rotation;
    }

    /// Get the angular velocity.
    #[must_use]
    pub fn rotation(&self) -> Vector3<f64> {
        self.rotation
    }

    /// Set the baseline acceleration (applied every tick, e.g. gravity).
    pub fn set_acceleration(&mut self, acceleration: Vector3<f64>) {
        self.acceleration = acceleration;
    }

    /// Get the baseline acceleration.
    #[must_use]
    pub fn acceleration(&self) -> Vector3<f64> {
        self.acceleration
    }

    /// Set the linear damping factor, in (0, 1].
    pub fn set_linear_damping(&mut self, damping: f64) {
        self.linear_damping = damping;
    }

    /// Set the angular damping factor, in (0, 1].
    pub fn set_angular_damping(&mut self, damping: f64) {
        self.angular_damping = damping;
    }

    /// Accumulate a force acting on the center of mass, in world space.
    pub fn add_force(&mut self, force: Vector3<f64>) {
        self.accumulated_force += force;
    }

    /// Accumulate a torque, in world space.
    pub fn add_torque(&mut self, torque: Vector3<f64>) {
        self.accumulated_torque += torque;
    }

    /// Accumulate a force acting at a world-space point.
    ///
    /// The lever arm relative to the center of mass produces a torque.
    pub fn add_force_at_world_point(&mut self, force: Vector3<f64>, point: Point3<f64>) {
        self.accumulated_force += force;
        self.accumulated_torque += (point - self.position).cross(&force);
    }

    /// Accumulate a force acting at a body-space point.
    pub fn add_force_at_body_point(&mut self, force: Vector3<f64>, point: Point3<f64>) {
        let world_point = self.body_to_world(point);
        self.add_force_at_world_point(force, world_point);
    }

    /// Convert a body-space point to world space via the current transform.
    ///
    /// The transform is only as fresh as the last
    /// [`calculate_derived_data`](Self::calculate_derived_data) call.
    #[must_use]
    pub fn body_to_world(&self, point: Point3<f64>) -> Point3<f64> {
        self.transform * point
    }

    /// Get the accumulated force for this frame.
    #[must_use]
    pub fn accumulated_force(&self) -> Vector3<f64> {
        self.accumulated_force
    }

    /// Get the accumulated torque for this frame.
    #[must_use]
    pub fn accumulated_torque(&self) -> Vector3<f64> {
        self.accumulated_torque
    }

    /// Clear the force and torque accumulators.
    ///
    /// Owned by the world's frame-start step; integration never clears.
    pub fn clear_accumulators(&mut self) {
        self.accumulated_force = Vector3::zeros();
        self.accumulated_torque = Vector3::zeros();
    }

    /// Get the body-to-world transform.
    #[must_use]
    pub fn transform(&self) -> &Isometry3<f64> {
        &self.transform
    }

    /// Get the body-to-world transform as a homogeneous matrix for renderers.
    #[must_use]
    pub fn transform_matrix(&self) -> Matrix4<f64> {
        self.transform.to_homogeneous()
    }

    /// Get the world-space inverse inertia tensor.
    #[must_use]
    pub fn inverse_inertia_world(&self) -> &Matrix3<f64> {
        &self.inverse_inertia_world
    }

    /// Recompute derived data: normalized orientation, body-to-world
    /// transform, and the world-space inverse inertia tensor.
    ///
    /// Must run once per frame before torque-dependent force generators and
    /// before a renderer reads [`transform`](Self::transform).
    pub fn calculate_derived_data(&mut self) {
        self.orientation = UnitQuaternion::from_quaternion(self.orientation.into_inner());

        self.transform = Isometry3::from_parts(self.position.coords.into(), self.orientation);

        let rot = self.orientation.to_rotation_matrix().into_inner();
        self.inverse_inertia_world = rot * self.inverse_inertia * rot.transpose();
    }

    /// Advance the body by `dt` seconds with semi-implicit Euler.
    ///
    /// No-op for immovable bodies. A non-positive `dt` is reported and
    /// ignored rather than treated as fatal. Accumulators survive the call;
    /// clearing them belongs to the frame-start step.
    pub fn integrate(&mut self, dt: f64) {
        if self.inverse_mass <= 0.0 {
            return;
        }

        if dt <= 0.0 {
            tracing::warn!(dt, "integrate called with non-positive delta time");
            return;
        }

        let acceleration = self.acceleration + self.accumulated_force * self.inverse_mass;
        self.velocity += acceleration * dt;

        let angular_acceleration = self.inverse_inertia_world * self.accumulated_torque;
        self.rotation += angular_acceleration * dt;

        // drag by air
        self.velocity *= self.linear_damping.powf(dt);
        self.rotation *= self.angular_damping.powf(dt);

        self.position += self.velocity * dt;

        // small-angle orientation update
        let delta =
            UnitQuaternion::from_quaternion(Quaternion::from_parts(1.0, self.rotation * dt));
        self.orientation *= delta;
        self.orientation = UnitQuaternion::from_quaternion(self.orientation.into_inner());
    }
}
