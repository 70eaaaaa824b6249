//! Mass properties of rigid bodies.
//!
//! The engine stores inverse mass and the inverse inertia tensor on the body
//! itself; this type is the setup-time description that produces them, with
//! constructors for the common solid shapes.

use nalgebra::{Matrix3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mass and body-space inertia tensor of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassProperties {
    /// Total mass in kg. Non-positive or infinite mass means a static body.
    pub mass: f64,
    /// Inertia tensor about the center of mass in body space (kg·m²).
    pub inertia: Matrix3<f64>,
}

impl MassProperties {
    /// Create mass properties with given values.
    #[must_use]
    pub const fn new(mass: f64, inertia: Matrix3<f64>) -> Self {
        Self { mass, inertia }
    }

    /// Create mass properties for a point mass with unit rotational inertia.
    ///
    /// A true point mass has a singular inertia tensor, which cannot be
    /// inverted for the angular response; the unit tensor keeps the body
    /// well-behaved when torques are applied anyway.
    #[must_use]
    pub fn point_mass(mass: f64) -> Self {
        Self {
            mass,
            inertia: Matrix3::identity(),
        }
    }

    /// Create mass properties for a uniform solid sphere.
    ///
    /// Inertia of a solid sphere: I = (2/5) * m * r²
    #[must_use]
    pub fn sphere(mass: f64, radius: f64) -> Self {
        let i = 0.4 * mass * radius * radius;
        Self {
            mass,
            inertia: Matrix3::from_diagonal(&Vector3::new(i, i, i)),
        }
    }

    /// Create mass properties for a uniform solid box.
    ///
    /// Inertia of a solid box with dimensions (x, y, z):
    /// - Ixx = (1/12) * m * (y² + z²)
    /// - Iyy = (1/12) * m * (x² + z²)
    /// - Izz = (1/12) * m * (x² + y²)
    #[must_use]
    pub fn box_shape(mass: f64, half_extents: Vector3<f64>) -> Self {
        let x2 = 4.0 * half_extents.x * half_extents.x;
        let y2 = 4.0 * half_extents.y * half_extents.y;
        let z2 = 4.0 * half_extents.z * half_extents.z;

        let ixx = mass * (y2 + z2) / 12.0;
        let iyy = mass * (x2 + z2) / 12.0;
        let izz = mass * (x2 + y2) / 12.0;

        Self {
            mass,
            inertia: Matrix3::from_diagonal(&Vector3::new(ixx, iyy, izz)),
        }
    }

    /// Create mass properties for a uniform solid cylinder aligned with Y.
    ///
    /// - Ixx = Izz = (1/12) * m * (3r² + h²)
    /// - Iyy = (1/2) * m * r²
    #[must_use]
    pub fn cylinder(mass: f64, radius: f64, half_height: f64) -> Self {
        let r2 = radius * radius;
        let h2 = 4.0 * half_height * half_height;

        let ixx = mass * (3.0 * r2 + h2) / 12.0;
        let iyy = 0.5 * mass * r2;

        Self {
            mass,
            inertia: Matrix3::from_diagonal(&Vector3::new(ixx, iyy, ixx)),
        }
    }

    /// Get the inverse mass (0 for a static body).
    #[must_use]
    pub fn inverse_mass(&self) -> f64 {
        if self.mass <= 0.0 || self.mass.is_infinite() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Get the inverse inertia tensor, or `None` if the tensor is singular.
    #[must_use]
    pub fn inverse_inertia(&self) -> Option<Matrix3<f64>> {
        self.inertia.try_inverse()
    }

    /// Check if this represents a static (immovable) body.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.mass <= 0.0 || self.mass.is_infinite()
    }

    /// Validate that the mass properties are physically plausible.
    pub fn validate(&self) -> crate::Result<()> {
        if self.mass.is_nan() {
            return Err(crate::PhysicsError::invalid_mass("mass must not be NaN"));
        }

        if !self.inertia.iter().all(|x| x.is_finite()) {
            return Err(crate::PhysicsError::invalid_mass(
                "inertia tensor must be finite",
            ));
        }

        // Physical inertia tensors are positive semi-definite
        let eigenvalues = self.inertia.symmetric_eigenvalues();
        if eigenvalues.iter().any(|&e| e < -1e-10) {
            return Err(crate::PhysicsError::invalid_mass(
                "inertia tensor must be positive semi-definite",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_inertia() {
        let props = MassProperties::sphere(1.0, 1.0);
        let expected = 0.4; // (2/5) * 1 * 1²

        assert_relative_eq!(props.inertia[(0, 0)], expected, epsilon = 1e-10);
        assert_relative_eq!(props.inertia[(1, 1)], expected, epsilon = 1e-10);
        assert_relative_eq!(props.inertia[(2, 2)], expected, epsilon = 1e-10);
    }

    #[test]
    fn test_box_inertia() {
        let props = MassProperties::box_shape(12.0, Vector3::new(0.5, 0.5, 0.5));
        // For a 1x1x1 box with mass 12: I = (1/12) * 12 * (1 + 1) = 2
        assert_relative_eq!(props.inertia[(0, 0)], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_inverse_mass() {
        assert_relative_eq!(MassProperties::sphere(2.0, 1.0).inverse_mass(), 0.5);
        assert_eq!(MassProperties::point_mass(0.0).inverse_mass(), 0.0);
        assert_eq!(MassProperties::point_mass(f64::INFINITY).inverse_mass(), 0.0);
    }

    #[test]
    fn test_static_detection() {
        assert!(MassProperties::point_mass(0.0).is_static());
        assert!(MassProperties::point_mass(-1.0).is_static());
        assert!(!MassProperties::sphere(1.0, 1.0).is_static());
    }

    #[test]
    fn test_validation() {
        assert!(MassProperties::sphere(1.0, 1.0).validate().is_ok());
        assert!(MassProperties::point_mass(f64::NAN).validate().is_err());
    }
}
