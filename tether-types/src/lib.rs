//! Core data types for the tether rigid-body physics engine.
//!
//! This crate provides the foundational types shared by the engine and its
//! embedders:
//!
//! - [`BodyId`], [`GeneratorId`], [`LinkId`] - stable arena indices
//! - [`MassProperties`] - mass and body-space inertia tensors
//! - [`WorldConfig`] - contact buffer and resolver settings
//! - [`PhysicsError`] - error taxonomy for fallible operations
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no physics, no integration, no
//! world state. They are the common language between:
//!
//! - The physics core (`tether-core`)
//! - Rendering layers that place meshes from body transforms
//! - Scene setup code that configures worlds and links
//!
//! Entities are addressed by insertion-order indices wrapped in newtype ids.
//! The world owns every arena; registries and links store ids, never
//! references, so there is no shared ownership to manage.
//!
//! # Coordinate System
//!
//! - X: right
//! - Y: up
//! - Z: toward the viewer
//! - Right-handed
//!
//! Gravity conventionally acts along -Y, and the buoyancy force measures
//! submersion depth against a Y-height water plane.
//!
//! # Example
//!
//! ```
//! use tether_types::{BodyId, WorldConfig};
//!
//! let config = WorldConfig::default().with_max_contacts(32);
//! assert!(config.validate().is_ok());
//!
//! let id = BodyId::new(3);
//! assert_eq!(id.index(), 3);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
// Allow certain clippy lints that are overly pedantic for type definitions
#![allow(
    clippy::missing_const_for_fn,   // Many methods can't be const due to nalgebra
    clippy::missing_errors_doc,     // Error docs added where non-obvious
    clippy::cast_precision_loss,    // usize to f64 is fine for counts
)]

mod config;
mod error;
mod id;
mod mass;

pub use config::WorldConfig;
pub use error::PhysicsError;
pub use id::{BodyId, GeneratorId, LinkId};
pub use mass::MassProperties;

// Re-export math types for convenience
pub use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, UnitQuaternion, Vector3};

/// Result type for physics operations.
pub type Result<T> = std::result::Result<T, PhysicsError>;
