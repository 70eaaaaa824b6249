//! Rigid-body physics core for linked bodies.
//!
//! This crate simulates free and linked rigid bodies: forces accumulate on
//! bodies through a registry of force generators, a semi-implicit Euler
//! integrator advances the state, and structural links (cables, rods) emit
//! contacts that an iterative resolver turns into velocity impulses and
//! positional corrections. It builds on [`tether_types`] for the data
//! structures.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     RigidBodyWorld                          │
//! │  start_frame → update_forces → integrate → contacts →       │
//! │  resolve; owns every arena (bodies, generators, links)      │
//! └───────────┬──────────────────────┬──────────────────────────┘
//!             │                      │
//!             ▼                      ▼
//! ┌───────────────────────┐  ┌───────────────────────────────────┐
//! │     ForceRegistry     │  │        BodyLink (cable/rod)       │
//! │  (body, generator)    │  │  emits BodyContact when the       │
//! │  pairs, set semantics │  │  length constraint is violated    │
//! └───────────┬───────────┘  └───────────────┬───────────────────┘
//!             │                              │
//!             ▼                              ▼
//! ┌───────────────────────┐  ┌───────────────────────────────────┐
//! │       RigidBody       │  │         ContactResolver           │
//! │  semi-implicit Euler, │  │  greedy: most-negative separating │
//! │  quaternion update    │  │  velocity first, propagates moves │
//! └───────────────────────┘  └───────────────────────────────────┘
//! ```
//!
//! # Boundary
//!
//! The core consumes a per-tick delta time and exposes body positions and
//! orientations for a renderer to read back. It performs no I/O and owns no
//! threads; one tick runs to completion inside the caller's frame update.
//!
//! # Quick Start
//!
//! ```
//! use tether_core::{ForceGenerator, RigidBody, RigidBodyWorld};
//! use tether_types::{Vector3, WorldConfig};
//!
//! let mut world = RigidBodyWorld::new(WorldConfig::default())?;
//!
//! // A 2 kg body that falls under gravity
//! let mut body = RigidBody::default();
//! body.set_mass(2.0);
//! let body_id = world.add_body(body);
//!
//! let gravity = world.add_generator(ForceGenerator::gravity(Vector3::new(0.0, -9.81, 0.0)));
//! world.add_force_entry(body_id, gravity)?;
//!
//! // One 60 Hz frame
//! let summary = world.step(1.0 / 60.0);
//! assert_eq!(summary.contacts_issued, 0);
//! assert!(world.body(body_id).map(|b| b.velocity().y < 0.0).unwrap_or(false));
//! # Ok::<(), tether_types::PhysicsError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,       // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,           // mul_add style changes aren't always clearer
    clippy::neg_cmp_op_on_partial_ord,  // !(x >= 0.0) is intentional for NaN rejection
    clippy::module_name_repetitions,    // BodyContact/BodyLink read better fully qualified
)]

pub mod body;
pub mod contact;
pub mod forces;
pub mod links;
pub mod registry;
pub mod resolver;
pub mod warning;
pub mod world;

pub use body::RigidBody;
pub use contact::BodyContact;
pub use forces::ForceGenerator;
pub use links::{BodyLink, LinkKind};
pub use registry::{ForceEntry, ForceRegistry};
pub use resolver::ContactResolver;
pub use warning::{Warning, WarningLog, WarningStat};
pub use world::{RigidBodyWorld, TickSummary};

// Re-export the data crate for downstream convenience
pub use tether_types as types;
