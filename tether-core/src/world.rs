//! World container and the per-tick pipeline.
//!
//! The [`RigidBodyWorld`] owns every arena (bodies, force generators,
//! links), the force registry, the preallocated contact pool, and the
//! resolver. One tick always runs the same fixed sequence:
//!
//! ```text
//! start_frame      clear accumulators, refresh derived data
//! update_forces    registry drives every (body, generator) pairing
//! run_physics      integrate -> generate contacts -> resolve
//! ```
//!
//! The embedding calls the three steps once per rendered frame (or just
//! [`step`](RigidBodyWorld::step), which chains them) and reads body
//! transforms back afterwards.

use tether_types::{BodyId, GeneratorId, LinkId, PhysicsError, Result, WorldConfig};

use crate::body::RigidBody;
use crate::contact::BodyContact;
use crate::forces::ForceGenerator;
use crate::links::BodyLink;
use crate::registry::ForceRegistry;
use crate::resolver::ContactResolver;
use crate::warning::{Warning, WarningLog};

/// Diagnostics for one physics tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Contacts produced by the link generators this tick.
    pub contacts_issued: usize,
    /// Iterations the resolver consumed this tick.
    pub resolver_iterations: u32,
}

/// Top-level orchestrator owning bodies, generators, links, and the
/// contact resolver.
#[derive(Debug, Clone)]
pub struct RigidBodyWorld {
    bodies: Vec<RigidBody>,
    generators: Vec<ForceGenerator>,
    registry: ForceRegistry,
    links: Vec<BodyLink>,

    /// Preallocated contact pool, reused every tick.
    contacts: Vec<BodyContact>,
    resolver: ContactResolver,

    config: WorldConfig,
    warnings: WarningLog,
    time: f64,
}

impl Default for RigidBodyWorld {
    fn default() -> Self {
        // the default config always validates
        Self::with_validated_config(WorldConfig::default())
    }
}

impl RigidBodyWorld {
    /// Create a world with the given configuration.
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_validated_config(config))
    }

    fn with_validated_config(config: WorldConfig) -> Self {
        Self {
            bodies: Vec::new(),
            generators: Vec::new(),
            registry: ForceRegistry::new(),
            links: Vec::new(),
            contacts: vec![BodyContact::default(); config.max_contacts],
            resolver: ContactResolver::new(config.resolver_iterations),
            config,
            warnings: WarningLog::new(),
            time: 0.0,
        }
    }

    /// The world's configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Accumulated simulation time in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Add a body to the arena. Ids are insertion-ordered indices.
    pub fn add_body(&mut self, body: RigidBody) -> BodyId {
        let id = BodyId::new(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Look up a body; `None` for an out-of-range id.
    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id.index())
    }

    /// Look up a body mutably; `None` for an out-of-range id.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id.index())
    }

    /// Number of bodies in the arena.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// All bodies in insertion order, for renderers reading transforms back.
    #[must_use]
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Add a force generator to the arena.
    pub fn add_generator(&mut self, generator: ForceGenerator) -> GeneratorId {
        let id = GeneratorId::new(self.generators.len());
        self.generators.push(generator);
        id
    }

    /// Look up a generator; `None` for an out-of-range id.
    #[must_use]
    pub fn generator(&self, id: GeneratorId) -> Option<&ForceGenerator> {
        self.generators.get(id.index())
    }

    /// Look up a generator mutably, e.g. to toggle a wind.
    pub fn generator_mut(&mut self, id: GeneratorId) -> Option<&mut ForceGenerator> {
        self.generators.get_mut(id.index())
    }

    /// Pair a body with a force generator in the registry.
    ///
    /// Returns `Ok(false)` when the pairing already existed.
    pub fn add_force_entry(&mut self, body: BodyId, generator: GeneratorId) -> Result<bool> {
        self.check_body(body)?;
        if generator.index() >= self.generators.len() {
            return Err(PhysicsError::InvalidGeneratorIndex(generator.index()));
        }

        Ok(self.registry.add_entry(body, generator))
    }

    /// Remove a registry pairing. Returns whether it existed.
    pub fn remove_force_entry(&mut self, body: BodyId, generator: GeneratorId) -> bool {
        self.registry.remove_entry(body, generator)
    }

    /// The force registry.
    #[must_use]
    pub fn registry(&self) -> &ForceRegistry {
        &self.registry
    }

    /// Link two bodies with a cable.
    pub fn add_cable(
        &mut self,
        first: BodyId,
        second: BodyId,
        max_length: f64,
        restitution: f64,
    ) -> Result<LinkId> {
        self.check_body(first)?;
        self.check_body(second)?;

        let id = LinkId::new(self.links.len());
        self.links
            .push(BodyLink::cable(first, second, max_length, restitution));
        Ok(id)
    }

    /// Link two bodies with a rod.
    pub fn add_rod(&mut self, first: BodyId, second: BodyId, length: f64) -> Result<LinkId> {
        self.check_body(first)?;
        self.check_body(second)?;

        let id = LinkId::new(self.links.len());
        self.links.push(BodyLink::rod(first, second, length));
        Ok(id)
    }

    /// Look up a link; `None` for an out-of-range id.
    #[must_use]
    pub fn link(&self, id: LinkId) -> Option<&BodyLink> {
        self.links.get(id.index())
    }

    /// Cumulative count of one warning kind.
    #[must_use]
    pub fn warning_count(&self, warning: Warning) -> u32 {
        self.warnings.count(warning)
    }

    /// Clear every body's accumulators and refresh derived data.
    ///
    /// First step of every frame; integration relies on this being the only
    /// place accumulators are cleared.
    pub fn start_frame(&mut self) {
        for body in &mut self.bodies {
            body.clear_accumulators();
            body.calculate_derived_data();
        }
    }

    /// Run every registered force generator against its paired body.
    pub fn update_forces(&mut self, dt: f64) {
        self.registry
            .update_forces(&mut self.bodies, &self.generators, dt, &mut self.warnings);
    }

    /// Advance every body by `dt`.
    pub fn integrate(&mut self, dt: f64) {
        if dt <= 0.0 {
            self.warnings.record(Warning::BadTimestep, 0);
            return;
        }

        for body in &mut self.bodies {
            body.integrate(dt);
        }
    }

    /// Ask every link for a contact, in registration order, until the pool
    /// is full. Returns the number of contacts produced.
    pub fn generate_contacts(&mut self) -> usize {
        let mut used = 0;

        for link in &self.links {
            if used == self.contacts.len() {
                self.warnings.record(Warning::ContactFull, used as i64);
                break;
            }

            if link.fill_contact(&self.bodies, &mut self.contacts[used]) {
                used += 1;
            }
        }

        used
    }

    /// Integrate, generate contacts, and resolve them.
    ///
    /// A non-positive `dt` records [`Warning::BadTimestep`] and skips the
    /// tick. Returns per-tick diagnostics.
    pub fn run_physics(&mut self, dt: f64) -> TickSummary {
        if dt <= 0.0 {
            self.warnings.record(Warning::BadTimestep, 0);
            return TickSummary::default();
        }

        self.integrate(dt);

        let contacts_issued = self.generate_contacts();

        let mut resolver_iterations = 0;
        if contacts_issued > 0 {
            if self.config.auto_iterations() {
                // cascading corrections need roughly two passes per contact
                self.resolver.set_iterations(contacts_issued as u32 * 2);
            } else {
                self.resolver.set_iterations(self.config.resolver_iterations);
            }

            resolver_iterations = self.resolver.resolve_contacts(
                &mut self.bodies,
                &mut self.contacts[..contacts_issued],
                dt,
            );
        }

        self.time += dt;

        TickSummary {
            contacts_issued,
            resolver_iterations,
        }
    }

    /// Run one full tick: frame start, force accumulation, physics.
    pub fn step(&mut self, dt: f64) -> TickSummary {
        self.start_frame();
        self.update_forces(dt);
        self.run_physics(dt)
    }

    fn check_body(&self, id: BodyId) -> Result<()> {
        if id.index() >= self.bodies.len() {
            return Err(PhysicsError::InvalidBodyIndex(id.index()));
        }
        Ok(())
    }
}
