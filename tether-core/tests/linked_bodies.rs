//! End-to-end scenarios for linked and free bodies.
//!
//! Each test builds a small world, runs whole ticks through the public
//! pipeline, and checks the emergent behavior rather than individual
//! component math.

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use tether_core::{ForceGenerator, RigidBody, RigidBodyWorld, Warning};
use tether_types::{BodyId, WorldConfig};

fn body_at(x: f64, y: f64, mass: f64) -> RigidBody {
    let mut body = RigidBody::default();
    body.set_mass(mass);
    body.set_position(Point3::new(x, y, 0.0));
    body
}

fn distance(world: &RigidBodyWorld, a: BodyId, b: BodyId) -> f64 {
    let pa = world.body(a).expect("body a").position();
    let pb = world.body(b).expect("body b").position();
    (pa - pb).norm()
}

/// Test: a rod pulls a finite-mass body toward an anchored one.
///
/// Rod of length 1.0, bodies 1.5 apart, zero velocity, first body immovable.
/// One tick must move the second body so the distance approaches 1.0, and
/// since rods never bounce and nothing was closing, its velocity stays zero.
#[test]
fn rod_converges_to_rest_length_positionally() {
    let mut world = RigidBodyWorld::default();
    let anchor = world.add_body(body_at(0.0, 0.0, 0.0)); // infinite mass
    let follower = world.add_body(body_at(1.5, 0.0, 1.0));
    world.add_rod(anchor, follower, 1.0).expect("rod");

    let before = distance(&world, anchor, follower);
    let summary = world.step(1.0 / 60.0);

    assert_eq!(summary.contacts_issued, 1);

    let after = distance(&world, anchor, follower);
    assert!(
        (after - 1.0).abs() < (before - 1.0).abs(),
        "distance should approach the rod length: before {before}, after {after}"
    );

    let velocity = world.body(follower).expect("follower").velocity();
    assert_relative_eq!(velocity.norm(), 0.0, epsilon = 1e-9);

    // the immovable anchor never moves
    let anchor_position = world.body(anchor).expect("anchor").position();
    assert_relative_eq!(anchor_position.x, 0.0, epsilon = 1e-12);
}

/// Test: a compressed rod pushes the bodies back apart.
#[test]
fn rod_pushes_apart_when_compressed() {
    let mut world = RigidBodyWorld::default();
    let a = world.add_body(body_at(0.0, 0.0, 1.0));
    let b = world.add_body(body_at(0.6, 0.0, 1.0));
    world.add_rod(a, b, 1.0).expect("rod");

    let before = distance(&world, a, b);
    world.step(1.0 / 60.0);
    let after = distance(&world, a, b);

    assert!(
        after > before,
        "compressed rod should separate the bodies: before {before}, after {after}"
    );
}

/// Test: resolver terminates within budget and never grows the violation.
///
/// Two cable-linked bodies flying apart (separating velocity < 0 in contact
/// terms) must come out of one tick with the cable violation no larger than
/// it was when the contact was generated.
#[test]
fn cable_resolution_terminates_and_shrinks_violation() {
    let dt = 0.01;
    let max_length = 1.0;

    let mut world = RigidBodyWorld::default();
    let a = world.add_body(body_at(0.0, 0.0, 1.0));
    let b = world.add_body(body_at(1.2, 0.0, 1.0));
    if let Some(body) = world.body_mut(b) {
        body.set_velocity(Vector3::new(1.0, 0.0, 0.0));
    }
    world.add_cable(a, b, max_length, 0.5).expect("cable");

    // violation right after integration, before resolution ran
    let stretched = 1.2 + 1.0 * dt;
    let violation_before = stretched - max_length;

    let summary = world.step(dt);

    assert_eq!(summary.contacts_issued, 1);
    assert!(
        summary.resolver_iterations <= 2,
        "auto budget is twice the contact count"
    );

    let violation_after = (distance(&world, a, b) - max_length).max(0.0);
    assert!(
        violation_after <= violation_before + 1e-9,
        "resolution must not grow the violation: {violation_before} -> {violation_after}"
    );

    // the taut cable arrests the separation
    let va = world.body(a).expect("a").velocity().x;
    let vb = world.body(b).expect("b").velocity().x;
    assert!(
        vb - va < 1.0,
        "relative separation speed must have dropped, got {}",
        vb - va
    );
}

/// Test: slack cables produce no contacts at all.
#[test]
fn slack_cable_is_free_flight() {
    let mut world = RigidBodyWorld::default();
    let a = world.add_body(body_at(0.0, 0.0, 1.0));
    let b = world.add_body(body_at(0.5, 0.0, 1.0));
    world.add_cable(a, b, 2.0, 0.3).expect("cable");

    let summary = world.step(1.0 / 60.0);
    assert_eq!(summary.contacts_issued, 0);
    assert_eq!(summary.resolver_iterations, 0);
}

/// Test: a rod chain propagates corrections across shared bodies.
///
/// Three bodies in a line, both rods stretched; a handful of ticks must pull
/// the whole chain toward its rest lengths without oscillating apart.
#[test]
fn rod_chain_settles() {
    let mut world = RigidBodyWorld::default();
    let a = world.add_body(body_at(0.0, 0.0, 0.0)); // anchored end
    let b = world.add_body(body_at(1.4, 0.0, 1.0));
    let c = world.add_body(body_at(2.8, 0.0, 1.0));
    world.add_rod(a, b, 1.0).expect("rod ab");
    world.add_rod(b, c, 1.0).expect("rod bc");

    for _ in 0..20 {
        world.step(1.0 / 60.0);
    }

    let ab = distance(&world, a, b);
    let bc = distance(&world, b, c);
    assert!((ab - 1.0).abs() < 0.05, "rod a-b settled at {ab}");
    assert!((bc - 1.0).abs() < 0.05, "rod b-c settled at {bc}");
}

/// Test: gravity + buoyancy float a light body toward the surface band.
#[test]
fn submerged_body_rises() {
    let mut world = RigidBodyWorld::default();
    let bob = world.add_body(body_at(0.0, -3.0, 1.0));

    let gravity = world.add_generator(ForceGenerator::gravity(Vector3::new(0.0, -9.81, 0.0)));
    // saturated buoyant force far above gravity
    let buoyancy = world.add_generator(ForceGenerator::buoyancy(0.5, 0.02, 0.0, 1000.0));
    world.add_force_entry(bob, gravity).expect("gravity entry");
    world.add_force_entry(bob, buoyancy).expect("buoyancy entry");

    for _ in 0..30 {
        world.step(1.0 / 60.0);
    }

    let y = world.body(bob).expect("bob").position().y;
    assert!(y > -3.0, "buoyant body must rise, got y = {y}");
}

/// Test: toggling wind through the world changes the applied force.
#[test]
fn wind_toggle_gates_force() {
    let mut world = RigidBodyWorld::default();
    let leaf = world.add_body(body_at(0.0, 0.0, 1.0));
    let wind = world.add_generator(ForceGenerator::wind(Vector3::new(4.0, 0.0, 0.0)));
    world.add_force_entry(leaf, wind).expect("wind entry");

    world.step(1.0 / 60.0);
    let at_rest = world.body(leaf).expect("leaf").velocity().x;
    assert_relative_eq!(at_rest, 0.0, epsilon = 1e-12);

    world
        .generator_mut(wind)
        .expect("wind generator")
        .set_enabled(true);
    world.step(1.0 / 60.0);

    let blown = world.body(leaf).expect("leaf").velocity().x;
    assert!(blown > 0.0, "enabled wind must accelerate the body");
}

/// Test: an anchored bungee holds a hanging body near its rest length.
#[test]
fn bungee_catches_falling_body() {
    let mut world = RigidBodyWorld::default();
    let weight = world.add_body(body_at(0.0, -1.0, 1.0));

    let gravity = world.add_generator(ForceGenerator::gravity(Vector3::new(0.0, -9.81, 0.0)));
    let bungee = world.add_generator(ForceGenerator::anchored_bungee(
        Point3::origin(),
        30.0,
        2.0,
    ));
    world.add_force_entry(weight, gravity).expect("gravity");
    world.add_force_entry(weight, bungee).expect("bungee");

    // damping keeps the oscillation from building up
    if let Some(body) = world.body_mut(weight) {
        body.set_linear_damping(0.5);
    }

    for _ in 0..600 {
        world.step(1.0 / 60.0);
    }

    let y = world.body(weight).expect("weight").position().y;
    // equilibrium below the rest length: k * (|y| - rest) = g
    assert!(
        y < -2.0 && y > -3.5,
        "body should hang just below the bungee rest length, got y = {y}"
    );
}

/// Test: warnings accumulate without aborting the simulation.
#[test]
fn overfull_contact_buffer_degrades_gracefully() {
    let mut world = RigidBodyWorld::new(WorldConfig::with_capacity(1)).expect("world");
    let a = world.add_body(body_at(0.0, 0.0, 0.0));
    let b = world.add_body(body_at(2.0, 0.0, 1.0));
    let c = world.add_body(body_at(4.0, 0.0, 1.0));
    world.add_rod(a, b, 1.0).expect("rod ab");
    world.add_rod(b, c, 1.0).expect("rod bc");

    let summary = world.step(1.0 / 60.0);

    assert_eq!(summary.contacts_issued, 1);
    assert_eq!(world.warning_count(Warning::ContactFull), 1);

    // the world keeps ticking afterwards
    let summary = world.step(1.0 / 60.0);
    assert!(summary.contacts_issued >= 1);
}
