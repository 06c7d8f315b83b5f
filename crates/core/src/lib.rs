//! Flock Simulation Core Library
//!
//! A real-time boids flocking simulation: every frame, each agent blends
//! four local steering rules - cohesion toward the perceived flock center,
//! separation from close neighbors, alignment with the perceived flock
//! velocity, and containment inside a bounding region - into a single
//! clamped velocity, then integrates its position and derives an axis-angle
//! orientation for a scene-graph host to draw.
//!
//! The crate owns agent state and the update rule, nothing else. Rendering,
//! input, and world tracking belong to the embedding host, which constructs
//! a [`Flock`], calls [`Flock::update`] once per rendered frame, and reads
//! agent transforms back.

// Vector math used by every other computation
pub mod vec3;

// Tunable parameters and the bounding region
pub mod config;

// Agent state and the derived orientation
pub mod agent;

// Per-frame steering contributions
pub mod steering;

// The flock container and update rule
pub mod flock;

// Construction-time error taxonomy
pub mod error;

// Re-export the host-facing surface
pub use agent::{Agent, Orientation};
pub use config::{FlockConfig, WorldBounds};
pub use error::FlockError;
pub use flock::Flock;
pub use vec3::Vec3;
