//! C ABI surface for the flock simulation core.
//!
//! Lets a scene-graph host written in any language own the frame loop:
//! create a flock with `flock_sim_new`, call `flock_sim_step` once per
//! rendered frame, copy agent transforms out with
//! `flock_sim_read_transforms`, and apply them to scene nodes. Errors
//! follow the C convention (0 = success) with per-thread diagnostic
//! messages retrievable via `flock_sim_get_last_error`.

// Error codes and per-thread last-error storage
pub mod error;

// Internal glue between Rust results and the C error protocol
mod helpers;

// Instance lifecycle, stepping, and transform readback
pub mod instance;

pub use error::FlockSimErrorCode;
pub use instance::{FlockInstance, FlockSimConfig, FlockTransform};
