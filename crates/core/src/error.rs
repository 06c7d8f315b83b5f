//! Error types reported at flock construction time.
//!
//! The per-frame update has no recoverable error paths; everything that
//! could poison it (too few agents, zero starting velocity, non-finite
//! state, bad parameters) is rejected here, before the first frame runs.

use std::error::Error;
use std::fmt;

/// Reasons a [`Flock`](crate::Flock) cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlockError {
    /// Fewer than two agents. Cohesion and alignment divide by `count - 1`,
    /// so a single-agent flock has no defined update.
    DegenerateFlock {
        /// Number of agents supplied.
        count: usize,
    },

    /// An agent started with a zero-length velocity. The first frame could
    /// not derive a heading from it.
    ZeroInitialVelocity {
        /// Index of the offending agent, in insertion order.
        index: usize,
    },

    /// An agent started with a NaN or infinite position or velocity.
    /// Non-finite state is unrecoverable once it enters the update loop.
    NonFiniteState {
        /// Index of the offending agent, in insertion order.
        index: usize,
    },

    /// A configuration parameter failed validation.
    InvalidConfig(String),
}

impl fmt::Display for FlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateFlock { count } => {
                write!(f, "flock needs at least 2 agents, got {count}")
            }
            Self::ZeroInitialVelocity { index } => {
                write!(f, "agent {index} has a zero-length initial velocity")
            }
            Self::NonFiniteState { index } => {
                write!(f, "agent {index} has a non-finite initial position or velocity")
            }
            Self::InvalidConfig(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for FlockError {}
