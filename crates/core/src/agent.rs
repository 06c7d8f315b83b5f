//! Flocking agent state.

use crate::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-angle rotation derived from an agent's velocity each frame.
///
/// `axis` is `forward x direction` and `angle` is `acos(forward . direction)`
/// for the configured reference forward vector. A scene-graph host can apply
/// it directly as a node rotation. The default is the identity rotation:
/// zero angle, no axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub axis: Vec3,
    pub angle: f32,
}

/// One flocking entity.
///
/// Position and velocity are owned by the [`Flock`](crate::Flock) and
/// mutated only by its per-frame update; hosts read them back through the
/// accessors along with the derived orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    position: Vec3,
    velocity: Vec3,
    heading: Vec3,
    orientation: Orientation,
}

impl Agent {
    /// Starting velocity for agents spawned without an explicit one.
    /// Non-zero so the first frame's heading derivation is well-defined.
    pub const DEFAULT_VELOCITY: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    /// Heading reported before the first frame establishes a real one.
    pub const DEFAULT_HEADING: Vec3 = Vec3::Y;

    /// Agent at `position` with the default starting velocity.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self::with_velocity(position, Self::DEFAULT_VELOCITY)
    }

    /// Agent at `position` with an explicit starting velocity.
    ///
    /// The velocity must be non-zero for the flock to accept the agent;
    /// [`Flock::new`](crate::Flock::new) enforces that.
    #[must_use]
    pub fn with_velocity(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            heading: Self::DEFAULT_HEADING,
            orientation: Orientation::default(),
        }
    }

    /// Current world position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current velocity (heading times speed).
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Last well-defined unit direction of travel. Substituted for the
    /// velocity direction on frames where the velocity degenerates to zero.
    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    /// Rotation derived from the velocity on the most recent frame.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Commit one frame's results in a single step.
    pub(crate) fn commit(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        heading: Vec3,
        orientation: Orientation,
    ) {
        self.position = position;
        self.velocity = velocity;
        self.heading = heading;
        self.orientation = orientation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_agent_defaults() {
        let agent = Agent::new(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(agent.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(agent.velocity(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(agent.heading(), Vec3::Y);
        assert_eq!(agent.orientation(), Orientation::default());
    }

    #[test]
    fn test_with_velocity_keeps_given_velocity() {
        let agent = Agent::with_velocity(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(agent.velocity(), Vec3::new(0.0, 0.0, -2.0));
    }
}
