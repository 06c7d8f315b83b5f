//! Per-frame steering contributions.
//!
//! Each function is pure and reads only the frame-start snapshot, never the
//! partially-updated flock, so the result for one agent is independent of
//! the order agents are processed in. The four contributions are blended,
//! clamped, and integrated by [`Flock::update`](crate::Flock::update).

use crate::config::WorldBounds;
use crate::vec3::Vec3;

/// Cohesion moves an agent 1% of the way toward the perceived centroid per
/// frame (before weighting).
const CENTER_APPROACH_DIVISOR: f32 = 100.0;

/// Position and velocity of one agent as of the start of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentState {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Flock-wide sums measured once per frame from the snapshot.
///
/// These are raw sums over all agents, not averages; the per-agent rules do
/// their own `count - 1` averaging so each agent perceives the rest of the
/// flock without itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregates {
    /// Sum of every agent's position.
    pub perceived_center: Vec3,
    /// Sum of every agent's velocity.
    pub perceived_velocity: Vec3,
    /// Number of agents in the snapshot.
    pub count: usize,
}

impl Aggregates {
    /// Single pass over the snapshot accumulating both sums.
    pub fn measure(snapshot: &[AgentState]) -> Self {
        let mut perceived_center = Vec3::ZERO;
        let mut perceived_velocity = Vec3::ZERO;
        for state in snapshot {
            perceived_center = perceived_center + state.position;
            perceived_velocity = perceived_velocity + state.velocity;
        }
        Self {
            perceived_center,
            perceived_velocity,
            count: snapshot.len(),
        }
    }
}

/// Pull toward the centroid of the other agents.
///
/// `((sum_positions - own) / (count - 1) - own) / 100`. Requires
/// `aggregates.count >= 2`; the flock constructor guarantees it.
pub fn cohesion(state: AgentState, aggregates: &Aggregates) -> Vec3 {
    debug_assert!(aggregates.count >= 2, "cohesion needs at least 2 agents");
    let others = (aggregates.count - 1) as f32;
    ((aggregates.perceived_center - state.position) / others - state.position)
        / CENTER_APPROACH_DIVISOR
}

/// Push away from every neighbor strictly inside `radius`.
///
/// The pushback is the raw sum of `-(neighbor - own)` offsets: binary
/// inside/outside the radius, no distance falloff, no normalization. Zero
/// when no neighbor is close.
pub fn separation(index: usize, snapshot: &[AgentState], radius: f32) -> Vec3 {
    let own = snapshot[index].position;
    let mut force_away = Vec3::ZERO;
    for (other_index, other) in snapshot.iter().enumerate() {
        if other_index != index && other.position.distance(own) < radius {
            force_away = force_away - (other.position - own);
        }
    }
    force_away
}

/// Steer toward the average velocity of the other agents.
///
/// `sum_velocities / (count - 1) - own`. Requires `aggregates.count >= 2`.
pub fn alignment(state: AgentState, aggregates: &Aggregates) -> Vec3 {
    debug_assert!(aggregates.count >= 2, "alignment needs at least 2 agents");
    let others = (aggregates.count - 1) as f32;
    aggregates.perceived_velocity / others - state.velocity
}

/// Unit-magnitude corrective nudge per out-of-range axis.
///
/// `+1` on an axis below its minimum, `-1` above its maximum, `0` inside.
pub fn bounding(position: Vec3, bounds: &WorldBounds) -> Vec3 {
    let mut rebound = Vec3::ZERO;
    if position.x < bounds.x_min {
        rebound.x = 1.0;
    } else if position.x > bounds.x_max {
        rebound.x = -1.0;
    }
    if position.y < bounds.y_min {
        rebound.y = 1.0;
    } else if position.y > bounds.y_max {
        rebound.y = -1.0;
    }
    if position.z < bounds.z_min {
        rebound.z = 1.0;
    } else if position.z > bounds.z_max {
        rebound.z = -1.0;
    }
    rebound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(position: Vec3, velocity: Vec3) -> AgentState {
        AgentState { position, velocity }
    }

    #[test]
    fn test_measure_sums_positions_and_velocities() {
        let snapshot = [
            state(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0)),
            state(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.5, 0.0)),
            state(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, 0.5)),
        ];
        let aggregates = Aggregates::measure(&snapshot);
        assert_eq!(aggregates.perceived_center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aggregates.perceived_velocity, Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(aggregates.count, 3);
    }

    #[test]
    fn test_cohesion_points_at_other_agent() {
        // Two agents: the centroid of "others" is exactly the other agent.
        let snapshot = [
            state(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
            state(Vec3::new(10.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)),
        ];
        let aggregates = Aggregates::measure(&snapshot);
        assert_eq!(
            cohesion(snapshot[0], &aggregates),
            Vec3::new(0.1, 0.0, 0.0)
        );
        assert_eq!(
            cohesion(snapshot[1], &aggregates),
            Vec3::new(-0.1, 0.0, 0.0)
        );
    }

    #[test]
    fn test_separation_binary_radius() {
        let snapshot = [
            state(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
            state(Vec3::new(3.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)),
            state(Vec3::new(0.0, 20.0, 0.0), Vec3::new(1.0, 1.0, 1.0)),
        ];
        // Only the neighbor at distance 3 is inside the radius; the far one
        // contributes nothing regardless of how far it is.
        assert_eq!(
            separation(0, &snapshot, 5.0),
            Vec3::new(-3.0, 0.0, 0.0)
        );
        // Nobody within radius: zero contribution.
        assert_eq!(separation(2, &snapshot, 5.0), Vec3::ZERO);
    }

    #[test]
    fn test_separation_excludes_self() {
        let snapshot = [
            state(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
            state(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
        ];
        // Coincident neighbor contributes a zero offset; the agent itself is
        // skipped rather than counted.
        assert_eq!(separation(0, &snapshot, 5.0), Vec3::ZERO);
    }

    #[test]
    fn test_alignment_matches_average_of_others() {
        let snapshot = [
            state(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
            state(Vec3::new(10.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)),
        ];
        let aggregates = Aggregates::measure(&snapshot);
        // Raw velocity sum (2,2,2) averaged over count-1 minus own velocity.
        assert_eq!(
            alignment(snapshot[0], &aggregates),
            Vec3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_bounding_nudges_per_axis() {
        let bounds = WorldBounds::default();
        assert_eq!(
            bounding(Vec3::new(-31.0, 0.0, 0.0), &bounds),
            Vec3::new(1.0, 0.0, 0.0)
        );
        assert_eq!(
            bounding(Vec3::new(31.0, 0.0, 0.0), &bounds),
            Vec3::new(-1.0, 0.0, 0.0)
        );
        assert_eq!(
            bounding(Vec3::new(40.0, -40.0, 80.0), &bounds),
            Vec3::new(-1.0, 1.0, -1.0)
        );
        assert_eq!(bounding(Vec3::ZERO, &bounds), Vec3::ZERO);
    }
}
