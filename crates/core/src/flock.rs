//! Flock container and the per-frame integrated motion update.

use crate::agent::{Agent, Orientation};
use crate::config::FlockConfig;
use crate::error::FlockError;
use crate::steering::{self, AgentState, Aggregates};
use crate::vec3::Vec3;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

/// The ordered collection of agents and the sole owner of their state.
///
/// A render loop drives the flock by calling [`Flock::update`] once per
/// frame and reading the agents back afterwards. Agent order is insertion
/// order and never changes, so aggregate sums are reproducible run to run.
#[derive(Debug, Clone, Serialize)]
pub struct Flock {
    agents: Vec<Agent>,
    config: FlockConfig,
    frame: u64,

    /// Frame-start copy of every agent's position and velocity, reused
    /// across frames to avoid per-frame allocation. All steering reads go
    /// through this buffer, never through partially-updated agents.
    #[serde(skip)]
    snapshot: Vec<AgentState>,
}

impl Flock {
    /// Build a flock from pre-placed agents.
    ///
    /// # Errors
    ///
    /// - [`FlockError::DegenerateFlock`] for fewer than two agents; the
    ///   cohesion and alignment rules average over `count - 1` and have no
    ///   defined behavior below that.
    /// - [`FlockError::NonFiniteState`] when an agent starts with a NaN or
    ///   infinite position or velocity.
    /// - [`FlockError::ZeroInitialVelocity`] when an agent starts with a
    ///   zero-length velocity.
    /// - [`FlockError::InvalidConfig`] when the configuration fails
    ///   [`FlockConfig::validate`].
    pub fn new(agents: Vec<Agent>, config: FlockConfig) -> Result<Self, FlockError> {
        config.validate()?;
        if agents.len() < 2 {
            return Err(FlockError::DegenerateFlock {
                count: agents.len(),
            });
        }
        for (index, agent) in agents.iter().enumerate() {
            if !agent.position().is_finite() || !agent.velocity().is_finite() {
                return Err(FlockError::NonFiniteState { index });
            }
            if agent.velocity().normalized().is_none() {
                return Err(FlockError::ZeroInitialVelocity { index });
            }
        }
        let snapshot = Vec::with_capacity(agents.len());
        Ok(Self {
            agents,
            config,
            frame: 0,
            snapshot,
        })
    }

    /// Build a flock of `count` agents scattered uniformly over the square
    /// `[-spread, spread]` on x and y at `z = 0`, all with the default
    /// starting velocity.
    ///
    /// Placement is the only thing drawn from `rng`; a seeded generator
    /// gives a fully reproducible flock.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Flock::new`], plus [`FlockError::InvalidConfig`]
    /// when `spread` is negative or non-finite.
    pub fn with_random_layout<R: Rng + ?Sized>(
        count: usize,
        spread: f32,
        rng: &mut R,
        config: FlockConfig,
    ) -> Result<Self, FlockError> {
        if !spread.is_finite() || spread < 0.0 {
            return Err(FlockError::InvalidConfig(format!(
                "spread must be finite and >= 0, got {spread}"
            )));
        }
        let agents = (0..count)
            .map(|_| {
                Agent::new(Vec3::new(
                    rng.random_range(-spread..=spread),
                    rng.random_range(-spread..=spread),
                    0.0,
                ))
            })
            .collect();
        Self::new(agents, config)
    }

    /// Agents in insertion order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Number of agents. Always at least 2.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Always false; construction rejects empty flocks.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of completed update calls.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The configuration the flock was built with.
    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Advance every agent by one frame.
    ///
    /// Two phases. First the positions and velocities of all agents are
    /// copied into the frame-start snapshot and the flock-wide sums are
    /// measured from it. Then each agent independently blends its four
    /// steering contributions (cohesion, separation, alignment, bounding)
    /// evaluated against that snapshot, clamps the result to the configured
    /// speed limit, derives its orientation, and integrates its position.
    /// Because phase two never reads another agent's live state, the result
    /// is independent of processing order.
    pub fn update(&mut self) {
        self.snapshot.clear();
        self.snapshot.extend(self.agents.iter().map(|agent| AgentState {
            position: agent.position(),
            velocity: agent.velocity(),
        }));
        let aggregates = Aggregates::measure(&self.snapshot);
        let forward = self.config.forward.normalized_or(Vec3::Z);

        let snapshot = &self.snapshot;
        let config = &self.config;
        let frame = self.frame;

        #[cfg(not(feature = "parallel"))]
        for (index, agent) in self.agents.iter_mut().enumerate() {
            step_agent(index, agent, snapshot, &aggregates, config, forward, frame);
        }

        #[cfg(feature = "parallel")]
        self.agents
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, agent)| {
                step_agent(index, agent, snapshot, &aggregates, config, forward, frame);
            });

        self.frame += 1;
        debug_assert!(
            self.agents
                .iter()
                .all(|agent| agent.position().is_finite() && agent.velocity().is_finite()),
            "agent state became non-finite on frame {}",
            self.frame
        );
    }
}

/// Compute and commit one agent's frame from the immutable snapshot.
fn step_agent(
    index: usize,
    agent: &mut Agent,
    snapshot: &[AgentState],
    aggregates: &Aggregates,
    config: &FlockConfig,
    forward: Vec3,
    frame: u64,
) {
    let state = snapshot[index];

    let cohesion = steering::cohesion(state, aggregates) * config.cohesion_weight;
    let separation =
        steering::separation(index, snapshot, config.separation_radius) * config.separation_weight;
    let alignment = steering::alignment(state, aggregates) * config.alignment_weight;
    let bounding = steering::bounding(state.position, &config.bounds) * config.bound_weight;

    let mut velocity = state.velocity + cohesion + separation + alignment + bounding;

    let speed = velocity.length();
    if speed > config.max_speed {
        velocity = velocity / speed * config.max_speed;
    }

    // A zero-length velocity has no direction to orient along; fall back to
    // the last well-defined heading and keep integrating.
    let heading = match velocity.normalized() {
        Some(direction) => direction,
        None => {
            warn!(
                agent = index,
                frame, "zero-length velocity; orienting along previous heading"
            );
            agent.heading()
        }
    };

    let axis = forward.cross(heading);
    let angle = forward.dot(heading).clamp(-1.0, 1.0).acos();

    agent.commit(
        state.position + velocity,
        velocity,
        heading,
        Orientation { axis, angle },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_single_agent_flock_is_rejected() {
        let result = Flock::new(vec![Agent::new(Vec3::ZERO)], FlockConfig::default());
        assert_eq!(result.unwrap_err(), FlockError::DegenerateFlock { count: 1 });

        let result = Flock::new(Vec::new(), FlockConfig::default());
        assert_eq!(result.unwrap_err(), FlockError::DegenerateFlock { count: 0 });
    }

    #[test]
    fn test_zero_initial_velocity_is_rejected() {
        let agents = vec![
            Agent::new(Vec3::ZERO),
            Agent::with_velocity(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
        ];
        let result = Flock::new(agents, FlockConfig::default());
        assert_eq!(
            result.unwrap_err(),
            FlockError::ZeroInitialVelocity { index: 1 }
        );
    }

    #[test]
    fn test_non_finite_state_is_rejected() {
        let agents = vec![
            Agent::new(Vec3::new(f32::NAN, 0.0, 0.0)),
            Agent::new(Vec3::ZERO),
        ];
        let result = Flock::new(agents, FlockConfig::default());
        assert_eq!(result.unwrap_err(), FlockError::NonFiniteState { index: 0 });
    }

    #[test]
    fn test_invalid_config_is_rejected_before_agents() {
        let config = FlockConfig {
            max_speed: -1.0,
            ..FlockConfig::default()
        };
        let result = Flock::new(vec![Agent::new(Vec3::ZERO)], config);
        assert!(matches!(result.unwrap_err(), FlockError::InvalidConfig(_)));
    }

    #[test]
    fn test_random_layout_scatters_on_ground_plane() {
        let mut rng = StdRng::seed_from_u64(7);
        let flock =
            Flock::with_random_layout(50, 5.0, &mut rng, FlockConfig::default()).unwrap();
        assert_eq!(flock.len(), 50);
        for agent in flock.agents() {
            let p = agent.position();
            assert!((-5.0..=5.0).contains(&p.x));
            assert!((-5.0..=5.0).contains(&p.y));
            assert_eq!(p.z, 0.0);
            assert_eq!(agent.velocity(), Agent::DEFAULT_VELOCITY);
        }
    }

    #[test]
    fn test_update_advances_frame_counter() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut flock =
            Flock::with_random_layout(10, 5.0, &mut rng, FlockConfig::default()).unwrap();
        assert_eq!(flock.frame(), 0);
        flock.update();
        flock.update();
        assert_eq!(flock.frame(), 2);
    }

    #[test]
    fn test_update_writes_orientation_from_velocity() {
        let agents = vec![
            Agent::new(Vec3::ZERO),
            Agent::new(Vec3::new(10.0, 0.0, 0.0)),
        ];
        let mut flock = Flock::new(agents, FlockConfig::default()).unwrap();
        flock.update();

        for agent in flock.agents() {
            let direction = agent.velocity().normalized().unwrap();
            let orientation = agent.orientation();
            assert_eq!(orientation.axis, Vec3::Z.cross(direction));
            assert!((orientation.angle - direction.dot(Vec3::Z).acos()).abs() < 1e-6);
            assert_eq!(agent.heading(), direction);
        }
    }
}
