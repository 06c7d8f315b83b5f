use std::ptr;
use std::sync::RwLock;

use flock_sim_core::{Flock, FlockConfig, Vec3, WorldBounds};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{FfiError, FlockSimErrorCode};
use crate::helpers::{clear_last_error, instance_from_ptr, track_error, track_result};

/// The main flock simulation context.
/// Holds the flock state and advances it one frame per `flock_sim_step`.
///
/// # Thread Safety
///
/// `FlockInstance` can be shared across threads in a game engine host. The
/// flock is protected by an `RwLock`:
/// - multiple concurrent readers (`flock_sim_read_transforms`,
///   `flock_sim_agent_count`) take the read lock;
/// - the frame update (`flock_sim_step`) takes the write lock.
///
/// The simulation itself is serial: one `flock_sim_step` call advances one
/// frame, and the lock guarantees steps never overlap.
pub struct FlockInstance {
    flock: RwLock<Flock>,
}

/// Flat C mirror of the core configuration.
///
/// Field meanings and defaults match the library configuration; use
/// `flock_sim_default_config` to obtain the defaults and tweak from there.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FlockSimConfig {
    pub separation_radius: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub bound_weight: f32,
    pub max_speed: f32,
    pub bounds_x_min: f32,
    pub bounds_x_max: f32,
    pub bounds_y_min: f32,
    pub bounds_y_max: f32,
    pub bounds_z_min: f32,
    pub bounds_z_max: f32,
    pub forward_x: f32,
    pub forward_y: f32,
    pub forward_z: f32,
}

impl From<FlockSimConfig> for FlockConfig {
    fn from(config: FlockSimConfig) -> Self {
        Self {
            separation_radius: config.separation_radius,
            cohesion_weight: config.cohesion_weight,
            separation_weight: config.separation_weight,
            alignment_weight: config.alignment_weight,
            bound_weight: config.bound_weight,
            max_speed: config.max_speed,
            bounds: WorldBounds {
                x_min: config.bounds_x_min,
                x_max: config.bounds_x_max,
                y_min: config.bounds_y_min,
                y_max: config.bounds_y_max,
                z_min: config.bounds_z_min,
                z_max: config.bounds_z_max,
            },
            forward: Vec3::new(config.forward_x, config.forward_y, config.forward_z),
        }
    }
}

impl From<&FlockConfig> for FlockSimConfig {
    fn from(config: &FlockConfig) -> Self {
        Self {
            separation_radius: config.separation_radius,
            cohesion_weight: config.cohesion_weight,
            separation_weight: config.separation_weight,
            alignment_weight: config.alignment_weight,
            bound_weight: config.bound_weight,
            max_speed: config.max_speed,
            bounds_x_min: config.bounds.x_min,
            bounds_x_max: config.bounds.x_max,
            bounds_y_min: config.bounds.y_min,
            bounds_y_max: config.bounds.y_max,
            bounds_z_min: config.bounds.z_min,
            bounds_z_max: config.bounds.z_max,
            forward_x: config.forward.x,
            forward_y: config.forward.y,
            forward_z: config.forward.z,
        }
    }
}

/// Position and rotation of one agent, written out for the host scene graph.
///
/// The rotation is axis-angle: rotate `angle` radians around
/// `(axis_x, axis_y, axis_z)` to turn the host's forward direction into the
/// agent's direction of travel.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FlockTransform {
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub axis_x: f32,
    pub axis_y: f32,
    pub axis_z: f32,
    pub angle: f32,
}

/// Write the default configuration into `out_config`.
///
/// # Safety
///
/// `out_config` must be null or a valid pointer to writable memory for one
/// `FlockSimConfig`.
#[no_mangle]
pub unsafe extern "C" fn flock_sim_default_config(
    out_config: *mut FlockSimConfig,
) -> FlockSimErrorCode {
    if out_config.is_null() {
        return track_error(&FfiError::null_pointer("out_config"));
    }
    out_config.write(FlockSimConfig::from(&FlockConfig::default()));
    clear_last_error();
    FlockSimErrorCode::Ok
}

/// Create a new flock of `agent_count` agents scattered over the square
/// `[-spread, spread]` at z = 0, seeded by `seed` for reproducible layouts.
///
/// `config` may be null to use the default tuning. On success writes the
/// new instance into `out_instance`; free it with `flock_sim_free`.
///
/// Fails with `DegenerateFlock` for `agent_count < 2` and
/// `InvalidParameter` for out-of-range configuration values.
///
/// # Safety
///
/// - `config` must be null or a valid pointer to a `FlockSimConfig`.
/// - `out_instance` must be a valid pointer to writable memory for one
///   pointer; it is only written on success.
#[no_mangle]
pub unsafe extern "C" fn flock_sim_new(
    agent_count: u32,
    spread: f32,
    seed: u64,
    config: *const FlockSimConfig,
    out_instance: *mut *mut FlockInstance,
) -> FlockSimErrorCode {
    if out_instance.is_null() {
        return track_error(&FfiError::null_pointer("out_instance"));
    }
    let flock_config = if config.is_null() {
        FlockConfig::default()
    } else {
        FlockConfig::from(*config)
    };

    let mut rng = StdRng::seed_from_u64(seed);
    match Flock::with_random_layout(agent_count as usize, spread, &mut rng, flock_config) {
        Ok(flock) => {
            let instance = Box::new(FlockInstance {
                flock: RwLock::new(flock),
            });
            out_instance.write(Box::into_raw(instance));
            clear_last_error();
            FlockSimErrorCode::Ok
        }
        Err(error) => {
            out_instance.write(ptr::null_mut());
            track_error(&FfiError::from(error))
        }
    }
}

/// Advance the flock by one frame.
///
/// Thread-safe: acquires the write lock for the update.
///
/// # Safety
///
/// `ptr` must be null or a valid pointer returned by `flock_sim_new` and
/// not yet freed.
#[no_mangle]
pub unsafe extern "C" fn flock_sim_step(ptr: *const FlockInstance) -> FlockSimErrorCode {
    let instance = match instance_from_ptr(ptr, "ptr") {
        Ok(instance) => instance,
        Err(error) => return track_error(&error),
    };
    track_result(|| {
        let mut flock = instance
            .flock
            .write()
            .map_err(|_| FfiError::lock_poisoned("flock"))?;
        flock.update();
        Ok(())
    })
}

/// Read the number of agents into `out_count`.
///
/// # Safety
///
/// - `ptr` must be null or a valid pointer returned by `flock_sim_new`.
/// - `out_count` must be a valid pointer to writable memory for one `u32`.
#[no_mangle]
pub unsafe extern "C" fn flock_sim_agent_count(
    ptr: *const FlockInstance,
    out_count: *mut u32,
) -> FlockSimErrorCode {
    if out_count.is_null() {
        return track_error(&FfiError::null_pointer("out_count"));
    }
    let instance = match instance_from_ptr(ptr, "ptr") {
        Ok(instance) => instance,
        Err(error) => return track_error(&error),
    };
    let count = match instance.flock.read() {
        Ok(flock) => flock.len() as u32,
        Err(_) => return track_error(&FfiError::lock_poisoned("flock")),
    };
    out_count.write(count);
    clear_last_error();
    FlockSimErrorCode::Ok
}

/// Copy every agent's position and orientation into `out_transforms`, in
/// stable agent order.
///
/// `capacity` is the number of `FlockTransform` slots at `out_transforms`;
/// fails with `BufferTooSmall` when the flock has more agents than that.
///
/// # Safety
///
/// - `ptr` must be null or a valid pointer returned by `flock_sim_new`.
/// - `out_transforms` must be a valid pointer to writable memory for
///   `capacity` consecutive `FlockTransform` values.
#[no_mangle]
pub unsafe extern "C" fn flock_sim_read_transforms(
    ptr: *const FlockInstance,
    out_transforms: *mut FlockTransform,
    capacity: u32,
) -> FlockSimErrorCode {
    if out_transforms.is_null() {
        return track_error(&FfiError::null_pointer("out_transforms"));
    }
    let instance = match instance_from_ptr(ptr, "ptr") {
        Ok(instance) => instance,
        Err(error) => return track_error(&error),
    };
    let out = std::slice::from_raw_parts_mut(out_transforms, capacity as usize);
    track_result(|| {
        let flock = instance
            .flock
            .read()
            .map_err(|_| FfiError::lock_poisoned("flock"))?;
        if flock.len() > out.len() {
            return Err(FfiError::buffer_too_small(flock.len(), out.len()));
        }
        for (slot, agent) in out.iter_mut().zip(flock.agents()) {
            let position = agent.position();
            let orientation = agent.orientation();
            *slot = FlockTransform {
                position_x: position.x,
                position_y: position.y,
                position_z: position.z,
                axis_x: orientation.axis.x,
                axis_y: orientation.axis.y,
                axis_z: orientation.axis.z,
                angle: orientation.angle,
            };
        }
        Ok(())
    })
}

/// Destroy an instance created by `flock_sim_new`. A null `ptr` is a no-op.
///
/// # Safety
///
/// `ptr` must be null or a valid pointer returned by `flock_sim_new`; it
/// must not be used after this call.
#[no_mangle]
pub unsafe extern "C" fn flock_sim_free(ptr: *mut FlockInstance) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}
