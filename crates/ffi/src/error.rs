use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use flock_sim_core::FlockError;

/// FFI error codes returned by flock simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlockSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Null pointer passed where non-null required.
    NullPointer = 1,

    /// Internal lock was poisoned by a panic in another thread.
    LockPoisoned = 2,

    /// A parameter failed validation (non-finite value, inverted bounds,
    /// zero forward direction, negative spread, ...).
    InvalidParameter = 3,

    /// Flock size below the minimum of 2 agents.
    DegenerateFlock = 4,

    /// Caller-supplied output buffer is too small for the flock.
    BufferTooSmall = 5,
}

/// Error carried between FFI helpers: a code for the C caller plus a
/// human-readable message stored for later retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FfiError {
    code: FlockSimErrorCode,
    msg: String,
}

impl FfiError {
    /// Error for a null pointer passed where non-null is required.
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FlockSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Error for a poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: FlockSimErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Error for an output buffer smaller than the flock.
    pub fn buffer_too_small(needed: usize, capacity: usize) -> Self {
        Self {
            code: FlockSimErrorCode::BufferTooSmall,
            msg: format!("Output buffer holds {capacity} transforms, flock has {needed}"),
        }
    }

    pub fn code(&self) -> FlockSimErrorCode {
        self.code
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<FlockError> for FfiError {
    fn from(error: FlockError) -> Self {
        let code = match &error {
            FlockError::DegenerateFlock { .. } => FlockSimErrorCode::DegenerateFlock,
            FlockError::ZeroInitialVelocity { .. }
            | FlockError::NonFiniteState { .. }
            | FlockError::InvalidConfig(_) => FlockSimErrorCode::InvalidParameter,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// Allows callers to retrieve diagnostic information after a failed call.
    /// The CString is stored to prevent memory leaks when returning raw pointers.
    static LAST_ERROR: RefCell<(Option<CString>, FlockSimErrorCode)> =
        const { RefCell::new((None, FlockSimErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage.
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FlockSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage.
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FlockSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns a borrowed pointer to the message, or null when no error has
/// occurred on this thread. The pointer stays valid until the next FFI call
/// on the same thread that sets or clears the error; do not free it.
#[no_mangle]
pub extern "C" fn flock_sim_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |s| s.as_ptr()))
}

/// Retrieve the most recent FFI error code for this thread.
///
/// Returns `FlockSimErrorCode::Ok` (0) when no error has occurred.
#[no_mangle]
pub extern "C" fn flock_sim_get_last_error_code() -> FlockSimErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
