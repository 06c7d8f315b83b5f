use crate::error::{with_last_error_mut, FfiError, FlockSimErrorCode};
use crate::instance::FlockInstance;
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Internal helper for FFI functions to record failure details.
pub(crate) fn set_last_error(error: &FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record an error in thread-local storage and return its code.
#[inline]
pub(crate) fn track_error(error: &FfiError) -> FlockSimErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations so stale diagnostics never leak.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FlockSimErrorCode::Ok;
    });
}

/// Run an FFI operation, mapping its outcome onto the thread-local error
/// protocol: clear on success, record on failure. Returns the C error code.
pub(crate) fn track_result<F>(operation: F) -> FlockSimErrorCode
where
    F: FnOnce() -> Result<(), FfiError>,
{
    match operation() {
        Ok(()) => {
            clear_last_error();
            FlockSimErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow the instance behind a raw pointer.
///
/// Safety: `ptr` must be null or a pointer previously returned by
/// `flock_sim_new` and not yet freed.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const FlockInstance,
    param_name: &str,
) -> Result<&'a FlockInstance, FfiError> {
    ptr.as_ref().ok_or_else(|| FfiError::null_pointer(param_name))
}
