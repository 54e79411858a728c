use crate::error::{with_last_error_mut, ImpactSimError, ImpactSimErrorCode};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl ImpactSimError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl ImpactSimError) -> ImpactSimErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = ImpactSimErrorCode::Ok;
    });
}

/// Read an optional UTF-8 C string. Null gives `Ok(None)`.
///
/// # Safety
/// `ptr` must be null or point to a valid null-terminated string.
pub(crate) unsafe fn optional_str(ptr: *const c_char) -> Result<Option<String>, std::str::Utf8Error> {
    if ptr.is_null() {
        return Ok(None);
    }
    let s = CStr::from_ptr(ptr).to_str()?;
    Ok((!s.trim().is_empty()).then(|| s.trim().to_string()))
}
