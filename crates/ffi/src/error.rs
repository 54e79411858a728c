use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use impact_sim_core::ImpactError;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait ImpactSimError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> ImpactSimErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `ImpactSimError` for the FFI failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultImpactSimError {
    code: ImpactSimErrorCode,
    msg: String,
}

impl DefaultImpactSimError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"params"`, `"out_json"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: ImpactSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for invalid parameter.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: ImpactSimErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for a failed calculation or report serialization.
    pub fn calculation_failed(message: String) -> Self {
        Self {
            code: ImpactSimErrorCode::CalculationFailed,
            msg: message,
        }
    }

    /// Create error for an async runtime or HTTP client that could not be started.
    pub fn runtime_unavailable(message: String) -> Self {
        Self {
            code: ImpactSimErrorCode::RuntimeUnavailable,
            msg: message,
        }
    }
}

impl From<ImpactError> for DefaultImpactSimError {
    fn from(error: ImpactError) -> Self {
        if error.is_input_error() {
            Self::invalid_parameter(error.to_string())
        } else {
            Self::calculation_failed(error.to_string())
        }
    }
}

impl ImpactSimError for DefaultImpactSimError {
    fn code(&self) -> ImpactSimErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by impact simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter: non-finite number or malformed string.
    InvalidParameter = 2,

    /// The impact model produced no usable result.
    CalculationFailed = 3,

    /// The async runtime or HTTP client could not be created.
    RuntimeUnavailable = 4,
}

impl From<DefaultImpactSimError> for ImpactSimErrorCode {
    fn from(error: DefaultImpactSimError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    static LAST_ERROR: RefCell<(Option<CString>, ImpactSimErrorCode)> = const { RefCell::new((None, ImpactSimErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, ImpactSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, ImpactSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// char* json = NULL;
/// if (impact_sim_compute(&params, &json) != Ok) {
///     const char* error = impact_sim_get_last_error();
///     if (error) {
///         printf("Impact calculation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn impact_sim_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `ImpactSimErrorCode::Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn impact_sim_get_last_error_code() -> ImpactSimErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
