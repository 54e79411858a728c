//! C ABI for the impact effects model
//!
//! Every entry point takes an [`ImpactParams`] and writes the JSON report
//! (the same document the map UI consumes) into a newly allocated C string
//! that the caller releases with [`impact_sim_string_free`].
//!
//! Failures return a non-zero [`ImpactSimErrorCode`]; the message is
//! available from [`impact_sim_get_last_error`] on the same thread.

mod error;
mod helpers;

pub use error::{impact_sim_get_last_error, impact_sim_get_last_error_code, ImpactSimErrorCode};

use error::DefaultImpactSimError;
use helpers::{clear_last_error, optional_str, track_error};
use impact_sim_core::lookup::{FixedEnvironment, Unavailable};
use impact_sim_core::{
    EnvironmentResolver, ImpactOrchestrator, ImpactRequest, PopulationResolver,
};
use std::ffi::CString;
use std::os::raw::c_char;

/// Impact description passed from C
///
/// `material` may be null (density then follows from the speed). `is_water`
/// is -1 when unknown, 0 for land and 1 for water. A `water_depth` of 0 or
/// less uses the model default.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ImpactParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Impactor diameter (m)
    pub diameter: f64,
    /// Entry speed (m/s)
    pub speed: f64,
    /// Entry angle from horizontal (degrees)
    pub angle_deg: f64,
    pub material: *const c_char,
    pub is_water: i32,
    pub water_depth: f64,
}

impl ImpactParams {
    /// # Safety
    /// `material` must be null or a valid null-terminated string.
    unsafe fn to_request(self) -> Result<ImpactRequest, DefaultImpactSimError> {
        let mut request = ImpactRequest::new(
            self.latitude,
            self.longitude,
            self.diameter,
            self.speed,
            self.angle_deg,
        );
        request.material = optional_str(self.material).map_err(|e| {
            DefaultImpactSimError::invalid_parameter(format!("material is not UTF-8: {e}"))
        })?;
        request.is_water = match self.is_water {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        };
        request.water_depth = (self.water_depth > 0.0).then_some(self.water_depth);
        Ok(request)
    }
}

fn run_blocking<E, P>(
    orchestrator: &ImpactOrchestrator<E, P>,
    request: &ImpactRequest,
) -> Result<CString, DefaultImpactSimError>
where
    E: EnvironmentResolver,
    P: PopulationResolver,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| DefaultImpactSimError::runtime_unavailable(e.to_string()))?;
    let report = runtime.block_on(orchestrator.run(request))?;
    let json = report
        .to_json()
        .map_err(|e| DefaultImpactSimError::calculation_failed(e.to_string()))?;
    CString::new(json).map_err(|e| DefaultImpactSimError::calculation_failed(e.to_string()))
}

/// # Safety
/// Both pointers must be null or valid for their access.
unsafe fn compute_with<F>(
    params: *const ImpactParams,
    out_json: *mut *mut c_char,
    run: F,
) -> ImpactSimErrorCode
where
    F: FnOnce(&ImpactRequest) -> Result<CString, DefaultImpactSimError>,
{
    if params.is_null() {
        return track_error(&DefaultImpactSimError::null_pointer("params"));
    }
    if out_json.is_null() {
        return track_error(&DefaultImpactSimError::null_pointer("out_json"));
    }
    *out_json = std::ptr::null_mut();

    let result = (*params).to_request().and_then(|request| run(&request));
    match result {
        Ok(json) => {
            *out_json = json.into_raw();
            clear_last_error();
            ImpactSimErrorCode::Ok
        }
        Err(error) => {
            tracing::warn!(error = ?error, "Impact calculation failed across FFI");
            track_error(&error)
        }
    }
}

/// Compute an impact without network access
///
/// The land/water flag comes from `params.is_water` (unknown means land) and
/// is reported as an override. Casualties are reported as null.
///
/// # Returns
/// - `Ok` with `*out_json` set to the report
/// - `NullPointer` if `params` or `out_json` is null
/// - `InvalidParameter` for non-finite numbers or a non-UTF-8 material
/// - `CalculationFailed` if the model produced no finite result
///
/// # Safety
/// `params` must point to a valid `ImpactParams`, `out_json` to writable storage.
/// Free the returned string with `impact_sim_string_free`.
#[no_mangle]
pub unsafe extern "C" fn impact_sim_compute(
    params: *const ImpactParams,
    out_json: *mut *mut c_char,
) -> ImpactSimErrorCode {
    compute_with(params, out_json, |request| {
        let is_water = request.is_water.unwrap_or(false);
        let request = request.clone().with_water(is_water, request.water_depth);
        run_blocking(
            &ImpactOrchestrator::new(FixedEnvironment(is_water), Unavailable),
            &request,
        )
    })
}

/// Compute an impact using the geodata service for land/water and population
///
/// `base_url` may be null to use `IMPACT_GEODATA_URL` or the built-in default.
/// Blocks the calling thread for up to the lookup timeouts.
///
/// # Safety
/// Same as `impact_sim_compute`; `base_url` must be null or a valid string.
#[cfg(feature = "http")]
#[no_mangle]
pub unsafe extern "C" fn impact_sim_compute_online(
    params: *const ImpactParams,
    base_url: *const c_char,
    out_json: *mut *mut c_char,
) -> ImpactSimErrorCode {
    use impact_sim_core::GeodataConfig;

    let config = match optional_str(base_url) {
        Ok(Some(url)) => GeodataConfig::with_base_url(url),
        Ok(None) => GeodataConfig::from_env(),
        Err(e) => {
            return track_error(&DefaultImpactSimError::invalid_parameter(format!(
                "base_url is not UTF-8: {e}"
            )))
        }
    };

    compute_with(params, out_json, |request| {
        let orchestrator = ImpactOrchestrator::online(&config)
            .map_err(|e| DefaultImpactSimError::runtime_unavailable(e.to_string()))?;
        run_blocking(&orchestrator, request)
    })
}

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
/// `s` must come from `impact_sim_compute*` and not have been freed already.
#[no_mangle]
pub unsafe extern "C" fn impact_sim_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
