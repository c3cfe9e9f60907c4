//! Native esmini backend bound through the library's C interface.

use std::ffi::{CString, c_char, c_int};
use std::sync::atomic::{AtomicBool, Ordering};

use esmini_ipc_config::BackendKind;
use tracing::debug;

use super::{
    BACKEND_TARGET, BackendError, InitSettings, ObjectHandle, ObjectPose, RecordSetting,
    SimulationBackend,
};

#[link(name = "esminiLib")]
unsafe extern "C" {
    #[link_name = "SE_Init"]
    fn se_init(
        osc_filename: *const c_char,
        disable_ctrls: c_int,
        use_viewer: c_int,
        threads: c_int,
        record: c_int,
    ) -> c_int;

    #[link_name = "SE_GetIdByName"]
    fn se_get_id_by_name(name: *const c_char) -> c_int;

    #[link_name = "SE_ReportObjectPosXYH"]
    fn se_report_object_pos_xyh(object_id: c_int, timestamp: f32, x: f32, y: f32, h: f32)
    -> c_int;

    #[link_name = "SE_Step"]
    fn se_step() -> c_int;

    #[link_name = "SE_Close"]
    fn se_close();
}

/// The library keeps one global scenario per process.
static ENGINE_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Backend wrapping the process-wide esmini engine.
#[derive(Debug)]
pub struct EsminiBackend {
    _private: (),
}

impl EsminiBackend {
    /// Claims the process-wide engine.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unavailable`] when another `EsminiBackend` is
    /// alive in this process.
    pub fn claim() -> Result<Self, BackendError> {
        if ENGINE_CLAIMED.swap(true, Ordering::SeqCst) {
            return Err(BackendError::Unavailable {
                kind: BackendKind::Esmini,
                reason: String::from("the engine is already claimed in this process"),
            });
        }
        Ok(Self { _private: () })
    }
}

impl Drop for EsminiBackend {
    fn drop(&mut self) {
        ENGINE_CLAIMED.store(false, Ordering::SeqCst);
    }
}

fn c_string(operation: &'static str, value: &str) -> Result<CString, BackendError> {
    CString::new(value).map_err(|error| BackendError::InvalidArgument {
        operation,
        message: error.to_string(),
    })
}

fn check_status(operation: &'static str, status: c_int) -> Result<(), BackendError> {
    if status < 0 {
        return Err(BackendError::Status { operation, status });
    }
    Ok(())
}

/// The C interface takes single-precision coordinates.
fn narrow(value: f64) -> f32 {
    value as f32
}

impl SimulationBackend for EsminiBackend {
    fn init(&mut self, settings: &InitSettings) -> Result<(), BackendError> {
        let record = match &settings.record {
            RecordSetting::Flag(flag) => *flag,
            RecordSetting::Path(_) => {
                return Err(BackendError::InvalidArgument {
                    operation: "SE_Init",
                    message: String::from("the native engine accepts only a numeric record flag"),
                });
            }
        };
        let path = c_string("SE_Init", &settings.scenario_path)?;
        // SAFETY: `path` outlives the call and is NUL-terminated.
        let status = unsafe {
            se_init(
                path.as_ptr(),
                settings.disable_ctrls,
                settings.use_viewer,
                settings.threads,
                record,
            )
        };
        debug!(target: BACKEND_TARGET, status, "SE_Init returned");
        check_status("SE_Init", status)
    }

    fn lookup_handle(&mut self, name: &str) -> Result<ObjectHandle, BackendError> {
        let c_name = c_string("SE_GetIdByName", name)?;
        // SAFETY: `c_name` outlives the call and is NUL-terminated.
        let id = unsafe { se_get_id_by_name(c_name.as_ptr()) };
        if id < 0 {
            return Err(BackendError::UnknownObject {
                name: name.to_owned(),
            });
        }
        Ok(ObjectHandle::new(id))
    }

    fn report_pose(
        &mut self,
        handle: ObjectHandle,
        pose: &ObjectPose,
    ) -> Result<(), BackendError> {
        // SAFETY: plain value arguments.
        let status = unsafe {
            se_report_object_pos_xyh(
                handle.raw(),
                narrow(pose.timestamp),
                narrow(pose.x),
                narrow(pose.y),
                narrow(pose.h),
            )
        };
        check_status("SE_ReportObjectPosXYH", status)
    }

    fn step(&mut self) -> Result<(), BackendError> {
        // SAFETY: no arguments; the library guards its own global state.
        let status = unsafe { se_step() };
        check_status("SE_Step", status)
    }

    fn close(&mut self) -> Result<(), BackendError> {
        // SAFETY: no arguments; closing an uninitialised engine is a no-op.
        unsafe { se_close() };
        Ok(())
    }
}
