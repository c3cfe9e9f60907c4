//! Recording backend for end-to-end scenarios.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use esmini_ipc_config::BackendKind;

use crate::backend::{
    BackendError, BackendFactory, InitSettings, ObjectHandle, ObjectPose, SimulationBackend,
};

/// One call observed by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Init(InitSettings),
    ReportPose { handle: ObjectHandle, pose: ObjectPose },
    Step,
    Close,
}

/// Backend that records every call and knows a fixed set of objects.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<BackendCall>>>,
    objects: HashMap<String, ObjectHandle>,
}

impl RecordingBackend {
    /// Builds a backend that resolves the given object names in order.
    #[must_use]
    pub fn with_objects(names: &[&str]) -> Self {
        let objects = names
            .iter()
            .zip(0..)
            .map(|(name, id)| ((*name).to_owned(), ObjectHandle::new(id)))
            .collect();
        Self {
            calls: Arc::default(),
            objects,
        }
    }

    /// Snapshot of the calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().expect("backend calls mutex poisoned").clone()
    }

    fn record(&self, call: BackendCall) {
        self.calls
            .lock()
            .expect("backend calls mutex poisoned")
            .push(call);
    }
}

impl SimulationBackend for RecordingBackend {
    fn init(&mut self, settings: &InitSettings) -> Result<(), BackendError> {
        self.record(BackendCall::Init(settings.clone()));
        Ok(())
    }

    fn lookup_handle(&mut self, name: &str) -> Result<ObjectHandle, BackendError> {
        self.objects
            .get(name)
            .copied()
            .ok_or_else(|| BackendError::UnknownObject {
                name: name.to_owned(),
            })
    }

    fn report_pose(&mut self, handle: ObjectHandle, pose: &ObjectPose) -> Result<(), BackendError> {
        self.record(BackendCall::ReportPose {
            handle,
            pose: *pose,
        });
        Ok(())
    }

    fn step(&mut self) -> Result<(), BackendError> {
        self.record(BackendCall::Step);
        Ok(())
    }

    fn close(&mut self) -> Result<(), BackendError> {
        self.record(BackendCall::Close);
        Ok(())
    }
}

/// Factory handing out clones of one [`RecordingBackend`], or failing.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackendFactory {
    backend: RecordingBackend,
    failure: Option<String>,
}

impl RecordingBackendFactory {
    #[must_use]
    pub fn new(backend: RecordingBackend) -> Self {
        Self {
            backend,
            failure: None,
        }
    }

    /// Makes every `create` call fail with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            backend: RecordingBackend::default(),
            failure: Some(reason.into()),
        }
    }
}

impl BackendFactory for RecordingBackendFactory {
    fn create(&self, kind: BackendKind) -> Result<Box<dyn SimulationBackend>, BackendError> {
        match &self.failure {
            Some(reason) => Err(BackendError::Unavailable {
                kind,
                reason: reason.clone(),
            }),
            None => Ok(Box::new(self.backend.clone())),
        }
    }
}
