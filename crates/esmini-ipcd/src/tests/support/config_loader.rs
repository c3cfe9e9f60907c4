//! Test configuration loaders for scenarios covering success and failure
//! paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};

use esmini_ipc_config::{AcceptPolicy, BackendKind, Config, ListenEndpoint};

use crate::bootstrap::ConfigLoader;

/// Loader that serves one session on an ephemeral loopback port.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestConfigLoader;

impl TestConfigLoader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            listen: ListenEndpoint::tcp("127.0.0.1", 0),
            accept_policy: AcceptPolicy::Single,
            backend: BackendKind::Log,
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing an invalid listen endpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("esmini-ipcd"),
            OsString::from("--listen"),
            OsString::from("udp://127.0.0.1:9"),
        ];
        Config::load_from_iter(args)
    }
}
