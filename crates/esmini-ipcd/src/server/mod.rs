//! Runs a bootstrapped server until its accept policy or a signal stops it.

mod errors;
mod shutdown;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tracing::info;

use crate::backend::SystemBackendFactory;
use crate::bootstrap::{Server, SystemConfigLoader, bootstrap_with};
use crate::dispatch::CommandDispatcher;
use crate::health::StructuredHealthReporter;
use crate::transport::{SessionConnectionHandler, SocketListener};

pub use self::errors::{LaunchError, ServeError};
pub use self::shutdown::{ShutdownError, ShutdownSignal, SystemShutdownSignal};

const SERVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::server");

/// Loads configuration from the process, bootstraps, and serves.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap or serving fails.
pub fn run_server() -> Result<(), LaunchError> {
    let reporter = Arc::new(StructuredHealthReporter::new());
    let server = bootstrap_with(&SystemConfigLoader, reporter, &SystemBackendFactory)?;
    server.serve()?;
    Ok(())
}

impl Server {
    /// Binds the configured endpoint and serves sessions one at a time.
    ///
    /// Returns after the first session under the `single` accept policy, or
    /// once `SIGINT`/`SIGTERM` arrives while no session is active.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when the listener cannot be bound or started,
    /// or signal handlers cannot be installed.
    pub fn serve(self) -> Result<(), ServeError> {
        let listener = SocketListener::bind(self.config.listen())?;
        self.serve_with(listener, &SystemShutdownSignal)
    }

    pub(crate) fn serve_with(
        self,
        listener: SocketListener,
        signal: &dyn ShutdownSignal,
    ) -> Result<(), ServeError> {
        let policy = self.config.accept_policy();
        let handler = Arc::new(SessionConnectionHandler::new(
            CommandDispatcher::new(self.backend),
            self.config.read_timeout(),
            self.reporter,
        ));
        let handle = listener.start(handler, policy)?;
        let requested = handle.shutdown_flag();
        signal.install(Arc::clone(&requested))?;
        handle.join()?;
        if requested.load(Ordering::SeqCst) {
            info!(target: SERVER_TARGET, "shutdown signal received");
        }
        info!(target: SERVER_TARGET, %policy, "server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpStream;
    use std::sync::atomic::AtomicBool;
    use std::thread;

    use esmini_ipc_config::{AcceptPolicy, Config, ListenEndpoint};

    use super::*;
    use crate::backend::MockSimulationBackend;
    use crate::client::CommandSender;
    use crate::dispatch::{CommandRequest, SharedBackend};
    use crate::tests::support::{NoShutdownSignal, RecordingHealthReporter};

    struct ImmediateShutdown;

    impl ShutdownSignal for ImmediateShutdown {
        fn install(&self, requested: Arc<AtomicBool>) -> Result<(), ShutdownError> {
            requested.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn server(policy: AcceptPolicy, mock: MockSimulationBackend) -> Server {
        Server {
            config: Config {
                listen: ListenEndpoint::tcp("127.0.0.1", 0),
                accept_policy: policy,
                ..Config::default()
            },
            backend: SharedBackend::new(Box::new(mock)),
            telemetry: crate::telemetry::TelemetryHandle,
            reporter: Arc::new(RecordingHealthReporter::default()),
        }
    }

    #[test]
    fn single_policy_returns_after_first_session() {
        let server = server(AcceptPolicy::Single, {
            let mut mock = MockSimulationBackend::new();
            mock.expect_step().once().returning(|| Ok(()));
            mock.expect_close().once().returning(|| Ok(()));
            mock
        });
        let listener = SocketListener::bind(server.config().listen()).expect("bind");
        let addr = listener.local_addr().expect("local address");

        let client = thread::spawn(move || {
            let mut sender = CommandSender::new(TcpStream::connect(addr).expect("connect"));
            sender.send(&CommandRequest::step()).expect("send step");
            sender.send(&CommandRequest::close()).expect("send close");
        });

        server.serve_with(listener, &NoShutdownSignal).expect("serve");
        client.join().expect("join client");
    }

    #[test]
    fn shutdown_request_stops_persistent_server() {
        let server = server(AcceptPolicy::Persistent, MockSimulationBackend::new());
        let listener = SocketListener::bind(server.config().listen()).expect("bind");
        server
            .serve_with(listener, &ImmediateShutdown)
            .expect("serve until shutdown");
    }
}
