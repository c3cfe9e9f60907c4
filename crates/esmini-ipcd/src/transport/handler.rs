//! Connection handling for accepted TCP streams.

use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::dispatch::CommandDispatcher;
use crate::health::HealthReporter;
use crate::session::Session;

use super::LISTENER_TARGET;

/// Handles accepted socket connections.
pub(crate) trait ConnectionHandler: Send + Sync + 'static {
    /// Handles a single connection to completion. Implementations should
    /// avoid panicking.
    fn handle(&self, stream: TcpStream, peer: SocketAddr);
}

/// Runs one command session per accepted connection.
pub(crate) struct SessionConnectionHandler {
    dispatcher: CommandDispatcher,
    read_timeout: Option<Duration>,
    reporter: Arc<dyn HealthReporter>,
}

impl SessionConnectionHandler {
    pub(crate) fn new(
        dispatcher: CommandDispatcher,
        read_timeout: Option<Duration>,
        reporter: Arc<dyn HealthReporter>,
    ) -> Self {
        Self {
            dispatcher,
            read_timeout,
            reporter,
        }
    }
}

impl ConnectionHandler for SessionConnectionHandler {
    fn handle(&self, stream: TcpStream, peer: SocketAddr) {
        if let Err(error) = stream.set_read_timeout(self.read_timeout) {
            warn!(
                target: LISTENER_TARGET,
                %peer,
                %error,
                "failed to apply read timeout; dropping connection"
            );
            return;
        }
        self.reporter.session_opened(peer);
        let outcome = Session::new(stream, self.dispatcher.clone()).run();
        self.reporter.session_closed(peer, &outcome);
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::backend::MockSimulationBackend;
    use crate::client::CommandSender;
    use crate::dispatch::{CommandRequest, SharedBackend};
    use crate::tests::support::{HealthEvent, RecordingHealthReporter};

    fn handler_with(
        mock: MockSimulationBackend,
        read_timeout: Option<Duration>,
    ) -> (Arc<RecordingHealthReporter>, SessionConnectionHandler) {
        let reporter = Arc::new(RecordingHealthReporter::default());
        let dispatcher = CommandDispatcher::new(SharedBackend::new(Box::new(mock)));
        let handler = SessionConnectionHandler::new(dispatcher, read_timeout, reporter.clone());
        (reporter, handler)
    }

    #[test]
    fn session_runs_until_close_command() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind listener");
        let addr = listener.local_addr().expect("listener address");
        let client = thread::spawn(move || {
            let mut sender = CommandSender::new(TcpStream::connect(addr).expect("connect"));
            sender.send(&CommandRequest::step()).expect("send step");
            sender.send(&CommandRequest::close()).expect("send close");
        });

        let mut mock = MockSimulationBackend::new();
        mock.expect_step().once().returning(|| Ok(()));
        mock.expect_close().once().returning(|| Ok(()));
        let (reporter, handler) = handler_with(mock, None);

        let (stream, peer) = listener.accept().expect("accept connection");
        handler.handle(stream, peer);
        client.join().expect("join client");

        assert_eq!(
            reporter.events(),
            vec![
                HealthEvent::SessionOpened(peer),
                HealthEvent::SessionClosed {
                    peer,
                    outcome: "closed_by_command",
                },
            ]
        );
    }

    #[test]
    fn silent_peer_times_out_when_configured() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind listener");
        let addr = listener.local_addr().expect("listener address");
        let client = TcpStream::connect(addr).expect("connect");
        let (reporter, handler) =
            handler_with(MockSimulationBackend::new(), Some(Duration::from_millis(50)));

        let (stream, peer) = listener.accept().expect("accept connection");
        handler.handle(stream, peer);
        drop(client);

        assert!(reporter.events().contains(&HealthEvent::SessionClosed {
            peer,
            outcome: "closed_by_error",
        }));
    }
}
