//! Listener implementation for the command socket.

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use esmini_ipc_config::{AcceptPolicy, ListenEndpoint};

use super::{ConnectionHandler, LISTENER_TARGET, ListenerError};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(25);
const ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// Listener bound to a TCP endpoint.
#[derive(Debug)]
pub(crate) struct SocketListener {
    endpoint: ListenEndpoint,
    listener: TcpListener,
}

impl SocketListener {
    pub(crate) fn bind(endpoint: &ListenEndpoint) -> Result<Self, ListenerError> {
        let addr = endpoint.resolve()?;
        let listener =
            TcpListener::bind(addr).map_err(|source| ListenerError::BindTcp { addr, source })?;
        Ok(Self {
            endpoint: endpoint.clone(),
            listener,
        })
    }

    pub(crate) fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.local_addr().ok()
    }

    /// Starts accepting on a background thread.
    ///
    /// Connections are handled one at a time on the accept thread. Under
    /// [`AcceptPolicy::Single`] the thread exits after the first connection
    /// has been handled.
    pub(crate) fn start(
        self,
        handler: Arc<dyn ConnectionHandler>,
        policy: AcceptPolicy,
    ) -> Result<ListenerHandle, ListenerError> {
        self.listener
            .set_nonblocking(true)
            .map_err(|source| ListenerError::NonBlocking { source })?;
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = Arc::clone(&shutdown);
        let handle = thread::spawn(move || run_accept_loop(&self, &shutdown_flag, &*handler, policy));
        Ok(ListenerHandle {
            shutdown,
            handle: Some(handle),
        })
    }
}

/// Handle to the background listener thread.
pub(crate) struct ListenerHandle {
    shutdown: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ListenerHandle {
    /// Flag that stops the accept loop once set.
    pub(crate) fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub(crate) fn join(mut self) -> Result<(), ListenerError> {
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(()) => Ok(()),
                Err(_) => Err(ListenerError::ThreadPanic),
            }
        } else {
            Ok(())
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        // A joined handle leaves the flag as the signal handlers set it.
        if self.handle.is_some() {
            self.shutdown.store(true, Ordering::SeqCst);
        }
    }
}

fn run_accept_loop(
    listener: &SocketListener,
    shutdown: &AtomicBool,
    handler: &dyn ConnectionHandler,
    policy: AcceptPolicy,
) {
    info!(
        target: LISTENER_TARGET,
        endpoint = %listener.endpoint,
        local_addr = ?listener.local_addr(),
        %policy,
        "socket listener active"
    );
    let mut last_error = None::<io::ErrorKind>;
    while !shutdown.load(Ordering::SeqCst) {
        match accept_connection(&listener.listener) {
            Ok(Some((stream, peer))) => {
                last_error = None;
                info!(target: LISTENER_TARGET, %peer, "connection accepted");
                handler.handle(stream, peer);
                if policy.stops_after_first_session() {
                    info!(
                        target: LISTENER_TARGET,
                        "session finished under single-session policy"
                    );
                    break;
                }
            }
            Ok(None) => thread::sleep(ACCEPT_BACKOFF),
            Err(error) => {
                let kind = error.kind();
                if last_error != Some(kind) {
                    warn!(
                        target: LISTENER_TARGET,
                        error = %error,
                        "socket accept error"
                    );
                }
                last_error = Some(kind);
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }
    info!(target: LISTENER_TARGET, "socket listener stopped");
}

fn accept_connection(listener: &TcpListener) -> io::Result<Option<(TcpStream, SocketAddr)>> {
    match listener.accept() {
        Ok((stream, peer)) => {
            stream.set_nonblocking(false)?;
            Ok(Some((stream, peer)))
        }
        Err(error) if error.kind() == io::ErrorKind::WouldBlock => Ok(None),
        Err(error) => Err(error),
    }
}
