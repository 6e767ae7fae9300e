//! A minimal static HTTP file server.
//!
//! Files below a root directory are served by request path, labelled with
//! a content type derived from their extension. Access can be limited to a
//! list of client addresses.
//!
//! Request paths are not normalized. A target containing `..` segments can
//! reach files outside the root. Run the server only where that is
//! acceptable.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use log::{error, info};

pub use self::config::Config;
pub use self::error::{ExitError, Failed};
pub use self::server::{AccessPolicy, ContentManager, MimeTable};

pub mod config;
pub mod error;
pub mod logger;
pub mod server;


//------------ ServerHandle --------------------------------------------------

/// A server running on its own thread.
pub struct ServerHandle {
    pub ip: IpAddr,
    pub port: u16,
    pub handle: JoinHandle<()>,
    shutdown: Arc<AtomicBool>,
}

impl ServerHandle {
    /// Blocks until the server has stopped.
    pub fn wait(self) -> Result<(), Failed> {
        self.handle.join().map_err(|_| {
            error!("Server thread panicked");
            Failed
        })
    }

    /// Stops accepting connections.
    ///
    /// Requests already being handled run to completion on their own.
    pub fn shutdown(self) -> Result<(), Failed> {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the accept loop. It is fine for this to fail if the loop is
        // already gone.
        let _ = TcpStream::connect(self.wake_address());
        self.wait()
    }

    fn wake_address(&self) -> SocketAddr {
        let ip = match self.ip {
            IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            ip => ip
        };
        SocketAddr::new(ip, self.port)
    }
}


//------------ start_server --------------------------------------------------

/// Binds the listener and starts serving on a new thread.
///
/// Passing port 0 picks a free port, which is then available through the
/// returned handle.
pub fn start_server(config: Config, address: &str, port: u16) -> Result<ServerHandle, ExitError> {
    info!("binding to:{}:{}", address, port);
    let listener = match TcpListener::bind((address, port)) {
        Ok(listener) => listener,
        Err(err) => {
            error!("Error starting server: {}", err);
            return Err(ExitError::Listener)
        }
    };
    let local = match listener.local_addr() {
        Ok(addr) => addr,
        Err(err) => {
            error!("Error starting server: {}", err);
            return Err(ExitError::Listener)
        }
    };
    info!("root={}", config.root.display());

    let shutdown = Arc::new(AtomicBool::new(false));
    let config = Arc::new(config);
    let handle = spawn_server(listener, config, shutdown.clone()).map_err(|err| {
        error!("Error starting server: {}", err);
        ExitError::Listener
    })?;
    Ok(ServerHandle { ip: local.ip(), port: local.port(), handle, shutdown })
}

fn spawn_server(
    listener: TcpListener, config: Arc<Config>, shutdown: Arc<AtomicBool>
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("listener".into())
        .spawn(move || server::serve(listener, config, shutdown))
}
