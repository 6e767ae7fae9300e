use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use log::{info, warn};
use crate::config::Config;
use self::file_system::FileSystemAdapter;
use self::handlers::handle_client;

pub use self::access::AccessPolicy;
pub use self::content_manager::ContentManager;
pub use self::mime::MimeTable;

/// Runs the accept loop until `shutdown` is set.
///
/// The flag is checked whenever a connection arrives, so whoever sets it
/// has to connect once more to wake the loop up. Every connection gets a
/// thread of its own, so a client that never sends anything only ever
/// holds up itself.
pub fn serve(listener: TcpListener, config: Arc<Config>, shutdown: Arc<AtomicBool>) {
    let fs_adapter = FileSystemAdapter::new(&config.root);
    let adapter_rc = Arc::new(fs_adapter);

    // accept connections and process each on its own thread
    for stream_ref in listener.incoming() {
        if shutdown.load(Ordering::SeqCst) {
            break
        }
        match stream_ref {
            Ok(stream) => {
                let peer = match stream.peer_addr() {
                    Ok(peer) => peer,
                    Err(e) => {
                        warn!("Dropping connection without peer address:{}", e);
                        continue
                    }
                };
                let local_rc = adapter_rc.clone();
                let local_config = config.clone();
                let spawned = thread::Builder::new().spawn(move || {
                    handle_client(stream, peer, &local_config, local_rc.as_ref())
                });
                if let Err(e) = spawned {
                    warn!("Error spawning handler for {}:{}", peer, e);
                }
            },
            Err(e) => warn!("Error with stream:{}", e)
        }
    }
    info!("Server closed");
}

pub mod access;
pub mod content_manager;
pub mod file_system;
pub mod handlers;
pub mod http;
pub mod mime;
