//! TCP server for the seating service
//!
//! Each connection is served by its own task and sends any number of
//! requests, each answered in order. Database work runs on the blocking
//! pool so the accept loop is never stalled by SQLite.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::AsyncWrite;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use seatwise_core::{Database, SeatingService};

use crate::error::{Error, Result};
use crate::frame::{read_frame, write_frame};
use crate::protocol::{Request, Response};

/// Seating server handle
pub struct Server {
    addr: SocketAddr,
    shutdown_tx: broadcast::Sender<()>,
}

impl Server {
    /// Bind to `addr` and start serving requests against `db`
    pub async fn start(addr: SocketAddr, db: Arc<Mutex<Database>>) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let bound_addr = listener.local_addr()?;

        info!(addr = %bound_addr, "Server started");

        let (shutdown_tx, _) = broadcast::channel(1);
        tokio::spawn(accept_loop(listener, db, shutdown_tx.clone()));

        Ok(Server {
            addr: bound_addr,
            shutdown_tx,
        })
    }

    /// Get the server's bound address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and close open ones
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
        info!("Server shutdown initiated");
    }
}

/// Accept incoming connections
async fn accept_loop(
    listener: TcpListener,
    db: Arc<Mutex<Database>>,
    shutdown_tx: broadcast::Sender<()>,
) {
    let mut shutdown_rx = shutdown_tx.subscribe();
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, addr)) => {
                        debug!(addr = %addr, "New connection");
                        tokio::spawn(handle_connection(
                            stream,
                            addr,
                            db.clone(),
                            shutdown_tx.subscribe(),
                        ));
                    }
                    Err(e) => {
                        error!(error = %e, "Accept failed");
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("Accept loop shutting down");
                break;
            }
        }
    }
}

/// Serve one client until it disconnects or the server shuts down
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    db: Arc<Mutex<Database>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let (mut reader, mut writer) = tokio::io::split(stream);

    loop {
        let frame = tokio::select! {
            frame = read_frame::<_, Request>(&mut reader) => frame,
            _ = shutdown_rx.recv() => break,
        };

        let response = match frame {
            Ok(request) => {
                debug!(addr = %addr, request = request.kind(), "Request received");
                dispatch(&db, request).await
            }
            Err(Error::Decode(e)) => {
                warn!(addr = %addr, error = %e, "Undecodable request");
                Response::error("bad_request", e)
            }
            Err(Error::ConnectionClosed) => {
                debug!(addr = %addr, "Connection closed");
                break;
            }
            Err(e) => {
                warn!(addr = %addr, error = %e, "Read error");
                break;
            }
        };

        if let Err(e) = send_response(&mut writer, &response).await {
            debug!(addr = %addr, error = %e, "Write failed");
            break;
        }
    }
}

/// Write a response, replacing one too large to frame with an error.
///
/// The request may already have taken effect (a stored record), so the
/// client must still get an answer rather than a dropped connection.
async fn send_response<W>(writer: &mut W, response: &Response) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    match write_frame(writer, response).await {
        Err(Error::FrameSize { len, max }) => {
            warn!(len, max, "Response too large to send");
            let fallback = Response::error(
                "response_too_large",
                format!("response of {} bytes exceeds the {} byte frame limit", len, max),
            );
            write_frame(writer, &fallback).await
        }
        result => result,
    }
}

/// Run one request against the database on the blocking pool
async fn dispatch(db: &Arc<Mutex<Database>>, request: Request) -> Response {
    if matches!(request, Request::Ping) {
        return Response::Pong;
    }

    let db = db.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let db = match db.lock() {
            Ok(guard) => guard,
            Err(_) => return Response::error("internal", "database lock poisoned"),
        };
        execute(&SeatingService::with_storage(&*db), request)
    })
    .await;

    joined.unwrap_or_else(|e| {
        error!(error = %e, "Request task failed");
        Response::error("internal", "request task failed")
    })
}

/// Map a request onto the seating service
fn execute(service: &SeatingService<'_>, request: Request) -> Response {
    let result = match request {
        Request::Generate { draft } => service.generate(draft).map(|record| Response::Generated {
            record: Box::new(record),
        }),
        Request::List => service.list().map(|records| Response::Records { records }),
        Request::Get { id } => service.get(id).map(|record| Response::Record {
            record: Box::new(record),
        }),
        Request::Delete { id } => service.delete(id).map(|()| Response::Deleted { id }),
        Request::Ping => Ok(Response::Pong),
    };

    result.unwrap_or_else(|e| {
        if e.is_input_error() {
            debug!(code = e.code(), error = %e, "Request rejected");
        } else {
            error!(code = e.code(), error = %e, "Request failed");
        }
        e.into()
    })
}
