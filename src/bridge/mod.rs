//! Line-buffered TCP ingestion bridge.
//!
//! One scanner connection is serviced at a time: the loop accepts a peer,
//! drains it to completion, then returns to the accept call. Records are
//! persisted synchronously in arrival order, and a failed insert never
//! tears down the connection.

mod framing;
mod sink;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use log::{error, info, warn};
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::ListenerSettings;
use crate::models::ScanRecord;

pub use framing::ReceiveBuffer;
pub use sink::ScanSink;

/// Upper bound on a single socket read. Matches the scanner firmware's
/// send granularity; records are far smaller than this.
const RECV_CHUNK_BYTES: usize = 1024;

pub struct Bridge<S> {
    listener: TcpListener,
    read_timeout: Option<Duration>,
    sink: S,
}

impl<S: ScanSink> Bridge<S> {
    /// Binds the listening socket. A bind failure is a startup error and
    /// propagates to the caller; the bridge never runs half-initialized.
    pub async fn bind(settings: &ListenerSettings, sink: S) -> Result<Self> {
        let addr = format!("{}:{}", settings.bind_addr, settings.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind listener on {addr}"))?;

        Ok(Self {
            listener,
            read_timeout: settings.read_timeout_secs.map(Duration::from_secs),
            sink,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("failed to read bound listener address")
    }

    /// Accept loop. Sessions run strictly one at a time; the next accept
    /// only happens after the previous connection has fully closed. Accept
    /// errors are logged and the loop keeps going. Cancelling `shutdown`
    /// stops the loop between sessions.
    pub async fn serve(&self, shutdown: CancellationToken) -> Result<()> {
        info!("waiting for scanner connection on {}", self.local_addr()?);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            info!("connection from {peer}");
                            self.service(stream, peer).await;
                            info!("connection from {peer} closed, waiting for next");
                        }
                        Err(err) => {
                            error!("accept failed: {err}");
                        }
                    }
                }
                _ = shutdown.cancelled() => {
                    info!("bridge shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// Services one connection until the peer disconnects or the read path
    /// fails. All errors in here end the session without escaping to the
    /// accept loop.
    async fn service(&self, mut stream: TcpStream, peer: SocketAddr) {
        let mut buffer = ReceiveBuffer::new();
        let mut chunk = [0u8; RECV_CHUNK_BYTES];

        loop {
            let read = match self.read_timeout {
                Some(limit) => {
                    match tokio::time::timeout(limit, stream.read(&mut chunk)).await {
                        Ok(read) => read,
                        Err(_) => {
                            warn!(
                                "no data from {peer} within {}s, ending session",
                                limit.as_secs()
                            );
                            return;
                        }
                    }
                }
                None => stream.read(&mut chunk).await,
            };

            let received = match read {
                Ok(0) => {
                    if !buffer.is_empty() {
                        warn!(
                            "{peer} disconnected leaving {} unterminated byte(s) in the buffer",
                            buffer.len()
                        );
                    }
                    return;
                }
                Ok(received) => received,
                Err(err) => {
                    warn!("read from {peer} failed: {err}");
                    return;
                }
            };

            buffer.extend(&chunk[..received]);
            for line in buffer.drain_lines() {
                self.persist(&line, peer).await;
            }
        }
    }

    /// Validates and stores one extracted record. Whitespace-only records
    /// are dropped silently; an insert failure is logged with the offending
    /// code and the session carries on.
    async fn persist(&self, raw: &str, peer: SocketAddr) {
        let code = raw.trim();
        if code.is_empty() {
            return;
        }

        let record = ScanRecord::captured_now(code);
        match self.sink.store(&record).await {
            Ok(()) => info!("stored barcode '{code}' from {peer}"),
            Err(err) => error!("failed to store barcode '{code}' from {peer}: {err:#}"),
        }
    }
}
