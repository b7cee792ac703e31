//! # Content Loading
//!
//! Textures are decoded off the update thread:
//!
//! ```text
//! update thread                     worker thread
//! ─────────────                     ─────────────
//! request(path, cb) ──requests──▶   TextureSource::load(path)
//!        ...                               │
//! poll() ◀──────────completions────────────┘
//!   └─ cb(result)   (runs on the update thread)
//! ```
//!
//! Callbacks never run on the worker, so widgets can keep plain state.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use thiserror::Error;

/// Renderer-side texture identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A decoded texture ready for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    /// Renderer handle.
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Shared slot a widget reads its texture from once loading finishes.
pub type TextureSlot = Arc<Mutex<Option<Texture>>>;

/// Errors that can occur while loading content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The asset does not exist.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The asset exists but could not be decoded.
    #[error("failed to decode {path}: {reason}")]
    Decode {
        /// Asset path.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// No worker is available to service the request.
    #[error("content loader is not running")]
    Disconnected,
}

/// Loads textures by path. Runs on the loader's worker thread.
pub trait TextureSource: Send + 'static {
    /// Loads one texture.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] if the asset is missing or malformed.
    fn load(&mut self, path: &str) -> Result<Texture, ContentError>;
}

/// Completion callback, invoked on the update thread.
pub type Completion = Box<dyn FnOnce(Result<Texture, ContentError>) + Send>;

struct Request {
    ticket: u64,
    path: String,
}

struct Finished {
    ticket: u64,
    path: String,
    result: Result<Texture, ContentError>,
}

/// Asynchronous texture loader with update-thread completions.
pub struct ContentLoader {
    /// Request queue to the worker; `None` when no source is attached.
    requests: Option<Sender<Request>>,
    /// Finished loads from the worker.
    completions: Receiver<Finished>,
    /// Local completion queue (used when there is no worker).
    local: Sender<Finished>,
    /// Callbacks waiting for their ticket.
    pending: HashMap<u64, Completion>,
    /// Next ticket number.
    next_ticket: u64,
    /// Worker thread.
    worker: Option<JoinHandle<()>>,
}

impl ContentLoader {
    /// Starts a loader backed by `source` on a dedicated worker thread.
    #[must_use]
    pub fn new(mut source: impl TextureSource) -> Self {
        let (request_tx, request_rx) = unbounded::<Request>();
        let (done_tx, done_rx) = unbounded::<Finished>();
        let worker_tx = done_tx.clone();

        let worker = std::thread::Builder::new()
            .name("gantry-content".into())
            .spawn(move || {
                for request in request_rx {
                    let result = source.load(&request.path);
                    let finished = Finished {
                        ticket: request.ticket,
                        path: request.path,
                        result,
                    };
                    if worker_tx.send(finished).is_err() {
                        break;
                    }
                }
            });

        match worker {
            Ok(handle) => Self {
                requests: Some(request_tx),
                completions: done_rx,
                local: done_tx,
                pending: HashMap::new(),
                next_ticket: 0,
                worker: Some(handle),
            },
            Err(err) => {
                tracing::warn!("failed to start content worker: {err}");
                Self::offline_with(done_tx, done_rx)
            }
        }
    }

    /// A loader without a source. Every request fails with
    /// [`ContentError::Disconnected`] on the next [`poll`](Self::poll).
    #[must_use]
    pub fn offline() -> Self {
        let (done_tx, done_rx) = unbounded();
        Self::offline_with(done_tx, done_rx)
    }

    fn offline_with(local: Sender<Finished>, completions: Receiver<Finished>) -> Self {
        Self {
            requests: None,
            completions,
            local,
            pending: HashMap::new(),
            next_ticket: 0,
            worker: None,
        }
    }

    /// Returns true if a worker thread is servicing requests.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.requests.is_some()
    }

    /// Number of requests whose callbacks have not run yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queues a load. `on_done` runs during a later [`poll`](Self::poll).
    pub fn request(&mut self, path: &str, on_done: Completion) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.insert(ticket, on_done);

        let request = Request {
            ticket,
            path: path.to_owned(),
        };
        let undelivered = match &self.requests {
            Some(tx) => tx.send(request).err().map(|err| err.into_inner()),
            None => Some(request),
        };

        if let Some(request) = undelivered {
            // Unreachable receiver: complete locally so the callback still runs.
            let _ = self.local.send(Finished {
                ticket: request.ticket,
                path: request.path,
                result: Err(ContentError::Disconnected),
            });
        }
        tracing::trace!(path, ticket, "texture requested");
    }

    /// Runs callbacks for every finished load. Returns how many ran.
    pub fn poll(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(finished) = self.completions.try_recv() {
            ran += usize::from(self.complete(finished));
        }
        ran
    }

    /// Blocks until every pending request has completed or `timeout`
    /// elapses. Returns how many callbacks ran.
    pub fn wait_idle(&mut self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut ran = 0;
        while !self.pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.completions.recv_timeout(remaining) {
                Ok(finished) => ran += usize::from(self.complete(finished)),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => break,
            }
        }
        ran
    }

    fn complete(&mut self, finished: Finished) -> bool {
        let Some(callback) = self.pending.remove(&finished.ticket) else {
            return false;
        };
        if let Err(err) = &finished.result {
            tracing::warn!(path = %finished.path, "texture load failed: {err}");
        }
        callback(finished.result);
        true
    }
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::offline()
    }
}

impl Drop for ContentLoader {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for ContentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentLoader")
            .field("online", &self.is_online())
            .field("pending", &self.pending.len())
            .finish()
    }
}
