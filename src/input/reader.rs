//! Frame reader running on a dedicated thread
//!
//! Opens the frame source synchronously so an unavailable source is reported
//! before any session starts, then streams parsed frames into a tokio
//! channel until the source ends or `stop()` is called.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::protocol::FrameRecord;
use crate::landmarks::{FrameSize, LandmarkSnapshot};
use crate::session::ExternalSignal;

/// Frame sent from the reader to the session runner
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub snapshot: LandmarkSnapshot,
    /// Capture time on the reader's clock
    pub at: Instant,
    pub signal: Option<ExternalSignal>,
}

/// Where frames come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    Stdin,
    File(PathBuf),
}

impl From<&str> for FrameSource {
    /// `-` selects stdin, anything else is a path
    fn from(arg: &str) -> Self {
        if arg == "-" {
            FrameSource::Stdin
        } else {
            FrameSource::File(PathBuf::from(arg))
        }
    }
}

impl std::fmt::Display for FrameSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameSource::Stdin => write!(f, "stdin"),
            FrameSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Errors that can occur starting the frame reader
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("frame source {path} is unavailable: {reason}")]
    Unavailable { path: String, reason: String },

    #[error("frame reader is already running")]
    AlreadyRunning,

    #[error("failed to spawn reader thread: {0}")]
    ThreadSpawn(String),
}

/// Reads JSON-line frames and forwards them to the session runner
pub struct FrameReader {
    frame: FrameSize,
    min_visibility: f32,
    /// Clock origin for frame timestamps
    started_at: Instant,
    running: Arc<AtomicBool>,
}

impl FrameReader {
    /// Create a reader; frame timestamps are anchored at this moment
    pub fn new(frame: FrameSize, min_visibility: f32) -> Self {
        Self {
            frame,
            min_visibility,
            started_at: Instant::now(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The instant a frame with `t = 0` maps to
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Open `source` and start streaming frames into `frame_tx`.
    ///
    /// Fails with [`SourceError::Unavailable`] if the source cannot be
    /// opened; nothing is spawned in that case.
    pub fn start(
        &self,
        source: &FrameSource,
        frame_tx: mpsc::Sender<FrameInput>,
    ) -> Result<(), SourceError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(SourceError::AlreadyRunning);
        }

        let input: Box<dyn BufRead + Send> = match source {
            FrameSource::Stdin => Box::new(BufReader::new(std::io::stdin())),
            FrameSource::File(path) => {
                let file = File::open(path).map_err(|e| SourceError::Unavailable {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                Box::new(BufReader::new(file))
            }
        };

        if self.running.swap(true, Ordering::SeqCst) {
            return Err(SourceError::AlreadyRunning);
        }

        let running = Arc::clone(&self.running);
        let settings = ReadSettings {
            base: self.started_at,
            frame: self.frame,
            min_visibility: self.min_visibility,
        };
        let name = source.to_string();

        let spawned = thread::Builder::new()
            .name("frame-reader".to_string())
            .spawn(move || {
                info!(source = %name, "frame reader thread started");

                let forwarded = read_frames(input, &frame_tx, &running, settings);

                running.store(false, Ordering::SeqCst);
                info!(frames = forwarded, "frame reader thread stopped");
            });

        if let Err(e) = spawned {
            self.running.store(false, Ordering::SeqCst);
            error!(?e, "failed to spawn frame reader");
            return Err(SourceError::ThreadSpawn(e.to_string()));
        }

        Ok(())
    }

    /// Stop forwarding frames; takes effect at the next line
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the reader thread is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy)]
struct ReadSettings {
    base: Instant,
    frame: FrameSize,
    min_visibility: f32,
}

/// Forward every valid line; returns how many frames were sent
fn read_frames(
    input: impl BufRead,
    frame_tx: &mpsc::Sender<FrameInput>,
    running: &AtomicBool,
    settings: ReadSettings,
) -> usize {
    let mut forwarded = 0;

    for (index, line) in input.lines().enumerate() {
        if !running.load(Ordering::SeqCst) {
            debug!("frame reader stopped");
            break;
        }

        let line_no = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(line = line_no, ?e, "failed to read frame source");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let record = match FrameRecord::parse(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_no, %e, "skipping malformed frame");
                continue;
            }
        };

        let input = match record.into_input(settings.base, settings.frame, settings.min_visibility)
        {
            Ok(input) => input,
            Err(e) => {
                warn!(line = line_no, %e, "skipping frame");
                continue;
            }
        };

        debug!(
            line = line_no,
            landmarks = input.snapshot.len(),
            body = input.snapshot.body_detected(),
            "frame read"
        );

        // We are on a plain thread, so blocking_send is safe here
        if frame_tx.blocking_send(input).is_err() {
            debug!("frame channel closed");
            break;
        }
        forwarded += 1;
    }

    forwarded
}
