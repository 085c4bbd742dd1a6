//! Input module for frame ingestion
//!
//! Reads landmark frames produced by an external pose engine as JSON lines
//! and forwards them to the session runner. Reading happens on a dedicated
//! thread so blocking I/O never stalls detection.

mod keys;
mod protocol;
mod reader;

pub use keys::KeyPress;
pub use protocol::{FrameRecord, LandmarkRecord, RecordError};
pub use reader::{FrameInput, FrameReader, FrameSource, SourceError};
