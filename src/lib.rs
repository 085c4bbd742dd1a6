//! rest-action-detector: recognises short rest breaks from a pose stream
//!
//! Consumes per-frame body landmarks from an external pose engine and
//! decides whether the user drank water, left the seat, or stretched.
//!
//! Layout:
//! - `landmarks`: landmark ids, per-frame snapshots, pixel geometry
//! - `detect`: one state machine per rest action
//! - `session`: timeout and user overrides around the active machine
//! - `input`: JSON-line frame ingestion on a dedicated thread
//! - `events`: progress events for display layers
//!
//! Camera capture, pose inference and rendering stay outside this crate.

pub mod config;
pub mod detect;
pub mod events;
pub mod input;
pub mod landmarks;
pub mod lifecycle;
pub mod session;
