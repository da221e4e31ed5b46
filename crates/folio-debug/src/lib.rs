//! # folio-debug
//!
//! Debugging aids for the sheet simulator: an observer that turns step
//! callbacks into telemetry events, binary state snapshots for replay,
//! and a JSON frame recorder for offline playback of a run.

pub mod frames;
pub mod hooks;
pub mod snapshot;

pub use frames::JsonFrameRecorder;
pub use hooks::TelemetryHook;
pub use snapshot::StateSnapshot;
