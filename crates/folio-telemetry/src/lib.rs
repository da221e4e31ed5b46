//! # folio-telemetry
//!
//! Event bus for simulation telemetry. The solver's observer hooks are
//! turned into structured events (step timing, relaxation passes, pin
//! motion, energy) that pluggable sinks consume: an in-memory buffer for
//! tests, `tracing` output, or a JSON-lines log.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};
