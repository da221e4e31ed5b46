//! Pluggable event sinks.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use folio_types::{FolioError, FolioResult};

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) -> FolioResult<()> {
        Ok(())
    }

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events in memory.
///
/// The buffer is shared, so events stay readable through [`VecSink::buffer`]
/// after the sink itself was boxed into a bus.
#[derive(Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the collected events.
    pub fn buffer(&self) -> Arc<Mutex<Vec<SimulationEvent>>> {
        Arc::clone(&self.events)
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing`. Per-pass events go to `trace`,
/// everything else to `debug`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match event.kind {
            EventKind::RelaxationPass { .. } => tracing::trace!(
                timestep = event.timestep,
                event = ?event.kind,
                "simulation_event"
            ),
            _ => tracing::debug!(
                timestep = event.timestep,
                kind = event.label(),
                event = ?event.kind,
                "simulation_event"
            ),
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Writes one JSON object per line to any writer.
pub struct JsonLinesSink {
    writer: Box<dyn Write + Send>,
    /// First write error, reported by `finalize`.
    error: Option<std::io::Error>,
    written: usize,
}

impl JsonLinesSink {
    /// Wraps an arbitrary writer.
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer,
            error: None,
            written: 0,
        }
    }

    /// Creates (or truncates) a file at `path`.
    pub fn create(path: impl AsRef<Path>) -> FolioResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }

    /// Number of events written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl EventSink for JsonLinesSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        match result {
            Ok(()) => self.written += 1,
            Err(e) => {
                tracing::warn!(error = %e, "event log write failed, dropping further events");
                self.error = Some(e);
            }
        }
    }

    fn finalize(&mut self) -> FolioResult<()> {
        if let Some(e) = self.error.take() {
            return Err(FolioError::Io(e));
        }
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json_lines_sink"
    }
}
