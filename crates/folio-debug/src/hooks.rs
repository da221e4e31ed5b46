//! Telemetry bridge for the solver's observer hooks.

use std::sync::mpsc::Sender;

use folio_solver::pins::PinReport;
use folio_solver::relax::PassReport;
use folio_solver::{StepObserver, StepResult};
use folio_telemetry::events::{EventKind, SimulationEvent};

/// Observer that translates step callbacks into telemetry events.
///
/// Events are buffered until drained, or forwarded straight to an event
/// bus when built with [`TelemetryHook::with_sender`].
#[derive(Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
    sender: Option<Sender<SimulationEvent>>,
    /// Skip per-pass events, which dominate the volume on large runs.
    skip_passes: bool,
}

impl TelemetryHook {
    /// Creates a hook that buffers events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hook that forwards events to a bus sender.
    pub fn with_sender(sender: Sender<SimulationEvent>) -> Self {
        Self {
            sender: Some(sender),
            ..Self::default()
        }
    }

    /// Stops recording relaxation pass events.
    pub fn without_passes(mut self) -> Self {
        self.skip_passes = true;
        self
    }

    /// Drains buffered events.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, timestep: u32, kind: EventKind) {
        let event = SimulationEvent::new(timestep, kind);
        match &self.sender {
            Some(sender) => {
                if sender.send(event).is_err() {
                    tracing::warn!("telemetry bus is gone, detaching hook");
                    self.sender = None;
                }
            }
            None => self.events.push(event),
        }
    }
}

impl StepObserver for TelemetryHook {
    fn on_step_begin(&mut self, timestep: u32, sim_time: f64) {
        self.record(timestep, EventKind::StepBegin { sim_time });
    }

    fn on_pass(&mut self, timestep: u32, pass: u32, report: &PassReport) {
        if self.skip_passes {
            return;
        }
        self.record(
            timestep,
            EventKind::RelaxationPass {
                pass,
                corrected_vertices: report.corrected_vertices,
                max_correction: report.max_correction,
            },
        );
    }

    fn on_pins_resolved(&mut self, timestep: u32, report: &PinReport) {
        self.record(
            timestep,
            EventKind::PinsResolved {
                count: report.count,
                max_speed: report.max_speed,
            },
        );
    }

    fn on_step_end(&mut self, timestep: u32, result: &StepResult) {
        self.record(
            timestep,
            EventKind::StepEnd {
                wall_time: result.wall_time,
                max_correction: result.max_correction,
            },
        );
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}
