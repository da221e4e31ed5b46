//! JSON frame recorder: per-step mesh positions for offline playback.
//!
//! The output holds the triangle list once and one interleaved position
//! buffer per recorded step, so any mesh viewer can replay the run.

use std::path::{Path, PathBuf};

use folio_mesh::TriangleMesh;
use folio_solver::SimulationState;
use folio_types::{FolioError, FolioResult};
use serde::{Deserialize, Serialize};

/// A single recorded frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    pub timestep: u32,
    /// Interleaved [x0,y0,z0, x1,y1,z1, ...].
    pub positions: Vec<f32>,
}

/// A whole recorded run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub indices: Vec<u32>,
    pub frames: Vec<FrameData>,
}

impl Recording {
    /// Reads a recording written by [`JsonFrameRecorder::finalize`].
    pub fn load(path: impl AsRef<Path>) -> FolioResult<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| FolioError::Serialization(format!("JSON deserialization failed: {e}")))
    }
}

/// Records simulation frames and writes them to a JSON file.
///
/// ```text
/// let mut recorder = JsonFrameRecorder::new("frames.json", &mesh);
/// // after every step:
/// recorder.record(sim.timestep(), sim.state())?;
/// recorder.finalize()?;
/// ```
pub struct JsonFrameRecorder {
    output_path: PathBuf,
    recording: Recording,
}

impl JsonFrameRecorder {
    /// Creates a recorder for `mesh` that will write to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>, mesh: &TriangleMesh) -> Self {
        Self {
            output_path: output_path.into(),
            recording: Recording {
                vertex_count: mesh.vertex_count(),
                triangle_count: mesh.triangle_count(),
                indices: mesh.indices.clone(),
                frames: Vec::new(),
            },
        }
    }

    /// Appends the current positions as a frame.
    pub fn record(&mut self, timestep: u32, state: &SimulationState) -> FolioResult<()> {
        if state.vertex_count != self.recording.vertex_count {
            return Err(FolioError::InvalidInput(format!(
                "Frame has {} vertices, recording expects {}",
                state.vertex_count, self.recording.vertex_count
            )));
        }
        self.recording.frames.push(FrameData {
            timestep,
            positions: state.positions_interleaved(),
        });
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.recording.frames.len()
    }

    /// The frames recorded so far.
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Writes the recording and clears the buffered frames.
    pub fn finalize(&mut self) -> FolioResult<()> {
        let json = serde_json::to_string(&self.recording)
            .map_err(|e| FolioError::Serialization(format!("JSON serialization failed: {e}")))?;
        std::fs::write(&self.output_path, json)?;
        tracing::info!(
            path = %self.output_path.display(),
            frames = self.recording.frames.len(),
            "wrote frame recording"
        );
        self.recording.frames.clear();
        Ok(())
    }
}
