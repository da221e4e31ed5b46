//! Explicit velocity integration of free vertices.

use glam::Vec3;

use crate::state::SimulationState;

/// Applies gravity and damping to every free vertex, then advances it:
///
/// ```text
/// v += g * dt
/// v *= damping
/// p += v * dt
/// ```
///
/// Vertices flagged in `pinned` are left untouched; the pin resolver owns
/// their state this step.
pub fn integrate(
    state: &mut SimulationState,
    pinned: &[bool],
    gravity: Vec3,
    damping: f32,
    dt: f32,
) {
    let dv = gravity * dt;
    for i in 0..state.vertex_count {
        if pinned[i] {
            continue;
        }
        let velocity = (state.velocity(i) + dv) * damping;
        state.set_velocity(i, velocity);
        state.set_position(i, state.position(i) + velocity * dt);
    }
}
