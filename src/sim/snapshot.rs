//! Read-only view of the simulation for renderers and tools

use serde::Serialize;

use super::boundary::Boundary;
use super::state::SimState;
use super::tether::BlobId;
use crate::Vector2;

/// One live blob as seen from outside
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlobView {
    pub id: BlobId,
    pub center: Vector2,
    pub radius: f64,
    pub selected: bool,
    /// Center is moving fast enough for an animated face
    pub moving: bool,
    pub velocity_sq: f64,
    /// Ring point positions in ring order
    pub ring: Vec<Vector2>,
}

/// Frame-level view of the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub gravity: Vector2,
    pub boundary: Boundary,
    pub blobs: Vec<BlobView>,
}

impl Snapshot {
    pub fn capture(state: &SimState) -> Self {
        let blobs = state
            .population
            .active()
            .map(|(id, blob)| BlobView {
                id,
                center: blob.center_position(),
                radius: blob.radius(),
                selected: blob.is_selected(),
                moving: blob.is_moving(),
                velocity_sq: blob.velocity_sq(),
                ring: blob.ring().iter().map(|p| p.current).collect(),
            })
            .collect();

        Self {
            tick: state.time_ticks,
            gravity: state.gravity(),
            boundary: state.boundary,
            blobs,
        }
    }

    /// Same view in pixel space
    ///
    /// Positions, lengths and gravity scale by `scale`; squared speeds by `scale²`.
    pub fn to_pixels(&self, scale: f64) -> Self {
        let px = |v: Vector2| crate::to_pixels(v, scale);
        Self {
            tick: self.tick,
            gravity: px(self.gravity),
            boundary: Boundary {
                left: self.boundary.left * scale,
                top: self.boundary.top * scale,
                right: self.boundary.right * scale,
                bottom: self.boundary.bottom * scale,
            },
            blobs: self
                .blobs
                .iter()
                .map(|b| BlobView {
                    center: px(b.center),
                    radius: b.radius * scale,
                    velocity_sq: b.velocity_sq * scale * scale,
                    ring: b.ring.iter().copied().map(px).collect(),
                    ..b.clone()
                })
                .collect(),
        }
    }
}
