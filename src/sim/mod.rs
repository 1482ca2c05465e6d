//! Deterministic simulation module
//!
//! All physics and topology lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (slot order, ring points then center, sticks then joints)
//! - No rendering or platform dependencies

pub mod blob;
pub mod boundary;
pub mod constraint;
pub mod point;
pub mod population;
pub mod snapshot;
pub mod state;
pub mod tether;
pub mod tick;

pub use blob::Blob;
pub use boundary::Boundary;
pub use constraint::{DistanceBand, Joint, Stick};
pub use point::PointMass;
pub use population::Population;
pub use snapshot::{BlobView, Snapshot};
pub use state::{Direction, DragState, SimState};
pub use tether::{BlobId, Tether, TetherRegistry};
pub use tick::{PointerEvent, TickInput, tick};
