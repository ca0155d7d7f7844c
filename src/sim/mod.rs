//! Deterministic track streaming module
//!
//! All track logic lives here. This module must be pure and deterministic:
//! - Driven only by the polled reference position
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, physics or platform dependencies

pub mod generator;
pub mod path;
pub mod pickups;
pub mod state;
pub mod surface;
pub mod tick;
pub mod window;

pub use generator::{GenerationState, GeneratorPhase, SegmentGenerator};
pub use path::{MIN_RETAINED_POINTS, PathPoint, PathStore};
pub use pickups::{Pickup, PickupKind, PickupSchedule, PickupScheduler, Placement};
pub use state::{TrackEvent, TrackState};
pub use surface::{SurfaceHit, SurfaceQuery};
pub use tick::{TickInput, tick};
pub use window::StreamingWindow;
