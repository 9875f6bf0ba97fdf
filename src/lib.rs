// ============================================================================
// spark-spyglass - A Spyglass Overlay for Interactive Maps
// ============================================================================
//
// A second map drawn inside a circle or square on top of a primary map.
// Pan, zoom or rotate either one and the other follows.
// ============================================================================

pub mod core;
pub mod map;
pub mod options;
pub mod spyglass;
pub mod style;
pub mod sync;

#[macro_use]
mod macros;

// Re-export core items at crate root for ergonomic access
pub use crate::core::constants;
pub use crate::core::error::{MapError, Result, SpyglassError};
pub use crate::core::types::{Camera, ListenerId, LngLat, Overlay, StyleTarget};

// Map capability
pub use crate::map::{same_map, MapView, MemoryMap, MoveHandler, ReadyFn};

// Options and styling
pub use crate::options::{Merged, OptionsPatch, ParseShapeError, Shape, SpyglassOptions};
pub use crate::style::{StyleDeclaration, StylePlan};

// Synchronization
pub use crate::sync::{CameraSynchronizer, SyncCore, SyncState, SyncStats};

// The widget
pub use crate::spyglass::Spyglass;

// =============================================================================
// TESTS
// =============================================================================
