// ============================================================================
// spark-spyglass - Core Module
// Fundamental types, constants and errors shared by every other module
// ============================================================================

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{MapError, Result, SpyglassError};
pub use types::{Camera, ListenerId, LngLat, Overlay, StyleTarget};
