// ============================================================================
// spark-spyglass - Sync Module
// Camera synchronization and the move-listener lifecycle around it
// ============================================================================

pub mod lifecycle;
pub mod synchronizer;

// Re-export for convenience
pub use lifecycle::{SyncCore, SyncState, SyncStats};
pub use synchronizer::CameraSynchronizer;
