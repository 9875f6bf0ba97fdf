// ============================================================================
// spark-spyglass - Errors
// ============================================================================

/// Failure reported by a [`MapView`](crate::MapView) implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// The map rejected a camera change.
    #[error("camera update failed: {0}")]
    Camera(String),

    /// The map could not be resized.
    #[error("resize failed: {0}")]
    Resize(String),
}

/// Errors surfaced by the spyglass widget and its synchronizer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpyglassError {
    /// The widget was disposed; no further calls are accepted.
    #[error("spyglass has already been disposed")]
    Disposed,

    /// A synchronization source is not one of the registered maps.
    #[error("map is not a participant of this synchronizer")]
    UnknownParticipant,

    /// A participant index is out of range.
    #[error("participant index {index} out of range ({len} participants)")]
    ParticipantIndex {
        /// Requested index.
        index: usize,
        /// Number of registered participants.
        len: usize,
    },

    /// Fewer maps than a synchronization needs.
    #[error("synchronization needs at least 2 maps, got {0}")]
    NotEnoughParticipants(usize),

    /// A map failed while being updated.
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Result alias used throughout the crate.
pub type Result<T, E = SpyglassError> = std::result::Result<T, E>;
