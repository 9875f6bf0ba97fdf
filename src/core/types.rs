// ============================================================================
// spark-spyglass - Core Types
// Camera snapshots and the small handles passed between widget and map
// ============================================================================

use serde::{Deserialize, Serialize};

// =============================================================================
// CAMERA
// =============================================================================

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    /// Longitude in degrees
    pub lng: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Snapshot of a map's camera.
///
/// These four fields are everything the synchronizer copies between maps.
/// Two maps are considered aligned when their snapshots compare equal.
///
/// # Example
///
/// ```
/// use spark_spyglass::{Camera, LngLat};
///
/// let cam = Camera::new(LngLat::new(-122.33, 47.6), 12.0)
///     .with_bearing(45.0)
///     .with_pitch(30.0);
///
/// assert_eq!(cam.zoom, 12.0);
/// assert_eq!(cam.bearing, 45.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Center of the view
    pub center: LngLat,
    /// Zoom level
    pub zoom: f64,
    /// Rotation in degrees clockwise from north
    pub bearing: f64,
    /// Tilt in degrees away from straight down
    pub pitch: f64,
}

impl Camera {
    /// Create a north-up, untilted camera.
    pub const fn new(center: LngLat, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            bearing: 0.0,
            pitch: 0.0,
        }
    }

    pub const fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = bearing;
        self
    }

    pub const fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }
}

// =============================================================================
// MAP HANDLES
// =============================================================================

/// Token returned by a map when a move listener is attached.
///
/// The same token must be handed back to detach that listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Which element of a map a style property is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleTarget {
    /// The outer map container (border, position, clip radius)
    Container,
    /// The element wrapping the rendered canvas (clip mask, opacity)
    CanvasContainer,
}

/// Decorations drawn by the map engine on top of the rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Overlay {
    Logo,
    Copyright,
}

// =============================================================================
// TESTS
// =============================================================================
