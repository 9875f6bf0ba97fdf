// ============================================================================
// spark-spyglass - Map Capability
//
// The slice of a map engine the spyglass talks to. Implement `MapView` for
// your renderer's map handle; `MemoryMap` is a headless implementation.
// ============================================================================

pub mod memory;

use std::rc::Rc;

use crate::core::error::{MapError, Result};
use crate::core::types::{Camera, ListenerId, Overlay, StyleTarget};

pub use memory::MemoryMap;

// =============================================================================
// CALLBACK TYPES
// =============================================================================

/// Listener invoked after a map's camera moved.
///
/// Stored as `Rc` so the map can snapshot its listener list before calling
/// out, which lets a listener detach listeners (its own included) while the
/// event is being delivered.
pub type MoveHandler = Rc<dyn Fn() -> Result<()>>;

/// One-shot callback run once the map has finished loading.
pub type ReadyFn = Box<dyn FnOnce(&dyn MapView)>;

// =============================================================================
// MAP VIEW
// =============================================================================

/// An interactive map owned by the caller.
///
/// The spyglass never creates or destroys maps. It reads and writes cameras,
/// resizes the spy map, writes a handful of style properties and attaches
/// one move listener per map.
pub trait MapView {
    /// Current camera snapshot.
    fn camera(&self) -> Camera;

    /// Jump to `camera` immediately, without animation.
    ///
    /// Implementations may or may not raise a move event for this change.
    fn set_camera(&self, camera: &Camera) -> Result<(), MapError>;

    /// Resize the rendered map to `width` x `height` pixels.
    fn resize(&self, width: f64, height: f64) -> Result<(), MapError>;

    /// Write a single style property on one of the map's elements.
    fn set_style(&self, target: StyleTarget, property: &str, value: &str);

    /// Show or hide an engine-drawn overlay.
    fn set_overlay_visible(&self, overlay: Overlay, visible: bool);

    /// Attach a move listener. The returned token detaches it.
    fn on_move(&self, handler: MoveHandler) -> ListenerId;

    /// Detach the listener registered under `id`.
    ///
    /// Returns false when no such listener exists.
    fn remove_move(&self, id: ListenerId) -> bool;

    /// Run `callback` once the map is ready, or right away if it already is.
    fn on_ready(&self, callback: ReadyFn);
}

/// Identity comparison for participant handles.
///
/// Compares the data pointers only; two maps with identical cameras are still
/// different participants.
pub fn same_map(a: &Rc<dyn MapView>, b: &Rc<dyn MapView>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LngLat;

    #[test]
    fn same_map_uses_identity_not_camera() {
        let cam = Camera::new(LngLat::new(0.0, 0.0), 2.0);
        let a: Rc<dyn MapView> = Rc::new(MemoryMap::new(cam));
        let b: Rc<dyn MapView> = Rc::new(MemoryMap::new(cam));

        assert!(same_map(&a, &a.clone()));
        assert!(!same_map(&a, &b));
    }
}
