// ============================================================================
// spark-spyglass - Memory Map
//
// A headless MapView. Holds a camera, records every style write and resize,
// and delivers move events synchronously to its listeners.
// ============================================================================
//
// Useful for tests, benches and for driving the spyglass from a host that
// renders elsewhere. A few knobs mimic engine behaviour that matters for
// synchronization:
// - set_camera can re-raise "move" (some engines do, some don't)
// - camera updates and resizes can be made to fail
// - "ready" can be delayed until mark_ready()
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use super::{MapView, MoveHandler, ReadyFn};
use crate::core::error::{MapError, Result, SpyglassError};
use crate::core::types::{Camera, ListenerId, Overlay, StyleTarget};

// =============================================================================
// MEMORY MAP
// =============================================================================

/// In-memory map implementation.
///
/// # Example
///
/// ```
/// use spark_spyglass::{Camera, LngLat, MapView, MemoryMap};
///
/// let map = MemoryMap::new(Camera::new(LngLat::new(0.0, 0.0), 1.0));
/// map.move_to(Camera::new(LngLat::new(5.0, 5.0), 3.0)).unwrap();
///
/// assert_eq!(map.camera().zoom, 3.0);
/// ```
pub struct MemoryMap {
    camera: Cell<Camera>,

    /// Listeners in attach order
    listeners: RefCell<Vec<(ListenerId, MoveHandler)>>,
    next_listener: Cell<u64>,

    ready: Cell<bool>,
    ready_callbacks: RefCell<Vec<ReadyFn>>,

    styles: RefCell<BTreeMap<(StyleTarget, String), String>>,
    hidden_overlays: RefCell<BTreeSet<Overlay>>,
    resizes: RefCell<Vec<(f64, f64)>>,

    set_camera_calls: Cell<usize>,
    moves_delivered: Cell<usize>,

    emit_move_on_set_camera: Cell<bool>,
    fail_camera: Cell<bool>,
    fail_resize: Cell<bool>,
}

impl MemoryMap {
    /// Create a ready map showing `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera: Cell::new(camera),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
            ready: Cell::new(true),
            ready_callbacks: RefCell::new(Vec::new()),
            styles: RefCell::new(BTreeMap::new()),
            hidden_overlays: RefCell::new(BTreeSet::new()),
            resizes: RefCell::new(Vec::new()),
            set_camera_calls: Cell::new(0),
            moves_delivered: Cell::new(0),
            emit_move_on_set_camera: Cell::new(false),
            fail_camera: Cell::new(false),
            fail_resize: Cell::new(false),
        }
    }

    /// Create a map that stays "loading" until [`mark_ready`](Self::mark_ready).
    pub fn loading(camera: Camera) -> Self {
        let map = Self::new(camera);
        map.ready.set(false);
        map
    }

    // =========================================================================
    // ENGINE BEHAVIOUR
    // =========================================================================

    /// Raise "move" from inside `set_camera`, like engines that report
    /// programmatic camera changes.
    pub fn emit_move_on_set_camera(&self, enabled: bool) {
        self.emit_move_on_set_camera.set(enabled);
    }

    /// Make subsequent `set_camera` calls fail.
    pub fn fail_camera_updates(&self, fail: bool) {
        self.fail_camera.set(fail);
    }

    /// Make subsequent `resize` calls fail.
    pub fn fail_resizes(&self, fail: bool) {
        self.fail_resize.set(fail);
    }

    /// Finish loading and run pending ready callbacks.
    pub fn mark_ready(&self) {
        if self.ready.replace(true) {
            return;
        }
        let callbacks: Vec<_> = self.ready_callbacks.borrow_mut().drain(..).collect();
        for callback in callbacks {
            callback(self);
        }
    }

    // =========================================================================
    // USER INTERACTION
    // =========================================================================

    /// Simulate the user panning/zooming/rotating to `camera`.
    ///
    /// Updates the camera and delivers "move" to every listener.
    pub fn move_to(&self, camera: Camera) -> Result<()> {
        self.camera.set(camera);
        self.emit_move()
    }

    /// Deliver a "move" event to the current listeners.
    ///
    /// The listener list is snapshotted first; the first listener error stops
    /// delivery and is returned.
    pub fn emit_move(&self) -> Result<()> {
        let handlers: Vec<MoveHandler> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in handlers {
            self.moves_delivered.set(self.moves_delivered.get() + 1);
            handler()?;
        }
        Ok(())
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// Value last written for `property` on `target`.
    pub fn style(&self, target: StyleTarget, property: &str) -> Option<String> {
        self.styles
            .borrow()
            .get(&(target, property.to_string()))
            .cloned()
    }

    pub fn is_overlay_hidden(&self, overlay: Overlay) -> bool {
        self.hidden_overlays.borrow().contains(&overlay)
    }

    /// Every resize call, oldest first.
    pub fn resizes(&self) -> Vec<(f64, f64)> {
        self.resizes.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of successful `set_camera` calls.
    pub fn set_camera_calls(&self) -> usize {
        self.set_camera_calls.get()
    }

    /// Number of listener invocations across all emitted moves.
    pub fn moves_delivered(&self) -> usize {
        self.moves_delivered.get()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }
}

// =============================================================================
// MAP VIEW IMPL
// =============================================================================

impl MapView for MemoryMap {
    fn camera(&self) -> Camera {
        self.camera.get()
    }

    fn set_camera(&self, camera: &Camera) -> Result<(), MapError> {
        if self.fail_camera.get() {
            return Err(MapError::Camera("camera updates are disabled".into()));
        }

        self.camera.set(*camera);
        self.set_camera_calls.set(self.set_camera_calls.get() + 1);

        if self.emit_move_on_set_camera.get() {
            // A listener's map failure passes through as-is
            self.emit_move().map_err(|err| match err {
                SpyglassError::Map(inner) => inner,
                other => MapError::Camera(other.to_string()),
            })?;
        }
        Ok(())
    }

    fn resize(&self, width: f64, height: f64) -> Result<(), MapError> {
        if self.fail_resize.get() {
            return Err(MapError::Resize(format!("cannot resize to {width}x{height}")));
        }
        self.resizes.borrow_mut().push((width, height));
        Ok(())
    }

    fn set_style(&self, target: StyleTarget, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert((target, property.to_string()), value.to_string());
    }

    fn set_overlay_visible(&self, overlay: Overlay, visible: bool) {
        let mut hidden = self.hidden_overlays.borrow_mut();
        if visible {
            hidden.remove(&overlay);
        } else {
            hidden.insert(overlay);
        }
    }

    fn on_move(&self, handler: MoveHandler) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, handler));
        id
    }

    fn remove_move(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn on_ready(&self, callback: ReadyFn) {
        if self.ready.get() {
            callback(self);
        } else {
            self.ready_callbacks.borrow_mut().push(callback);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
