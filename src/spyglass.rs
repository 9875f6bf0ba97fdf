// ============================================================================
// spark-spyglass - Spyglass Widget
//
// A spy map clipped to a circle or square, overlaid on a primary map, with
// both cameras kept in lockstep.
// ============================================================================
//
// Construction order:
// 1. merge the caller's patch over the defaults (no map is touched)
// 2. jump the spy map to the primary's camera and arm one move listener per map
// 3. resize and style the spy map with the merged options
// 4. position the spy container and hide the engine overlays once ready
//
// A construction that fails leaves at most the spy's camera moved. Listeners
// armed in step 2 are released when the sync core is dropped.
//
// dispose() releases the listeners; every later call fails with
// SpyglassError::Disposed. Dropping the widget releases them as well.
// ============================================================================

use std::rc::Rc;

use tracing::info;

use crate::core::constants::POSITION;
use crate::core::error::{Result, SpyglassError};
use crate::core::types::{Overlay, StyleTarget};
use crate::map::MapView;
use crate::options::{OptionsPatch, SpyglassOptions};
use crate::style::StylePlan;
use crate::sync::{CameraSynchronizer, SyncCore, SyncState, SyncStats};

/// A window into a second map, drawn on top of the primary one.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use spark_spyglass::{patch, Camera, LngLat, MapView, MemoryMap, Spyglass};
///
/// let primary = Rc::new(MemoryMap::new(Camera::new(LngLat::new(-122.3, 47.6), 11.0)));
/// let spy = Rc::new(MemoryMap::new(Camera::default()));
///
/// let mut glass = Spyglass::new(primary.clone(), spy.clone(), Some(&patch!(size: 200.0))).unwrap();
/// assert_eq!(spy.camera(), primary.camera());
///
/// // Panning either map drags the other along
/// spy.move_to(Camera::new(LngLat::new(2.35, 48.85), 13.0)).unwrap();
/// assert_eq!(primary.camera(), spy.camera());
///
/// glass.dispose().unwrap();
/// ```
pub struct Spyglass {
    primary: Rc<dyn MapView>,
    spy: Rc<dyn MapView>,
    core: Rc<SyncCore>,

    /// `None` once disposed
    options: Option<SpyglassOptions>,
}

impl Spyglass {
    /// Overlay `spy` on `primary`.
    ///
    /// `options` is applied on top of the defaults. The maps stay owned by
    /// the caller.
    ///
    /// On error no style is written, no overlay is hidden and no listener
    /// stays attached. The spy may already show the primary's camera.
    pub fn new(
        primary: Rc<dyn MapView>,
        spy: Rc<dyn MapView>,
        options: Option<&OptionsPatch>,
    ) -> Result<Self> {
        let defaults = SpyglassOptions::default();
        let resolved = match options {
            Some(patch) => defaults.merge(patch).options,
            None => defaults,
        };

        let synchronizer = CameraSynchronizer::new(vec![primary.clone(), spy.clone()])?;
        let core = SyncCore::new(synchronizer);
        core.start()?;

        // Every field at its final value; resizes before any style is written
        StylePlan::for_update(&resolved.to_patch(), &resolved).apply(&*spy)?;

        spy.set_style(StyleTarget::Container, POSITION, "absolute");
        spy.on_ready(Box::new(|map: &dyn MapView| {
            map.set_overlay_visible(Overlay::Logo, false);
            map.set_overlay_visible(Overlay::Copyright, false);
        }));

        info!(
            shape = %resolved.shape,
            size = resolved.size,
            "Spyglass created"
        );

        Ok(Self {
            primary,
            spy,
            core,
            options: Some(resolved),
        })
    }

    /// Current options.
    ///
    /// Returns a copy; change options through [`set_options`](Self::set_options).
    pub fn options(&self) -> Result<SpyglassOptions> {
        self.options.clone().ok_or(SpyglassError::Disposed)
    }

    /// Validate `patch`, apply what is accepted to the spy map and keep the
    /// merged result.
    ///
    /// Invalid field values are skipped silently. If the spy map fails to
    /// resize, the previous options are kept and the error is returned.
    pub fn set_options(&mut self, patch: &OptionsPatch) -> Result<()> {
        let current = self.options.as_ref().ok_or(SpyglassError::Disposed)?;
        let next = apply(&*self.spy, current, patch)?;
        self.options = Some(next);
        Ok(())
    }

    /// Release the move listeners and drop the options.
    ///
    /// The maps themselves are left alone.
    pub fn dispose(&mut self) -> Result<()> {
        if self.options.is_none() {
            return Err(SpyglassError::Disposed);
        }
        self.core.dispose()?;
        self.options = None;
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.options.is_none()
    }

    pub fn primary(&self) -> &Rc<dyn MapView> {
        &self.primary
    }

    pub fn spy(&self) -> &Rc<dyn MapView> {
        &self.spy
    }

    pub fn sync_state(&self) -> SyncState {
        self.core.state()
    }

    pub fn sync_stats(&self) -> SyncStats {
        self.core.stats()
    }
}

/// Merge `patch` into `current` and push the accepted part onto `spy`.
fn apply(
    spy: &dyn MapView,
    current: &SpyglassOptions,
    patch: &OptionsPatch,
) -> Result<SpyglassOptions> {
    let merged = current.merge(patch);
    StylePlan::for_update(&merged.applied, &merged.options).apply(spy)?;
    Ok(merged.options)
}

// =============================================================================
// TESTS
// =============================================================================
