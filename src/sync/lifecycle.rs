// ============================================================================
// spark-spyglass - Sync Lifecycle
//
// Owns the move listeners and the re-entrancy guard around synchronization.
// ============================================================================
//
// States:
//
//   Idle ──move──▶ Syncing ──pass done (ok or err)──▶ Idle
//     │                │
//     └──dispose──▶ Disposed ◀──pass done, dispose pending
//
// A move delivered while Syncing is a side effect of our own set_camera
// calls and is dropped. That keeps one pass per user move no matter whether
// the engine re-raises "move" for programmatic camera changes.
//
// Listeners hold a Weak back-reference, so a map never keeps the core alive.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, info, trace};

use super::synchronizer::CameraSynchronizer;
use crate::core::constants::PRIMARY_INDEX;
use crate::core::error::{Result, SpyglassError};
use crate::core::types::ListenerId;
use crate::map::{MapView, MoveHandler};

// =============================================================================
// STATE
// =============================================================================

/// Where the lifecycle manager is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Listeners armed, waiting for a move
    Idle,
    /// A synchronization pass is running; incoming moves are suppressed
    Syncing,
    /// Listeners released; terminal
    Disposed,
}

/// Counters for observing the guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Synchronization passes started
    pub passes: u64,
    /// Moves dropped because a pass was already running
    pub suppressed: u64,
}

/// A listener attached to one participant.
#[derive(Debug, Clone, Copy)]
struct Listener {
    participant: usize,
    id: ListenerId,
}

// =============================================================================
// SYNC CORE
// =============================================================================

/// Move-handler lifecycle around a [`CameraSynchronizer`].
pub struct SyncCore {
    synchronizer: CameraSynchronizer,

    state: Cell<SyncState>,

    /// Dispose was requested mid-pass; finish it when the pass ends
    dispose_pending: Cell<bool>,

    listeners: RefCell<Vec<Listener>>,

    stats: Cell<SyncStats>,

    /// Weak self-reference handed to listeners
    self_weak: RefCell<Weak<SyncCore>>,
}

impl SyncCore {
    /// Wrap `synchronizer`. No listeners are attached yet.
    pub fn new(synchronizer: CameraSynchronizer) -> Rc<Self> {
        let core = Rc::new(Self {
            synchronizer,
            state: Cell::new(SyncState::Idle),
            dispose_pending: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
            stats: Cell::new(SyncStats::default()),
            self_weak: RefCell::new(Weak::new()),
        });

        *core.self_weak.borrow_mut() = Rc::downgrade(&core);

        core
    }

    /// Align every map with the primary, then arm one listener per map.
    pub fn start(&self) -> Result<()> {
        self.ensure_live()?;
        self.run_pass(PRIMARY_INDEX)?;
        self.attach_listeners();
        Ok(())
    }

    pub fn state(&self) -> SyncState {
        self.state.get()
    }

    pub fn stats(&self) -> SyncStats {
        self.stats.get()
    }

    pub fn synchronizer(&self) -> &CameraSynchronizer {
        &self.synchronizer
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// React to "move" from the participant at `source`.
    pub fn handle_move(&self, source: usize) -> Result<()> {
        match self.state.get() {
            SyncState::Idle => self.run_pass(source),
            SyncState::Syncing => {
                self.bump(|s| s.suppressed += 1);
                trace!(source, "Suppressed move raised during synchronization");
                Ok(())
            }
            SyncState::Disposed => {
                trace!(source, "Move after dispose ignored");
                Ok(())
            }
        }
    }

    /// Release every listener.
    ///
    /// Called during a pass, the release happens once the pass finishes.
    pub fn dispose(&self) -> Result<()> {
        match self.state.get() {
            SyncState::Disposed => Err(SpyglassError::Disposed),
            SyncState::Syncing => {
                debug!("Dispose requested mid-pass, deferring");
                self.dispose_pending.set(true);
                Ok(())
            }
            SyncState::Idle => {
                self.finish_dispose();
                Ok(())
            }
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.state.get() == SyncState::Disposed || self.dispose_pending.get() {
            return Err(SpyglassError::Disposed);
        }
        Ok(())
    }

    // =========================================================================
    // PASS
    // =========================================================================

    fn run_pass(&self, source: usize) -> Result<()> {
        self.state.set(SyncState::Syncing);
        self.bump(|s| s.passes += 1);

        // Restores Idle (or completes a deferred dispose) even on error
        struct PassGuard<'a> {
            core: &'a SyncCore,
        }

        impl Drop for PassGuard<'_> {
            fn drop(&mut self) {
                if self.core.dispose_pending.get() {
                    self.core.finish_dispose();
                } else {
                    self.core.state.set(SyncState::Idle);
                }
            }
        }

        let _guard = PassGuard { core: self };
        self.synchronizer.synchronize_from(source)
    }

    fn bump(&self, f: impl FnOnce(&mut SyncStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }

    // =========================================================================
    // LISTENERS
    // =========================================================================

    fn attach_listeners(&self) {
        let weak = self.self_weak.borrow().clone();
        let mut listeners = self.listeners.borrow_mut();

        for (index, map) in self.synchronizer.participants().iter().enumerate() {
            let weak = weak.clone();
            let handler: MoveHandler = Rc::new(move || match weak.upgrade() {
                Some(core) => core.handle_move(index),
                None => Ok(()),
            });

            let id = map.on_move(handler);
            listeners.push(Listener {
                participant: index,
                id,
            });
        }
    }

    fn detach_listeners(&self) {
        let listeners: Vec<_> = self.listeners.borrow_mut().drain(..).collect();
        let participants = self.synchronizer.participants();

        for listener in listeners {
            if let Some(map) = participants.get(listener.participant) {
                map.remove_move(listener.id);
            }
        }
    }

    fn finish_dispose(&self) {
        self.detach_listeners();
        self.dispose_pending.set(false);
        self.state.set(SyncState::Disposed);

        let stats = self.stats.get();
        info!(
            passes = stats.passes,
            suppressed = stats.suppressed,
            "Camera sync disposed"
        );
    }
}

impl Drop for SyncCore {
    fn drop(&mut self) {
        // Never leave listeners behind on maps the caller still owns
        self.detach_listeners();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MapError;
    use crate::core::types::{Camera, LngLat};
    use crate::map::MemoryMap;

    fn pair() -> (Rc<MemoryMap>, Rc<MemoryMap>) {
        (
            Rc::new(MemoryMap::new(Camera::new(LngLat::new(10.0, 50.0), 6.0))),
            Rc::new(MemoryMap::new(Camera::new(LngLat::new(0.0, 0.0), 1.0))),
        )
    }

    fn core_for(a: &Rc<MemoryMap>, b: &Rc<MemoryMap>) -> Rc<SyncCore> {
        let views = vec![a.clone() as Rc<dyn MapView>, b.clone() as Rc<dyn MapView>];
        SyncCore::new(CameraSynchronizer::new(views).unwrap())
    }

    #[test]
    fn start_aligns_to_primary_then_arms_listeners() {
        let (a, b) = pair();
        let core = core_for(&a, &b);

        core.start().unwrap();

        assert_eq!(b.camera(), a.camera());
        assert_eq!(a.listener_count(), 1);
        assert_eq!(b.listener_count(), 1);
        assert_eq!(core.state(), SyncState::Idle);
        assert_eq!(core.stats().passes, 1);
    }

    #[test]
    fn echoed_moves_are_suppressed() {
        let (a, b) = pair();
        a.emit_move_on_set_camera(true);
        b.emit_move_on_set_camera(true);
        let core = core_for(&a, &b);
        core.start().unwrap();

        let before = core.stats();
        b.move_to(Camera::new(LngLat::new(3.0, 4.0), 8.0)).unwrap();
        let after = core.stats();

        assert_eq!(after.passes - before.passes, 1);
        assert_eq!(after.suppressed - before.suppressed, 1);
        assert_eq!(a.camera(), b.camera());
        assert_eq!(core.state(), SyncState::Idle);
    }

    #[test]
    fn failed_pass_returns_to_idle() {
        let (a, b) = pair();
        let core = core_for(&a, &b);
        core.start().unwrap();

        b.fail_camera_updates(true);
        let result = a.move_to(Camera::new(LngLat::new(1.0, 1.0), 2.0));

        assert!(matches!(result, Err(SpyglassError::Map(MapError::Camera(_)))));
        assert_eq!(core.state(), SyncState::Idle);
        assert_eq!(core.listener_count(), 2);

        // Still works once the map recovers
        b.fail_camera_updates(false);
        a.move_to(Camera::new(LngLat::new(2.0, 2.0), 3.0)).unwrap();
        assert_eq!(b.camera(), a.camera());
    }

    #[test]
    fn dispose_detaches_and_is_terminal() {
        let (a, b) = pair();
        let core = core_for(&a, &b);
        core.start().unwrap();

        core.dispose().unwrap();

        assert_eq!(core.state(), SyncState::Disposed);
        assert_eq!(a.listener_count(), 0);
        assert_eq!(b.listener_count(), 0);
        assert_eq!(core.dispose(), Err(SpyglassError::Disposed));
        assert_eq!(core.start(), Err(SpyglassError::Disposed));
        assert_eq!(core.handle_move(0), Ok(()));
    }

    #[test]
    fn dispose_during_pass_is_deferred() {
        let (a, b) = pair();
        let core = core_for(&a, &b);
        core.start().unwrap();

        // A listener on the target that disposes the core mid-pass
        let weak = Rc::downgrade(&core);
        b.emit_move_on_set_camera(true);
        b.on_move(Rc::new(move || {
            if let Some(core) = weak.upgrade() {
                assert_eq!(core.state(), SyncState::Syncing);
                core.dispose()?;
                assert_eq!(core.state(), SyncState::Syncing);
            }
            Ok(())
        }));

        a.move_to(Camera::new(LngLat::new(7.0, 7.0), 7.0)).unwrap();

        assert_eq!(b.camera(), a.camera());
        assert_eq!(core.state(), SyncState::Disposed);
        // Only the test's own listener remains on b
        assert_eq!(a.listener_count(), 0);
        assert_eq!(b.listener_count(), 1);
    }

    #[test]
    fn dropping_core_releases_listeners() {
        let (a, b) = pair();
        {
            let core = core_for(&a, &b);
            core.start().unwrap();
            assert_eq!(a.listener_count(), 1);
        }

        assert_eq!(a.listener_count(), 0);
        assert_eq!(b.listener_count(), 0);
    }
}
