// ============================================================================
// spark-spyglass - Camera Synchronizer
// Copy one map's camera onto every other participant
// ============================================================================

use std::rc::Rc;

use tracing::debug;

use crate::core::constants::MIN_PARTICIPANTS;
use crate::core::error::{Result, SpyglassError};
use crate::map::{same_map, MapView};

/// An ordered set of maps whose cameras are kept identical.
///
/// Participants are matched by identity. Order only matters for the
/// spyglass, which seeds the first pass from index 0.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use spark_spyglass::{Camera, CameraSynchronizer, LngLat, MapView, MemoryMap};
///
/// let a: Rc<dyn MapView> = Rc::new(MemoryMap::new(Camera::new(LngLat::new(1.0, 2.0), 9.0)));
/// let b: Rc<dyn MapView> = Rc::new(MemoryMap::new(Camera::default()));
///
/// let sync = CameraSynchronizer::new(vec![a.clone(), b.clone()]).unwrap();
/// sync.synchronize(&a).unwrap();
///
/// assert_eq!(b.camera(), a.camera());
/// ```
pub struct CameraSynchronizer {
    participants: Vec<Rc<dyn MapView>>,
}

impl CameraSynchronizer {
    /// Register `participants`. At least two maps are required.
    pub fn new(participants: Vec<Rc<dyn MapView>>) -> Result<Self> {
        if participants.len() < MIN_PARTICIPANTS {
            return Err(SpyglassError::NotEnoughParticipants(participants.len()));
        }
        Ok(Self { participants })
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participants(&self) -> &[Rc<dyn MapView>] {
        &self.participants
    }

    pub fn participant(&self, index: usize) -> Result<&Rc<dyn MapView>> {
        self.participants
            .get(index)
            .ok_or(SpyglassError::ParticipantIndex {
                index,
                len: self.participants.len(),
            })
    }

    /// Position of `map` among the participants, by identity.
    pub fn index_of(&self, map: &Rc<dyn MapView>) -> Option<usize> {
        self.participants.iter().position(|p| same_map(p, map))
    }

    /// Push `source`'s camera to every other participant.
    ///
    /// A source that is not registered is rejected before any map is
    /// touched.
    pub fn synchronize(&self, source: &Rc<dyn MapView>) -> Result<()> {
        let index = self
            .index_of(source)
            .ok_or(SpyglassError::UnknownParticipant)?;
        self.synchronize_from(index)
    }

    /// Push the camera of the participant at `index` to all the others.
    ///
    /// Stops at the first target that fails and returns its error.
    pub fn synchronize_from(&self, index: usize) -> Result<()> {
        let camera = self.participant(index)?.camera();

        debug!(
            source = index,
            targets = self.participants.len() - 1,
            zoom = camera.zoom,
            "Synchronizing cameras"
        );

        for (i, target) in self.participants.iter().enumerate() {
            if i == index {
                continue;
            }
            target.set_camera(&camera)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
