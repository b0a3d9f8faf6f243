use futures::channel::oneshot;
use log::{info, warn};

use super::AssetError;
use crate::scene::AnimatedObject;

type LoadResult = Result<AnimatedObject, AssetError>;

/// Lifecycle of an asset slot
#[derive(Debug)]
pub enum SlotState {
    /// Nothing was ever requested
    Empty,
    /// A load is in flight on the completion path
    Loading,
    Ready(AnimatedObject),
    Failed(AssetError),
}

/// What a call to [`AssetSlot::poll`] observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEvent {
    Unchanged,
    BecameReady,
    BecameFailed,
}

/// Optional scene member filled in by an asynchronous load.
///
/// The load hands its result over a one-shot channel; the slot only changes state
/// when the frame loop polls it, so all transitions happen on the frame thread.
#[derive(Debug)]
pub struct AssetSlot {
    path: String,
    state: SlotState,
    receiver: Option<oneshot::Receiver<LoadResult>>,
}

/// Sending half handed to the load completion path
#[derive(Debug)]
pub struct SlotCompleter {
    sender: oneshot::Sender<LoadResult>,
}

impl SlotCompleter {
    /// Delivers the load result; a slot that was dropped simply ignores it
    pub fn complete(self, result: LoadResult) {
        let _ = self.sender.send(result);
    }
}

impl AssetSlot {
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            state: SlotState::Empty,
            receiver: None,
        }
    }

    /// A slot in `Loading` plus the completer that resolves it
    pub fn pending(path: impl Into<String>) -> (Self, SlotCompleter) {
        let (sender, receiver) = oneshot::channel();
        let slot = Self {
            path: path.into(),
            state: SlotState::Loading,
            receiver: Some(receiver),
        };
        (slot, SlotCompleter { sender })
    }

    /// A slot whose load could not even be started
    pub fn failed(path: impl Into<String>, error: AssetError) -> Self {
        Self {
            path: path.into(),
            state: SlotState::Failed(error),
            receiver: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SlotState::Ready(_))
    }

    pub fn object(&self) -> Option<&AnimatedObject> {
        match &self.state {
            SlotState::Ready(object) => Some(object),
            _ => None,
        }
    }

    pub fn object_mut(&mut self) -> Option<&mut AnimatedObject> {
        match &mut self.state {
            SlotState::Ready(object) => Some(object),
            _ => None,
        }
    }

    /// Checks for a finished load without blocking.
    ///
    /// `Loading` moves to `Ready` or `Failed` at most once; every other state is final.
    pub fn poll(&mut self) -> SlotEvent {
        let Some(receiver) = self.receiver.as_mut() else {
            return SlotEvent::Unchanged;
        };

        let outcome = match receiver.try_recv() {
            Ok(None) => return SlotEvent::Unchanged,
            Ok(Some(result)) => result,
            Err(oneshot::Canceled) => Err(AssetError::Abandoned(self.path.clone())),
        };
        self.receiver = None;

        match outcome {
            Ok(object) => {
                info!("Asset '{}' ready ({} surfaces)", self.path, object.surfaces.len());
                self.state = SlotState::Ready(object);
                SlotEvent::BecameReady
            }
            Err(error) => {
                warn!("Asset '{}' failed to load: {}", self.path, error);
                self.state = SlotState::Failed(error);
                SlotEvent::BecameFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::box_mesh;
    use crate::material::Material;
    use glam::Vec3;

    fn cube() -> AnimatedObject {
        AnimatedObject::new("cube", box_mesh(Vec3::ONE), Material::default())
    }

    #[test]
    fn test_pending_until_completed() {
        let (mut slot, completer) = AssetSlot::pending("cube.gltf");
        assert_eq!(slot.poll(), SlotEvent::Unchanged);
        assert!(matches!(slot.state(), SlotState::Loading));

        completer.complete(Ok(cube()));
        assert_eq!(slot.poll(), SlotEvent::BecameReady);
        assert!(slot.is_ready());
        assert_eq!(slot.poll(), SlotEvent::Unchanged);
    }

    #[test]
    fn test_failure_is_terminal() {
        let (mut slot, completer) = AssetSlot::pending("broken.gltf");
        completer.complete(Err(AssetError::EmptyModel("broken.gltf".into())));

        assert_eq!(slot.poll(), SlotEvent::BecameFailed);
        assert!(slot.object().is_none());
        assert_eq!(slot.poll(), SlotEvent::Unchanged);
        assert!(matches!(slot.state(), SlotState::Failed(AssetError::EmptyModel(_))));
    }

    #[test]
    fn test_dropped_completer_fails_slot() {
        let (mut slot, completer) = AssetSlot::pending("gone.gltf");
        drop(completer);

        assert_eq!(slot.poll(), SlotEvent::BecameFailed);
        assert!(matches!(slot.state(), SlotState::Failed(AssetError::Abandoned(_))));
    }

    #[test]
    fn test_empty_slot_never_changes() {
        let mut slot = AssetSlot::empty("unused.gltf");
        for _ in 0..10 {
            assert_eq!(slot.poll(), SlotEvent::Unchanged);
        }
        assert!(matches!(slot.state(), SlotState::Empty));
    }
}
