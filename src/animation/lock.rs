use super::transitions::TransitionKind;

/// Lock state; `Busy` remembers which transition holds it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Idle,
    Busy(TransitionKind),
}

/// Reentrancy gate that keeps transitions from overlapping
///
/// This is not a thread lock: everything runs on the event loop thread.
/// It only stops a second click from starting a transition while another
/// one is still writing to the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationLock {
    state: LockState,
}

impl AnimationLock {
    pub fn new() -> Self {
        Self {
            state: LockState::Idle,
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, LockState::Busy(_))
    }

    /// Moves Idle → Busy; returns false (and changes nothing) when already busy
    pub fn try_acquire(&mut self, kind: TransitionKind) -> bool {
        if self.is_busy() {
            return false;
        }
        self.state = LockState::Busy(kind);
        true
    }

    pub fn release(&mut self) {
        self.state = LockState::Idle;
    }
}

impl Default for AnimationLock {
    fn default() -> Self {
        Self::new()
    }
}
