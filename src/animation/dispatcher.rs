//! Frame-tick dispatcher
//!
//! Every scheduled [`Transition`] is advanced once per frame. A transition is
//! an all-of group: it completes on the first frame where every one of its
//! tweens has reached `t = 1`, however different their durations are. The
//! dispatcher then drops it and returns its completion payload to the caller.

use std::time::Duration;

use log::trace;

use super::{transitions::TransitionKind, tween::Tween};
use crate::stage::Stage;

/// A named group of tweens that completes when all of them have
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<C> {
    kind: TransitionKind,
    tweens: Vec<Tween>,
    on_complete: C,
}

impl<C> Transition<C> {
    pub fn new(kind: TransitionKind, on_complete: C) -> Self {
        Self {
            kind,
            tweens: Vec::new(),
            on_complete,
        }
    }

    pub fn with_tween(mut self, tween: Tween) -> Self {
        self.tweens.push(tween);
        self
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn on_complete(&self) -> &C {
        &self.on_complete
    }

    /// Advances every unfinished tween; true when all are finished
    pub fn advance(&mut self, stage: &mut Stage, now: Duration) -> bool {
        let mut all_done = true;
        for tween in &mut self.tweens {
            all_done &= tween.advance(stage, now);
        }
        all_done
    }
}

/// Advances scheduled transitions and collects the ones that finished
#[derive(Debug)]
pub struct FrameDispatcher<C> {
    active: Vec<Transition<C>>,
}

impl<C> FrameDispatcher<C> {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    pub fn schedule(&mut self, transition: Transition<C>) {
        trace!("scheduling {:?}", transition.kind());
        self.active.push(transition);
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = &Transition<C>> {
        self.active.iter()
    }

    /// Runs one frame at `now`; returns completed transitions in scheduling order
    pub fn tick(&mut self, stage: &mut Stage, now: Duration) -> Vec<(TransitionKind, C)> {
        let mut still_running = Vec::with_capacity(self.active.len());
        let mut completed = Vec::new();

        for mut transition in self.active.drain(..) {
            if transition.advance(stage, now) {
                trace!("{:?} complete", transition.kind);
                completed.push((transition.kind, transition.on_complete));
            } else {
                still_running.push(transition);
            }
        }

        self.active = still_running;
        completed
    }
}

impl<C> Default for FrameDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
