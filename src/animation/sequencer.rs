//! Transition sequencer
//!
//! The [`Sequencer`] is the one state machine behind the showcase. It owns
//! the animation lock, the ambient rotation mode, the navigation indicators
//! and the frame dispatcher, and exposes exactly two entry points:
//! [`Sequencer::request`] for navigation clicks and [`Sequencer::frame`] for
//! the per-frame tick.
//!
//! ```text
//!            request(point not active)
//!   Idle ───────────────────────────────▶ Busy(kind)
//!    ▲                                        │
//!    └────────── all tweens reached t = 1 ────┘
//! ```
//!
//! Clicks while busy and clicks on the active point are ignored. A request
//! made before the model has loaded updates the indicator and then releases
//! the lock straight away, so the showcase can never wedge in `Busy`.

use std::time::Duration;

use log::{debug, info, warn};

use super::{
    dispatcher::FrameDispatcher,
    lock::{AnimationLock, LockState},
    rotation::RotationMode,
    transitions::TransitionKind,
};
use crate::config::ShowcaseConfig;
use crate::navigation::{NavPoint, NavigationBar};
use crate::stage::Stage;

/// What a navigation click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The transition is scheduled and holds the lock
    Started(TransitionKind),
    /// Another transition is running; nothing changed
    Busy,
    /// The clicked point is already active; nothing changed
    AlreadyActive,
    /// The indicator moved but there is no model to animate
    Abandoned(TransitionKind),
}

pub struct Sequencer {
    config: ShowcaseConfig,
    lock: AnimationLock,
    rotation: RotationMode,
    navigation: NavigationBar,
    dispatcher: FrameDispatcher<RotationMode>,
}

impl Sequencer {
    pub fn new(config: &ShowcaseConfig) -> Self {
        Self {
            config: config.clone(),
            lock: AnimationLock::new(),
            rotation: RotationMode::about_y(),
            navigation: NavigationBar::new(config.initial_point),
            dispatcher: FrameDispatcher::new(),
        }
    }

    pub fn lock_state(&self) -> LockState {
        self.lock.state()
    }

    pub fn is_busy(&self) -> bool {
        self.lock.is_busy()
    }

    pub fn rotation(&self) -> RotationMode {
        self.rotation
    }

    pub fn navigation(&self) -> &NavigationBar {
        &self.navigation
    }

    /// Number of transitions currently writing to the stage
    pub fn running(&self) -> usize {
        self.dispatcher.len()
    }

    /// Handles a click on `point` at time `now`
    pub fn request(&mut self, point: NavPoint, stage: &mut Stage, now: Duration) -> RequestOutcome {
        if self.navigation.is_active(point) {
            debug!("{} ignored: already active", point.label());
            return RequestOutcome::AlreadyActive;
        }

        let kind = point.transition();
        if !self.lock.try_acquire(kind) {
            debug!("{} ignored: {:?} still running", point.label(), self.lock.state());
            return RequestOutcome::Busy;
        }
        self.navigation.activate(point);

        if !stage.has_model() {
            warn!("{} selected but no model is loaded; skipping {:?}", point.label(), kind);
            self.lock.release();
            return RequestOutcome::Abandoned(kind);
        }

        self.rotation = RotationMode::still();
        match kind.begin(&self.config, stage, now) {
            Some(transition) => {
                info!("{} selected, starting {:?}", point.label(), kind);
                self.dispatcher.schedule(transition);
                RequestOutcome::Started(kind)
            }
            None => {
                self.lock.release();
                RequestOutcome::Abandoned(kind)
            }
        }
    }

    /// Runs one frame: ambient rotation first, then transition tweens
    ///
    /// Returns the transition that completed on this frame, if any. Its
    /// rotation mode takes effect from the next frame on.
    pub fn frame(&mut self, stage: &mut Stage, now: Duration) -> Option<TransitionKind> {
        if let Some(model) = stage.model.as_mut() {
            self.rotation.apply(model, &self.config.idle);
        }

        let mut finished = None;
        for (kind, rotation) in self.dispatcher.tick(stage, now) {
            debug!("{:?} complete, rotation now {:?}", kind, rotation);
            self.rotation = rotation;
            self.lock.release();
            finished = Some(kind);
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Rgb;
    use cgmath::Vector3;
    use std::f32::consts::TAU;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn setup() -> (Sequencer, Stage) {
        let config = ShowcaseConfig::default();
        (Sequencer::new(&config), config.initial_stage(true))
    }

    #[test]
    fn test_starts_idle_spinning_about_y() {
        let (sequencer, _) = setup();
        assert_eq!(sequencer.lock_state(), LockState::Idle);
        assert_eq!(sequencer.rotation(), RotationMode::about_y());
        assert_eq!(sequencer.navigation().active(), Some(NavPoint::Point1));
    }

    #[test]
    fn test_active_point_click_is_noop() {
        let (mut sequencer, mut stage) = setup();
        sequencer.frame(&mut stage, ms(0));
        let before = stage.clone();

        let outcome = sequencer.request(NavPoint::Point1, &mut stage, ms(10));
        assert_eq!(outcome, RequestOutcome::AlreadyActive);
        assert_eq!(stage, before);
        assert_eq!(sequencer.lock_state(), LockState::Idle);
        assert_eq!(sequencer.navigation().active(), Some(NavPoint::Point1));
        assert_eq!(sequencer.running(), 0);
    }

    #[test]
    fn test_busy_click_is_ignored() {
        let (mut sequencer, mut stage) = setup();
        assert_eq!(
            sequencer.request(NavPoint::Point3, &mut stage, ms(0)),
            RequestOutcome::Started(TransitionKind::ZoomAndLoop)
        );
        let before = stage.clone();

        assert_eq!(
            sequencer.request(NavPoint::Point2, &mut stage, ms(5)),
            RequestOutcome::Busy
        );
        assert_eq!(
            sequencer.request(NavPoint::Point1, &mut stage, ms(6)),
            RequestOutcome::Busy
        );
        assert_eq!(stage, before);
        assert_eq!(sequencer.navigation().active(), Some(NavPoint::Point3));
        assert_eq!(sequencer.running(), 1);
    }

    #[test]
    fn test_busy_click_keeps_lock_holder() {
        let (mut sequencer, mut stage) = setup();
        sequencer.request(NavPoint::Point2, &mut stage, ms(0));
        assert_eq!(
            sequencer.lock_state(),
            LockState::Busy(TransitionKind::Composite)
        );

        assert_eq!(
            sequencer.request(NavPoint::Point1, &mut stage, ms(10)),
            RequestOutcome::Busy
        );
        assert_eq!(
            sequencer.request(NavPoint::Point2, &mut stage, ms(20)),
            RequestOutcome::AlreadyActive
        );
        assert_eq!(
            sequencer.lock_state(),
            LockState::Busy(TransitionKind::Composite)
        );
        assert_eq!(sequencer.navigation().active(), Some(NavPoint::Point2));
        assert_eq!(sequencer.running(), 1);
    }

    #[test]
    fn test_rapid_clicks_never_overlap() {
        let (mut sequencer, mut stage) = setup();
        let clicks = [
            NavPoint::Point2,
            NavPoint::Point3,
            NavPoint::Point1,
            NavPoint::Point3,
            NavPoint::Point2,
        ];
        for step in 0..400u64 {
            let now = ms(step * 16);
            sequencer.request(clicks[(step % 5) as usize], &mut stage, now);
            assert!(sequencer.running() <= 1);
            sequencer.frame(&mut stage, now);
            assert!(sequencer.running() <= 1);
            assert_eq!(sequencer.is_busy(), sequencer.running() == 1);
        }
    }

    #[test]
    fn test_reset_endpoints() {
        let config = ShowcaseConfig::default().with_initial_point(Some(NavPoint::Point2));
        let mut sequencer = Sequencer::new(&config);
        let mut stage = config.initial_stage(true);
        stage.model.as_mut().unwrap().rotation = Vector3::new(0.4, 2.5, 0.1);
        stage.background = Rgb::from_hex(0xDC143C);
        let before = stage.clone();

        assert_eq!(
            sequencer.request(NavPoint::Point1, &mut stage, ms(0)),
            RequestOutcome::Started(TransitionKind::Reset)
        );
        sequencer.frame(&mut stage, ms(0));
        assert_eq!(stage, before);

        sequencer.frame(&mut stage, ms(500));
        assert!(sequencer.is_busy());

        assert_eq!(
            sequencer.frame(&mut stage, ms(1000)),
            Some(TransitionKind::Reset)
        );
        let model = stage.model.unwrap();
        assert_eq!(stage.camera, Vector3::new(0.0, -0.1, 3.0));
        assert_eq!(model.position, Vector3::new(0.0, -0.45, 0.0));
        assert_eq!(model.rotation.x, 0.0);
        assert_eq!(model.rotation.y, 0.0);
        assert_eq!(model.rotation.z, 0.1);
        assert_eq!(stage.background, Rgb::from_hex(0x4169E1));
        assert_eq!(sequencer.lock_state(), LockState::Idle);
    }

    #[test]
    fn test_reset_overshoot_still_exact() {
        let config = ShowcaseConfig::default().with_initial_point(Some(NavPoint::Point3));
        let mut sequencer = Sequencer::new(&config);
        let mut stage = config.initial_stage(true);

        sequencer.request(NavPoint::Point1, &mut stage, ms(100));
        assert_eq!(sequencer.frame(&mut stage, ms(5000)), Some(TransitionKind::Reset));
        assert_eq!(stage.camera, Vector3::new(0.0, -0.1, 3.0));
        assert_eq!(stage.model.unwrap().position, Vector3::new(0.0, -0.45, 0.0));
    }

    #[test]
    fn test_idle_y_rotation_resumes_after_reset() {
        let config = ShowcaseConfig::default().with_initial_point(Some(NavPoint::Point2));
        let mut sequencer = Sequencer::new(&config);
        let mut stage = config.initial_stage(true);

        sequencer.request(NavPoint::Point1, &mut stage, ms(0));
        assert!(sequencer.rotation().is_still());

        sequencer.frame(&mut stage, ms(999));
        assert!(sequencer.rotation().is_still());

        sequencer.frame(&mut stage, ms(1000));
        assert_eq!(stage.model.unwrap().rotation.y, 0.0);
        assert_eq!(sequencer.rotation(), RotationMode::about_y());

        sequencer.frame(&mut stage, ms(1016));
        let rotation = stage.model.unwrap().rotation;
        assert_eq!(rotation.y, 0.01);
        assert_eq!(rotation.x, 0.0);
    }

    #[test]
    fn test_zoom_and_loop() {
        let (mut sequencer, mut stage) = setup();

        sequencer.request(NavPoint::Point3, &mut stage, ms(0));
        let model = stage.model.unwrap();
        assert_eq!(model.rotation, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(model.position, Vector3::new(0.0, 4.8, 0.0));

        sequencer.frame(&mut stage, ms(500));
        assert_eq!(stage.model.unwrap().rotation, Vector3::new(0.0, 0.0, 0.0));

        assert_eq!(
            sequencer.frame(&mut stage, ms(1000)),
            Some(TransitionKind::ZoomAndLoop)
        );
        assert_eq!(stage.camera, Vector3::new(0.0, 0.0, 9.0));
        assert_eq!(stage.background, Rgb::from_hex(0xF0E68C));
        assert!(!sequencer.is_busy());

        sequencer.frame(&mut stage, ms(1016));
        sequencer.frame(&mut stage, ms(1032));
        let rotation = stage.model.unwrap().rotation;
        assert_eq!(rotation, Vector3::new(0.02, 0.02, 0.02));
    }

    #[test]
    fn test_next_transition_stops_free_spin() {
        let (mut sequencer, mut stage) = setup();
        sequencer.request(NavPoint::Point3, &mut stage, ms(0));
        sequencer.frame(&mut stage, ms(1000));
        sequencer.frame(&mut stage, ms(1016));
        assert!(sequencer.rotation().free_spin.is_some());

        sequencer.request(NavPoint::Point1, &mut stage, ms(1020));
        assert!(sequencer.rotation().is_still());
        let z = stage.model.unwrap().rotation.z;

        sequencer.frame(&mut stage, ms(1030));
        assert_eq!(stage.model.unwrap().rotation.z, z);
    }

    #[test]
    fn test_composite_waits_for_both_tweens() {
        let (mut sequencer, mut stage) = setup();

        assert_eq!(
            sequencer.request(NavPoint::Point2, &mut stage, ms(0)),
            RequestOutcome::Started(TransitionKind::Composite)
        );
        assert_eq!(stage.camera, Vector3::new(0.0, -0.2, 3.0));

        assert_eq!(sequencer.frame(&mut stage, ms(1800)), None);
        assert_eq!(
            stage.model.unwrap().rotation.x,
            std::f32::consts::PI * 4.0
        );
        assert!(sequencer.is_busy());
        assert!(sequencer.rotation().is_still());

        assert_eq!(sequencer.frame(&mut stage, ms(1999)), None);
        assert!(sequencer.is_busy());

        assert_eq!(
            sequencer.frame(&mut stage, ms(2000)),
            Some(TransitionKind::Composite)
        );
        assert_eq!(stage.background, Rgb::from_hex(0xDC143C));
        assert_eq!(sequencer.lock_state(), LockState::Idle);
        assert_eq!(sequencer.rotation(), RotationMode::about_x());

        let before = stage.model.unwrap().rotation;
        sequencer.frame(&mut stage, ms(2016));
        assert_eq!(
            stage.model.unwrap().rotation,
            Vector3::new((before.x + 0.005).rem_euclid(TAU), before.y, before.z)
        );
        assert_eq!(before.y, 0.0);
        assert_eq!(before.z, 0.0);
    }

    #[test]
    fn test_composite_with_faster_fade() {
        let mut config = ShowcaseConfig::default();
        config.composite.color_duration = ms(500);
        config.composite.sweep_duration = ms(1500);
        let mut sequencer = Sequencer::new(&config);
        let mut stage = config.initial_stage(true);

        sequencer.request(NavPoint::Point2, &mut stage, ms(0));
        assert_eq!(sequencer.frame(&mut stage, ms(500)), None);
        assert_eq!(stage.background, Rgb::from_hex(0xDC143C));
        assert!(sequencer.is_busy());

        assert_eq!(
            sequencer.frame(&mut stage, ms(1500)),
            Some(TransitionKind::Composite)
        );
        assert!(!sequencer.is_busy());
    }

    #[test]
    fn test_missing_model_releases_lock() {
        let config = ShowcaseConfig::default();
        let mut sequencer = Sequencer::new(&config);
        let mut stage = config.initial_stage(false);
        let before = stage.clone();

        for point in [NavPoint::Point2, NavPoint::Point3, NavPoint::Point1] {
            let outcome = sequencer.request(point, &mut stage, ms(0));
            assert_eq!(outcome, RequestOutcome::Abandoned(point.transition()));
            assert_eq!(sequencer.navigation().active(), Some(point));
            assert_eq!(sequencer.lock_state(), LockState::Idle);
            sequencer.frame(&mut stage, ms(16));
            assert_eq!(stage, before);
        }
    }
}
