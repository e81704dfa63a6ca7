//! The three named transitions
//!
//! Each builder snaps whatever the transition sets instantly, captures the
//! current stage values as tween start points and returns a [`Transition`]
//! whose completion payload is the rotation mode to adopt afterwards.
//! Builders return `None` without touching the stage when no model is loaded.

use std::time::Duration;

use cgmath::{Vector2, Vector3};

use super::{
    dispatcher::Transition,
    rotation::RotationMode,
    tween::{Track, Tween},
};
use crate::config::{CompositeConfig, ResetConfig, ShowcaseConfig, ZoomConfig};
use crate::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Glide camera, model and background back to the resting pose
    Reset,
    /// Snap the model, zoom the camera out, then spin freely
    ZoomAndLoop,
    /// Background fade alongside a fast X sweep, then slow X rotation
    Composite,
}

impl TransitionKind {
    /// Builds the transition against the current stage
    pub fn begin(
        self,
        config: &ShowcaseConfig,
        stage: &mut Stage,
        now: Duration,
    ) -> Option<Transition<RotationMode>> {
        match self {
            TransitionKind::Reset => reset(&config.reset, stage, now),
            TransitionKind::ZoomAndLoop => zoom_and_loop(&config.zoom, stage, now),
            TransitionKind::Composite => composite(&config.composite, stage, now),
        }
    }
}

pub fn reset(
    config: &ResetConfig,
    stage: &Stage,
    now: Duration,
) -> Option<Transition<RotationMode>> {
    let model = stage.model.as_ref()?;

    let tween = Tween::new(now, config.duration)
        .with_track(Track::CameraPosition {
            from: stage.camera,
            to: config.camera,
        })
        .with_track(Track::ModelPosition {
            from: model.position,
            to: config.model_position,
        })
        .with_track(Track::ModelRotationXY {
            from: Vector2::new(model.rotation.x, model.rotation.y),
            to: Vector2::new(0.0, 0.0),
        })
        .with_track(Track::Background {
            from: stage.background,
            to: config.background,
        });

    Some(Transition::new(TransitionKind::Reset, RotationMode::about_y()).with_tween(tween))
}

pub fn zoom_and_loop(
    config: &ZoomConfig,
    stage: &mut Stage,
    now: Duration,
) -> Option<Transition<RotationMode>> {
    let model = stage.model.as_mut()?;
    model.rotation = Vector3::new(0.0, 0.0, 0.0);
    model.position = config.model_position;

    let tween = Tween::new(now, config.duration)
        .with_track(Track::CameraPosition {
            from: stage.camera,
            to: config.camera,
        })
        .with_track(Track::Background {
            from: stage.background,
            to: config.background,
        });

    Some(
        Transition::new(TransitionKind::ZoomAndLoop, RotationMode::free(config.spin))
            .with_tween(tween),
    )
}

pub fn composite(
    config: &CompositeConfig,
    stage: &mut Stage,
    now: Duration,
) -> Option<Transition<RotationMode>> {
    let model = stage.model.as_mut()?;
    model.rotation = Vector3::new(0.0, 0.0, 0.0);
    model.position = config.model_position;
    let start_x = model.rotation.x;
    stage.camera = config.camera;

    let fade = Tween::new(now, config.color_duration).with_track(Track::Background {
        from: stage.background,
        to: config.background,
    });
    let sweep = Tween::new(now, config.sweep_duration).with_track(Track::ModelRotationX {
        from: start_x,
        to: start_x + config.sweep_angle,
    });

    Some(
        Transition::new(TransitionKind::Composite, RotationMode::about_x())
            .with_tween(fade)
            .with_tween(sweep),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{ModelTransform, Rgb};

    fn stage() -> Stage {
        let mut model = ModelTransform::new(Vector3::new(0.0, -1.0, 0.0), 0.5);
        model.rotation = Vector3::new(0.3, 1.2, 0.7);
        Stage::new(Vector3::new(0.0, -0.6, 3.0), Some(model), Rgb::from_hex(0x202020))
    }

    #[test]
    fn test_reset_captures_start_values() {
        let stage = stage();
        let transition = reset(&ResetConfig::default(), &stage, Duration::ZERO).unwrap();

        assert_eq!(transition.kind(), TransitionKind::Reset);
        assert_eq!(*transition.on_complete(), RotationMode::about_y());
        let tracks = transition.tweens()[0].tracks();
        assert_eq!(tracks.len(), 4);
        assert!(tracks.contains(&Track::ModelRotationXY {
            from: Vector2::new(0.3, 1.2),
            to: Vector2::new(0.0, 0.0),
        }));
    }

    #[test]
    fn test_zoom_snaps_model() {
        let mut stage = stage();
        let config = ZoomConfig::default();
        let transition = zoom_and_loop(&config, &mut stage, Duration::ZERO).unwrap();

        let model = stage.model.unwrap();
        assert_eq!(model.rotation, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(model.position, Vector3::new(0.0, 4.8, 0.0));
        assert_eq!(stage.camera, Vector3::new(0.0, -0.6, 3.0));
        assert_eq!(*transition.on_complete(), RotationMode::free(config.spin));
    }

    #[test]
    fn test_composite_has_two_tweens() {
        let mut stage = stage();
        let config = CompositeConfig::default();
        let transition = composite(&config, &mut stage, Duration::ZERO).unwrap();

        assert_eq!(stage.camera, Vector3::new(0.0, -0.2, 3.0));
        assert_eq!(stage.model.unwrap().position, Vector3::new(0.0, -0.2, 0.0));
        assert_eq!(transition.tweens().len(), 2);
        assert_eq!(transition.tweens()[0].duration(), Duration::from_millis(2000));
        assert_eq!(transition.tweens()[1].duration(), Duration::from_millis(1800));
    }

    #[test]
    fn test_missing_model_builds_nothing() {
        let config = ShowcaseConfig::default();
        for kind in [
            TransitionKind::Reset,
            TransitionKind::ZoomAndLoop,
            TransitionKind::Composite,
        ] {
            let mut stage = Stage::new(Vector3::new(0.0, -0.6, 3.0), None, Rgb::from_hex(0x4169E1));
            let before = stage.clone();
            assert!(kind.begin(&config, &mut stage, Duration::ZERO).is_none());
            assert_eq!(stage, before);
        }
    }
}
