//! Tween descriptors
//!
//! A [`Tween`] owns a start timestamp, a duration and one or more [`Track`]s.
//! Each frame it computes `t = min(elapsed / duration, 1)` and writes the
//! linearly interpolated value of every track into the stage. There is no
//! easing curve.

use std::time::Duration;

use cgmath::{Vector2, Vector3};

use crate::stage::{lerp_f32, lerp_vec3, Rgb, Stage};

/// One interpolated stage property with its start and end values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    CameraPosition {
        from: Vector3<f32>,
        to: Vector3<f32>,
    },
    ModelPosition {
        from: Vector3<f32>,
        to: Vector3<f32>,
    },
    /// X and Y Euler angles only; Z is left alone
    ModelRotationXY {
        from: Vector2<f32>,
        to: Vector2<f32>,
    },
    ModelRotationX {
        from: f32,
        to: f32,
    },
    Background {
        from: Rgb,
        to: Rgb,
    },
}

impl Track {
    /// Writes the value at fraction `t`; model tracks skip a stage without a model
    pub fn apply(&self, stage: &mut Stage, t: f32) {
        match *self {
            Track::CameraPosition { from, to } => {
                stage.camera = lerp_vec3(from, to, t);
            }
            Track::ModelPosition { from, to } => {
                if let Some(model) = stage.model.as_mut() {
                    model.position = lerp_vec3(from, to, t);
                }
            }
            Track::ModelRotationXY { from, to } => {
                if let Some(model) = stage.model.as_mut() {
                    model.rotation.x = lerp_f32(from.x, to.x, t);
                    model.rotation.y = lerp_f32(from.y, to.y, t);
                }
            }
            Track::ModelRotationX { from, to } => {
                if let Some(model) = stage.model.as_mut() {
                    model.rotation.x = lerp_f32(from, to, t);
                }
            }
            Track::Background { from, to } => {
                stage.background = from.lerp(to, t);
            }
        }
    }
}

/// A set of tracks sharing one start time and duration
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    started_at: Duration,
    duration: Duration,
    tracks: Vec<Track>,
    finished: bool,
}

impl Tween {
    pub fn new(started_at: Duration, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
            tracks: Vec::new(),
            finished: false,
        }
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Interpolation fraction at `now`, clamped to `[0, 1]`
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Applies every track at `now`; returns true once `t` has reached 1
    ///
    /// A finished tween no longer writes to the stage.
    pub fn advance(&mut self, stage: &mut Stage, now: Duration) -> bool {
        if self.finished {
            return true;
        }
        let t = self.progress(now);
        for track in &self.tracks {
            track.apply(stage, t);
        }
        self.finished = t >= 1.0;
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::ModelTransform;

    fn stage() -> Stage {
        Stage::new(
            Vector3::new(0.0, 0.0, 2.0),
            Some(ModelTransform::new(Vector3::new(0.0, 0.0, 0.0), 1.0)),
            Rgb::new(0.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_progress_clamps() {
        let tween = Tween::new(Duration::from_millis(500), Duration::from_millis(1000));
        assert_eq!(tween.progress(Duration::from_millis(0)), 0.0);
        assert_eq!(tween.progress(Duration::from_millis(500)), 0.0);
        assert_eq!(tween.progress(Duration::from_millis(1000)), 0.5);
        assert_eq!(tween.progress(Duration::from_millis(1500)), 1.0);
        assert_eq!(tween.progress(Duration::from_millis(9000)), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut tween = Tween::new(Duration::ZERO, Duration::ZERO).with_track(Track::Background {
            from: Rgb::new(0.0, 0.0, 0.0),
            to: Rgb::new(1.0, 1.0, 1.0),
        });
        let mut stage = stage();
        assert!(tween.advance(&mut stage, Duration::ZERO));
        assert_eq!(stage.background, Rgb::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_advance_halfway() {
        let mut tween = Tween::new(Duration::ZERO, Duration::from_millis(1000))
            .with_track(Track::CameraPosition {
                from: Vector3::new(0.0, 0.0, 2.0),
                to: Vector3::new(0.0, 0.0, 4.0),
            })
            .with_track(Track::ModelRotationX { from: 0.0, to: 2.0 });
        let mut stage = stage();

        assert!(!tween.advance(&mut stage, Duration::from_millis(500)));
        assert_eq!(stage.camera, Vector3::new(0.0, 0.0, 3.0));
        assert_eq!(stage.model.unwrap().rotation.x, 1.0);

        assert!(tween.advance(&mut stage, Duration::from_millis(1000)));
        assert!(tween.is_finished());
        assert_eq!(stage.camera, Vector3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_finished_tween_stops_writing() {
        let mut tween = Tween::new(Duration::ZERO, Duration::from_millis(10)).with_track(
            Track::CameraPosition {
                from: Vector3::new(0.0, 0.0, 0.0),
                to: Vector3::new(1.0, 0.0, 0.0),
            },
        );
        let mut stage = stage();
        assert!(tween.advance(&mut stage, Duration::from_millis(20)));

        stage.camera = Vector3::new(5.0, 5.0, 5.0);
        assert!(tween.advance(&mut stage, Duration::from_millis(30)));
        assert_eq!(stage.camera, Vector3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_model_tracks_skip_missing_model() {
        let mut stage = Stage::new(Vector3::new(0.0, 0.0, 2.0), None, Rgb::new(0.0, 0.0, 0.0));
        Track::ModelPosition {
            from: Vector3::new(0.0, 0.0, 0.0),
            to: Vector3::new(1.0, 1.0, 1.0),
        }
        .apply(&mut stage, 0.5);
        assert!(stage.model.is_none());
    }
}
