use std::f32::consts::TAU;

use cgmath::Vector3;

use crate::config::IdleConfig;
use crate::stage::ModelTransform;

/// Ambient rotation applied to the model every frame
///
/// `spin_y` and `spin_x` are the slow idle rotations; `free_spin` is the
/// endless three-axis rotation left running by the zoom transition. Every
/// transition clears all of them when it starts and picks a new mode when
/// it completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMode {
    pub spin_y: bool,
    pub spin_x: bool,
    /// Radians per frame on each axis
    pub free_spin: Option<Vector3<f32>>,
}

impl RotationMode {
    pub fn still() -> Self {
        Self {
            spin_y: false,
            spin_x: false,
            free_spin: None,
        }
    }

    pub fn about_y() -> Self {
        Self {
            spin_y: true,
            ..Self::still()
        }
    }

    pub fn about_x() -> Self {
        Self {
            spin_x: true,
            ..Self::still()
        }
    }

    pub fn free(speed: Vector3<f32>) -> Self {
        Self {
            free_spin: Some(speed),
            ..Self::still()
        }
    }

    pub fn is_still(&self) -> bool {
        !self.spin_y && !self.spin_x && self.free_spin.is_none()
    }

    /// Advances the model by one frame of rotation
    ///
    /// Spun axes are kept in `[0, 2π)` so the per-frame step stays exact
    /// however long the showcase runs.
    pub fn apply(&self, model: &mut ModelTransform, idle: &IdleConfig) {
        if self.spin_y {
            model.rotation.y = wrap_angle(model.rotation.y + idle.y_speed);
        }
        if self.spin_x {
            model.rotation.x = wrap_angle(model.rotation.x + idle.x_speed);
        }
        if let Some(speed) = self.free_spin {
            let rotation = model.rotation + speed;
            model.rotation = Vector3::new(
                wrap_angle(rotation.x),
                wrap_angle(rotation.y),
                wrap_angle(rotation.z),
            );
        }
    }
}

fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

impl Default for RotationMode {
    fn default() -> Self {
        Self::about_y()
    }
}
