//! View state - что presentation layer сообщает симуляции о камере
//!
//! Клиент пишет сюда направление взгляда и pointer lock, контроллер читает.

use bevy::prelude::*;

/// Направление взгляда + захвачен ли указатель
///
/// Пока `locked == false`, контроллер не трогает тело игрока (input при этом
/// продолжает накапливаться).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Unit forward вектор камеры (world space)
    pub forward: Vec3,
    /// Pointer lock engaged
    pub locked: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            locked: false,
        }
    }
}

impl ViewState {
    /// Forward из yaw/pitch (radians), Bevy convention: yaw=0 смотрит в −Z
    pub fn forward_from_angles(yaw: f32, pitch: f32) -> Vec3 {
        Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0) * Vec3::NEG_Z
    }
}
