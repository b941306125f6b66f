//! Player Controller - velocity controller поверх dynamics
//!
//! # Архитектура
//! - Читает: `PlayerState` (intent + can_jump), `Velocity`, `ViewState.forward`
//! - Пишет: `Velocity.linvel` целиком (не force!), `PlayerState.can_jump`
//! - Вертикальную скорость трогает только прыжок
//!
//! # Алгоритм (раз в кадр)
//! 1. forward/right на горизонтальной плоскости из взгляда камеры
//! 2. Оси input'а, диагональ нормализуется
//! 3. target = forward·z·speed + right·x·speed
//! 4. Lerp текущей горизонтальной скорости к target:
//!    0.15 если клавиша зажата, 0.1 к нулю если нет
//! 5. Clamp горизонтали до max_velocity
//! 6. Прыжок: rising edge + can_jump → Y = jump_force, can_jump = false
//!
//! # Convention
//! Bevy: right-handed, Y up, камера смотрит в −Z. right = forward × up,
//! поэтому при взгляде в −Z right = +X (D → +X, A → −X).

use bevy::math::Vec3Swizzles;
use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use super::config::PlayerConfig;
use super::player::{Player, PlayerState};
use crate::input::MoveIntent;
use crate::view::ViewState;

/// Горизонтальный базис движения (оба вектора unit, y = 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl MoveBasis {
    /// Проекция взгляда на XZ + renormalize
    ///
    /// Взгляд строго вверх/вниз не задаёт направления - берём −Z.
    pub fn from_view(view_forward: Vec3) -> Self {
        let forward = Vec3::new(view_forward.x, 0.0, view_forward.z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y);

        Self { forward, right }
    }
}

/// Target горизонтальная скорость для intent'а
pub fn target_velocity(intent: &MoveIntent, basis: &MoveBasis, speed: f32) -> Vec3 {
    let axes = intent.axes();
    basis.forward * axes.y * speed + basis.right * axes.x * speed
}

/// Blend горизонтальной скорости к target + clamp
///
/// Асимметричный first-order фильтр: быстрый разгон, длинное скольжение
/// при остановке. Y проходит насквозь без изменений.
pub fn blend_velocity(current: Vec3, target: Vec3, accelerating: bool, config: &PlayerConfig) -> Vec3 {
    let (goal, factor) = if accelerating {
        (target.xz(), config.acceleration_factor)
    } else {
        (Vec2::ZERO, config.deceleration_factor)
    };

    let horizontal = current
        .xz()
        .lerp(goal, factor)
        .clamp_length_max(config.max_velocity);

    Vec3::new(horizontal.x, current.y, horizontal.y)
}

/// Прыжок: перезаписывает Y, если edge пришёл и игрок на земле
///
/// Возвращает `true`, если прыжок состоялся.
pub fn try_jump(velocity: &mut Vec3, jump_edge: bool, can_jump: &mut bool, jump_force: f32) -> bool {
    if !(jump_edge && *can_jump) {
        return false;
    }

    velocity.y = jump_force;
    *can_jump = false;
    true
}

/// Один шаг контроллера над state + velocity (чистая функция кадра)
///
/// Consume'ит jump edge всегда - прыжок без земли не откладывается.
pub fn step_controller(
    state: &mut PlayerState,
    velocity: Vec3,
    view_forward: Vec3,
    config: &PlayerConfig,
) -> Vec3 {
    let basis = MoveBasis::from_view(view_forward);
    let intent = state.input.movement;
    let target = target_velocity(&intent, &basis, config.speed);

    let mut next = blend_velocity(velocity, target, intent.any_held(), config);

    let jump_edge = state.input.jump.take();
    try_jump(&mut next, jump_edge, &mut state.can_jump, config.jump_force);

    next
}

/// Система: Player Controller
///
/// # Schedule
/// - Update, `FrameSet::Control` (после разбора input, до advance)
pub fn drive_player(
    config: Res<PlayerConfig>,
    view: Res<ViewState>,
    mut players: Query<(&mut PlayerState, &mut Velocity), With<Player>>,
) {
    let Ok((mut state, mut velocity)) = players.single_mut() else {
        return;
    };

    if !view.locked {
        // Без pointer lock тело не управляется; edge'и не копим на потом
        state.input.jump.take();
        return;
    }

    let jumped_from_ground = state.can_jump && state.input.jump.is_pending();
    velocity.linvel = step_controller(&mut state, velocity.linvel, view.forward, &config);

    if jumped_from_ground {
        crate::logger::log(&format!("Player jump: vy = {:.2}", velocity.linvel.y));
    }
}
