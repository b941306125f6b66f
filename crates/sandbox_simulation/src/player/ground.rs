//! Ground detection через короткий ray вниз
//!
//! Единственный источник `can_jump`: НЕ contact events, а ray от центра
//! capsule длиной height/2 + ε после каждого advance.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;

use super::config::PlayerConfig;
use super::player::{Player, PlayerState};
use crate::logger;
use crate::physics::ray_test;

/// Точки ground ray для позиции игрока
pub fn ground_ray(position: Vec3, config: &PlayerConfig) -> (Vec3, Vec3) {
    (position, position - Vec3::Y * config.ground_probe_length())
}

/// Система: пересчитать `can_jump` после шага физики
///
/// # Schedule
/// - PostUpdate, `FrameSet::Sync` (после Writeback - позиция уже новая)
pub fn probe_ground(
    rapier_context: ReadRapierContext,
    config: Res<PlayerConfig>,
    mut players: Query<(Entity, &Transform, &mut PlayerState), With<Player>>,
) {
    let Ok((entity, transform, mut state)) = players.single_mut() else {
        return;
    };

    let Ok(context) = rapier_context.single() else {
        logger::log_error("Ground probe: physics context is missing, frame skipped");
        return;
    };

    let (origin, end) = ground_ray(transform.translation, &config);
    let grounded = ray_test(&context, origin, end, Some(entity));

    if state.can_jump != grounded {
        state.can_jump = grounded;
    }
}
