//! Spawn player body

use bevy::prelude::*;
use bevy_rapier3d::prelude::LockedAxes;

use super::config::PlayerConfig;
use super::player::{Player, PlayerState};
use crate::error::BodyError;
use crate::physics::{create_body, BodySpec, PhysicsMaterial, RigidBodyRegistry, ShapeDescriptor};

/// Spawn helper для player body
///
/// - Capsule (radius/height из `PlayerConfig`), mass из config
/// - Restitution 0 (не отскакивает), вращение заблокировано по всем осям -
///   facing задаёт только камера
/// - Без визуала: first-person, в registry не попадает
pub fn spawn_player(
    commands: &mut Commands,
    registry: &mut RigidBodyRegistry,
    config: &PlayerConfig,
    position: Vec3,
) -> Result<Entity, BodyError> {
    let spec = BodySpec::new(
        ShapeDescriptor::Capsule {
            radius: config.radius,
            height: config.height,
        },
        config.mass,
        position,
    )
    .with_material(PhysicsMaterial::player());

    let player = create_body(commands, registry, None, spec)?;

    commands
        .entity(player)
        .insert((Player, PlayerState::default(), LockedAxes::ROTATION_LOCKED));

    Ok(player)
}
