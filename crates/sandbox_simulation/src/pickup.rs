//! Weapon pickup
//!
//! Оружие лежит на podium'е (static body). Игрок в радиусе + rising edge
//! Interact (E) → оружие его. Один раз: после подбора `WeaponPickup` снимается.

use bevy::prelude::*;

use crate::logger;
use crate::player::{Player, PlayerState};

/// Prop, который можно подобрать
#[derive(Component, Debug, Clone, PartialEq)]
pub struct WeaponPickup {
    pub name: String,
    /// Радиус досягаемости от центра игрока (m)
    pub radius: f32,
}

impl Default for WeaponPickup {
    fn default() -> Self {
        Self {
            name: "Blaster".to_string(),
            radius: 2.5,
        }
    }
}

/// Оружие в руках игрока
#[derive(Component, Debug, Clone, PartialEq)]
pub struct EquippedWeapon {
    pub weapon: Entity,
    pub name: String,
}

/// Event: игрок подобрал оружие (клиент цепляет prop к камере + HUD)
#[derive(Event, Debug, Clone)]
pub struct WeaponPickedUp {
    pub player: Entity,
    pub weapon: Entity,
    pub name: String,
}

/// Система: подбор оружия
///
/// # Schedule
/// - Update, после `FrameSet::Input`
///
/// Edge Interact съедается всегда: нажатие вне радиуса или с оружием в руках
/// не откладывается.
pub fn pickup_weapon(
    mut commands: Commands,
    mut players: Query<(Entity, &Transform, &mut PlayerState, Has<EquippedWeapon>), With<Player>>,
    pickups: Query<(Entity, &Transform, &WeaponPickup)>,
    mut picked: EventWriter<WeaponPickedUp>,
) {
    let Ok((player, player_transform, mut state, armed)) = players.single_mut() else {
        return;
    };

    if !state.input.interact.take() || armed {
        return;
    }

    let closest = pickups
        .iter()
        .map(|(entity, transform, pickup)| {
            let distance = transform.translation.distance(player_transform.translation);
            (entity, pickup, distance)
        })
        .filter(|(_, pickup, distance)| *distance <= pickup.radius)
        .min_by(|a, b| a.2.total_cmp(&b.2));

    let Some((weapon, pickup, distance)) = closest else {
        logger::log("Interact: no weapon in reach");
        return;
    };

    logger::log_info(&format!("Picked up {} ({:.2} m away)", pickup.name, distance));

    commands.entity(weapon).remove::<WeaponPickup>();
    commands.entity(player).insert(EquippedWeapon {
        weapon,
        name: pickup.name.clone(),
    });
    picked.write(WeaponPickedUp {
        player,
        weapon,
        name: pickup.name.clone(),
    });
}
