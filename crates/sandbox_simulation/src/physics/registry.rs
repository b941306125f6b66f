//! Rigid Body Registry + Sync Step
//!
//! # Архитектура
//! - Registry: список пар {visual entity ↔ body entity} для динамических тел
//! - Пополняется инкрементально Body Factory (только mass > 0)
//! - Sync Step: после advance копирует transform тела на visual
//!
//! Static тела (mass = 0) сюда НЕ попадают - их визуал выставлен один раз
//! при создании и дальше не трогается.

use bevy::prelude::*;
use bevy_rapier3d::prelude::RigidBody;

use crate::logger;

/// Пара visual ↔ body (неизменяемая на всё время жизни объекта)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicBodyEntry {
    pub visual: Entity,
    pub body: Entity,
}

/// Registry: все динамические тела, у которых есть визуал
#[derive(Resource, Debug, Default)]
pub struct RigidBodyRegistry {
    entries: Vec<DynamicBodyEntry>,
}

impl RigidBodyRegistry {
    /// Добавить пару. Повторная регистрация того же тела игнорируется.
    pub fn insert(&mut self, visual: Entity, body: Entity) -> bool {
        if self.contains_body(body) {
            return false;
        }
        self.entries.push(DynamicBodyEntry { visual, body });
        true
    }

    pub fn contains_body(&self, body: Entity) -> bool {
        self.entries.iter().any(|entry| entry.body == body)
    }

    pub fn visual_of(&self, body: Entity) -> Option<Entity> {
        self.entries
            .iter()
            .find(|entry| entry.body == body)
            .map(|entry| entry.visual)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DynamicBodyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sync Step: body transform → visual transform (verbatim)
///
/// # Schedule
/// - PostUpdate, после `PhysicsSet::Writeback` (см. `FrameSet::Sync`)
///
/// Тело без transform'а (ещё не до конца заспавнено) пропускается на этот кадр.
pub fn sync_bodies_to_visuals(
    registry: Res<RigidBodyRegistry>,
    bodies: Query<&Transform, With<RigidBody>>,
    mut visuals: Query<&mut Transform, Without<RigidBody>>,
) {
    for entry in registry.iter() {
        let Ok(body_transform) = bodies.get(entry.body) else {
            logger::log_warning(&format!(
                "Sync: body {:?} has no transform this frame, skipping",
                entry.body
            ));
            continue;
        };

        let Ok(mut visual_transform) = visuals.get_mut(entry.visual) else {
            continue;
        };

        visual_transform.translation = body_transform.translation;
        visual_transform.rotation = body_transform.rotation;
    }
}
