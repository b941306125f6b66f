//! Physics World Adapter - тонкий фасад над Rapier
//!
//! # Архитектура
//! - Rapier живёт в `PostUpdate` (SyncBackend → StepSimulation → Writeback)
//! - `TimestepMode::Fixed`: ровно один шаг `timestep` секунд за кадр,
//!   с `substeps` внутренними подшагами солвера
//! - Никакого accumulator'а: при просадке FPS симуляция замедляется,
//!   шаги не пропускаются и не догоняются
//!
//! Ray test - единственный query, который нужен ядру (ground detection).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Параметры мира физики
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Вектор гравитации (m/s²)
    pub gravity: Vec3,
    /// Фиксированный шаг advance (секунды), не зависит от реального dt кадра
    pub timestep: f32,
    /// Подшаги солвера на один advance
    pub substeps: usize,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 60.0,
            substeps: 10,
        }
    }
}

impl PhysicsSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "physics.gravity",
                message: format!("{:?} is not finite", self.gravity),
            });
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "physics.timestep",
                message: format!("{} (must be > 0)", self.timestep),
            });
        }
        if self.substeps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "physics.substeps",
                message: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }

    /// Режим шага для backend'а
    pub fn timestep_mode(&self) -> TimestepMode {
        TimestepMode::Fixed {
            dt: self.timestep,
            substeps: self.substeps,
        }
    }
}

/// Plugin: Rapier + fixed-step advance
///
/// Регистрирует backend в `PostUpdate`, так что на один `App::update()`
/// приходится ровно один advance.
pub struct PhysicsWorldPlugin;

impl Plugin for PhysicsWorldPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<PhysicsSettings>()
            .cloned()
            .unwrap_or_default();

        // TimestepMode вставляем ПОСЛЕ плагина Rapier, чтобы перебить его default
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
            .insert_resource(settings.timestep_mode())
            .insert_resource(settings)
            .add_systems(
                PostUpdate,
                (sync_timestep_mode, apply_world_gravity).before(PhysicsSet::SyncBackend),
            );
    }
}

/// Подтягивает timestep/substeps если `PhysicsSettings` поменяли после старта
fn sync_timestep_mode(settings: Res<PhysicsSettings>, mut mode: ResMut<TimestepMode>) {
    if settings.is_changed() {
        *mode = settings.timestep_mode();
    }
}

/// Гравитация из `PhysicsSettings` → конфигурация Rapier контекста
fn apply_world_gravity(
    settings: Res<PhysicsSettings>,
    mut configs: Query<&mut RapierConfiguration>,
) {
    for mut config in configs.iter_mut() {
        if config.gravity != settings.gravity {
            config.gravity = settings.gravity;
        }
    }
}

/// Ray test: есть ли хоть одно тело между `origin` и `end`
///
/// Filter собирается на каждый вызов и живёт только внутри него - состояния
/// между вызовами нет. Сенсоры игнорируются, `exclude` (обычно сам игрок)
/// пропускается. Отрезок нулевой длины - промах.
pub fn ray_test(context: &RapierContext, origin: Vec3, end: Vec3, exclude: Option<Entity>) -> bool {
    let segment = end - origin;
    let length = segment.length();
    let Some(direction) = segment.try_normalize() else {
        return false;
    };

    let mut filter = QueryFilter::default().exclude_sensors();
    if let Some(entity) = exclude {
        filter = filter.exclude_rigid_body(entity);
    }

    context
        .cast_ray(origin, direction, length, true, filter)
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_demo() {
        let settings = PhysicsSettings::default();
        assert_eq!(settings.gravity, Vec3::new(0.0, -9.81, 0.0));
        assert!((settings.timestep - 1.0 / 60.0).abs() < f32::EPSILON);
        assert_eq!(settings.substeps, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_substeps_rejected() {
        let settings = PhysicsSettings {
            substeps: 0,
            ..default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_timestep_mode_is_fixed() {
        match PhysicsSettings::default().timestep_mode() {
            TimestepMode::Fixed { dt, substeps } => {
                assert!((dt - 1.0 / 60.0).abs() < f32::EPSILON);
                assert_eq!(substeps, 10);
            }
            other => panic!("expected fixed timestep, got {:?}", other),
        }
    }
}
