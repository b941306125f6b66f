//! Demo scene: ground, случайные кубы, podium с оружием, игрок
//!
//! Раскладка берётся из seeded `DeterministicRng` - одинаковый seed даёт
//! одинаковую сцену.

use std::f32::consts::PI;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::visual::{srgb_hex, VisualShape, VisualSpec};
use crate::error::ConfigError;
use crate::logger;
use crate::physics::{create_body, BodySpec, RigidBodyRegistry, ShapeDescriptor};
use crate::pickup::WeaponPickup;
use crate::player::{spawn_player, PlayerConfig};
use crate::DeterministicRng;

/// Arcade palette для кубов
pub const ARCADE_PALETTE: [u32; 6] = [
    0xFF4444, // Red
    0x44FF44, // Green
    0x4444FF, // Blue
    0xFFFF44, // Yellow
    0xFF44FF, // Magenta
    0x44FFFF, // Cyan
];

/// Параметры раскладки сцены
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed для `DeterministicRng`
    pub seed: u64,
    pub cube_count: usize,
    /// Кубы падают в квадрате [-half, half) по X/Z
    pub spawn_half_extent: f32,
    pub cube_size_min: f32,
    pub cube_size_max: f32,
    /// Высота над полом нижней грани куба при спавне
    pub drop_height: f32,
    /// Полные размеры ground box
    pub ground_size: Vec3,
    pub podium_position: Vec3,
    pub podium_size: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            cube_count: 20,
            spawn_half_extent: 20.0,
            cube_size_min: 1.0,
            cube_size_max: 3.0,
            drop_height: 2.0,
            ground_size: Vec3::new(100.0, 1.0, 100.0),
            podium_position: Vec3::new(0.0, 0.5, -6.0),
            podium_size: Vec3::new(1.5, 1.0, 1.5),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, message: String| ConfigError::InvalidValue { field, message };

        if !(self.cube_size_min > 0.0 && self.cube_size_min < self.cube_size_max) {
            return Err(invalid(
                "scene.cube_size_min",
                format!(
                    "need 0 < min ({}) < max ({})",
                    self.cube_size_min, self.cube_size_max
                ),
            ));
        }
        if !self.cube_size_max.is_finite() {
            return Err(invalid(
                "scene.cube_size_max",
                format!("{} is not finite", self.cube_size_max),
            ));
        }
        // gen_range(-half..half) требует конечную ширину диапазона
        if !(self.spawn_half_extent > 0.0 && (2.0 * self.spawn_half_extent).is_finite()) {
            return Err(invalid(
                "scene.spawn_half_extent",
                format!("{} (must be > 0, 2 * half finite)", self.spawn_half_extent),
            ));
        }
        if !self.drop_height.is_finite() {
            return Err(invalid(
                "scene.drop_height",
                format!("{} is not finite", self.drop_height),
            ));
        }

        let vectors = [
            ("scene.ground_size", self.ground_size),
            ("scene.podium_position", self.podium_position),
            ("scene.podium_size", self.podium_size),
        ];
        for (field, value) in vectors {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }

        Ok(())
    }
}

/// Plugin: demo scene на Startup
///
/// Отдельно от `SimulationPlugin`, чтобы тесты собирали свои сцены.
pub struct DemoScenePlugin;

impl Plugin for DemoScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .add_systems(Startup, spawn_demo_scene);
    }
}

/// Startup: вся сцена. Ошибка формы/конфига фатальна.
pub fn spawn_demo_scene(
    mut commands: Commands,
    mut registry: ResMut<RigidBodyRegistry>,
    mut rng: ResMut<DeterministicRng>,
    scene: Res<SceneConfig>,
    player_config: Res<PlayerConfig>,
) -> Result {
    spawn_ground(&mut commands, &mut registry, &scene)?;

    for index in 0..scene.cube_count {
        spawn_random_cube(&mut commands, &mut registry, &mut rng, &scene, index)?;
    }

    spawn_podium_with_weapon(&mut commands, &mut registry, &scene)?;

    let spawn = Vec3::new(0.0, player_config.height, 0.0);
    spawn_player(&mut commands, &mut registry, &player_config, spawn)?;

    logger::log_info(&format!(
        "✅ Demo scene ready: {} dynamic bodies, seed {}",
        registry.len(),
        rng.seed
    ));

    Ok(())
}

fn spawn_ground(
    commands: &mut Commands,
    registry: &mut RigidBodyRegistry,
    scene: &SceneConfig,
) -> Result<Entity, crate::error::BodyError> {
    let visual = commands
        .spawn((
            Name::new("Ground"),
            VisualSpec::new(VisualShape::Cuboid { size: scene.ground_size }, srgb_hex(0x44FF44))
                .with_surface(0.8, 0.1),
            Transform::default(),
        ))
        .id();

    let position = Vec3::new(0.0, -scene.ground_size.y * 0.5, 0.0);
    create_body(
        commands,
        registry,
        Some(visual),
        BodySpec::new(ShapeDescriptor::cuboid(scene.ground_size), 0.0, position),
    )
}

fn spawn_random_cube(
    commands: &mut Commands,
    registry: &mut RigidBodyRegistry,
    rng: &mut DeterministicRng,
    scene: &SceneConfig,
    index: usize,
) -> Result<Entity, crate::error::BodyError> {
    let rng = &mut rng.rng;
    let half = scene.spawn_half_extent;

    let size = rng.gen_range(scene.cube_size_min..scene.cube_size_max);
    let position = Vec3::new(
        rng.gen_range(-half..half),
        size * 0.5 + scene.drop_height,
        rng.gen_range(-half..half),
    );
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        rng.gen_range(0.0..PI),
        rng.gen_range(0.0..PI),
        rng.gen_range(0.0..PI),
    );
    let color = ARCADE_PALETTE[rng.gen_range(0..ARCADE_PALETTE.len())];

    let visual = commands
        .spawn((
            Name::new(format!("Cube {index}")),
            VisualSpec::new(VisualShape::Cuboid { size: Vec3::splat(size) }, srgb_hex(color))
                .with_surface(0.4, 0.6)
                .with_emissive(srgb_hex(0x111111)),
            Transform::default(),
        ))
        .id();

    // Масса = ребро куба
    let spec = BodySpec::new(ShapeDescriptor::cuboid(Vec3::splat(size)), size, position)
        .with_rotation(rotation);

    create_body(commands, registry, Some(visual), spec)
}

fn spawn_podium_with_weapon(
    commands: &mut Commands,
    registry: &mut RigidBodyRegistry,
    scene: &SceneConfig,
) -> Result<Entity, crate::error::BodyError> {
    let visual = commands
        .spawn((
            Name::new("Podium"),
            VisualSpec::new(VisualShape::Cuboid { size: scene.podium_size }, srgb_hex(0x888888))
                .with_surface(0.3, 0.8),
            Transform::default(),
        ))
        .id();

    let podium = create_body(
        commands,
        registry,
        Some(visual),
        BodySpec::new(ShapeDescriptor::cuboid(scene.podium_size), 0.0, scene.podium_position),
    )?;

    // Оружие - чистый визуал, в физике его нет
    let top = scene.podium_position + Vec3::Y * (scene.podium_size.y * 0.5 + 0.3);
    commands.spawn((
        Name::new("Weapon"),
        VisualSpec::new(VisualShape::Weapon, srgb_hex(0x333333))
            .with_surface(0.3, 0.9)
            .without_shadows(),
        WeaponPickup::default(),
        Transform::from_translation(top),
    ));

    Ok(podium)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_size_range_rejected() {
        let scene = SceneConfig {
            cube_size_min: 3.0,
            cube_size_max: 3.0,
            ..default()
        };
        assert!(matches!(
            scene.validate(),
            Err(ConfigError::InvalidValue {
                field: "scene.cube_size_min",
                ..
            })
        ));
    }

    #[test]
    fn test_infinite_size_max_rejected() {
        let scene = SceneConfig {
            cube_size_max: f32::INFINITY,
            ..default()
        };
        assert!(matches!(
            scene.validate(),
            Err(ConfigError::InvalidValue {
                field: "scene.cube_size_max",
                ..
            })
        ));
    }

    #[test]
    fn test_overflowing_spawn_extent_rejected() {
        // Конечное, но half - (-half) переполняется
        let scene = SceneConfig {
            spawn_half_extent: 3.4e38,
            ..default()
        };
        assert!(matches!(
            scene.validate(),
            Err(ConfigError::InvalidValue {
                field: "scene.spawn_half_extent",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_drop_height_rejected() {
        let scene = SceneConfig {
            drop_height: f32::NAN,
            ..default()
        };
        assert!(matches!(
            scene.validate(),
            Err(ConfigError::InvalidValue {
                field: "scene.drop_height",
                ..
            })
        ));
    }

    #[test]
    fn test_infinite_size_from_ron_is_config_error() {
        let result = crate::DemoConfig::from_ron_str("(scene: (cube_size_max: inf))");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
