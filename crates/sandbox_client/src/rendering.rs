use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use sandbox_simulation::{FrameSet, VisualShape, VisualSpec, WeaponPickedUp};

use crate::camera::FirstPersonCamera;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(0x4F, 0xB4, 0xFF)))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 300.0,
                affects_lightmapped_meshes: false,
            })
            .add_systems(Startup, (spawn_lights, spawn_hud))
            .add_systems(
                Update,
                (spawn_visuals_for_new_specs, attach_weapon_to_camera)
                    .chain()
                    .after(FrameSet::Control),
            );
    }
}

/// HUD: подсказка / имя оружия в руках
#[derive(Component)]
pub struct WeaponLabel;

fn spawn_lights(mut commands: Commands) {
    // Sun
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 40.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Fill (без теней, с противоположной стороны)
    commands.spawn((
        DirectionalLight {
            illuminance: 2500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-20.0, 15.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 40.0,
            ..default()
        },
        Transform::from_xyz(0.0, 8.0, -6.0),
    ));
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        WeaponLabel,
        Text::new("Click to play · WASD move · Space jump · E pick up"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            bottom: Val::Px(12.0),
            ..default()
        },
    ));
}

fn material_for(spec: &VisualSpec) -> StandardMaterial {
    let [r, g, b] = spec.color;
    let [er, eg, eb] = spec.emissive;
    StandardMaterial {
        base_color: Color::srgb(r, g, b),
        perceptual_roughness: spec.roughness,
        metallic: spec.metallic,
        emissive: Color::srgb(er, eg, eb).into(),
        ..default()
    }
}

/// Mesh + material для каждого нового VisualSpec
///
/// Transform визуала ведёт симуляция (sync step) - здесь только внешний вид.
fn spawn_visuals_for_new_specs(
    mut commands: Commands,
    query: Query<(Entity, &VisualSpec), Added<VisualSpec>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, spec) in query.iter() {
        let material = materials.add(material_for(spec));

        match spec.shape {
            VisualShape::Cuboid { size } => {
                commands.entity(entity).insert((
                    Mesh3d(meshes.add(Cuboid::from_size(size))),
                    MeshMaterial3d(material),
                ));
            }
            VisualShape::Weapon => {
                let body = meshes.add(Cuboid::new(0.12, 0.16, 0.5));
                let barrel = meshes.add(Cylinder::new(0.035, 0.35));
                let grip = meshes.add(Cuboid::new(0.08, 0.2, 0.1));
                let accent = materials.add(StandardMaterial {
                    base_color: Color::srgb(0.1, 0.9, 1.0),
                    emissive: LinearRgba::rgb(0.0, 2.0, 2.5),
                    ..default()
                });

                let parts = [
                    (body, material.clone(), Transform::default()),
                    // Ствол вдоль −Z
                    (
                        barrel,
                        accent,
                        Transform::from_xyz(0.0, 0.03, -0.4)
                            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                    ),
                    (
                        grip,
                        material,
                        Transform::from_xyz(0.0, -0.15, 0.12)
                            .with_rotation(Quat::from_rotation_x(-0.3)),
                    ),
                ];

                let casts_shadows = spec.casts_shadows;
                commands
                    .entity(entity)
                    .insert(Visibility::default())
                    .with_children(|parent| {
                        for (mesh, material, transform) in parts {
                            let mut part = parent.spawn((Mesh3d(mesh), MeshMaterial3d(material), transform));
                            if !casts_shadows {
                                part.insert(NotShadowCaster);
                            }
                        }
                    });
            }
        }

        if !spec.casts_shadows {
            commands.entity(entity).insert(NotShadowCaster);
        }
    }
}

/// Подобранное оружие → в руку (child камеры) + HUD
fn attach_weapon_to_camera(
    mut commands: Commands,
    mut picked: EventReader<WeaponPickedUp>,
    cameras: Query<Entity, With<FirstPersonCamera>>,
    mut labels: Query<&mut Text, With<WeaponLabel>>,
) {
    for event in picked.read() {
        let Ok(camera) = cameras.single() else {
            warn!("Weapon picked up but no camera to attach it to");
            continue;
        };

        // Локальная поза относительно камеры
        commands
            .entity(event.weapon)
            .insert(Transform::from_xyz(0.3, -0.25, -0.6));
        commands.entity(camera).add_child(event.weapon);

        for mut label in labels.iter_mut() {
            **label = format!("Weapon: {}", event.name);
        }
    }
}
