use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::transform::TransformSystem;
use sandbox_simulation::{FrameSet, Player, PlayerConfig, ViewState};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, mouse_look.before(FrameSet::Control))
            .add_systems(
                PostUpdate,
                follow_player
                    .after(FrameSet::Sync)
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

/// First-person камера: yaw/pitch ведёт мышь, позицию - тело игрока
#[derive(Component)]
pub struct FirstPersonCamera {
    pub yaw: f32,   // radians, 0 = смотрим в −Z
    pub pitch: f32, // radians
    pub sensitivity: f32,
    /// Высота глаз над центром capsule (доля height/2)
    pub eye_ratio: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.002,
            eye_ratio: 0.8,
        }
    }
}

impl FirstPersonCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.05,
            ..default()
        }),
        Transform::from_xyz(0.0, 2.0, 0.0),
        FirstPersonCamera::default(),
    ));
}

/// Mouse look (только под pointer lock)
fn mouse_look(
    mut cameras: Query<&mut FirstPersonCamera>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut view: ResMut<ViewState>,
) {
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };

    if !view.locked {
        // Consume motion events even when not locked
        mouse_motion.clear();
        return;
    }

    for motion in mouse_motion.read() {
        camera.yaw -= motion.delta.x * camera.sensitivity;
        camera.pitch -= motion.delta.y * camera.sensitivity;

        // Clamp pitch чуть не доходя до ±90°
        camera.pitch = camera.pitch.clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );
    }

    let forward = ViewState::forward_from_angles(camera.yaw, camera.pitch);
    if view.forward != forward {
        view.forward = forward;
    }
}

/// Камера в глаза игрока, после sync step
fn follow_player(
    config: Res<PlayerConfig>,
    players: Query<&Transform, With<Player>>,
    mut cameras: Query<(&FirstPersonCamera, &mut Transform), Without<Player>>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let Ok((camera, mut transform)) = cameras.single_mut() else {
        return;
    };

    let eye = Vec3::Y * config.height * 0.5 * camera.eye_ratio;
    transform.translation = player.translation + eye;
    transform.rotation = camera.rotation();
}
