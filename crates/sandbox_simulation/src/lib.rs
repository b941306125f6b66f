//! Physics Sandbox - Simulation Core
//!
//! Headless ECS-симуляция на Bevy 0.16 + Rapier:
//! player movement + синхронизация rigid bodies с визуалами.
//!
//! # Кадр
//!
//! ```text
//! Update:     FrameSet::Input → FrameSet::Control (controller) → pickup
//! PostUpdate: Rapier SyncBackend → StepSimulation (advance) → Writeback
//!             → FrameSet::Sync (ground probe, body → visual)
//!             → TransformPropagate → render (клиент)
//! ```
//!
//! Один `App::update()` = один advance фиксированным шагом.

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy_rapier3d::plugin::PhysicsSet;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod config;
pub mod error;
pub mod input;
pub mod logger;
pub mod physics;
pub mod pickup;
pub mod player;
pub mod scene;
pub mod view;

pub use config::DemoConfig;
pub use error::{BodyError, ConfigError, SimulationError};
pub use input::{InputAction, InputEvent, InputQueue, MoveIntent};
pub use logger::{log, log_error, log_info, log_warning, LogLevel, LogPrinter, LOGGER_LEVEL};
pub use physics::{PhysicsSettings, PhysicsWorldPlugin, RigidBodyRegistry, ShapeDescriptor};
pub use pickup::{EquippedWeapon, WeaponPickedUp, WeaponPickup};
pub use player::{Player, PlayerConfig, PlayerState};
pub use scene::{DemoScenePlugin, SceneConfig, VisualShape, VisualSpec};
pub use view::ViewState;

/// Фазы кадра, на которые можно навеситься снаружи (клиент, тесты)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Update: разбор input очереди
    Input,
    /// Update: player controller + pickup
    Control,
    /// PostUpdate: после advance - ground probe + body → visual
    Sync,
}

/// Главный plugin симуляции (всё, кроме demo scene)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .init_resource::<RigidBodyRegistry>()
            .init_resource::<InputQueue>()
            .init_resource::<ViewState>()
            .add_event::<WeaponPickedUp>()
            .add_plugins(PhysicsWorldPlugin);

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.configure_sets(Update, (FrameSet::Input, FrameSet::Control).chain())
            .configure_sets(
                PostUpdate,
                FrameSet::Sync
                    .after(PhysicsSet::Writeback)
                    .before(TransformSystem::TransformPropagate),
            );

        app.add_systems(Update, input::apply_input_queue.in_set(FrameSet::Input))
            .add_systems(
                Update,
                (player::drive_player, pickup::pickup_weapon).in_set(FrameSet::Control),
            )
            .add_systems(
                PostUpdate,
                (player::probe_ground, physics::sync_bodies_to_visuals).in_set(FrameSet::Sync),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Плагины симуляции не добавляются - это делает вызывающий
/// (`SimulationPlugin`, `DemoScenePlugin`), после чего нужно вызвать
/// `app.finish(); app.cleanup();` перед первым `update()`.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сериализуются через Debug в порядке Entity index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
