//! Player integration test
//!
//! Полный кадр headless: input queue → controller → Rapier advance →
//! ground probe → sync. Пол - static box, верхняя грань на y = 0.
//!
//! Проверяем:
//! - Jump только с земли, ровно один на нажатие
//! - Strafe направление при взгляде вдоль −Z
//! - Sync визуала (точная копия позы тела)
//! - Static тела не попадают в registry
//! - Pickup оружия в радиусе / вне радиуса
//! - Ray test: сенсоры, exclude, отрезок нулевой длины

use bevy::ecs::system::{RunSystemOnce, SystemState};
use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, ReadRapierContext, RigidBody, Sensor, Velocity};
use sandbox_simulation::physics::{create_body, ray_test, BodySpec};
use sandbox_simulation::player::spawn_player;
use sandbox_simulation::*;

/// Helper: App с симуляцией, без demo scene
fn create_player_app() -> App {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);
    app.finish();
    app.cleanup();
    app
}

/// Helper: выполнить spawn-код с Commands + registry и применить команды
fn with_commands<R>(
    app: &mut App,
    spawn: impl FnOnce(&mut Commands, &mut RigidBodyRegistry) -> R,
) -> R {
    let mut state: SystemState<(Commands, ResMut<RigidBodyRegistry>)> =
        SystemState::new(app.world_mut());
    let result = {
        let (mut commands, mut registry) = state.get_mut(app.world_mut());
        spawn(&mut commands, &mut registry)
    };
    state.apply(app.world_mut());
    result
}

/// Helper: пол 100×1×100 + игрок стоит на нём
fn spawn_ground_and_player(app: &mut App) -> Entity {
    let config = app.world().resource::<PlayerConfig>().clone();

    with_commands(app, |commands, registry| {
        create_body(
            commands,
            registry,
            None,
            BodySpec::new(
                ShapeDescriptor::cuboid(Vec3::new(100.0, 1.0, 100.0)),
                0.0,
                Vec3::new(0.0, -0.5, 0.0),
            ),
        )
        .expect("ground");

        // Центр capsule на height/2 - ноги касаются пола
        spawn_player(
            commands,
            registry,
            &config,
            Vec3::new(0.0, config.height * 0.5, 0.0),
        )
        .expect("player")
    })
}

fn lock_view(app: &mut App) {
    app.world_mut().resource_mut::<ViewState>().locked = true;
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn velocity(app: &App, player: Entity) -> Vec3 {
    app.world()
        .get::<Velocity>(player)
        .expect("player velocity")
        .linvel
}

fn can_jump(app: &App, player: Entity) -> bool {
    app.world()
        .get::<PlayerState>(player)
        .expect("player state")
        .can_jump
}

fn press(app: &mut App, action: InputAction) {
    app.world_mut().resource_mut::<InputQueue>().press(action);
}

fn release(app: &mut App, action: InputAction) {
    app.world_mut().resource_mut::<InputQueue>().release(action);
}

#[test]
fn test_player_grounded_after_settling() {
    let mut app = create_player_app();
    let player = spawn_ground_and_player(&mut app);

    run_frames(&mut app, 30);

    assert!(can_jump(&app, player), "игрок на полу должен мочь прыгнуть");
    assert!(velocity(&app, player).length() < 0.5);
}

#[test]
fn test_jump_once_per_press() {
    let mut app = create_player_app();
    let player = spawn_ground_and_player(&mut app);
    lock_view(&mut app);
    run_frames(&mut app, 30);
    assert!(can_jump(&app, player));

    press(&mut app, InputAction::Jump);
    app.update();

    // Controller выставил vy = 7, advance успел снять один шаг гравитации
    let vy = velocity(&app, player).y;
    assert!(vy > 6.5 && vy <= 7.0, "vy после прыжка: {}", vy);

    // Удержание не даёт повторных прыжков
    run_frames(&mut app, 10);
    assert!(!can_jump(&app, player), "в воздухе ray не достаёт до пола");
    let before = velocity(&app, player).y;

    // Повторное нажатие в воздухе - no-op
    release(&mut app, InputAction::Jump);
    press(&mut app, InputAction::Jump);
    app.update();
    let after = velocity(&app, player).y;
    assert!(after < before, "air jump не должен сбрасывать vy: {} → {}", before, after);

    // Приземлились - снова можно прыгать
    release(&mut app, InputAction::Jump);
    run_frames(&mut app, 120);
    assert!(can_jump(&app, player));
}

#[test]
fn test_strafe_right_moves_along_positive_x() {
    let mut app = create_player_app();
    let player = spawn_ground_and_player(&mut app);
    lock_view(&mut app);
    run_frames(&mut app, 10);

    press(&mut app, InputAction::Right);
    run_frames(&mut app, 30);

    let linvel = velocity(&app, player);
    assert!(linvel.x > 5.0, "strafe вправо при взгляде в −Z: {:?}", linvel);
    assert!(linvel.z.abs() < 0.5, "{:?}", linvel);
    assert!(linvel.x <= 10.0 + 1e-3, "скорость не выше speed");

    release(&mut app, InputAction::Right);
    run_frames(&mut app, 60);
    assert!(velocity(&app, player).x < 0.5, "decel до нуля");
}

#[test]
fn test_forward_follows_view_direction() {
    let mut app = create_player_app();
    let player = spawn_ground_and_player(&mut app);
    lock_view(&mut app);

    // Взгляд вдоль +X (yaw −90°)
    app.world_mut().resource_mut::<ViewState>().forward = Vec3::X;
    run_frames(&mut app, 10);

    press(&mut app, InputAction::Forward);
    run_frames(&mut app, 30);

    let linvel = velocity(&app, player);
    assert!(linvel.x > 5.0, "{:?}", linvel);
    assert!(linvel.z.abs() < 0.5, "{:?}", linvel);
}

#[test]
fn test_unlocked_view_leaves_player_idle() {
    let mut app = create_player_app();
    let player = spawn_ground_and_player(&mut app);
    run_frames(&mut app, 10);

    press(&mut app, InputAction::Forward);
    press(&mut app, InputAction::Jump);
    run_frames(&mut app, 20);

    let linvel = velocity(&app, player);
    assert!(linvel.x.abs() < 0.1 && linvel.z.abs() < 0.1, "{:?}", linvel);
    assert!(linvel.y.abs() < 0.5, "без lock прыжка нет: {:?}", linvel);

    // Edge съеден, пока view был unlocked: после lock прыжка не будет
    lock_view(&mut app);
    app.update();
    assert!(velocity(&app, player).y < 1.0);

    // Удержание Forward подхватывается сразу после lock
    run_frames(&mut app, 30);
    assert!(velocity(&app, player).z < -5.0);
}

#[test]
fn test_input_queue_drained_every_frame() {
    let mut app = create_player_app();
    spawn_ground_and_player(&mut app);

    press(&mut app, InputAction::Forward);
    press(&mut app, InputAction::Left);
    release(&mut app, InputAction::Left);
    assert_eq!(app.world().resource::<InputQueue>().len(), 3);

    app.update();

    assert!(app.world().resource::<InputQueue>().is_empty());
}

#[test]
fn test_dynamic_visual_follows_body_exactly() {
    let mut app = create_player_app();
    spawn_ground_and_player(&mut app);

    let start = Vec3::new(5.0, 4.0, 5.0);
    let (visual, body) = with_commands(&mut app, |commands, registry| {
        let visual = commands.spawn(Transform::default()).id();
        let spec = BodySpec::new(ShapeDescriptor::cuboid(Vec3::ONE), 1.0, start)
            .with_rotation(Quat::from_rotation_y(0.7));
        let body = create_body(commands, registry, Some(visual), spec).expect("cube");
        (visual, body)
    });

    assert!(app.world().resource::<RigidBodyRegistry>().contains_body(body));

    for _ in 0..45 {
        app.update();

        let body_transform = *app.world().get::<Transform>(body).expect("body");
        let visual_transform = *app.world().get::<Transform>(visual).expect("visual");
        assert_eq!(visual_transform.translation, body_transform.translation);
        assert_eq!(visual_transform.rotation, body_transform.rotation);
    }

    let fallen = app.world().get::<Transform>(visual).expect("visual").translation;
    assert!(fallen.y < start.y - 1.0, "куб должен упасть: {:?}", fallen);
}

#[test]
fn test_static_bodies_not_registered() {
    let mut app = create_player_app();

    let (visual, body) = with_commands(&mut app, |commands, registry| {
        let visual = commands.spawn(Transform::default()).id();
        let spec = BodySpec::new(
            ShapeDescriptor::cuboid(Vec3::new(1.5, 1.0, 1.5)),
            0.0,
            Vec3::new(0.0, 0.5, -6.0),
        );
        let body = create_body(commands, registry, Some(visual), spec).expect("podium");
        (visual, body)
    });

    let registry = app.world().resource::<RigidBodyRegistry>();
    assert!(registry.is_empty());
    assert!(!registry.contains_body(body));

    // Визуал получил стартовую позу один раз и стоит на месте
    run_frames(&mut app, 10);
    let pose = app.world().get::<Transform>(visual).expect("visual");
    assert_eq!(pose.translation, Vec3::new(0.0, 0.5, -6.0));
}

#[test]
fn test_weapon_pickup_in_reach() {
    let mut app = create_player_app();
    let player = spawn_ground_and_player(&mut app);
    run_frames(&mut app, 5);

    let weapon = app
        .world_mut()
        .spawn((
            WeaponPickup::default(),
            Transform::from_xyz(0.0, 1.0, -1.5),
        ))
        .id();

    press(&mut app, InputAction::Interact);
    app.update();

    let equipped = app
        .world()
        .get::<EquippedWeapon>(player)
        .expect("оружие должно быть подобрано");
    assert_eq!(equipped.weapon, weapon);
    assert_eq!(equipped.name, "Blaster");
    assert!(app.world().get::<WeaponPickup>(weapon).is_none());

    let events = app.world().resource::<Events<WeaponPickedUp>>();
    let picked: Vec<_> = events.get_cursor().read(events).cloned().collect();
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].player, player);
    assert_eq!(picked[0].weapon, weapon);
}

#[test]
fn test_weapon_pickup_out_of_reach() {
    let mut app = create_player_app();
    let player = spawn_ground_and_player(&mut app);
    run_frames(&mut app, 5);

    let weapon = app
        .world_mut()
        .spawn((
            WeaponPickup::default(),
            Transform::from_xyz(0.0, 1.0, -10.0),
        ))
        .id();

    press(&mut app, InputAction::Interact);
    app.update();

    assert!(app.world().get::<EquippedWeapon>(player).is_none());
    assert!(app.world().get::<WeaponPickup>(weapon).is_some());

    // Нажатие вне радиуса не откладывается: подошли - нужно нажать снова
    app.world_mut()
        .get_mut::<Transform>(weapon)
        .expect("weapon")
        .translation = Vec3::new(0.0, 1.0, -1.0);
    app.update();
    assert!(app.world().get::<EquippedWeapon>(player).is_none());

    release(&mut app, InputAction::Interact);
    press(&mut app, InputAction::Interact);
    app.update();
    assert!(app.world().get::<EquippedWeapon>(player).is_some());
}

#[test]
fn test_demo_scene_registers_only_cubes() {
    let mut app = create_headless_app(7);
    app.add_plugins((SimulationPlugin, DemoScenePlugin));
    app.finish();
    app.cleanup();

    app.update();

    let cube_count = app.world().resource::<SceneConfig>().cube_count;
    assert_eq!(app.world().resource::<RigidBodyRegistry>().len(), cube_count);

    let mut players = app.world_mut().query_filtered::<&Transform, With<Player>>();
    assert_eq!(players.iter(app.world()).count(), 1);

    let mut pickups = app.world_mut().query::<&WeaponPickup>();
    assert_eq!(pickups.iter(app.world()).count(), 1);
}

/// Helper: ray test одним вызовом системы с живым Rapier контекстом
fn cast(app: &mut App, origin: Vec3, end: Vec3, exclude: Option<Entity>) -> bool {
    app.world_mut()
        .run_system_once(move |rapier_context: ReadRapierContext| {
            let context = rapier_context.single().expect("rapier context");
            ray_test(&context, origin, end, exclude)
        })
        .expect("ray system")
}

/// Helper: static сенсор-плита 10×1×10, верхняя грань на y = 0
fn spawn_sensor_slab(app: &mut App, center: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(center),
            RigidBody::Fixed,
            Collider::cuboid(5.0, 0.5, 5.0),
            Sensor,
        ))
        .id()
}

#[test]
fn test_ray_test_edge_cases() {
    let mut app = create_player_app();
    spawn_sensor_slab(&mut app, Vec3::new(0.0, -0.5, 0.0));
    let solid = with_commands(&mut app, |commands, registry| {
        create_body(
            commands,
            registry,
            None,
            BodySpec::new(
                ShapeDescriptor::cuboid(Vec3::new(10.0, 1.0, 10.0)),
                0.0,
                Vec3::new(20.0, -0.5, 0.0),
            ),
        )
        .expect("solid slab")
    });
    run_frames(&mut app, 2);

    let down = Vec3::new(0.0, -3.0, 0.0);

    // Сенсор не считается попаданием
    assert!(!cast(&mut app, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0) + down, None));

    // Твёрдое тело - попадание, пока его не исключили
    let above_solid = Vec3::new(20.0, 1.0, 0.0);
    assert!(cast(&mut app, above_solid, above_solid + down, None));
    assert!(!cast(&mut app, above_solid, above_solid + down, Some(solid)));

    // Отрезок нулевой длины - промах даже внутри тела
    let inside = Vec3::new(20.0, -0.5, 0.0);
    assert!(!cast(&mut app, inside, inside, None));

    // Отрезок, не достающий до поверхности - промах
    assert!(!cast(&mut app, above_solid, above_solid - Vec3::Y * 0.5, None));
}

#[test]
fn test_sensor_under_feet_is_not_ground() {
    let mut app = create_headless_app(42);
    // Без гравитации игрок висит на месте
    app.insert_resource(PhysicsSettings {
        gravity: Vec3::ZERO,
        ..default()
    });
    app.add_plugins(SimulationPlugin);
    app.finish();
    app.cleanup();

    spawn_sensor_slab(&mut app, Vec3::new(0.0, -0.5, 0.0));
    let config = app.world().resource::<PlayerConfig>().clone();
    let player = with_commands(&mut app, |commands, registry| {
        spawn_player(commands, registry, &config, Vec3::new(0.0, config.height * 0.5, 0.0))
            .expect("player")
    });

    run_frames(&mut app, 10);
    assert!(!can_jump(&app, player), "сенсор под ногами - не пол");

    // Прыжок без пола - no-op
    lock_view(&mut app);
    press(&mut app, InputAction::Jump);
    app.update();
    assert!(velocity(&app, player).y.abs() < 1e-3);
}

#[test]
fn test_interact_edge_consumed_while_armed() {
    let mut app = create_player_app();
    let player = spawn_ground_and_player(&mut app);
    run_frames(&mut app, 5);

    app.world_mut().spawn((
        WeaponPickup::default(),
        Transform::from_xyz(0.0, 1.0, -1.5),
    ));
    press(&mut app, InputAction::Interact);
    app.update();
    assert!(app.world().get::<EquippedWeapon>(player).is_some());

    // Второе оружие в радиусе: с оружием в руках нажатие съедается впустую
    let second = app
        .world_mut()
        .spawn((
            WeaponPickup {
                name: "Second".to_string(),
                ..default()
            },
            Transform::from_xyz(0.0, 1.0, 1.5),
        ))
        .id();
    release(&mut app, InputAction::Interact);
    press(&mut app, InputAction::Interact);
    app.update();

    let state = app.world().get::<PlayerState>(player).expect("player state");
    assert!(!state.input.interact.is_pending());
    assert!(app.world().get::<WeaponPickup>(second).is_some());
    assert_eq!(
        app.world().get::<EquippedWeapon>(player).map(|w| w.name.as_str()),
        Some("Blaster")
    );
}
