use std::process::ExitCode;

use bevy::prelude::*;
use sandbox_simulation::logger::{self, LogLevel, LogPrinter};
use sandbox_simulation::{DemoConfig, DemoScenePlugin, DeterministicRng, SimulationPlugin};

mod camera;
mod input;
mod rendering;

use camera::CameraPlugin;
use input::PointerInputPlugin;
use rendering::RenderingPlugin;

/// Logger симуляции → bevy::log (в консоль Bevy с её фильтрами)
struct BevyLogPrinter;

impl LogPrinter for BevyLogPrinter {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Info => info!("{}", message),
            LogLevel::Warning => warn!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
    }
}

fn main() -> ExitCode {
    logger::set_logger(Box::new(BevyLogPrinter));

    let config = match DemoConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            // Bevy log ещё не поднят - пишем напрямую
            eprintln!("Physics Sandbox: config error: {error}");
            return ExitCode::FAILURE;
        }
    };
    let seed = config.scene.seed;

    let mut app = App::new();
    app
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Physics Sandbox".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(DeterministicRng::new(seed));

    // Конфиг раскладывается по resource'ам до SimulationPlugin
    config.insert_into(&mut app);

    app
        // Simulation (headless ECS logic)
        .add_plugins((SimulationPlugin, DemoScenePlugin))
        // VisualSpec → meshes/materials, свет, HUD
        .add_plugins(RenderingPlugin)
        // First-person camera
        .add_plugins(CameraPlugin)
        // Keyboard → InputQueue, pointer lock
        .add_plugins(PointerInputPlugin);

    match app.run() {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    }
}
