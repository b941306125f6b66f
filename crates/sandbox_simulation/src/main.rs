//! Headless прогон Physics Sandbox
//!
//! Demo scene + физика без рендера. Конфиг - RON файл из `SANDBOX_CONFIG`.

use std::process::ExitCode;

use sandbox_simulation::logger::init_logger;
use sandbox_simulation::{
    create_headless_app, log_error, log_info, DemoConfig, DemoScenePlugin, RigidBodyRegistry,
    SimulationError, SimulationPlugin, ViewState,
};

/// 600 тиков = 10 секунд симуляции при 1/60
const TICKS: u32 = 600;

fn main() -> ExitCode {
    init_logger();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log_error(&format!("❌ {error}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SimulationError> {
    let config = DemoConfig::from_env()?;
    let seed = config.scene.seed;
    log_info(&format!(
        "Starting Physics Sandbox headless simulation (seed: {seed})"
    ));

    let mut app = create_headless_app(seed);
    config.insert_into(&mut app);
    app.add_plugins((SimulationPlugin, DemoScenePlugin))
        .insert_resource(ViewState {
            locked: true,
            ..Default::default()
        });
    app.finish();
    app.cleanup();

    for tick in 0..TICKS {
        app.update();

        if tick % 100 == 0 {
            let bodies = app.world().resource::<RigidBodyRegistry>().len();
            log_info(&format!("Tick {tick}: {bodies} synced bodies"));
        }
    }

    log_info("Simulation complete!");
    Ok(())
}
