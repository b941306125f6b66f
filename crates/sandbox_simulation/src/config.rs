//! DemoConfig - вся настройка симуляции одним RON файлом
//!
//! Без файла работают defaults (константы demo). Путь к файлу - env
//! `SANDBOX_CONFIG`. Любая ошибка загрузки/валидации фатальна для старта.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::physics::PhysicsSettings;
use crate::player::PlayerConfig;
use crate::scene::SceneConfig;

/// Env переменная с путём к RON конфигу
pub const CONFIG_ENV_VAR: &str = "SANDBOX_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub physics: PhysicsSettings,
    pub player: PlayerConfig,
    pub scene: SceneConfig,
}

impl DemoConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Конфиг из `SANDBOX_CONFIG`, либо defaults если переменной нет
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        self.player.validate()?;
        self.scene.validate()?;
        Ok(())
    }

    /// Разложить конфиг по resource'ам
    ///
    /// Вызывать ДО `SimulationPlugin`: plugin берёт `PhysicsSettings` из мира.
    pub fn insert_into(self, app: &mut App) {
        app.insert_resource(self.physics)
            .insert_resource(self.player)
            .insert_resource(self.scene);
    }
}
