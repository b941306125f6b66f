//! Player constants (resource, настраивается через `DemoConfig`)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Параметры player body и контроллера
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Масса capsule (kg)
    pub mass: f32,
    /// Полная высота capsule (m)
    pub height: f32,
    /// Радиус capsule (m)
    pub radius: f32,
    /// Целевая горизонтальная скорость (m/s)
    pub speed: f32,
    /// Lerp factor к target velocity, когда зажата клавиша движения
    pub acceleration_factor: f32,
    /// Lerp factor к нулю, когда ничего не зажато
    pub deceleration_factor: f32,
    /// Потолок горизонтальной скорости (m/s)
    pub max_velocity: f32,
    /// Вертикальная скорость прыжка (m/s), перезаписывает Y
    pub jump_force: f32,
    /// Запас длины ground ray сверх height/2
    pub ground_probe_epsilon: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            height: 2.0,
            radius: 0.5,
            speed: 10.0,
            acceleration_factor: 0.15,
            deceleration_factor: 0.1,
            max_velocity: 20.0,
            jump_force: 7.0,
            ground_probe_epsilon: 0.1,
        }
    }
}

impl PlayerConfig {
    /// Длина ground ray от центра capsule
    pub fn ground_probe_length(&self) -> f32 {
        self.height * 0.5 + self.ground_probe_epsilon
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player.mass", self.mass),
            ("player.height", self.height),
            ("player.radius", self.radius),
            ("player.speed", self.speed),
            ("player.max_velocity", self.max_velocity),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: format!("{value} (must be > 0)"),
                });
            }
        }

        let factors = [
            ("player.acceleration_factor", self.acceleration_factor),
            ("player.deceleration_factor", self.deceleration_factor),
        ];
        for (field, value) in factors {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: format!("{value} (must be in (0, 1])"),
                });
            }
        }

        if !(self.jump_force.is_finite() && self.jump_force >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "player.jump_force",
                message: format!("{} (must be >= 0)", self.jump_force),
            });
        }
        if !(self.ground_probe_epsilon.is_finite() && self.ground_probe_epsilon >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "player.ground_probe_epsilon",
                message: format!("{} (must be >= 0)", self.ground_probe_epsilon),
            });
        }
        if self.height < self.radius * 2.0 {
            return Err(ConfigError::InvalidValue {
                field: "player.height",
                message: format!("{} is shorter than capsule diameter {}", self.height, self.radius * 2.0),
            });
        }

        Ok(())
    }
}
