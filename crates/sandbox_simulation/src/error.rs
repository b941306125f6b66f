//! Ошибки симуляции
//!
//! Все ошибки здесь - ошибки конфигурации/setup'а. В steady-state кадре
//! (controller + advance + sync) путей отказа нет.

use thiserror::Error;

/// Top-level ошибка (startup)
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Body construction error: {0}")]
    Body(#[from] BodyError),
}

/// Ошибки загрузки/валидации `DemoConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Ошибки Body Factory - неверное описание тела это ошибка программиста/конфига,
/// не runtime-ситуация: тело не создаётся, ошибка идёт наверх через `?`.
#[derive(Debug, Error, PartialEq)]
pub enum BodyError {
    #[error("Invalid {shape} shape: {reason}")]
    InvalidShape { shape: &'static str, reason: String },

    #[error("Invalid mass {0} (must be finite and >= 0)")]
    InvalidMass(f32),
}
