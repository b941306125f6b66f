//! Player marker + state
//!
//! Отмечает единственное тело, которым управляет игрок.

use bevy::prelude::Component;

use crate::input::PlayerInput;

/// Marker component для player body
///
/// # Single-player
/// В сцене ровно один entity с этим компонентом; системы берут его через
/// `single()` и молча ничего не делают, если игрока нет.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Состояние игрока, которое переживает кадры
///
/// Заменяет глобальные флаги движения: input пишет сюда через очередь,
/// контроллер и ground probe читают/пишут раз в кадр.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerState {
    /// Накопленный input (move flags + edge triggers)
    pub input: PlayerInput,
    /// Grounded флаг: выставляется ТОЛЬКО ground probe'ом после advance,
    /// сбрасывается прыжком
    pub can_jump: bool,
}
