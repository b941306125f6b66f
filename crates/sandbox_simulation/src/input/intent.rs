//! Movement intent и edge-triggered кнопки

use bevy::prelude::*;

use super::events::{InputAction, InputEvent};

/// Текущее состояние зажатых клавиш движения
///
/// Отражает именно то, что держится сейчас (не one-shot). Флаги независимы,
/// любая комбинация валидна: forward+backward = нулевая ось.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Зажата ли хоть одна клавиша движения
    pub fn any_held(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Оси input'а: `x` = right − left, `y` = forward − backward
    ///
    /// Если обе оси ненулевые - вектор нормализуется (диагональ не быстрее оси).
    pub fn axes(&self) -> Vec2 {
        let x = self.right as i8 - self.left as i8;
        let z = self.forward as i8 - self.backward as i8;
        let axes = Vec2::new(x as f32, z as f32);

        if x != 0 && z != 0 {
            axes.normalize()
        } else {
            axes
        }
    }

    fn set(&mut self, action: InputAction, pressed: bool) {
        match action {
            InputAction::Forward => self.forward = pressed,
            InputAction::Backward => self.backward = pressed,
            InputAction::Left => self.left = pressed,
            InputAction::Right => self.right = pressed,
            InputAction::Jump | InputAction::Interact => {}
        }
    }
}

/// Edge-triggered кнопка (released → pressed)
///
/// - press при `held == false` → `pending = true`
/// - press при `held == true` (autorepeat) → ничего
/// - release → `held = false`
/// - `take()` забирает pending ровно один раз
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    held: bool,
    pending: bool,
}

/// Jump key (Space): один прыжок на цикл press-release-press
pub type JumpRequest = EdgeTrigger;

impl EdgeTrigger {
    pub fn press(&mut self) {
        if !self.held {
            self.held = true;
            self.pending = true;
        }
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume rising edge
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Полный input state игрока, который накапливается из очереди событий
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub movement: MoveIntent,
    pub jump: JumpRequest,
    pub interact: EdgeTrigger,
}

impl PlayerInput {
    pub fn apply(&mut self, event: InputEvent) {
        match (event.action, event.pressed) {
            (InputAction::Jump, true) => self.jump.press(),
            (InputAction::Jump, false) => self.jump.release(),
            (InputAction::Interact, true) => self.interact.press(),
            (InputAction::Interact, false) => self.interact.release(),
            (action, pressed) => self.movement.set(action, pressed),
        }
    }
}
