//! Input events + bounded queue
//!
//! Host (клиент, тесты) кладёт press/release события в `InputQueue`,
//! симуляция разбирает очередь один раз за кадр. Контроллер не знает
//! ничего про клавиатуру хоста.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::logger;

/// Логическое действие игрока (WASD + Space + E по конвенции)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Interact,
}

/// Одно событие: действие нажато (`pressed`) или отпущено
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub action: InputAction,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(action: InputAction) -> Self {
        Self {
            action,
            pressed: true,
        }
    }

    pub fn release(action: InputAction) -> Self {
        Self {
            action,
            pressed: false,
        }
    }
}

/// Bounded FIFO input событий
///
/// При переполнении выкидывается самое старое событие (свежий input важнее).
#[derive(Resource, Debug)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
}

impl InputQueue {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Положить событие. Возвращает `false` если пришлось выкинуть старое.
    pub fn push(&mut self, event: InputEvent) -> bool {
        let mut kept_all = true;
        if self.events.len() >= self.capacity {
            if let Some(dropped) = self.events.pop_front() {
                logger::log_warning(&format!("InputQueue full, dropping {:?}", dropped));
            }
            kept_all = false;
        }
        self.events.push_back(event);
        kept_all
    }

    pub fn press(&mut self, action: InputAction) -> bool {
        self.push(InputEvent::press(action))
    }

    pub fn release(&mut self, action: InputAction) -> bool {
        self.push(InputEvent::release(action))
    }

    /// Забрать все события в порядке поступления
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
