//! Host input → симуляция
//!
//! Клавиатура пишется в `InputQueue` как есть (включая OS repeat'ы - edge
//! логика симуляции их отфильтрует). Левый клик захватывает указатель,
//! Escape отпускает.

use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use sandbox_simulation::{FrameSet, InputAction, InputEvent, InputQueue, ViewState};

pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (keyboard_to_queue, toggle_pointer_lock).before(FrameSet::Input),
        );
    }
}

/// WASD / Space / E → InputAction
fn action_for_key(key: KeyCode) -> Option<InputAction> {
    match key {
        KeyCode::KeyW => Some(InputAction::Forward),
        KeyCode::KeyS => Some(InputAction::Backward),
        KeyCode::KeyA => Some(InputAction::Left),
        KeyCode::KeyD => Some(InputAction::Right),
        KeyCode::Space => Some(InputAction::Jump),
        KeyCode::KeyE => Some(InputAction::Interact),
        _ => None,
    }
}

fn keyboard_to_queue(mut keyboard: EventReader<KeyboardInput>, mut queue: ResMut<InputQueue>) {
    for event in keyboard.read() {
        let Some(action) = action_for_key(event.key_code) else {
            continue;
        };

        let input = match event.state {
            ButtonState::Pressed => InputEvent::press(action),
            ButtonState::Released => InputEvent::release(action),
        };
        queue.push(input);
    }
}

fn toggle_pointer_lock(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut view: ResMut<ViewState>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    if mouse.just_pressed(MouseButton::Left) && !view.locked {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
        view.locked = true;
        info!("🔒 Pointer locked");
    }

    if keys.just_pressed(KeyCode::Escape) && view.locked {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
        view.locked = false;
        info!("🔓 Pointer released");
    }
}
