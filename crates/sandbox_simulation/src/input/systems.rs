//! Разбор `InputQueue` в state игрока

use bevy::prelude::*;

use super::events::InputQueue;
use crate::player::{Player, PlayerState};

/// Drain input очереди → `PlayerState.input`
///
/// # Schedule
/// - Update, `FrameSet::Input` (до контроллера)
///
/// Нет игрока - события всё равно выкидываются, чтобы очередь не копилась.
pub fn apply_input_queue(
    mut queue: ResMut<InputQueue>,
    mut players: Query<&mut PlayerState, With<Player>>,
) {
    let mut player = players.single_mut().ok();

    for event in queue.drain() {
        if let Some(state) = player.as_mut() {
            state.input.apply(event);
        }
    }
}
