//! Directional input state and the keyboard system that fills it.
//!
//! The simulation never touches the keyboard directly: it reads [`InputState`]
//! once per tick.  Tests populate the resource directly and skip the keyboard.

use bevy::prelude::*;

/// Which directional controls are held this frame.
///
/// Opposing flags may both be set; the vehicle resolves them by priority
/// (`up` before `down`, both turn flags applied).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// No controls held.
    pub const IDLE: InputState = InputState {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Throttle only.
    pub const FORWARD: InputState = InputState {
        up: true,
        ..InputState::IDLE
    };

    /// Reverse only.
    pub const REVERSE: InputState = InputState {
        down: true,
        ..InputState::IDLE
    };

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Keys bound to each control.  Letter keys are physical positions, so the
/// WASD block is also ZQSD on an AZERTY keyboard.
const UP_KEYS: [KeyCode; 2] = [KeyCode::ArrowUp, KeyCode::KeyW];
const DOWN_KEYS: [KeyCode; 2] = [KeyCode::ArrowDown, KeyCode::KeyS];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];

/// Overwrite [`InputState`] from the keys currently held.
pub fn keyboard_input_system(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputState>) {
    let next = InputState {
        up: keys.any_pressed(UP_KEYS),
        down: keys.any_pressed(DOWN_KEYS),
        left: keys.any_pressed(LEFT_KEYS),
        right: keys.any_pressed(RIGHT_KEYS),
    };
    // Avoid tripping change detection every frame.
    input.set_if_neq(next);
}
