//! Movement domain: keyboard sampling into the button snapshot.

use bevy::prelude::*;

use crate::movement::{Avatar, Button, Facing, InputSnapshot, Player};

fn held(keyboard: &ButtonInput<KeyCode>, button: Button) -> bool {
    let keys: &[KeyCode] = match button {
        Button::Left => &[KeyCode::KeyA, KeyCode::ArrowLeft],
        Button::Right => &[KeyCode::KeyD, KeyCode::ArrowRight],
        Button::Up => &[KeyCode::KeyW, KeyCode::ArrowUp],
        Button::Down => &[KeyCode::KeyS, KeyCode::ArrowDown],
        Button::Action => &[KeyCode::Space, KeyCode::KeyK],
    };
    keyboard.any_pressed(keys.iter().copied())
}

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputSnapshot>) {
    for button in Button::ALL {
        input.advance(button, held(&keyboard, button));
    }
}

pub(crate) fn update_facing(input: Res<InputSnapshot>, mut query: Query<&mut Avatar, With<Player>>) {
    for mut avatar in &mut query {
        if !avatar.flags.can_move || avatar.flags.dead {
            continue;
        }

        let left = input.is_pressed(Button::Left);
        let right = input.is_pressed(Button::Right);
        if right && !left {
            avatar.flags.facing = Facing::Right;
        } else if left && !right {
            avatar.flags.facing = Facing::Left;
        }
    }
}
