//! Movement domain: per-tick button snapshot consumed by the behavior engine.

use bevy::prelude::*;

/// Logical buttons the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Action,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Action,
    ];

    fn index(self) -> usize {
        match self {
            Button::Left => 0,
            Button::Right => 1,
            Button::Up => 2,
            Button::Down => 3,
            Button::Action => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStatus {
    #[default]
    Released,
    JustPressed,
    Pressed,
    JustReleased,
}

impl ButtonStatus {
    /// Next status given whether the button is physically held this tick.
    fn advance(self, held: bool) -> Self {
        match (self, held) {
            (ButtonStatus::Released | ButtonStatus::JustReleased, true) => ButtonStatus::JustPressed,
            (ButtonStatus::JustPressed | ButtonStatus::Pressed, true) => ButtonStatus::Pressed,
            (ButtonStatus::JustPressed | ButtonStatus::Pressed, false) => {
                ButtonStatus::JustReleased
            }
            (ButtonStatus::Released | ButtonStatus::JustReleased, false) => ButtonStatus::Released,
        }
    }
}

/// Button state frozen for one resolution pass.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputSnapshot {
    status: [ButtonStatus; 5],
}

impl InputSnapshot {
    pub fn advance(&mut self, button: Button, held: bool) {
        let slot = &mut self.status[button.index()];
        *slot = slot.advance(held);
    }

    /// Overwrite a button's status directly. Used by scripted input.
    pub fn set(&mut self, button: Button, status: ButtonStatus) {
        self.status[button.index()] = status;
    }

    pub fn status(&self, button: Button) -> ButtonStatus {
        self.status[button.index()]
    }

    /// Held this tick, including the tick it went down.
    pub fn is_pressed(&self, button: Button) -> bool {
        matches!(
            self.status(button),
            ButtonStatus::JustPressed | ButtonStatus::Pressed
        )
    }

    pub fn is_just_pressed(&self, button: Button) -> bool {
        self.status(button) == ButtonStatus::JustPressed
    }

    pub fn is_just_released(&self, button: Button) -> bool {
        self.status(button) == ButtonStatus::JustReleased
    }

    pub fn is_released(&self, button: Button) -> bool {
        !self.is_pressed(button)
    }

    pub fn are_all_pressed(&self, buttons: &[Button]) -> bool {
        buttons.iter().all(|b| self.is_pressed(*b))
    }
}
