//! Keyboard and mouse input collection for one rendered frame.

use app::app_loop::ShellInput;
use delve_core::ControlState;
use macroquad::prelude::{KeyCode, MouseButton, is_key_down, is_key_pressed, is_mouse_button_down};

#[derive(Default)]
pub struct FrameInput {
    pub shell: ShellInput,
    pub restart: bool,
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

fn any_down(keys: &[KeyCode]) -> bool {
    keys.iter().any(|&key| is_key_down(key))
}

pub fn capture_frame_input() -> FrameInput {
    let controls = ControlState {
        move_x: axis(is_key_down(KeyCode::A), is_key_down(KeyCode::D)),
        move_y: axis(is_key_down(KeyCode::S), is_key_down(KeyCode::W)),
        look_x: axis(any_down(&[KeyCode::Left, KeyCode::J]), any_down(&[KeyCode::Right, KeyCode::L])),
        look_y: axis(any_down(&[KeyCode::Down, KeyCode::K]), any_down(&[KeyCode::Up, KeyCode::I])),
        primary: is_key_down(KeyCode::Space) || is_mouse_button_down(MouseButton::Left),
        next_ability: is_key_pressed(KeyCode::E) || is_key_pressed(KeyCode::Tab),
        previous_ability: is_key_pressed(KeyCode::Q),
        pause: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::P),
        reveal: is_key_pressed(KeyCode::F),
    };
    let descend = is_key_pressed(KeyCode::Enter);
    let restart = is_key_pressed(KeyCode::R);

    FrameInput { shell: ShellInput { controls, descend }, restart }
}
