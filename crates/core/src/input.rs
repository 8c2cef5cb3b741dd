use serde::{Deserialize, Serialize};

/// Normalized per-tick control snapshot. Device layers (keyboard, touch,
/// controller) all reduce to this shape before the simulation sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// Strafe axis, positive to the right.
    pub move_x: f32,
    /// Forward axis, positive ahead.
    pub move_y: f32,
    /// Turn axis, positive clockwise.
    pub look_x: f32,
    /// Pitch axis, positive up.
    pub look_y: f32,
    /// Held: cast the selected ability whenever it is ready.
    pub primary: bool,
    pub next_ability: bool,
    pub previous_ability: bool,
    pub pause: bool,
    pub reveal: bool,
}

fn axis(value: f32) -> f32 {
    if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 }
}

impl ControlState {
    /// Axes clamped to `[-1, 1]`; non-finite axes become zero.
    pub fn sanitized(self) -> Self {
        Self {
            move_x: axis(self.move_x),
            move_y: axis(self.move_y),
            look_x: axis(self.look_x),
            look_y: axis(self.look_y),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_clamps_axes_and_drops_nan() {
        let raw = ControlState {
            move_x: 3.0,
            move_y: f32::NAN,
            look_x: -7.0,
            look_y: f32::INFINITY,
            primary: true,
            ..ControlState::default()
        };
        let clean = raw.sanitized();
        assert_eq!(clean.move_x, 1.0);
        assert_eq!(clean.move_y, 0.0);
        assert_eq!(clean.look_x, -1.0);
        assert_eq!(clean.look_y, 0.0);
        assert!(clean.primary);
    }
}
