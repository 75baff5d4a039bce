use glam::Vec2;

/// Controls sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub ascend: bool,
    pub descend: bool,
    pub sprint: bool,
    pub jump: bool,
    /// Held state of the mode key; the player toggles on the press edge.
    pub toggle_mode: bool,
    /// Raw pointer movement since the last frame, in pixels.
    pub look_delta: Vec2,
}

impl InputState {
    /// `+1` forward / right, `-1` backward / left.
    pub fn planar_axes(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.right, self.left), axis(self.forward, self.backward))
    }

    pub fn vertical_axis(&self) -> f32 {
        (self.ascend as i32 - self.descend as i32) as f32
    }
}
