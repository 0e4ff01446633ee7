/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    MouseLeft,
    MouseMiddle,
    MouseRight,
    Escape,
}

/// Controller - button states plus per-frame pointer motion
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Pointer motion since the last reset, as a fraction of the surface
    /// width and height (x right, y down)
    fn pointer_delta(&self) -> (f32, f32);

    /// Scroll since the last reset, in lines (positive away from the user)
    fn scroll_delta(&self) -> f32;
}
