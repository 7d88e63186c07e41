/// Mouse button that produced a tray click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickButton {
    /// Primary (usually left) button.
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Any other button.
    Other,
}

/// Raw click on a tray icon as reported by the native layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayClick {
    /// Button that was released.
    pub button: ClickButton,
    /// Screen x coordinate of the pointer.
    pub x: i32,
    /// Screen y coordinate of the pointer.
    pub y: i32,
}
