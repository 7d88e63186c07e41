use crate::{MenuItem, TrayIcon};

/// Passed to a menu item's click callback.
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    tray_icon: TrayIcon,
    item: MenuItem,
}

impl SelectionEvent {
    pub(crate) fn new(tray_icon: TrayIcon, item: MenuItem) -> Self {
        Self { tray_icon, item }
    }

    /// Tray icon whose menu produced the selection.
    pub fn tray_icon(&self) -> &TrayIcon {
        &self.tray_icon
    }

    /// Item the user chose.
    pub fn item(&self) -> &MenuItem {
        &self.item
    }
}
