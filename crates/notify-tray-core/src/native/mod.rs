//! Seam between the menu model and the platform.
//!
//! Everything that paints, loads pixels or pumps messages lives behind
//! [`NativeBackend`]. The core only hands it encoded templates, display
//! deltas and icon/tooltip state.

use crate::{CoreResult, MenuItemId, TrayClick};

use std::rc::Rc;

/// Opaque handle to a menu registered with the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuHandle(pub u64);

/// Opaque handle to a tray icon created by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrayHandle(pub u64);

/// Opaque handle to an icon image the backend has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconHandle(pub u64);

/// Display fields of one item that changed.
///
/// Only fields present in the originating update are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemDelta {
    /// New label.
    pub text: Option<String>,
    /// New disabled state.
    pub disabled: Option<bool>,
    /// New checked state.
    pub checked: Option<bool>,
}

impl MenuItemDelta {
    /// True when no display field changed.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.disabled.is_none() && self.checked.is_none()
    }
}

/// Icon state handed to the native tray icon. Menus are never part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrayIconProps {
    /// Icon to display.
    pub icon: Option<IconHandle>,
    /// Hover text.
    pub tooltip: Option<String>,
}

/// Callback the backend invokes when the user clicks a tray icon.
pub type SelectHandler = Rc<dyn Fn(&TrayClick) -> CoreResult<()>>;

/// Platform primitives the core relies on.
///
/// All calls happen on the UI thread. Failures should be wrapped with
/// [`TrayError::native`](crate::TrayError::native).
pub trait NativeBackend {
    /// Load a MENUEX template and return a handle to the resulting menu.
    fn register_menu(&self, template: &[u8]) -> CoreResult<MenuHandle>;

    /// Apply a display delta to one item of an already registered menu.
    fn update_menu(&self, menu: MenuHandle, id: MenuItemId, delta: &MenuItemDelta)
    -> CoreResult<()>;

    /// Show the menu at screen coordinates and block until it closes.
    ///
    /// Returns the raw id of the chosen item, or `None`/`Some(0)` when the
    /// menu was dismissed.
    fn show_popup(&self, menu: MenuHandle, x: i32, y: i32) -> CoreResult<Option<u32>>;

    /// Release a registered menu.
    fn destroy_menu(&self, menu: MenuHandle) -> CoreResult<()>;

    /// Create a tray icon that reports clicks to `on_select`.
    fn create_tray_icon(&self, props: &TrayIconProps, on_select: SelectHandler)
    -> CoreResult<TrayHandle>;

    /// Replace icon and tooltip of an existing tray icon.
    fn update_tray_icon(&self, tray: TrayHandle, props: &TrayIconProps) -> CoreResult<()>;

    /// Remove a tray icon from the notification area.
    fn remove_tray_icon(&self, tray: TrayHandle) -> CoreResult<()>;
}
