//! Tray icon with click routing to up to three menus.

use crate::{
    ClickButton, CoreResult, IconHandle, Menu, NativeBackend, SelectHandler, TrayClick,
    TrayHandle, TrayIconProps,
};

use std::{cell::RefCell, fmt, rc::Rc};

use tracing::{debug, info, instrument, warn};

/// A partial set of tray icon properties.
///
/// Fields left unset keep their current value when applied.
#[derive(Clone, Default)]
pub struct TrayIconOptions {
    menu: Option<Menu>,
    left_click_menu: Option<Menu>,
    right_click_menu: Option<Menu>,
    icon: Option<IconHandle>,
    tooltip: Option<String>,
}

impl TrayIconOptions {
    /// Empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Menu used when no button-specific menu applies.
    pub fn menu(mut self, menu: &Menu) -> Self {
        self.menu = Some(menu.clone());
        self
    }

    /// Menu for primary-button clicks.
    pub fn left_click_menu(mut self, menu: &Menu) -> Self {
        self.left_click_menu = Some(menu.clone());
        self
    }

    /// Menu for secondary-button clicks.
    pub fn right_click_menu(mut self, menu: &Menu) -> Self {
        self.right_click_menu = Some(menu.clone());
        self
    }

    /// Icon to display.
    pub fn icon(mut self, icon: IconHandle) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Hover text.
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl fmt::Debug for TrayIconOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrayIconOptions")
            .field("menu", &self.menu.as_ref().map(Menu::handle))
            .field("left_click_menu", &self.left_click_menu.as_ref().map(Menu::handle))
            .field("right_click_menu", &self.right_click_menu.as_ref().map(Menu::handle))
            .field("icon", &self.icon)
            .field("tooltip", &self.tooltip)
            .finish()
    }
}

struct TrayIconState {
    menu: Option<Menu>,
    left_click_menu: Option<Menu>,
    right_click_menu: Option<Menu>,
    icon: Option<IconHandle>,
    tooltip: Option<String>,
    native: Option<TrayHandle>,
    backend: Rc<dyn NativeBackend>,
}

impl Drop for TrayIconState {
    fn drop(&mut self) {
        if let Some(handle) = self.native.take()
            && let Err(e) = self.backend.remove_tray_icon(handle)
        {
            warn!(error = ?e, handle = handle.0, "Failed to remove tray icon");
        }
    }
}

/// Icon in the notification area.
///
/// `TrayIcon` is a handle; clones refer to the same icon. The native icon is
/// removed when the last handle is dropped.
#[derive(Clone)]
pub struct TrayIcon {
    inner: Rc<RefCell<TrayIconState>>,
}

impl TrayIcon {
    /// Create the native icon with the given options.
    #[instrument(
        skip(backend, options),
        fields(icon = ?options.icon, tooltip = ?options.tooltip)
    )]
    pub fn new(backend: Rc<dyn NativeBackend>, options: TrayIconOptions) -> CoreResult<Self> {
        let tray = Self {
            inner: Rc::new(RefCell::new(TrayIconState {
                menu: None,
                left_click_menu: None,
                right_click_menu: None,
                icon: None,
                tooltip: None,
                native: None,
                backend,
            })),
        };
        tray.set_properties(options)?;

        info!("Tray icon created");
        Ok(tray)
    }

    /// Merge `options` and refresh the native icon and tooltip.
    #[instrument(
        skip(self, options),
        fields(icon = ?options.icon, tooltip = ?options.tooltip)
    )]
    pub fn update(&self, options: TrayIconOptions) -> CoreResult<()> {
        self.set_properties(options)
    }

    /// Pick the menu for a click and run it.
    ///
    /// A secondary click without a right-click menu goes to the default menu,
    /// never to the left-click menu.
    #[instrument(skip(self))]
    pub fn route(&self, click: &TrayClick) -> CoreResult<()> {
        let target = {
            let state = self.inner.borrow();
            match (click.button, &state.right_click_menu, &state.left_click_menu) {
                (ClickButton::Secondary, Some(menu), _) => Some(menu.clone()),
                (ClickButton::Primary, _, Some(menu)) => Some(menu.clone()),
                _ => state.menu.clone(),
            }
        };

        match target {
            Some(menu) => menu.dispatch_selection(click.x, click.y, self),
            None => {
                debug!("No menu configured for click");
                Ok(())
            }
        }
    }

    /// Current icon.
    pub fn icon(&self) -> Option<IconHandle> {
        self.inner.borrow().icon
    }

    /// Current hover text.
    pub fn tooltip(&self) -> Option<String> {
        self.inner.borrow().tooltip.clone()
    }

    /// Default menu.
    pub fn menu(&self) -> Option<Menu> {
        self.inner.borrow().menu.clone()
    }

    /// Primary-button menu.
    pub fn left_click_menu(&self) -> Option<Menu> {
        self.inner.borrow().left_click_menu.clone()
    }

    /// Secondary-button menu.
    pub fn right_click_menu(&self) -> Option<Menu> {
        self.inner.borrow().right_click_menu.clone()
    }

    /// Native handle, once created.
    pub fn native_handle(&self) -> Option<TrayHandle> {
        self.inner.borrow().native
    }

    fn set_properties(&self, options: TrayIconOptions) -> CoreResult<()> {
        let (props, native, backend) = {
            let mut state = self.inner.borrow_mut();
            if let Some(menu) = options.menu {
                state.menu = Some(menu);
            }
            if let Some(menu) = options.left_click_menu {
                state.left_click_menu = Some(menu);
            }
            if let Some(menu) = options.right_click_menu {
                state.right_click_menu = Some(menu);
            }
            if let Some(icon) = options.icon {
                state.icon = Some(icon);
            }
            if let Some(tooltip) = options.tooltip {
                state.tooltip = Some(tooltip);
            }

            let props = TrayIconProps {
                icon: state.icon,
                tooltip: state.tooltip.clone(),
            };
            (props, state.native, Rc::clone(&state.backend))
        };

        match native {
            Some(handle) => backend.update_tray_icon(handle, &props),
            None => {
                let weak = Rc::downgrade(&self.inner);
                let on_select: SelectHandler = Rc::new(move |click: &TrayClick| {
                    match weak.upgrade() {
                        Some(inner) => TrayIcon { inner }.route(click),
                        None => Ok(()),
                    }
                });

                let handle = backend.create_tray_icon(&props, on_select)?;
                self.inner.borrow_mut().native = Some(handle);
                Ok(())
            }
        }
    }
}

impl PartialEq for TrayIcon {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for TrayIcon {}

impl fmt::Debug for TrayIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("TrayIcon")
            .field("native", &state.native)
            .field("icon", &state.icon)
            .field("tooltip", &state.tooltip)
            .field("menu", &state.menu.is_some())
            .field("left_click_menu", &state.left_click_menu.is_some())
            .field("right_click_menu", &state.right_click_menu.is_some())
            .finish()
    }
}
