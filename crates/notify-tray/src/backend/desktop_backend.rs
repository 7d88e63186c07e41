//! `NativeBackend` over `tray-icon` and platform popup menus.

use crate::backend::PopupMenus;

use notify_tray_core::{
    ClickButton, CoreResult, IconHandle, MenuHandle, MenuItemDelta, MenuItemId, NativeBackend,
    SelectHandler, TrayClick, TrayError, TrayHandle, TrayIconProps,
};

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use tao::window::Window;
use tracing::{debug, info, instrument, warn};
use tray_icon::{
    Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent, TrayIconId,
};

struct NativeTray {
    icon: TrayIcon,
    on_select: SelectHandler,
}

/// Desktop tray backend. Lives on the UI thread.
pub(crate) struct DesktopBackend {
    popups: RefCell<PopupMenus>,
    trays: RefCell<HashMap<TrayHandle, NativeTray>>,
    icons: RefCell<HashMap<IconHandle, Icon>>,
    next_handle: Cell<u64>,
}

impl DesktopBackend {
    /// Backend whose popups are owned by `owner`.
    pub(crate) fn new(owner: &Window) -> Self {
        Self {
            popups: RefCell::new(PopupMenus::new(owner)),
            trays: RefCell::new(HashMap::new()),
            icons: RefCell::new(HashMap::new()),
            next_handle: Cell::new(0),
        }
    }

    /// Make an icon image available to tray icons.
    pub(crate) fn add_icon(&self, icon: Icon) -> IconHandle {
        let handle = IconHandle(self.next_handle());
        self.icons.borrow_mut().insert(handle, icon);
        handle
    }

    /// Forward a tray event to the handler of the icon it belongs to.
    #[instrument(skip(self))]
    pub(crate) fn handle_event(&self, event: TrayIconEvent) -> CoreResult<()> {
        let TrayIconEvent::Click {
            id,
            position,
            button,
            button_state: MouseButtonState::Up,
            ..
        } = event
        else {
            return Ok(());
        };

        let Some(handle) = tray_handle(&id) else {
            debug!(id = ?id, "Click on an unknown tray icon");
            return Ok(());
        };

        // Clone out so the handler may create or remove tray icons.
        let on_select = self
            .trays
            .borrow()
            .get(&handle)
            .map(|tray| tray.on_select.clone());

        let click = TrayClick {
            button: match button {
                MouseButton::Left => ClickButton::Primary,
                MouseButton::Right => ClickButton::Secondary,
                _ => ClickButton::Other,
            },
            x: position.x as i32,
            y: position.y as i32,
        };

        match on_select {
            Some(on_select) => on_select(&click),
            None => Ok(()),
        }
    }

    #[track_caller]
    fn icon(&self, handle: Option<IconHandle>) -> CoreResult<Option<Icon>> {
        handle
            .map(|handle| {
                self.icons
                    .borrow()
                    .get(&handle)
                    .cloned()
                    .ok_or_else(|| TrayError::native(format!("unknown icon handle {}", handle.0)))
            })
            .transpose()
    }

    fn next_handle(&self) -> u64 {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        handle
    }
}

impl NativeBackend for DesktopBackend {
    fn register_menu(&self, template: &[u8]) -> CoreResult<MenuHandle> {
        let handle = MenuHandle(self.next_handle());
        self.popups.borrow_mut().register(handle, template)?;
        Ok(handle)
    }

    fn update_menu(
        &self,
        menu: MenuHandle,
        id: MenuItemId,
        delta: &MenuItemDelta,
    ) -> CoreResult<()> {
        self.popups.borrow_mut().update(menu, id, delta)
    }

    fn show_popup(&self, menu: MenuHandle, x: i32, y: i32) -> CoreResult<Option<u32>> {
        self.popups.borrow().show(menu, x, y)
    }

    fn destroy_menu(&self, menu: MenuHandle) -> CoreResult<()> {
        self.popups.borrow_mut().destroy(menu)
    }

    fn create_tray_icon(
        &self,
        props: &TrayIconProps,
        on_select: SelectHandler,
    ) -> CoreResult<TrayHandle> {
        let handle = TrayHandle(self.next_handle());

        let mut builder = TrayIconBuilder::new().with_id(TrayIconId::new(handle.0.to_string()));
        if let Some(icon) = self.icon(props.icon)? {
            builder = builder.with_icon(icon);
        }
        if let Some(tooltip) = &props.tooltip {
            builder = builder.with_tooltip(tooltip);
        }

        let icon = builder
            .build()
            .map_err(|e| TrayError::native(format!("Failed to create tray icon: {}", e)))?;

        self.trays
            .borrow_mut()
            .insert(handle, NativeTray { icon, on_select });

        info!(handle = handle.0, "Native tray icon created");
        Ok(handle)
    }

    fn update_tray_icon(&self, tray: TrayHandle, props: &TrayIconProps) -> CoreResult<()> {
        let icon = self.icon(props.icon)?;
        let trays = self.trays.borrow();
        let native = trays
            .get(&tray)
            .ok_or_else(|| TrayError::native(format!("unknown tray handle {}", tray.0)))?;

        native
            .icon
            .set_icon(icon)
            .map_err(|e| TrayError::native(format!("Failed to update icon: {}", e)))?;
        native
            .icon
            .set_tooltip(props.tooltip.as_deref())
            .map_err(|e| TrayError::native(format!("Failed to update tooltip: {}", e)))?;

        Ok(())
    }

    fn remove_tray_icon(&self, tray: TrayHandle) -> CoreResult<()> {
        let removed = self.trays.borrow_mut().remove(&tray);
        if removed.is_none() {
            warn!(handle = tray.0, "Removing unknown tray icon");
        }
        Ok(())
    }
}

fn tray_handle(id: &TrayIconId) -> Option<TrayHandle> {
    id.0.parse().ok().map(TrayHandle)
}
