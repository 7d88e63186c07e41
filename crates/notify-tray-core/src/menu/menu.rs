//! Popup menu bound to a registered native template.

use crate::{
    CoreResult, MenuHandle, MenuItem, MenuItemDelta, MenuItemId, MenuNode, NativeBackend,
    SelectionEvent, TrayError, TrayIcon,
    menu::menu_node::{find_in, first_bound},
    template,
};

use std::{fmt, panic::Location, rc::Rc};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Link from an item to the native menu it is displayed in.
///
/// Holds the menu's native handle, not the [`Menu`] itself, so items never
/// keep their menu alive.
#[derive(Clone)]
pub(crate) struct MenuBinding {
    handle: MenuHandle,
    backend: Rc<dyn NativeBackend>,
}

impl MenuBinding {
    /// Forward a display change of one item to the native menu.
    pub(crate) fn native_update(&self, id: MenuItemId, delta: &MenuItemDelta) -> CoreResult<()> {
        self.backend.update_menu(self.handle, id, delta)
    }
}

struct MenuInner {
    items: Vec<MenuNode>,
    template: Vec<u8>,
    handle: MenuHandle,
    backend: Rc<dyn NativeBackend>,
}

impl Drop for MenuInner {
    fn drop(&mut self) {
        if let Err(e) = self.backend.destroy_menu(self.handle) {
            warn!(error = ?e, handle = self.handle.0, "Failed to destroy native menu");
        }
    }
}

/// A popup menu. Topology is fixed at construction; item display state is
/// changed through [`MenuItem::update`].
///
/// Clones share the same native menu, so one menu can serve several tray
/// icons.
#[derive(Clone)]
pub struct Menu {
    inner: Rc<MenuInner>,
}

impl Menu {
    /// Encode `items`, register the template and bind every item to it.
    #[track_caller]
    #[instrument(skip(backend, items), fields(count = items.len()))]
    pub fn new(backend: Rc<dyn NativeBackend>, items: Vec<MenuNode>) -> CoreResult<Self> {
        if let Some(id) = first_bound(&items) {
            return Err(TrayError::AlreadyBound {
                id: id.get(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let template = template::encode_template(&items);
        let handle = backend.register_menu(&template)?;

        let binding = MenuBinding {
            handle,
            backend: Rc::clone(&backend),
        };
        for item in items.iter().filter_map(MenuNode::as_item) {
            item.bind(&binding);
        }

        info!(
            handle = handle.0,
            template_len = template.len(),
            "Menu registered"
        );

        Ok(Self {
            inner: Rc::new(MenuInner {
                items,
                template,
                handle,
                backend,
            }),
        })
    }

    /// Top-level entries.
    pub fn items(&self) -> &[MenuNode] {
        &self.inner.items
    }

    /// Encoded template handed to the native layer.
    pub fn template(&self) -> &[u8] {
        &self.inner.template
    }

    /// Native handle of this menu.
    pub fn handle(&self) -> MenuHandle {
        self.inner.handle
    }

    /// Find an item anywhere in the tree by its raw id.
    pub fn find_by_id(&self, raw: u32) -> Option<MenuItem> {
        MenuItemId::from_raw(raw).and_then(|id| find_in(&self.inner.items, id))
    }

    /// Show the menu at screen coordinates, block until it closes and run the
    /// chosen item's callback.
    #[instrument(skip(self, origin), fields(handle = self.inner.handle.0))]
    pub fn dispatch_selection(&self, x: i32, y: i32, origin: &TrayIcon) -> CoreResult<()> {
        let Some(raw) = self.inner.backend.show_popup(self.inner.handle, x, y)? else {
            debug!("Menu dismissed");
            return Ok(());
        };
        if raw == 0 {
            debug!("Menu dismissed");
            return Ok(());
        }

        let Some(item) = self.find_by_id(raw) else {
            debug!(id = raw, "Selected id not in menu");
            return Ok(());
        };
        let Some(on_click) = item.on_click() else {
            debug!(id = raw, "Selected item has no click handler");
            return Ok(());
        };

        debug!(id = raw, "Dispatching menu selection");
        on_click(&SelectionEvent::new(origin.clone(), item))
    }
}

impl PartialEq for Menu {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Menu {}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("handle", &self.inner.handle)
            .field("items", &self.inner.items)
            .finish()
    }
}
