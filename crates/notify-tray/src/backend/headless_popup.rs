//! Popup menus on platforms without `TrackPopupMenuEx`.
//!
//! Templates are decoded and kept current so the menu state can be logged,
//! but nothing is drawn and every popup reports dismissal.

use notify_tray_core::{
    CoreResult, MenuHandle, MenuItemDelta, MenuItemId, TrayError,
    template::{STATE_CHECKED, STATE_DISABLED, TemplateItem, parse_template},
};

use std::collections::HashMap;

use tao::window::Window;
use tracing::{debug, warn};

/// Registered menus as decoded templates.
#[derive(Default)]
pub(crate) struct PopupMenus {
    menus: HashMap<MenuHandle, TemplateItem>,
}

impl PopupMenus {
    pub(crate) fn new(_owner: &Window) -> Self {
        Self::default()
    }

    #[track_caller]
    pub(crate) fn register(&mut self, handle: MenuHandle, template: &[u8]) -> CoreResult<()> {
        let root = parse_template(template)?;
        debug!(handle = handle.0, records = root.walk().len(), "Decoded popup menu");
        self.menus.insert(handle, root);
        Ok(())
    }

    #[track_caller]
    pub(crate) fn update(
        &mut self,
        handle: MenuHandle,
        id: MenuItemId,
        delta: &MenuItemDelta,
    ) -> CoreResult<()> {
        let root = self
            .menus
            .get_mut(&handle)
            .ok_or_else(|| TrayError::native(format!("unknown menu handle {}", handle.0)))?;
        let record = find_record(root, id.get())
            .ok_or_else(|| TrayError::native(format!("menu item {id} not found")))?;

        apply_delta(record, delta);
        Ok(())
    }

    pub(crate) fn show(&self, handle: MenuHandle, x: i32, y: i32) -> CoreResult<Option<u32>> {
        let items = self
            .menus
            .get(&handle)
            .map(|root| root.walk().len().saturating_sub(1))
            .unwrap_or_default();
        warn!(handle = handle.0, x, y, items, "Popup menus are only drawn on Windows");
        Ok(None)
    }

    pub(crate) fn destroy(&mut self, handle: MenuHandle) -> CoreResult<()> {
        self.menus.remove(&handle);
        Ok(())
    }
}

/// Mirror a display delta onto a decoded record.
pub(crate) fn apply_delta(record: &mut TemplateItem, delta: &MenuItemDelta) {
    if let Some(text) = &delta.text {
        record.text.clone_from(text);
    }
    if let Some(disabled) = delta.disabled {
        set_bits(&mut record.state, STATE_DISABLED, disabled);
    }
    if let Some(checked) = delta.checked {
        set_bits(&mut record.state, STATE_CHECKED, checked);
    }
}

fn set_bits(state: &mut u32, bits: u32, on: bool) {
    if on {
        *state |= bits;
    } else {
        *state &= !bits;
    }
}

fn find_record(record: &mut TemplateItem, id: u32) -> Option<&mut TemplateItem> {
    if record.id == id && !record.is_separator() {
        return Some(record);
    }
    record
        .children
        .iter_mut()
        .find_map(|child| find_record(child, id))
}
