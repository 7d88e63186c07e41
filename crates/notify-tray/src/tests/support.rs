use notify_tray_core::{
    CoreResult, MenuHandle, MenuItem, MenuItemDelta, MenuItemId, MenuNode, NativeBackend,
    SelectHandler, TrayHandle, TrayIconProps,
};

use std::cell::{Cell, RefCell};

/// Backend double that picks whatever item is queued for the next popup.
#[derive(Default)]
pub(crate) struct StubBackend {
    next_selection: Cell<Option<u32>>,
    updates: RefCell<Vec<(u32, MenuItemDelta)>>,
    next_handle: Cell<u64>,
}

impl StubBackend {
    pub(crate) fn select_next(&self, item: &MenuItem) {
        self.next_selection.set(Some(item.id().get()));
    }

    pub(crate) fn updates(&self) -> Vec<(u32, MenuItemDelta)> {
        self.updates.borrow().clone()
    }

    fn next_handle(&self) -> u64 {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        handle
    }
}

impl NativeBackend for StubBackend {
    fn register_menu(&self, _template: &[u8]) -> CoreResult<MenuHandle> {
        Ok(MenuHandle(self.next_handle()))
    }

    fn update_menu(
        &self,
        _menu: MenuHandle,
        id: MenuItemId,
        delta: &MenuItemDelta,
    ) -> CoreResult<()> {
        self.updates.borrow_mut().push((id.get(), delta.clone()));
        Ok(())
    }

    fn show_popup(&self, _menu: MenuHandle, _x: i32, _y: i32) -> CoreResult<Option<u32>> {
        Ok(self.next_selection.take())
    }

    fn destroy_menu(&self, _menu: MenuHandle) -> CoreResult<()> {
        Ok(())
    }

    fn create_tray_icon(
        &self,
        _props: &TrayIconProps,
        _on_select: SelectHandler,
    ) -> CoreResult<TrayHandle> {
        Ok(TrayHandle(self.next_handle()))
    }

    fn update_tray_icon(&self, _tray: TrayHandle, _props: &TrayIconProps) -> CoreResult<()> {
        Ok(())
    }

    fn remove_tray_icon(&self, _tray: TrayHandle) -> CoreResult<()> {
        Ok(())
    }
}

/// Item with the given label anywhere in the tree.
pub(crate) fn find_by_text(nodes: &[MenuNode], text: &str) -> Option<MenuItem> {
    nodes
        .iter()
        .filter_map(MenuNode::as_item)
        .find_map(|item| {
            if item.text() == text {
                return Some(item.clone());
            }
            item.children()
                .and_then(|children| find_by_text(&children, text))
        })
}
