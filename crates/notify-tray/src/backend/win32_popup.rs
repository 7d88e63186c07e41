//! Win32 popup menus loaded straight from MENUEX templates.

use notify_tray_core::{CoreResult, MenuHandle, MenuItemDelta, MenuItemId, TrayError};

use std::{collections::HashMap, ffi::OsStr, os::windows::ffi::OsStrExt, ptr};

use tao::{platform::windows::WindowExtWindows, window::Window};
use tracing::{debug, warn};
use windows_sys::Win32::{
    Foundation::HWND,
    UI::WindowsAndMessaging::{
        CheckMenuItem, DestroyMenu, EnableMenuItem, GetSubMenu, HMENU, LoadMenuIndirectW,
        MENUITEMINFOW, MF_BYCOMMAND, MF_CHECKED, MF_ENABLED, MF_GRAYED, MF_UNCHECKED,
        MIIM_STRING, PostMessageW, SetForegroundWindow, SetMenuItemInfoW, TPM_RETURNCMD,
        TPM_RIGHTBUTTON, TrackPopupMenuEx, WM_NULL,
    },
};

struct LoadedMenu {
    /// Menu bar returned by `LoadMenuIndirectW`; owns `popup`.
    bar: HMENU,
    /// The "root" popup holding the real items.
    popup: HMENU,
}

/// Registered menus, shown as popups owned by a hidden window.
pub(crate) struct PopupMenus {
    owner: HWND,
    menus: HashMap<MenuHandle, LoadedMenu>,
}

impl PopupMenus {
    pub(crate) fn new(owner: &Window) -> Self {
        Self {
            owner: owner.hwnd() as HWND,
            menus: HashMap::new(),
        }
    }

    #[track_caller]
    pub(crate) fn register(&mut self, handle: MenuHandle, template: &[u8]) -> CoreResult<()> {
        // LoadMenuIndirectW wants DWORD alignment.
        let aligned: Vec<u32> = template
            .chunks(4)
            .map(|chunk| {
                let mut word = [0u8; 4];
                word[..chunk.len()].copy_from_slice(chunk);
                u32::from_ne_bytes(word)
            })
            .collect();

        let bar = unsafe { LoadMenuIndirectW(aligned.as_ptr().cast()) };
        if bar.is_null() {
            return Err(TrayError::native(std::io::Error::last_os_error()));
        }

        let popup = unsafe { GetSubMenu(bar, 0) };
        if popup.is_null() {
            unsafe { DestroyMenu(bar) };
            return Err(TrayError::native("template has no root popup"));
        }

        self.menus.insert(handle, LoadedMenu { bar, popup });
        debug!(handle = handle.0, "Loaded popup menu");
        Ok(())
    }

    #[track_caller]
    pub(crate) fn update(
        &mut self,
        handle: MenuHandle,
        id: MenuItemId,
        delta: &MenuItemDelta,
    ) -> CoreResult<()> {
        let popup = self.popup(handle)?;
        let raw = id.get();

        if let Some(disabled) = delta.disabled {
            let flag = if disabled { MF_GRAYED } else { MF_ENABLED };
            let previous = unsafe { EnableMenuItem(popup, raw, MF_BYCOMMAND | flag) };
            if previous == -1 {
                return Err(TrayError::native(format!("menu item {raw} not found")));
            }
        }

        if let Some(checked) = delta.checked {
            let flag = if checked { MF_CHECKED } else { MF_UNCHECKED };
            let previous = unsafe { CheckMenuItem(popup, raw, MF_BYCOMMAND | flag) };
            if previous == u32::MAX {
                return Err(TrayError::native(format!("menu item {raw} not found")));
            }
        }

        if let Some(text) = &delta.text {
            let mut wide: Vec<u16> = OsStr::new(text).encode_wide().chain(Some(0)).collect();

            let mut info: MENUITEMINFOW = unsafe { std::mem::zeroed() };
            info.cbSize = size_of::<MENUITEMINFOW>() as u32;
            info.fMask = MIIM_STRING;
            info.dwTypeData = wide.as_mut_ptr();

            if unsafe { SetMenuItemInfoW(popup, raw, 0, &info) } == 0 {
                return Err(TrayError::native(std::io::Error::last_os_error()));
            }
        }

        Ok(())
    }

    #[track_caller]
    pub(crate) fn show(&self, handle: MenuHandle, x: i32, y: i32) -> CoreResult<Option<u32>> {
        let popup = self.popup(handle)?;

        // Without foreground the popup never closes on an outside click.
        let chosen = unsafe {
            SetForegroundWindow(self.owner);
            let chosen = TrackPopupMenuEx(
                popup,
                TPM_RETURNCMD | TPM_RIGHTBUTTON,
                x,
                y,
                self.owner,
                ptr::null(),
            );
            PostMessageW(self.owner, WM_NULL, 0, 0);
            chosen
        };

        Ok(u32::try_from(chosen).ok().filter(|id| *id != 0))
    }

    #[track_caller]
    pub(crate) fn destroy(&mut self, handle: MenuHandle) -> CoreResult<()> {
        let Some(menu) = self.menus.remove(&handle) else {
            return Ok(());
        };

        if unsafe { DestroyMenu(menu.bar) } == 0 {
            return Err(TrayError::native(std::io::Error::last_os_error()));
        }
        Ok(())
    }

    #[track_caller]
    fn popup(&self, handle: MenuHandle) -> CoreResult<HMENU> {
        self.menus
            .get(&handle)
            .map(|menu| menu.popup)
            .ok_or_else(|| TrayError::native(format!("unknown menu handle {}", handle.0)))
    }
}

impl Drop for PopupMenus {
    fn drop(&mut self) {
        for (handle, menu) in self.menus.drain() {
            if unsafe { DestroyMenu(menu.bar) } == 0 {
                warn!(handle = handle.0, "Failed to destroy popup menu");
            }
        }
    }
}
