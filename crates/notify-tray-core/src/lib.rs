//! Notify-tray Core Library
//!
//! Tray icons with hierarchical popup menus: an item model that can be
//! mutated after the menu is shown, a bit-exact MENUEX template encoder, and
//! click routing. Platform calls go through [`NativeBackend`].
//!
//! # Example
//!
//! ```no_run
//! use notify_tray_core::{
//!     CoreResult, IdAllocator, Menu, MenuItem, MenuItemProps, MenuSeparator, NativeBackend,
//!     TrayIcon, TrayIconOptions,
//! };
//!
//! use std::rc::Rc;
//!
//! fn build(backend: Rc<dyn NativeBackend>) -> CoreResult<TrayIcon> {
//!     let mut ids = IdAllocator::default();
//!
//!     let checkable = MenuItem::builder()
//!         .text("Checkable")
//!         .checked(true)
//!         .on_click(|event| {
//!             let item = event.item();
//!             item.update(&MenuItemProps::new().checked(!item.checked()))
//!         })
//!         .build(&mut ids)?;
//!
//!     let menu = Menu::new(
//!         Rc::clone(&backend),
//!         vec![checkable.into(), MenuSeparator.into()],
//!     )?;
//!
//!     TrayIcon::new(backend, TrayIconOptions::new().menu(&menu).tooltip("Example"))
//! }
//! ```

mod error;
mod menu;
mod native;
pub mod template;
mod tray;

pub(crate) use menu::MenuBinding;

pub use {
    error::Result as CoreResult,
    error::TrayError,
    menu::{
        IdAllocator, Menu, MenuItem, MenuItemBuilder, MenuItemId, MenuItemProps, MenuNode,
        MenuSeparator, OnClick, nodes_from_toml,
    },
    native::{
        IconHandle, MenuHandle, MenuItemDelta, NativeBackend, SelectHandler, TrayHandle,
        TrayIconProps,
    },
    tray::{ClickButton, SelectionEvent, TrayClick, TrayIcon, TrayIconOptions},
};
