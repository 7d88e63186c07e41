mod selection_event;
mod tray_click;
mod tray_icon;

pub use {
    selection_event::SelectionEvent,
    tray_click::{ClickButton, TrayClick},
    tray_icon::{TrayIcon, TrayIconOptions},
};
